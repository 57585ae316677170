use core::fmt;

use serde::{Deserialize, Serialize};

/// The flight lifecycle, in order. Declaration order is the documented
/// phase order, so `Ord` gives the monotonic progression under automatic
/// transitions. Taxi In and Complete are currently unreachable from the
/// transition logic; they are kept for the documented lifecycle.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
  ColdAndDark,
  ClearanceDelivery,
  PushbackApproved,
  TaxiOut,
  LineUp,
  TakeoffClearance,
  Departure,
  Climb,
  Cruise,
  TopOfDescent,
  Descent,
  Approach,
  FinalApproach,
  LandingClearance,
  Landed,
  TaxiIn,
  Parking,
  Complete,
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Phase::ColdAndDark => write!(f, "Cold & Dark"),
      Phase::ClearanceDelivery => write!(f, "Clearance Delivery"),
      Phase::PushbackApproved => write!(f, "Pushback Approved"),
      Phase::TaxiOut => write!(f, "Taxi Out"),
      Phase::LineUp => write!(f, "Line Up"),
      Phase::TakeoffClearance => write!(f, "Takeoff Clearance"),
      Phase::Departure => write!(f, "Departure"),
      Phase::Climb => write!(f, "Climb"),
      Phase::Cruise => write!(f, "Cruise"),
      Phase::TopOfDescent => write!(f, "Top of Descent"),
      Phase::Descent => write!(f, "Descent"),
      Phase::Approach => write!(f, "Approach"),
      Phase::FinalApproach => write!(f, "Final Approach"),
      Phase::LandingClearance => write!(f, "Landing Clearance"),
      Phase::Landed => write!(f, "Landed"),
      Phase::TaxiIn => write!(f, "Taxi In"),
      Phase::Parking => write!(f, "Parking"),
      Phase::Complete => write!(f, "Complete"),
    }
  }
}
