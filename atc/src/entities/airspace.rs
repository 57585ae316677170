use core::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{
  config::SessionConfig,
  entities::{aircraft::AircraftState, airport},
};

const CLASS_B_RADIUS_NM: f32 = 30.0;
const CLASS_B_CEILING_FT: f32 = 10000.0;
const CLASS_E_FLOOR_FT: f32 = 1200.0;
const GLOBAL_RADIUS_NM: f32 = 999999.0;
const CEILING_FT: f32 = 60000.0;

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
#[serde(rename_all = "lowercase")]
pub enum AirspaceClass {
  A,
  B,
  C,
  D,
  E,
  G,
}

impl fmt::Display for AirspaceClass {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AirspaceClass::A => write!(f, "Class A"),
      AirspaceClass::B => write!(f, "Class B"),
      AirspaceClass::C => write!(f, "Class C"),
      AirspaceClass::D => write!(f, "Class D"),
      AirspaceClass::E => write!(f, "Class E"),
      AirspaceClass::G => write!(f, "Class G"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirspaceVolume {
  pub name: String,
  pub class: AirspaceClass,
  pub center: Vec2,
  pub radius_nm: f32,
  pub floor_ft: f32,
  pub ceiling_ft: f32,
}

impl AirspaceVolume {
  pub fn contains(&self, state: &AircraftState) -> bool {
    if !(self.floor_ft..=self.ceiling_ft).contains(&state.altitude_msl) {
      return false;
    }

    state.distance_to(self.center) <= self.radius_nm
  }
}

/// Tracks which airspace class owns the aircraft and detects transitions.
///
/// The volume list is fixed at construction and scanned in order; the first
/// match wins, so overlapping volumes resolve by construction order. Class G
/// is the implicit default when nothing matches.
#[derive(Debug, Clone, PartialEq)]
pub struct AirspaceMonitor {
  current: AirspaceClass,
  volumes: Vec<AirspaceVolume>,
  class_a_floor: f32,
}

impl AirspaceMonitor {
  pub fn new(config: &SessionConfig) -> Self {
    let mut volumes = Vec::new();

    volumes.push(AirspaceVolume {
      name: "High Altitude Airspace".to_owned(),
      class: AirspaceClass::A,
      center: Vec2::ZERO,
      radius_nm: GLOBAL_RADIUS_NM,
      floor_ft: config.class_a_floor,
      ceiling_ft: CEILING_FT,
    });

    for airport in airport::known_airports() {
      volumes.push(AirspaceVolume {
        name: format!("{} Class B", airport.name),
        class: AirspaceClass::B,
        center: airport.pos,
        radius_nm: CLASS_B_RADIUS_NM,
        floor_ft: 0.0,
        ceiling_ft: CLASS_B_CEILING_FT,
      });
    }

    volumes.push(AirspaceVolume {
      name: "Controlled Airspace".to_owned(),
      class: AirspaceClass::E,
      center: Vec2::ZERO,
      radius_nm: GLOBAL_RADIUS_NM,
      floor_ft: CLASS_E_FLOOR_FT,
      ceiling_ft: config.class_a_floor - 1.0,
    });

    Self {
      current: AirspaceClass::G,
      volumes,
      class_a_floor: config.class_a_floor,
    }
  }

  pub fn current(&self) -> AirspaceClass {
    self.current
  }

  pub fn volumes(&self) -> &[AirspaceVolume] {
    &self.volumes
  }

  /// Pure classification of a sample against the fixed volume list.
  pub fn classify(&self, state: &AircraftState) -> AirspaceClass {
    // Class A is altitude-only and checked before any volume.
    if state.altitude_msl >= self.class_a_floor {
      return AirspaceClass::A;
    }

    self
      .volumes
      .iter()
      .find(|volume| volume.contains(state))
      .map(|volume| volume.class)
      .unwrap_or(AirspaceClass::G)
  }

  /// Reclassifies and stores the result, reporting whether it changed. The
  /// stored class is overwritten even when unchanged.
  pub fn check(&mut self, state: &AircraftState) -> (AirspaceClass, bool) {
    let class = self.classify(state);
    let changed = class != self.current;
    self.current = class;

    (class, changed)
  }
}

/// Entry announcement for a class, interpolating the raw callsign.
pub fn entry_message(class: AirspaceClass, callsign: &str) -> Option<String> {
  let message = match class {
    AirspaceClass::A => format!(
      "{callsign}, entering Class Alpha airspace, flight level one eight zero and above."
    ),
    AirspaceClass::B => format!(
      "{callsign}, entering Class Bravo airspace, maintain assigned altitude."
    ),
    AirspaceClass::C => {
      format!("{callsign}, Class Charlie airspace, radar contact.")
    }
    AirspaceClass::D => {
      format!("{callsign}, entering Class Delta airspace.")
    }
    AirspaceClass::E => format!("{callsign}, controlled airspace."),
    AirspaceClass::G => {
      format!("{callsign}, uncontrolled airspace, VFR advisories available.")
    }
  };

  Some(message)
}
