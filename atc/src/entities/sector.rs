use core::fmt;

use glam::Vec2;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use turborand::{TurboRand, rng::Rng};

use crate::{
  config::{FrequencyBand, FrequencyBands, SessionConfig},
  entities::{
    aircraft::AircraftState, airport, flight_plan::FlightPlan,
    personality::Personality,
  },
  geometry,
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Position {
  Clearance,
  Ground,
  Tower,
  Departure,
  Center,
  Approach,
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Position::Clearance => write!(f, "Clearance"),
      Position::Ground => write!(f, "Ground"),
      Position::Tower => write!(f, "Tower"),
      Position::Departure => write!(f, "Departure"),
      Position::Center => write!(f, "Center"),
      Position::Approach => write!(f, "Approach"),
    }
  }
}

/// A radio frequency on the 25 kHz grid, split into its MHz integer part and
/// kHz decimal part so grid alignment stays exact.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct Frequency {
  pub mhz: u16,
  pub khz: u16,
}

impl Frequency {
  /// Draws a frequency from a band, flooring the candidate decimal to the
  /// nearest 25 kHz channel.
  pub fn random(band: FrequencyBand, rng: &mut Rng) -> Self {
    let khz = rng.u16(band.min_khz..=band.max_khz);
    Self {
      mhz: band.mhz,
      khz: (khz / 25) * 25,
    }
  }
}

impl fmt::Display for Frequency {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{:03}", self.mhz, self.khz)
  }
}

/// One generated frequency per position type, shared by every sector of that
/// type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequencies {
  pub clearance: Frequency,
  pub ground: Frequency,
  pub tower: Frequency,
  pub departure: Frequency,
  pub approach: Frequency,
  pub center: Frequency,
}

impl Frequencies {
  pub fn random(bands: &FrequencyBands, rng: &mut Rng) -> Self {
    Self {
      clearance: Frequency::random(bands.clearance, rng),
      ground: Frequency::random(bands.ground, rng),
      tower: Frequency::random(bands.tower, rng),
      departure: Frequency::random(bands.departure, rng),
      approach: Frequency::random(bands.approach, rng),
      center: Frequency::random(bands.center, rng),
    }
  }
}

/// A volume of airspace owned by one controller position and frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ATCSector {
  pub name: String,
  pub position: Position,
  pub frequency: Frequency,
  pub center: Vec2,
  pub radius_nm: f32,
  pub alt_min: f32,
  pub alt_max: f32,
  pub personality: Personality,
}

impl ATCSector {
  pub fn is_in_sector(&self, state: &AircraftState) -> bool {
    if !(self.alt_min..=self.alt_max).contains(&state.altitude_msl) {
      return false;
    }

    state.distance_to(self.center) <= self.radius_nm
  }

  /// Distance to the sector's lateral boundary; negative when outside.
  pub fn distance_to_boundary(&self, state: &AircraftState) -> f32 {
    self.radius_nm - state.distance_to(self.center)
  }
}

/// The fixed, ordered sector list for a flight plan, plus the active sector.
///
/// Sector volumes overlap (ground and tower share an airport), so list order
/// is the tie-break everywhere and must be preserved exactly as constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorRegistry {
  sectors: Vec<ATCSector>,
  frequencies: Frequencies,
  active: Option<usize>,
  handoff_threshold_nm: f32,
}

fn sector(
  name: String,
  position: Position,
  frequency: Frequency,
  center: Vec2,
  radius_nm: f32,
  alt_min: f32,
  alt_max: f32,
) -> ATCSector {
  ATCSector {
    name,
    position,
    frequency,
    center,
    radius_nm,
    alt_min,
    alt_max,
    personality: Personality::for_position(position),
  }
}

impl SectorRegistry {
  pub fn new(
    flight_plan: &FlightPlan,
    config: &SessionConfig,
    rng: &mut Rng,
  ) -> Self {
    let frequencies = Frequencies::random(&config.frequency_bands, rng);

    let dep = airport::lookup(flight_plan.departure);
    let arr = airport::lookup(flight_plan.arrival);
    let mid = geometry::midpoint(dep.pos, arr.pos);

    let sectors = vec![
      sector(
        format!("{} Clearance", flight_plan.departure),
        Position::Clearance,
        frequencies.clearance,
        dep.pos,
        5.0,
        0.0,
        1000.0,
      ),
      sector(
        format!("{} Ground", flight_plan.departure),
        Position::Ground,
        frequencies.ground,
        dep.pos,
        5.0,
        0.0,
        500.0,
      ),
      sector(
        format!("{} Tower", flight_plan.departure),
        Position::Tower,
        frequencies.tower,
        dep.pos,
        10.0,
        0.0,
        3000.0,
      ),
      sector(
        format!("{} Departure", flight_plan.departure),
        Position::Departure,
        frequencies.departure,
        dep.pos,
        40.0,
        500.0,
        18000.0,
      ),
      sector(
        "Center".to_owned(),
        Position::Center,
        frequencies.center,
        mid,
        200.0,
        18000.0,
        60000.0,
      ),
      sector(
        format!("{} Approach", flight_plan.arrival),
        Position::Approach,
        frequencies.approach,
        arr.pos,
        40.0,
        1000.0,
        18000.0,
      ),
      sector(
        format!("{} Tower", flight_plan.arrival),
        Position::Tower,
        frequencies.tower,
        arr.pos,
        10.0,
        0.0,
        3000.0,
      ),
      sector(
        format!("{} Ground", flight_plan.arrival),
        Position::Ground,
        frequencies.ground,
        arr.pos,
        5.0,
        0.0,
        500.0,
      ),
    ];

    Self {
      sectors,
      frequencies,
      active: None,
      handoff_threshold_nm: config.handoff_threshold_nm,
    }
  }

  pub fn sectors(&self) -> &[ATCSector] {
    &self.sectors
  }

  pub fn frequencies(&self) -> Frequencies {
    self.frequencies
  }

  pub fn active(&self) -> Option<&ATCSector> {
    self.active.map(|index| &self.sectors[index])
  }

  pub fn active_frequency(&self) -> Option<Frequency> {
    self.active().map(|sector| sector.frequency)
  }

  /// Tunes to a frequency by linear search. A miss leaves the active sector
  /// unchanged and returns `false`; that is a normal outcome, not an error.
  pub fn set_active(&mut self, frequency: Frequency) -> bool {
    let index = self
      .sectors
      .iter()
      .position(|sector| sector.frequency == frequency);

    match index {
      Some(index) => {
        self.active = Some(index);
        true
      }
      None => false,
    }
  }

  /// Activates a sector by list index, for handoffs that already resolved
  /// their target.
  pub fn activate(&mut self, index: usize) -> bool {
    if index < self.sectors.len() {
      self.active = Some(index);
      true
    } else {
      false
    }
  }

  /// First sector (list order) whose membership test passes.
  pub fn find_matching(&self, state: &AircraftState) -> Option<usize> {
    self
      .sectors
      .iter()
      .position(|sector| sector.is_in_sector(state))
  }

  /// Surfaces a handoff target only near the active sector's boundary: when
  /// the aircraft is within the threshold of the boundary and the matching
  /// sector differs from the active one. An aircraft deep inside the active
  /// sector never triggers a handoff, even if another sector also contains
  /// it.
  pub fn check_handoff(&self, state: &AircraftState) -> Option<usize> {
    let active = self.active?;
    let boundary = self.sectors[active].distance_to_boundary(state);

    if boundary < self.handoff_threshold_nm {
      let next = self.find_matching(state)?;
      if next != active {
        return Some(next);
      }
    }

    None
  }

  /// Deduplicated (position, frequency, name) rows for display, preserving
  /// construction order.
  pub fn frequency_list(&self) -> Vec<(Position, Frequency, String)> {
    self
      .sectors
      .iter()
      .unique_by(|sector| (sector.position, sector.frequency))
      .map(|sector| (sector.position, sector.frequency, sector.name.clone()))
      .collect()
  }
}
