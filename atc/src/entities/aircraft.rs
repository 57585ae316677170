use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry;

/// One telemetry sample from the aircraft, as supplied by the external
/// telemetry provider each tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AircraftState {
  /// (latitude, longitude) in degrees.
  pub pos: Vec2,
  pub altitude_msl: f32,
  pub altitude_agl: f32,
  pub groundspeed: f32,
  pub heading: f32,
  pub on_ground: bool,
  pub vertical_speed: f32,
}

impl AircraftState {
  pub fn distance_to(&self, point: Vec2) -> f32 {
    geometry::distance_nm(self.pos, point)
  }
}
