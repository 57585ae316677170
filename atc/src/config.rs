use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One radio band: a fixed MHz integer part and an inclusive kHz range for
/// the decimal part. Generated decimals are floored to the 25 kHz grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyBand {
  pub mhz: u16,
  pub min_khz: u16,
  pub max_khz: u16,
}

impl FrequencyBand {
  pub const fn new(mhz: u16, min_khz: u16, max_khz: u16) -> Self {
    Self {
      mhz,
      min_khz,
      max_khz,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyBands {
  pub clearance: FrequencyBand,
  pub ground: FrequencyBand,
  pub tower: FrequencyBand,
  pub departure: FrequencyBand,
  pub approach: FrequencyBand,
  pub center: FrequencyBand,
}

impl Default for FrequencyBands {
  fn default() -> Self {
    Self {
      clearance: FrequencyBand::new(121, 700, 900),
      ground: FrequencyBand::new(121, 600, 900),
      tower: FrequencyBand::new(118, 100, 900),
      departure: FrequencyBand::new(119, 100, 900),
      approach: FrequencyBand::new(120, 100, 900),
      center: FrequencyBand::new(132, 100, 900),
    }
  }
}

/// Session tunables. Every threshold the controller consults lives here so
/// tests can run against alternate profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
  /// AGL altitude (ft) above which a departing aircraft is handed to
  /// departure control.
  pub takeoff_agl: f32,
  /// AGL altitude (ft) above which the initial climb clearance is issued.
  pub initial_climb_agl: f32,
  /// MSL altitude (ft) below which the approach clearance is issued.
  pub approach_altitude: f32,
  /// MSL altitude (ft) below which the aircraft is switched to tower.
  pub final_approach_altitude: f32,
  /// Groundspeed (knots) below which a landed aircraft has rolled out.
  pub rollout_speed: f32,
  /// Window (ft) below cruise altitude at which cruise is considered
  /// captured.
  pub cruise_capture_window: f32,
  /// Floor (ft MSL) of Class A airspace.
  pub class_a_floor: f32,
  /// Distance (nm) from the active sector boundary that triggers a handoff
  /// check.
  pub handoff_threshold_nm: f32,

  /// First staged descent fires below this MSL altitude (ft).
  pub descent_first_below: f32,
  /// Second staged descent fires below this MSL altitude (ft).
  pub descent_second_below: f32,
  /// Altitude (ft) assigned by the initial descent clearance.
  pub initial_descent_altitude: u32,
  /// Altitude (ft) assigned by the intermediate descent clearance.
  pub intermediate_descent_altitude: u32,

  /// Not-before hint between line-up and takeoff clearances.
  pub takeoff_pacing: Duration,
  /// Not-before hint between a handoff instruction and the frequency switch.
  pub handoff_switch_pacing: Duration,
  /// Not-before hint between the frequency switch and the check-in.
  pub check_in_pacing: Duration,
  /// Not-before hint ahead of the one-time cruise check.
  pub cruise_check_pacing: Duration,

  pub frequency_bands: FrequencyBands,
}

impl Default for SessionConfig {
  fn default() -> Self {
    Self {
      takeoff_agl: 100.0,
      initial_climb_agl: 1500.0,
      approach_altitude: 10000.0,
      final_approach_altitude: 3000.0,
      rollout_speed: 60.0,
      cruise_capture_window: 1000.0,
      class_a_floor: 18000.0,
      handoff_threshold_nm: 15.0,

      descent_first_below: 29000.0,
      descent_second_below: 19000.0,
      initial_descent_altitude: 28000,
      intermediate_descent_altitude: 18000,

      takeoff_pacing: Duration::from_secs(3),
      handoff_switch_pacing: Duration::from_secs(2),
      check_in_pacing: Duration::from_secs(1),
      cruise_check_pacing: Duration::from_secs(5),

      frequency_bands: FrequencyBands::default(),
    }
  }
}
