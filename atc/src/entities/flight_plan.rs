use internment::Intern;
use serde::{Deserialize, Serialize};
use turborand::{TurboRand, rng::Rng};

/// Transponder codes that must never be assigned: the all-zeros code and the
/// hijack, radio-failure and emergency codes.
pub const RESERVED_SQUAWKS: [&str; 4] = ["0000", "7500", "7600", "7700"];

/// Everything the session knows about the flight, immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
  pub callsign: String,

  pub departure: Intern<String>,
  pub departure_runway: String,
  pub arrival: Intern<String>,
  pub arrival_runway: String,

  pub sid: String,
  pub star: String,

  /// Cruise altitude in feet MSL.
  pub cruise_altitude: u32,
  /// Cruise altitude as a three-digit flight-level string, e.g. "370".
  pub cruise_altitude_fl: String,

  pub route: String,
  pub distance_nm: f32,
  pub squawk: String,
}

impl FlightPlan {
  /// The deterministic fallback plan used when no external flight-plan
  /// provider is available.
  pub fn demo(rng: &mut Rng) -> Self {
    Self {
      callsign: "SPEEDBIRD123".to_owned(),
      departure: Intern::from_ref("EGLL"),
      departure_runway: "27R".to_owned(),
      arrival: Intern::from_ref("EDDF"),
      arrival_runway: "25C".to_owned(),
      sid: "BUZAD2G".to_owned(),
      star: "TEKTU1A".to_owned(),
      cruise_altitude: 37000,
      cruise_altitude_fl: flight_level(37000),
      route: "BUZAD L9 KONAN".to_owned(),
      distance_nm: 420.0,
      squawk: generate_squawk(rng),
    }
  }

  /// Distance from the destination at which descent should begin: three
  /// miles per thousand feet to lose, plus a ten-mile buffer.
  pub fn tod_distance(&self) -> f32 {
    let altitude_to_lose = self.cruise_altitude as f32 - 3000.0;
    (altitude_to_lose / 1000.0) * 3.0 + 10.0
  }
}

/// Formats an altitude in feet as a three-digit flight-level string.
pub fn flight_level(altitude: u32) -> String {
  format!("{:03}", altitude / 100)
}

/// Generates a 4-digit octal squawk code, rerolling reserved codes.
pub fn generate_squawk(rng: &mut Rng) -> String {
  loop {
    let mut code = String::new();
    for _ in 0..4 {
      code.push(char::from(b'0' + rng.u8(0..=7)));
    }

    if !RESERVED_SQUAWKS.contains(&code.as_str()) {
      return code;
    }
  }
}
