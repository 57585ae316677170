use glam::Vec2;
use internment::Intern;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
  pub icao: Intern<String>,
  pub name: String,
  pub pos: Vec2,
}

/// The airports this session knows about: (ICAO, name, latitude, longitude).
pub const AIRPORT_DATABASE: [(&str, &str, f32, f32); 5] = [
  ("EGLL", "London Heathrow", 51.4700, -0.4543),
  ("EDDF", "Frankfurt", 50.0379, 8.5622),
  ("KJFK", "Kennedy", 40.6413, -73.7781),
  ("KLAX", "Los Angeles", 33.9416, -118.4085),
  ("LFPG", "Paris CDG", 49.0097, 2.5479),
];

pub fn known_airports() -> Vec<Airport> {
  AIRPORT_DATABASE
    .into_iter()
    .map(|(icao, name, lat, lon)| Airport {
      icao: Intern::from_ref(icao),
      name: name.to_owned(),
      pos: Vec2::new(lat, lon),
    })
    .collect()
}

/// Resolves an ICAO code against the database. Unknown codes resolve to a
/// zeroed placeholder so a session never fails to construct.
pub fn lookup(icao: Intern<String>) -> Airport {
  known_airports()
    .into_iter()
    .find(|a| a.icao == icao)
    .unwrap_or(Airport {
      icao,
      name: "Unknown".to_owned(),
      pos: Vec2::ZERO,
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_lookup_known() {
    let heathrow = lookup(Intern::from_ref("EGLL"));
    assert_eq!(heathrow.name, "London Heathrow");
    assert_eq!(heathrow.pos, Vec2::new(51.4700, -0.4543));
  }

  #[test]
  fn test_lookup_unknown_is_placeholder() {
    let airport = lookup(Intern::from_ref("ZZZZ"));
    assert_eq!(airport.name, "Unknown");
    assert_eq!(airport.pos, Vec2::ZERO);
  }
}
