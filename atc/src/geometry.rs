use glam::Vec2;

// Positions throughout the crate are (latitude, longitude) pairs in degrees,
// stored as a `Vec2` with `x` = latitude and `y` = longitude.

pub const EARTH_RADIUS_NM: f32 = 3440.065;

/// Great-circle distance between two coordinates in nautical miles, via the
/// haversine formula.
pub fn distance_nm(a: Vec2, b: Vec2) -> f32 {
  let lat1 = a.x.to_radians();
  let lat2 = b.x.to_radians();
  let dlat = (b.x - a.x).to_radians();
  let dlon = (b.y - a.y).to_radians();

  let h = (dlat / 2.0).sin().powi(2)
    + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

  EARTH_RADIUS_NM * 2.0 * h.sqrt().asin()
}

/// Arithmetic midpoint between two coordinates. Good enough for placing an
/// enroute sector between two airports.
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
  (a + b) * 0.5
}
