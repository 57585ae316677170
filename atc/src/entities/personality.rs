use serde::{Deserialize, Serialize};
use turborand::{TurboRand, rng::Rng};

use crate::entities::sector::Position;

const ALTERNATE_CLOSINGS: [&str; 3] =
  ["safe flight", "have a good one", "fly safe"];
const CLOSING_PLEASANTRY: &str = "good day";
const COURTESY_CLAUSE: &str = ", advise ready to taxi";

/// Continuous traits of a controller voice. One value per position type,
/// shared read-only by every sector of that type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Personality {
  pub formality: f32,
  pub friendliness: f32,
  pub verbosity: f32,
  pub strictness: f32,
  pub speech_rate: f32,
}

impl Default for Personality {
  fn default() -> Self {
    Self {
      formality: 0.7,
      friendliness: 0.5,
      verbosity: 0.5,
      strictness: 0.5,
      speech_rate: 1.0,
    }
  }
}

impl Personality {
  pub fn for_position(position: Position) -> Self {
    let (formality, friendliness, verbosity, strictness) = match position {
      Position::Clearance => (0.9, 0.5, 0.8, 0.7),
      Position::Ground => (0.8, 0.4, 0.3, 0.9),
      Position::Tower => (0.8, 0.6, 0.5, 0.8),
      Position::Departure => (0.7, 0.6, 0.6, 0.6),
      Position::Center => (0.6, 0.7, 0.7, 0.5),
      Position::Approach => (0.7, 0.7, 0.6, 0.7),
    };

    Self {
      formality,
      friendliness,
      verbosity,
      strictness,
      speech_rate: 1.0,
    }
  }

  /// Applies the trait rules to a rendered message. Deterministic given the
  /// random source; each rule runs at most once, in a fixed order.
  pub fn modify(&self, message: &str, rng: &mut Rng) -> String {
    let mut message = message.to_owned();

    // Friendly controllers sometimes swap the closing pleasantry.
    if self.friendliness > 0.7 {
      let start = message.to_lowercase().find(CLOSING_PLEASANTRY);
      if let Some(start) = start {
        if rng.f32() < 0.3 {
          if let Some(closing) = rng.sample(&ALTERNATE_CLOSINGS) {
            message
              .replace_range(start..start + CLOSING_PLEASANTRY.len(), closing);
          }
        }
      }
    }

    // Strict and terse controllers drop the courtesy words.
    if self.strictness > 0.7 && self.verbosity < 0.4 {
      message = message.replace(COURTESY_CLAUSE, "");
      message = message.replace(" please", "");
    }

    // Verbose controllers sometimes tack a thank-you onto instructions.
    // Only the trailing period is touched so embedded decimals survive.
    if self.verbosity > 0.7
      && message.to_lowercase().contains("maintain")
      && rng.f32() < 0.4
    {
      if let Some(stripped) = message.strip_suffix('.') {
        message = format!("{stripped}, thank you.");
      }
    }

    message
  }

  /// Short label for display, derived from threshold bands on the traits.
  pub fn describe(&self) -> String {
    let mut labels: Vec<&str> = Vec::new();
    if self.formality > 0.7 {
      labels.push("Formal");
    }
    if self.friendliness > 0.6 {
      labels.push("Friendly");
    }
    if self.strictness > 0.7 {
      labels.push("Strict");
    }
    if self.verbosity < 0.4 {
      labels.push("Concise");
    } else if self.verbosity > 0.7 {
      labels.push("Verbose");
    }

    if labels.is_empty() {
      "Standard".to_owned()
    } else {
      labels.join(", ")
    }
  }
}
