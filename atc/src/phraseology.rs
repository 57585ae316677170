use core::fmt;

use crate::{
  entities::sector::{Frequency, Position},
  phonetic, spell_callsign,
};

/// One entry in the phraseology catalogue. Rendering is a pure function of
/// the carried fields; personality modulation happens after rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum PhraseKind {
  ClearanceDelivery {
    arrival: String,
    sid: String,
    cruise_fl: String,
    departure_frequency: Frequency,
    squawk: String,
  },
  Pushback,
  TaxiOut {
    runway: String,
  },
  LineUp {
    runway: String,
  },
  Takeoff {
    runway: String,
  },
  ContactDeparture {
    frequency: Frequency,
  },
  Climb {
    flight_level: String,
  },
  CruiseCheck {
    flight_level: String,
  },
  TopOfDescent {
    distance_nm: u32,
  },
  Descent {
    altitude_ft: u32,
  },
  ExpectStar {
    star: String,
    runway: String,
  },
  Approach {
    runway: String,
  },
  ContactTower {
    frequency: Frequency,
  },
  Landing {
    runway: String,
  },
  ExitRunway,
  TaxiToGate,
  Parking,
  /// Generic frequency handoff. Carries the position actually issuing the
  /// instruction; there is no placeholder position to overwrite.
  Handoff {
    position: Position,
    controller: String,
    frequency: Frequency,
  },
  /// Check-in acknowledgment from the controller just tuned.
  CheckIn {
    position: Position,
    flight_level: String,
  },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
  pub callsign: String,
  pub kind: PhraseKind,
}

impl Phrase {
  pub fn new(callsign: impl Into<String>, kind: PhraseKind) -> Self {
    Self {
      callsign: callsign.into(),
      kind,
    }
  }

  /// The position that issues this phrase.
  pub fn position(&self) -> Position {
    match &self.kind {
      PhraseKind::ClearanceDelivery { .. } => Position::Clearance,
      PhraseKind::Pushback
      | PhraseKind::TaxiOut { .. }
      | PhraseKind::TaxiToGate
      | PhraseKind::Parking => Position::Ground,
      PhraseKind::LineUp { .. }
      | PhraseKind::Takeoff { .. }
      | PhraseKind::ContactDeparture { .. }
      | PhraseKind::Landing { .. }
      | PhraseKind::ExitRunway => Position::Tower,
      PhraseKind::Climb { .. } => Position::Departure,
      PhraseKind::CruiseCheck { .. }
      | PhraseKind::TopOfDescent { .. }
      | PhraseKind::Descent { .. }
      | PhraseKind::ExpectStar { .. } => Position::Center,
      PhraseKind::Approach { .. } | PhraseKind::ContactTower { .. } => {
        Position::Approach
      }
      PhraseKind::Handoff { position, .. }
      | PhraseKind::CheckIn { position, .. } => *position,
    }
  }
}

impl fmt::Display for Phrase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let callsign = spell_callsign(&self.callsign);

    match &self.kind {
      PhraseKind::ClearanceDelivery {
        arrival,
        sid,
        cruise_fl,
        departure_frequency,
        squawk,
      } => {
        write!(
          f,
          "{callsign}, Clearance Delivery, cleared to {arrival} via {sid} departure, flight planned route, climb and maintain flight level {cruise_fl}, departure frequency {departure_frequency}, squawk {}.",
          phonetic(squawk)
        )
      }
      PhraseKind::Pushback => {
        write!(
          f,
          "{callsign}, pushback approved, tail north, advise ready to taxi."
        )
      }
      PhraseKind::TaxiOut { runway } => {
        write!(
          f,
          "{callsign}, taxi to runway {} via taxiway Alpha, hold short.",
          phonetic(runway)
        )
      }
      PhraseKind::LineUp { runway } => {
        write!(
          f,
          "{callsign}, runway {}, line up and wait.",
          phonetic(runway)
        )
      }
      PhraseKind::Takeoff { runway } => {
        write!(
          f,
          "{callsign}, runway {}, wind calm, cleared for takeoff.",
          phonetic(runway)
        )
      }
      PhraseKind::ContactDeparture { frequency } => {
        write!(f, "{callsign}, contact departure {frequency}.")
      }
      PhraseKind::Climb { flight_level } => {
        write!(f, "{callsign}, climb flight level {flight_level}.")
      }
      PhraseKind::CruiseCheck { flight_level } => {
        write!(f, "{callsign}, maintaining flight level {flight_level}.")
      }
      PhraseKind::TopOfDescent { distance_nm } => {
        write!(f, "{callsign}, top of descent in {distance_nm} miles.")
      }
      PhraseKind::Descent { altitude_ft } => {
        write!(f, "{callsign}, descend and maintain {altitude_ft} feet.")
      }
      PhraseKind::ExpectStar { star, runway } => {
        write!(
          f,
          "{callsign}, expect {star} arrival, runway {}.",
          phonetic(runway)
        )
      }
      PhraseKind::Approach { runway } => {
        write!(
          f,
          "{callsign}, cleared ILS approach runway {}.",
          phonetic(runway)
        )
      }
      PhraseKind::ContactTower { frequency } => {
        write!(f, "{callsign}, contact tower {frequency}.")
      }
      PhraseKind::Landing { runway } => {
        write!(
          f,
          "{callsign}, runway {}, wind calm, cleared to land.",
          phonetic(runway)
        )
      }
      PhraseKind::ExitRunway => {
        write!(
          f,
          "{callsign}, exit next taxiway, contact ground point niner."
        )
      }
      PhraseKind::TaxiToGate => {
        write!(f, "{callsign}, taxi to gate via taxiway Bravo.")
      }
      PhraseKind::Parking => {
        write!(f, "{callsign}, parking complete, good day.")
      }
      PhraseKind::Handoff {
        controller,
        frequency,
        ..
      } => {
        write!(f, "{callsign}, contact {controller} {frequency}. Good day.")
      }
      PhraseKind::CheckIn { flight_level, .. } => {
        write!(
          f,
          "{callsign}, radar contact. Maintain flight level {flight_level}."
        )
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_clearance_delivery() {
    let phrase = Phrase::new(
      "SPEEDBIRD123",
      PhraseKind::ClearanceDelivery {
        arrival: "EDDF".to_owned(),
        sid: "BUZAD2G".to_owned(),
        cruise_fl: "370".to_owned(),
        departure_frequency: Frequency { mhz: 119, khz: 250 },
        squawk: "4312".to_owned(),
      },
    );

    assert_eq!(phrase.position(), Position::Clearance);
    assert_eq!(
      phrase.to_string(),
      "Speedbird One Two Three, Clearance Delivery, cleared to EDDF via \
       BUZAD2G departure, flight planned route, climb and maintain flight \
       level 370, departure frequency 119.250, squawk Four Three One Two."
    );
  }

  #[test]
  fn test_takeoff_renders_runway_phonetically() {
    let phrase = Phrase::new(
      "SPEEDBIRD123",
      PhraseKind::Takeoff {
        runway: "27R".to_owned(),
      },
    );

    assert_eq!(phrase.position(), Position::Tower);
    assert_eq!(
      phrase.to_string(),
      "Speedbird One Two Three, runway Two Seven Romeo, wind calm, cleared for takeoff."
    );
  }

  #[test]
  fn test_handoff_issues_on_given_position() {
    let phrase = Phrase::new(
      "SPEEDBIRD123",
      PhraseKind::Handoff {
        position: Position::Departure,
        controller: "Center".to_owned(),
        frequency: Frequency { mhz: 132, khz: 500 },
      },
    );

    assert_eq!(phrase.position(), Position::Departure);
    assert_eq!(
      phrase.to_string(),
      "Speedbird One Two Three, contact Center 132.500. Good day."
    );
  }

  #[test]
  fn test_check_in() {
    let phrase = Phrase::new(
      "SPEEDBIRD123",
      PhraseKind::CheckIn {
        position: Position::Center,
        flight_level: "370".to_owned(),
      },
    );

    assert_eq!(phrase.position(), Position::Center);
    assert_eq!(
      phrase.to_string(),
      "Speedbird One Two Three, radar contact. Maintain flight level 370."
    );
  }

  #[test]
  fn test_ground_phrases() {
    let pushback = Phrase::new("SPEEDBIRD123", PhraseKind::Pushback);
    assert_eq!(pushback.position(), Position::Ground);
    assert_eq!(
      pushback.to_string(),
      "Speedbird One Two Three, pushback approved, tail north, advise ready to taxi."
    );

    let exit = Phrase::new("SPEEDBIRD123", PhraseKind::ExitRunway);
    assert_eq!(exit.position(), Position::Tower);

    let parking = Phrase::new("SPEEDBIRD123", PhraseKind::Parking);
    assert_eq!(parking.position(), Position::Ground);
    assert_eq!(
      parking.to_string(),
      "Speedbird One Two Three, parking complete, good day."
    );
  }

  #[test]
  fn test_descent_and_tod() {
    let descent = Phrase::new(
      "DELTA42",
      PhraseKind::Descent { altitude_ft: 28000 },
    );
    assert_eq!(
      descent.to_string(),
      "Delta Four Two, descend and maintain 28000 feet."
    );

    let tod = Phrase::new("DELTA42", PhraseKind::TopOfDescent {
      distance_nm: 112,
    });
    assert_eq!(tod.position(), Position::Center);
    assert_eq!(tod.to_string(), "Delta Four Two, top of descent in 112 miles.");
  }
}
