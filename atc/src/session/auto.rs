use std::time::Duration;

use super::{Announcement, SessionController, phase::Phase};
use crate::{entities::aircraft::AircraftState, phraseology::PhraseKind};

pub type Guard = fn(&SessionController, &AircraftState) -> bool;
pub type Action =
  fn(&mut SessionController, &AircraftState, &mut Vec<Announcement>);

/// One automatic transition: evaluated only while the session is in `phase`,
/// fired when `guard` passes.
pub struct AutoAdvance {
  pub phase: Phase,
  pub guard: Guard,
  pub action: Action,
}

/// The automatic transition table, row order significant. Rows are matched
/// against the phase held at the start of the update, so a transition fired
/// by one sample only takes effect from the next sample on; independent rows
/// of the same phase (the two Cruise rows) may both fire in one update.
pub const AUTO_ADVANCE: &[AutoAdvance] = &[
  AutoAdvance {
    phase: Phase::TakeoffClearance,
    guard: airborne,
    action: contact_departure,
  },
  AutoAdvance {
    phase: Phase::Departure,
    guard: initial_climb_done,
    action: issue_climb,
  },
  AutoAdvance {
    phase: Phase::Climb,
    guard: cruise_captured,
    action: capture_cruise,
  },
  AutoAdvance {
    phase: Phase::Cruise,
    guard: cruise_check_pending,
    action: cruise_check,
  },
  AutoAdvance {
    phase: Phase::Cruise,
    guard: tod_reached,
    action: announce_tod,
  },
  AutoAdvance {
    phase: Phase::Descent,
    guard: descent_step_one,
    action: descend_intermediate,
  },
  AutoAdvance {
    phase: Phase::Descent,
    guard: descent_step_two,
    action: announce_star,
  },
  AutoAdvance {
    phase: Phase::Descent,
    guard: descent_step_three,
    action: clear_approach,
  },
  AutoAdvance {
    phase: Phase::Approach,
    guard: final_approach_captured,
    action: contact_tower,
  },
  AutoAdvance {
    phase: Phase::LandingClearance,
    guard: rolled_out,
    action: exit_runway,
  },
];

fn airborne(c: &SessionController, state: &AircraftState) -> bool {
  !c.phase_announced && state.altitude_agl > c.config.takeoff_agl
}

fn initial_climb_done(c: &SessionController, state: &AircraftState) -> bool {
  !c.phase_announced && state.altitude_agl > c.config.initial_climb_agl
}

fn cruise_captured(c: &SessionController, state: &AircraftState) -> bool {
  state.altitude_msl
    > c.flight_plan.cruise_altitude as f32 - c.config.cruise_capture_window
}

fn cruise_check_pending(c: &SessionController, _state: &AircraftState) -> bool {
  !c.cruise_check_done
}

fn tod_reached(c: &SessionController, state: &AircraftState) -> bool {
  !c.tod_announced
    && state.distance_to(c.destination) <= c.flight_plan.tod_distance()
}

fn descent_step_one(c: &SessionController, state: &AircraftState) -> bool {
  c.descent_step == 1 && state.altitude_msl < c.config.descent_first_below
}

fn descent_step_two(c: &SessionController, state: &AircraftState) -> bool {
  c.descent_step == 2 && state.altitude_msl < c.config.descent_second_below
}

fn descent_step_three(c: &SessionController, state: &AircraftState) -> bool {
  c.descent_step == 3 && state.altitude_msl < c.config.approach_altitude
}

fn final_approach_captured(
  c: &SessionController,
  state: &AircraftState,
) -> bool {
  !c.phase_announced
    && state.altitude_msl < c.config.final_approach_altitude
}

fn rolled_out(c: &SessionController, state: &AircraftState) -> bool {
  state.on_ground && state.groundspeed < c.config.rollout_speed
}

fn contact_departure(
  c: &mut SessionController,
  _state: &AircraftState,
  out: &mut Vec<Announcement>,
) {
  let frequency = c.registry.frequencies().departure;
  let phrase = c.phrase(PhraseKind::ContactDeparture { frequency });
  c.emit(out, phrase, None, Duration::ZERO);
  c.enter_phase(Phase::Departure);
}

fn issue_climb(
  c: &mut SessionController,
  _state: &AircraftState,
  out: &mut Vec<Announcement>,
) {
  let phrase = c.phrase(PhraseKind::Climb {
    flight_level: c.flight_plan.cruise_altitude_fl.clone(),
  });
  let personality = c.current_personality;
  c.emit(out, phrase, Some(personality), Duration::ZERO);
  c.enter_phase(Phase::Climb);
}

// Reaching cruise is silent; the cruise check announces on the next update.
fn capture_cruise(
  c: &mut SessionController,
  _state: &AircraftState,
  _out: &mut Vec<Announcement>,
) {
  c.enter_phase(Phase::Cruise);
}

fn cruise_check(
  c: &mut SessionController,
  _state: &AircraftState,
  out: &mut Vec<Announcement>,
) {
  let phrase = c.phrase(PhraseKind::CruiseCheck {
    flight_level: c.flight_plan.cruise_altitude_fl.clone(),
  });
  let personality = c.current_personality;
  let pacing = c.config.cruise_check_pacing;
  c.emit(out, phrase, Some(personality), pacing);
  c.cruise_check_done = true;
}

fn announce_tod(
  c: &mut SessionController,
  state: &AircraftState,
  out: &mut Vec<Announcement>,
) {
  let phrase = c.phrase(PhraseKind::TopOfDescent {
    distance_nm: state.distance_to(c.destination) as u32,
  });
  let personality = c.current_personality;
  c.emit(out, phrase, Some(personality), Duration::ZERO);
  c.tod_announced = true;
  c.enter_phase(Phase::TopOfDescent);
}

fn descend_intermediate(
  c: &mut SessionController,
  _state: &AircraftState,
  out: &mut Vec<Announcement>,
) {
  let phrase = c.phrase(PhraseKind::Descent {
    altitude_ft: c.config.intermediate_descent_altitude,
  });
  let personality = c.current_personality;
  c.emit(out, phrase, Some(personality), Duration::ZERO);
  c.descent_step = 2;
}

fn announce_star(
  c: &mut SessionController,
  _state: &AircraftState,
  out: &mut Vec<Announcement>,
) {
  let phrase = c.phrase(PhraseKind::ExpectStar {
    star: c.flight_plan.star.clone(),
    runway: c.flight_plan.arrival_runway.clone(),
  });
  let personality = c.current_personality;
  c.emit(out, phrase, Some(personality), Duration::ZERO);
  c.descent_step = 3;
}

fn clear_approach(
  c: &mut SessionController,
  _state: &AircraftState,
  out: &mut Vec<Announcement>,
) {
  let phrase = c.phrase(PhraseKind::Approach {
    runway: c.flight_plan.arrival_runway.clone(),
  });
  let personality = c.current_personality;
  c.emit(out, phrase, Some(personality), Duration::ZERO);
  c.enter_phase(Phase::Approach);
}

fn contact_tower(
  c: &mut SessionController,
  _state: &AircraftState,
  out: &mut Vec<Announcement>,
) {
  let frequency = c.registry.frequencies().tower;
  let phrase = c.phrase(PhraseKind::ContactTower { frequency });
  let personality = c.current_personality;
  c.emit(out, phrase, Some(personality), Duration::ZERO);
  c.enter_phase(Phase::FinalApproach);
}

fn exit_runway(
  c: &mut SessionController,
  _state: &AircraftState,
  out: &mut Vec<Announcement>,
) {
  let phrase = c.phrase(PhraseKind::ExitRunway);
  let personality = c.current_personality;
  c.emit(out, phrase, Some(personality), Duration::ZERO);
  c.enter_phase(Phase::Landed);
}
