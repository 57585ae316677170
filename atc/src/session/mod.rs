pub mod auto;
pub mod phase;

use core::fmt;
use std::{str::FromStr, time::Duration};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use turborand::rng::Rng;

use crate::{
  config::SessionConfig,
  entities::{
    aircraft::AircraftState,
    airport,
    airspace::{self, AirspaceClass, AirspaceMonitor},
    flight_plan::{self, FlightPlan},
    personality::Personality,
    sector::{Frequency, Position, SectorRegistry},
  },
  phraseology::{Phrase, PhraseKind},
};

pub use phase::Phase;

/// One emitted ATC transmission, in emission order. `delay` is a "not
/// before" hint relative to the previous emission; the core never blocks,
/// pacing belongs to whoever vocalizes the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
  pub message: String,
  pub position: Position,
  pub phase: Phase,
  pub delay: Duration,
}

/// The manual request surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
  Clearance,
  Pushback,
  Taxi,
  Takeoff,
  Climb,
  CruiseAltitudeChange,
  Descent,
  Landing,
  TaxiToGate,
}

impl Command {
  /// The phase a successful request lands in (or stays in).
  pub fn target_phase(&self) -> Phase {
    match self {
      Command::Clearance => Phase::ClearanceDelivery,
      Command::Pushback => Phase::PushbackApproved,
      Command::Taxi => Phase::TaxiOut,
      Command::Takeoff => Phase::TakeoffClearance,
      Command::Climb => Phase::Climb,
      Command::CruiseAltitudeChange => Phase::Cruise,
      Command::Descent => Phase::Descent,
      Command::Landing => Phase::LandingClearance,
      Command::TaxiToGate => Phase::Parking,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "unknown command name: {}", self.0)
  }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for Command {
  type Err = UnknownCommand;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "clearance" => Ok(Command::Clearance),
      "pushback" => Ok(Command::Pushback),
      "taxi" => Ok(Command::Taxi),
      "takeoff" => Ok(Command::Takeoff),
      "climb" => Ok(Command::Climb),
      "descent" => Ok(Command::Descent),
      "landing" => Ok(Command::Landing),
      "taxi_to_gate" => Ok(Command::TaxiToGate),
      other => Err(UnknownCommand(other.to_owned())),
    }
  }
}

/// Why a manual command did nothing. Both variants are state-preserving
/// no-ops, kept distinct so a frontend can tell "not available yet" from
/// "already done".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type", content = "phase")]
pub enum CommandRejection {
  NotAvailable { phase: Phase },
  AlreadyInPhase { phase: Phase },
}

impl fmt::Display for CommandRejection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CommandRejection::NotAvailable { phase } => {
        write!(f, "not available in phase {phase}")
      }
      CommandRejection::AlreadyInPhase { phase } => {
        write!(f, "already in phase {phase}")
      }
    }
  }
}

pub type CommandResult = Result<Vec<Announcement>, CommandRejection>;

/// Drives one ATC session for one aircraft.
///
/// Owns the phase state, the per-phase idempotency flags, the sector
/// registry and the airspace monitor outright; the caller feeds it telemetry
/// samples and manual requests, and collects the announcements each call
/// returns.
pub struct SessionController {
  flight_plan: FlightPlan,
  config: SessionConfig,
  rng: Rng,

  phase: Phase,
  phase_announced: bool,
  cruise_check_done: bool,
  tod_announced: bool,
  descent_step: u8,

  registry: SectorRegistry,
  monitor: AirspaceMonitor,
  current_personality: Personality,
  destination: Vec2,
}

impl SessionController {
  pub fn new(flight_plan: FlightPlan, config: SessionConfig, rng: Rng) -> Self {
    let mut rng = rng;
    let mut registry = SectorRegistry::new(&flight_plan, &config, &mut rng);
    let monitor = AirspaceMonitor::new(&config);

    // Tune to the first sector so the session starts on clearance delivery.
    let first = registry
      .sectors()
      .first()
      .map(|sector| (sector.frequency, sector.personality));
    let current_personality = match first {
      Some((frequency, personality)) => {
        registry.set_active(frequency);
        personality
      }
      None => Personality::for_position(Position::Clearance),
    };

    let destination = airport::lookup(flight_plan.arrival).pos;

    tracing::info!(
      callsign = %flight_plan.callsign,
      squawk = %flight_plan.squawk,
      "session started"
    );

    Self {
      flight_plan,
      config,
      rng,

      phase: Phase::ColdAndDark,
      phase_announced: false,
      cruise_check_done: false,
      tod_announced: false,
      descent_step: 0,

      registry,
      monitor,
      current_personality,
      destination,
    }
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  pub fn flight_plan(&self) -> &FlightPlan {
    &self.flight_plan
  }

  pub fn airspace(&self) -> AirspaceClass {
    self.monitor.current()
  }

  pub fn registry(&self) -> &SectorRegistry {
    &self.registry
  }

  /// (name, frequency, personality label) of the active controller, for
  /// display.
  pub fn active_controller(&self) -> Option<(String, Frequency, String)> {
    self.registry.active().map(|sector| {
      (
        sector.name.clone(),
        sector.frequency,
        sector.personality.describe(),
      )
    })
  }

  /// Feeds one telemetry sample through the session: airspace awareness and
  /// sector handoffs first, then the automatic phase transitions.
  pub fn update(&mut self, state: &AircraftState) -> Vec<Announcement> {
    let mut out = Vec::new();

    self.handle_airspace(state, &mut out);
    self.handle_handoff(state, &mut out);
    self.auto_advance(state, &mut out);

    out
  }

  /// Issues a manual request. A request whose phase precondition fails is a
  /// state-preserving rejection; nothing is emitted.
  pub fn command(&mut self, command: Command) -> CommandResult {
    match command {
      Command::Clearance => self.request_clearance(),
      Command::Pushback => self.request_pushback(),
      Command::Taxi => self.request_taxi(),
      Command::Takeoff => self.request_takeoff(),
      Command::Climb => self.request_climb(),
      Command::CruiseAltitudeChange => self.request_cruise_altitude_change(),
      Command::Descent => self.request_descent(),
      Command::Landing => self.request_landing(),
      Command::TaxiToGate => self.request_taxi_to_gate(),
    }
  }

  /// Re-issues the manual command mapped to `name`, bypassing user-intent
  /// sequencing but not the command's own precondition guard.
  pub fn force(&mut self, name: &str) -> Result<CommandResult, UnknownCommand> {
    let command = name.parse::<Command>()?;
    tracing::info!(?command, "forced command");
    Ok(self.command(command))
  }

  fn request_clearance(&mut self) -> CommandResult {
    self.guard(Command::Clearance, &[Phase::ColdAndDark])?;

    let mut out = Vec::new();
    let phrase = self.phrase(PhraseKind::ClearanceDelivery {
      arrival: self.flight_plan.arrival.to_string(),
      sid: self.flight_plan.sid.clone(),
      cruise_fl: self.flight_plan.cruise_altitude_fl.clone(),
      departure_frequency: self.registry.frequencies().departure,
      squawk: self.flight_plan.squawk.clone(),
    });
    let personality = Personality::for_position(Position::Clearance);
    self.emit(&mut out, phrase, Some(personality), Duration::ZERO);

    self.enter_phase(Phase::ClearanceDelivery);
    Ok(out)
  }

  fn request_pushback(&mut self) -> CommandResult {
    self.guard(
      Command::Pushback,
      &[Phase::ClearanceDelivery, Phase::ColdAndDark],
    )?;

    let mut out = Vec::new();
    let phrase = self.phrase(PhraseKind::Pushback);
    let personality = Personality::for_position(Position::Ground);
    self.emit(&mut out, phrase, Some(personality), Duration::ZERO);

    self.enter_phase(Phase::PushbackApproved);
    Ok(out)
  }

  fn request_taxi(&mut self) -> CommandResult {
    self.guard(
      Command::Taxi,
      &[Phase::PushbackApproved, Phase::ClearanceDelivery],
    )?;

    let mut out = Vec::new();
    let phrase = self.phrase(PhraseKind::TaxiOut {
      runway: self.flight_plan.departure_runway.clone(),
    });
    let personality = Personality::for_position(Position::Ground);
    self.emit(&mut out, phrase, Some(personality), Duration::ZERO);

    self.enter_phase(Phase::TaxiOut);
    Ok(out)
  }

  fn request_takeoff(&mut self) -> CommandResult {
    self.guard(Command::Takeoff, &[Phase::TaxiOut, Phase::LineUp])?;

    let mut out = Vec::new();
    let personality = Personality::for_position(Position::Tower);

    let line_up = self.phrase(PhraseKind::LineUp {
      runway: self.flight_plan.departure_runway.clone(),
    });
    self.emit(&mut out, line_up, Some(personality), Duration::ZERO);

    let takeoff = self.phrase(PhraseKind::Takeoff {
      runway: self.flight_plan.departure_runway.clone(),
    });
    let pacing = self.config.takeoff_pacing;
    self.emit(&mut out, takeoff, Some(personality), pacing);

    self.enter_phase(Phase::TakeoffClearance);
    Ok(out)
  }

  fn request_climb(&mut self) -> CommandResult {
    self.guard(Command::Climb, &[Phase::Departure, Phase::Climb])?;

    let mut out = Vec::new();
    let phrase = self.phrase(PhraseKind::Climb {
      flight_level: self.flight_plan.cruise_altitude_fl.clone(),
    });
    let personality = Personality::for_position(Position::Departure);
    self.emit(&mut out, phrase, Some(personality), Duration::ZERO);

    self.enter_phase(Phase::Climb);
    Ok(out)
  }

  fn request_cruise_altitude_change(&mut self) -> CommandResult {
    self.guard(Command::CruiseAltitudeChange, &[Phase::Cruise])?;

    let mut out = Vec::new();
    let new_altitude = self.flight_plan.cruise_altitude + 2000;
    let phrase = self.phrase(PhraseKind::Climb {
      flight_level: flight_plan::flight_level(new_altitude),
    });
    let personality = Personality::for_position(Position::Center);
    self.emit(&mut out, phrase, Some(personality), Duration::ZERO);

    Ok(out)
  }

  fn request_descent(&mut self) -> CommandResult {
    self.guard(Command::Descent, &[Phase::Cruise, Phase::TopOfDescent])?;

    let mut out = Vec::new();
    let phrase = self.phrase(PhraseKind::Descent {
      altitude_ft: self.config.initial_descent_altitude,
    });
    let personality = Personality::for_position(Position::Center);
    self.emit(&mut out, phrase, Some(personality), Duration::ZERO);

    self.enter_phase(Phase::Descent);
    self.descent_step = 1;
    Ok(out)
  }

  fn request_landing(&mut self) -> CommandResult {
    self.guard(Command::Landing, &[Phase::Approach, Phase::FinalApproach])?;

    let mut out = Vec::new();
    let phrase = self.phrase(PhraseKind::Landing {
      runway: self.flight_plan.arrival_runway.clone(),
    });
    let personality = Personality::for_position(Position::Tower);
    self.emit(&mut out, phrase, Some(personality), Duration::ZERO);

    self.enter_phase(Phase::LandingClearance);
    Ok(out)
  }

  fn request_taxi_to_gate(&mut self) -> CommandResult {
    self.guard(Command::TaxiToGate, &[Phase::Landed, Phase::TaxiIn])?;

    let mut out = Vec::new();
    let phrase = self.phrase(PhraseKind::TaxiToGate);
    let personality = Personality::for_position(Position::Ground);
    self.emit(&mut out, phrase, Some(personality), Duration::ZERO);

    self.enter_phase(Phase::Parking);
    Ok(out)
  }

  /// Precondition check shared by every manual command.
  fn guard(
    &self,
    command: Command,
    allowed: &[Phase],
  ) -> Result<(), CommandRejection> {
    if allowed.contains(&self.phase) {
      Ok(())
    } else if self.phase == command.target_phase() {
      Err(CommandRejection::AlreadyInPhase { phase: self.phase })
    } else {
      Err(CommandRejection::NotAvailable { phase: self.phase })
    }
  }

  fn phrase(&self, kind: PhraseKind) -> Phrase {
    Phrase::new(self.flight_plan.callsign.as_str(), kind)
  }

  /// Renders, modulates and queues one transmission. The recorded phase is
  /// the phase at emission time, before any transition the event causes.
  fn emit(
    &mut self,
    out: &mut Vec<Announcement>,
    phrase: Phrase,
    personality: Option<Personality>,
    delay: Duration,
  ) {
    let position = phrase.position();
    let mut message = phrase.to_string();
    if let Some(personality) = personality {
      message = personality.modify(&message, &mut self.rng);
    }

    tracing::debug!(%position, phase = %self.phase, "{message}");
    out.push(Announcement {
      message,
      position,
      phase: self.phase,
      delay,
    });
  }

  /// Switches phase and resets the idempotency flags the new phase owns.
  fn enter_phase(&mut self, phase: Phase) {
    if self.phase == phase {
      return;
    }

    tracing::info!(from = %self.phase, to = %phase, "phase transition");
    self.phase = phase;
    self.phase_announced = false;

    match phase {
      Phase::Cruise => {
        self.cruise_check_done = false;
        self.tod_announced = false;
      }
      Phase::Descent => {
        self.descent_step = 0;
      }
      _ => {}
    }
  }

  fn handle_airspace(
    &mut self,
    state: &AircraftState,
    out: &mut Vec<Announcement>,
  ) {
    let (class, changed) = self.monitor.check(state);
    if !changed {
      return;
    }

    tracing::debug!(%class, "airspace transition");
    if let Some(message) =
      airspace::entry_message(class, &self.flight_plan.callsign)
    {
      out.push(Announcement {
        message,
        position: Position::Center,
        phase: self.phase,
        delay: Duration::ZERO,
      });
    }
  }

  fn handle_handoff(
    &mut self,
    state: &AircraftState,
    out: &mut Vec<Announcement>,
  ) {
    let Some(next) = self.registry.check_handoff(state) else {
      return;
    };

    let (next_name, next_frequency, next_position, next_personality) = {
      let sector = &self.registry.sectors()[next];
      (
        sector.name.clone(),
        sector.frequency,
        sector.position,
        sector.personality,
      )
    };

    let current_position = self
      .registry
      .active()
      .map(|sector| sector.position)
      .unwrap_or(Position::Center);

    tracing::info!(
      from = %current_position,
      to = %next_name,
      frequency = %next_frequency,
      "sector handoff"
    );

    // Handoff instruction goes out on the frequency we are leaving.
    let handoff = self.phrase(PhraseKind::Handoff {
      position: current_position,
      controller: next_name,
      frequency: next_frequency,
    });
    let personality = self.current_personality;
    self.emit(out, handoff, Some(personality), Duration::ZERO);

    self.registry.activate(next);
    self.current_personality = next_personality;

    let check_in = self.phrase(PhraseKind::CheckIn {
      position: next_position,
      flight_level: self.flight_plan.cruise_altitude_fl.clone(),
    });
    let delay = self.config.handoff_switch_pacing + self.config.check_in_pacing;
    self.emit(out, check_in, Some(next_personality), delay);
  }

  fn auto_advance(
    &mut self,
    state: &AircraftState,
    out: &mut Vec<Announcement>,
  ) {
    // Rows are matched against the phase at the start of the update, so a
    // transition fired this update cannot cascade into the next phase's
    // rows until the next sample arrives.
    let phase = self.phase;
    for row in auto::AUTO_ADVANCE {
      if row.phase == phase && (row.guard)(self, state) {
        (row.action)(self, state, out);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use glam::Vec2;
  use turborand::SeededCore;

  use super::*;
  use crate::entities::sector::Position;

  const EGLL: Vec2 = Vec2::new(51.4700, -0.4543);
  const EDDF: Vec2 = Vec2::new(50.0379, 8.5622);

  fn session() -> SessionController {
    let mut rng = Rng::with_seed(1);
    let flight_plan = FlightPlan::demo(&mut rng);
    SessionController::new(flight_plan, SessionConfig::default(), rng)
  }

  fn sample(pos: Vec2, altitude_msl: f32, altitude_agl: f32) -> AircraftState {
    AircraftState {
      pos,
      altitude_msl,
      altitude_agl,
      groundspeed: 250.0,
      ..Default::default()
    }
  }

  fn ground_sample(pos: Vec2) -> AircraftState {
    AircraftState {
      pos,
      on_ground: true,
      ..Default::default()
    }
  }

  #[test]
  fn test_starts_cold_and_dark_on_clearance_frequency() {
    let session = session();
    assert_eq!(session.phase(), Phase::ColdAndDark);
    assert_eq!(session.airspace(), AirspaceClass::G);

    let (name, _, _) = session.active_controller().expect("active sector");
    assert_eq!(name, "EGLL Clearance");
  }

  #[test]
  fn test_takeoff_in_cold_and_dark_is_rejected() {
    let mut session = session();
    let result = session.command(Command::Takeoff);

    assert_eq!(
      result,
      Err(CommandRejection::NotAvailable {
        phase: Phase::ColdAndDark
      })
    );
    assert_eq!(session.phase(), Phase::ColdAndDark);
  }

  #[test]
  fn test_repeated_descent_is_already_in_phase() {
    let mut session = session();
    session.phase = Phase::Cruise;

    assert!(session.command(Command::Descent).is_ok());
    assert_eq!(session.phase(), Phase::Descent);

    assert_eq!(
      session.command(Command::Descent),
      Err(CommandRejection::AlreadyInPhase {
        phase: Phase::Descent
      })
    );
  }

  #[test]
  fn test_clearance_message_and_phase() {
    let mut session = session();
    let out = session.command(Command::Clearance).expect("accepted");

    assert_eq!(session.phase(), Phase::ClearanceDelivery);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].position, Position::Clearance);
    assert_eq!(out[0].phase, Phase::ColdAndDark);
    assert!(out[0].message.starts_with("Speedbird One Two Three"));
    assert!(out[0].message.contains("cleared to EDDF"));
    assert!(out[0].message.contains("flight level 370"));
  }

  #[test]
  fn test_takeoff_emits_line_up_then_takeoff_with_pacing() {
    let mut session = session();
    session.phase = Phase::TaxiOut;

    let out = session.command(Command::Takeoff).expect("accepted");
    assert_eq!(session.phase(), Phase::TakeoffClearance);
    assert_eq!(out.len(), 2);
    assert!(out[0].message.contains("line up and wait"));
    assert_eq!(out[0].delay, Duration::ZERO);
    assert!(out[1].message.contains("cleared for takeoff"));
    assert_eq!(out[1].delay, Duration::from_secs(3));
  }

  #[test]
  fn test_class_a_entry_announced_exactly_once() {
    let mut session = session();
    let midpoint = crate::geometry::midpoint(EGLL, EDDF);
    let cruise = sample(midpoint, 20000.0, 20000.0);

    let out = session.update(&cruise);
    let entries: Vec<_> = out
      .iter()
      .filter(|a| a.message.contains("Class Alpha"))
      .collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].position, Position::Center);
    assert_eq!(session.airspace(), AirspaceClass::A);

    let out = session.update(&cruise);
    assert!(out.iter().all(|a| !a.message.contains("Class Alpha")));
  }

  #[test]
  fn test_handoff_switches_frequency_and_personality() {
    let mut session = session();
    // Climbing through 1200 ft at the departure airport leaves the
    // clearance band; tower is the first matching sector.
    let out = session.update(&sample(EGLL, 1200.0, 1200.0));

    let handoff = out
      .iter()
      .find(|a| a.message.contains("contact EGLL Tower"))
      .expect("handoff emitted");
    assert_eq!(handoff.position, Position::Clearance);

    let check_in = out
      .iter()
      .find(|a| a.message.contains("radar contact"))
      .expect("check-in emitted");
    assert_eq!(check_in.position, Position::Tower);
    assert_eq!(check_in.delay, Duration::from_secs(3));

    let (name, frequency, _) = session.active_controller().expect("active");
    assert_eq!(name, "EGLL Tower");
    assert_eq!(frequency, session.registry().frequencies().tower);

    // Same position again: no re-fire until a new boundary crossing.
    let out = session.update(&sample(EGLL, 1200.0, 1200.0));
    assert!(out.iter().all(|a| !a.message.contains("contact EGLL Tower")));
  }

  #[test]
  fn test_full_flight_auto_advance_is_monotonic() {
    let mut session = session();
    let mut phases = vec![session.phase()];
    let mut transcript: Vec<Announcement> = Vec::new();

    let step = |session: &mut SessionController,
                out: Vec<Announcement>,
                phases: &mut Vec<Phase>,
                transcript: &mut Vec<Announcement>| {
      transcript.extend(out);
      phases.push(session.phase());
    };

    // Absorb the initial Class B entry at the gate.
    let out = session.update(&ground_sample(EGLL));
    step(&mut session, out, &mut phases, &mut transcript);

    for command in [
      Command::Clearance,
      Command::Pushback,
      Command::Taxi,
      Command::Takeoff,
    ] {
      let out = session.command(command).expect("scripted command accepted");
      step(&mut session, out, &mut phases, &mut transcript);
    }
    assert_eq!(session.phase(), Phase::TakeoffClearance);

    // Rotate: contact departure fires once.
    let out = session.update(&sample(EGLL, 200.0, 150.0));
    assert!(out.iter().any(|a| a.message.contains("contact departure")));
    step(&mut session, out, &mut phases, &mut transcript);
    assert_eq!(session.phase(), Phase::Departure);

    // Initial climb: climb clearance fires once.
    let out = session.update(&sample(EGLL, 1700.0, 1700.0));
    assert!(out.iter().any(|a| a.message.contains("climb flight level")));
    step(&mut session, out, &mut phases, &mut transcript);
    assert_eq!(session.phase(), Phase::Climb);

    // Cruise capture is silent.
    let enroute = Vec2::new(51.0, 2.0);
    let out = session.update(&sample(enroute, 36500.0, 36500.0));
    step(&mut session, out, &mut phases, &mut transcript);
    assert_eq!(session.phase(), Phase::Cruise);

    // One-time cruise check.
    let out = session.update(&sample(enroute, 37000.0, 37000.0));
    assert!(
      out
        .iter()
        .any(|a| a.message.contains("maintaining flight level"))
    );
    step(&mut session, out, &mut phases, &mut transcript);

    // Top of descent advisory inside the computed distance.
    let near_tod = Vec2::new(50.3, 7.0);
    assert!(
      sample(near_tod, 37000.0, 37000.0).distance_to(EDDF)
        <= session.flight_plan().tod_distance()
    );
    let out = session.update(&sample(near_tod, 37000.0, 37000.0));
    assert!(out.iter().any(|a| a.message.contains("top of descent")));
    step(&mut session, out, &mut phases, &mut transcript);
    assert_eq!(session.phase(), Phase::TopOfDescent);

    let out = session.command(Command::Descent).expect("descent accepted");
    assert!(
      out
        .iter()
        .any(|a| a.message.contains("descend and maintain 28000 feet"))
    );
    step(&mut session, out, &mut phases, &mut transcript);
    assert_eq!(session.phase(), Phase::Descent);

    // Staged descent: 28k -> intermediate clearance, 18k -> STAR, 9k ->
    // approach clearance.
    let out = session.update(&sample(near_tod, 28500.0, 28500.0));
    assert!(
      out
        .iter()
        .any(|a| a.message.contains("descend and maintain 18000 feet"))
    );
    step(&mut session, out, &mut phases, &mut transcript);
    assert_eq!(session.phase(), Phase::Descent);

    let out = session.update(&sample(near_tod, 18500.0, 18500.0));
    assert!(out.iter().any(|a| a.message.contains("expect TEKTU1A")));
    step(&mut session, out, &mut phases, &mut transcript);
    assert_eq!(session.phase(), Phase::Descent);

    let out = session.update(&sample(near_tod, 9000.0, 9000.0));
    assert!(
      out
        .iter()
        .any(|a| a.message.contains("cleared ILS approach"))
    );
    step(&mut session, out, &mut phases, &mut transcript);
    assert_eq!(session.phase(), Phase::Approach);

    // Final approach handoff to tower.
    let out = session.update(&sample(EDDF, 2900.0, 2900.0));
    assert!(out.iter().any(|a| a.message.contains("contact tower")));
    step(&mut session, out, &mut phases, &mut transcript);
    assert_eq!(session.phase(), Phase::FinalApproach);

    let out = session.command(Command::Landing).expect("landing accepted");
    assert!(out.iter().any(|a| a.message.contains("cleared to land")));
    step(&mut session, out, &mut phases, &mut transcript);
    assert_eq!(session.phase(), Phase::LandingClearance);

    // Rollout.
    let mut rollout = ground_sample(EDDF);
    rollout.groundspeed = 40.0;
    let out = session.update(&rollout);
    assert!(out.iter().any(|a| a.message.contains("exit next taxiway")));
    step(&mut session, out, &mut phases, &mut transcript);
    assert_eq!(session.phase(), Phase::Landed);

    let out = session
      .command(Command::TaxiToGate)
      .expect("taxi in accepted");
    assert!(out.iter().any(|a| a.message.contains("taxi to gate")));
    step(&mut session, out, &mut phases, &mut transcript);
    assert_eq!(session.phase(), Phase::Parking);

    // The documented order is monotonic across the whole flight.
    for pair in phases.windows(2) {
      assert!(pair[0] <= pair[1], "regressed from {} to {}", pair[0], pair[1]);
    }

    // Announcements never arrive out of emission order.
    assert!(!transcript.is_empty());
  }

  #[test]
  fn test_cruise_check_fires_once() {
    let mut session = session();
    session.phase = Phase::Climb;

    let enroute = Vec2::new(51.0, 2.0);
    let out = session.update(&sample(enroute, 36500.0, 36500.0));
    assert_eq!(session.phase(), Phase::Cruise);
    assert!(
      out
        .iter()
        .all(|a| !a.message.contains("maintaining flight level"))
    );

    let out = session.update(&sample(enroute, 37000.0, 37000.0));
    let checks = out
      .iter()
      .filter(|a| a.message.contains("maintaining flight level"))
      .count();
    assert_eq!(checks, 1);
    assert_eq!(
      out
        .iter()
        .find(|a| a.message.contains("maintaining flight level"))
        .map(|a| a.delay),
      Some(Duration::from_secs(5))
    );

    let out = session.update(&sample(enroute, 37000.0, 37000.0));
    assert!(
      out
        .iter()
        .all(|a| !a.message.contains("maintaining flight level"))
    );
  }

  #[test]
  fn test_cruise_altitude_change_keeps_phase() {
    let mut session = session();
    session.phase = Phase::Cruise;

    let out = session
      .command(Command::CruiseAltitudeChange)
      .expect("accepted");
    assert_eq!(session.phase(), Phase::Cruise);
    assert!(out[0].message.contains("climb flight level 390"));
  }

  #[test]
  fn test_force_respects_preconditions() {
    let mut session = session();

    // Unknown names are a distinguishable lookup miss.
    assert!(session.force("warp_speed").is_err());

    // A forced command in the wrong phase is still rejected.
    let result = session.force("landing").expect("known command");
    assert_eq!(
      result,
      Err(CommandRejection::NotAvailable {
        phase: Phase::ColdAndDark
      })
    );

    // A forced command with its precondition met goes through.
    session.phase = Phase::TaxiOut;
    let result = session.force("takeoff").expect("known command");
    assert!(result.is_ok());
    assert_eq!(session.phase(), Phase::TakeoffClearance);
  }

  #[test]
  fn test_command_names_round_trip() {
    for (name, command) in [
      ("clearance", Command::Clearance),
      ("pushback", Command::Pushback),
      ("taxi", Command::Taxi),
      ("takeoff", Command::Takeoff),
      ("climb", Command::Climb),
      ("descent", Command::Descent),
      ("landing", Command::Landing),
      ("taxi_to_gate", Command::TaxiToGate),
    ] {
      assert_eq!(name.parse::<Command>(), Ok(command));
    }

    assert!("cruise".parse::<Command>().is_err());
  }

  #[test]
  fn test_takeoff_auto_advance_does_not_refire() {
    let mut session = session();
    session.phase = Phase::TakeoffClearance;

    let airborne = sample(EGLL, 200.0, 150.0);
    let out = session.update(&airborne);
    assert!(out.iter().any(|a| a.message.contains("contact departure")));
    assert_eq!(session.phase(), Phase::Departure);

    // Still below the initial-climb gate: no further phase movement.
    let out = session.update(&airborne);
    assert!(out.iter().all(|a| !a.message.contains("contact departure")));
    assert_eq!(session.phase(), Phase::Departure);
  }
}
