mod config;

use std::path::PathBuf;

use atc::{
  entities::{aircraft::AircraftState, airport, flight_plan::FlightPlan},
  session::{Announcement, Command, Phase, SessionController},
};
use clap::Parser;
use glam::Vec2;
use turborand::{SeededCore, rng::Rng};

use crate::config::Config;

/// Seconds of simulated time between telemetry samples.
const POLL_INTERVAL_SECS: u64 = 2;

/// Fraction of the flight spent climbing / point where descent begins.
const CLIMB_END: f32 = 0.15;
const DESCENT_START: f32 = 0.7;

/// Offline ATC console: synthesizes telemetry for the demo flight plan,
/// issues the scripted pilot requests and prints the session transcript.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Seed for frequency, squawk and personality randomness.
  #[arg(long, default_value_t = 0)]
  seed: u64,

  /// Optional TOML config file (seed, session thresholds, bands).
  #[arg(long)]
  config: Option<PathBuf>,

  /// Emit announcements as JSON lines instead of a transcript.
  #[arg(long)]
  json: bool,

  /// Telemetry samples to synthesize for the flight.
  #[arg(long, default_value_t = 400)]
  ticks: u32,
}

fn main() {
  tracing_subscriber::fmt().init();

  let cli = Cli::parse();

  let config = match &cli.config {
    Some(path) => match Config::from_path(path) {
      Ok(config) => config,
      Err(err) => {
        tracing::error!("{err}");
        std::process::exit(1);
      }
    },
    None => Config::default(),
  };

  let seed = config.seed.unwrap_or(cli.seed);
  let session_config = config.session.unwrap_or_default();
  let mut rng = Rng::with_seed(seed);

  // There is no live flight-plan provider on this adapter; fall back to the
  // deterministic demo plan.
  tracing::info!("flight plan provider unavailable, using demo flight plan");
  let flight_plan = FlightPlan::demo(&mut rng);

  let dep = airport::lookup(flight_plan.departure).pos;
  let arr = airport::lookup(flight_plan.arrival).pos;
  let cruise = flight_plan.cruise_altitude as f32;

  let mut session = SessionController::new(flight_plan, session_config, rng);

  if !cli.json {
    print_flight_info(&session);
  }

  let mut clock = 0u64;

  // Gate telemetry first so the session knows where the aircraft is.
  let out = session.update(&synthesize(dep, arr, cruise, 0, cli.ticks));
  print_announcements(clock, &out, cli.json);

  // Scripted ground requests, one per poll interval.
  for command in [
    Command::Clearance,
    Command::Pushback,
    Command::Taxi,
    Command::Takeoff,
  ] {
    clock += POLL_INTERVAL_SECS;
    issue(&mut session, command, clock, cli.json);
  }

  let mut descent_requested = false;
  let mut landing_requested = false;
  let mut at_gate = false;

  for tick in 1..=cli.ticks {
    clock += POLL_INTERVAL_SECS;
    let state = synthesize(dep, arr, cruise, tick, cli.ticks);
    let out = session.update(&state);
    print_announcements(clock, &out, cli.json);

    // The scripted pilot reacts to the phases the session reaches.
    match session.phase() {
      Phase::TopOfDescent if !descent_requested => {
        descent_requested = true;
        issue(&mut session, Command::Descent, clock, cli.json);
      }
      Phase::FinalApproach if !landing_requested => {
        landing_requested = true;
        issue(&mut session, Command::Landing, clock, cli.json);
      }
      Phase::Landed if !at_gate => {
        at_gate = true;
        issue(&mut session, Command::TaxiToGate, clock, cli.json);
      }
      _ => {}
    }
  }

  if !cli.json {
    println!();
    println!("Final phase: {}", session.phase());
    println!("Airspace: {}", session.airspace());
    if let Some((name, frequency, personality)) = session.active_controller() {
      println!("Controller: {name} on {frequency} ({personality})");
    }
  }
}

fn print_flight_info(session: &SessionController) {
  let fp = session.flight_plan();

  println!("Callsign: {}", fp.callsign);
  println!(
    "Route: {}/{} -> {}/{}",
    fp.departure, fp.departure_runway, fp.arrival, fp.arrival_runway
  );
  println!(
    "Cruise: FL{} | Distance: {:.0}nm | Squawk: {}",
    fp.cruise_altitude_fl, fp.distance_nm, fp.squawk
  );
  println!();
  println!("Frequencies:");
  for (position, frequency, name) in session.registry().frequency_list() {
    println!("  {:>9}  {}  {}", position.to_string(), frequency, name);
  }
  println!();
}

fn issue(
  session: &mut SessionController,
  command: Command,
  clock: u64,
  json: bool,
) {
  match session.command(command) {
    Ok(out) => print_announcements(clock, &out, json),
    Err(rejection) => tracing::warn!(?command, "request rejected: {rejection}"),
  }
}

fn print_announcements(clock: u64, announcements: &[Announcement], json: bool) {
  for announcement in announcements {
    if json {
      match serde_json::to_string(announcement) {
        Ok(line) => println!("{line}"),
        Err(err) => tracing::error!("failed to serialize announcement: {err}"),
      }
    } else {
      println!(
        "[T+{clock:>5}s] [{:>9}] {}",
        announcement.position.to_string().to_uppercase(),
        announcement.message
      );
    }
  }
}

/// A straight-line flight between the two airports: linear climb to cruise,
/// level cruise, then a linear descent to the arrival gate.
fn synthesize(
  dep: Vec2,
  arr: Vec2,
  cruise: f32,
  tick: u32,
  ticks: u32,
) -> AircraftState {
  let fraction = tick as f32 / ticks as f32;

  let (altitude, vertical_speed) = if fraction < CLIMB_END {
    (cruise * (fraction / CLIMB_END), 1800.0)
  } else if fraction < DESCENT_START {
    (cruise, 0.0)
  } else {
    let remaining = (1.0 - fraction) / (1.0 - DESCENT_START);
    (cruise * remaining, -1800.0)
  };

  let altitude = altitude.max(0.0);
  let on_ground = altitude < 1.0;

  AircraftState {
    pos: dep.lerp(arr, fraction),
    altitude_msl: altitude,
    // Both airports sit near sea level, so AGL tracks MSL closely enough
    // for the synthetic track.
    altitude_agl: altitude,
    groundspeed: if on_ground { 20.0 } else { 450.0 },
    heading: 90.0,
    on_ground,
    vertical_speed: if on_ground { 0.0 } else { vertical_speed },
  }
}
