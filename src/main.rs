use gps_odometer::utils::init_logging;
use gps_odometer::{
    ConfigurationManager, FlightState, GpsFeed, GpsReceiver, Odometer, ReplayReceiver, StepOutcome,
};
use std::env;
use std::error::Error;
use std::process;
use tracing::{info, warn};

/// Counters collected while replaying a track
#[derive(Debug, Default)]
struct ReplaySummary {
    samples: usize,
    accepted: usize,
    rejected: usize,
}

fn usage() -> ! {
    eprintln!("usage: gps-odometer <config.json> <track.json>");
    process::exit(2);
}

fn run(config_path: &str, track_path: &str) -> Result<(), Box<dyn Error>> {
    let manager = ConfigurationManager::from_file(config_path)?;
    if let Err(e) = init_logging(manager.config().debug_logging) {
        eprintln!("logging disabled: {}", e);
    }

    let mut receiver = ReplayReceiver::from_file(track_path)?;
    info!(points = receiver.remaining(), track = track_path, "Replaying track");

    let home = manager.home_position();
    let mut odometer = Odometer::new(manager.odometer_config());
    let mut feed = GpsFeed::new();
    let mut flight = FlightState::new();
    let mut summary = ReplaySummary::default();

    while receiver.pump(&mut feed) {
        summary.samples += 1;
        match odometer.step(&mut feed, &home, &mut flight) {
            StepOutcome::Accepted { .. } => summary.accepted += 1,
            StepOutcome::Rejected { .. } => summary.rejected += 1,
            StepOutcome::Primed | StepOutcome::NoSample => {}
        }
    }

    if summary.samples == 0 {
        warn!("Track contained no samples");
    }

    info!(
        samples = summary.samples,
        accepted = summary.accepted,
        rejected = summary.rejected,
        "Replay finished"
    );

    println!("odometer: {:.3} km", flight.odometer_km());
    if home.valid {
        println!(
            "home: {:.3} km at {} deg",
            flight.home_distance_km, flight.home_bearing
        );
    }

    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        usage();
    }

    if let Err(e) = run(&args[1], &args[2]) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
