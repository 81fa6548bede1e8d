//! Killer Quebes entry point
//!
//! Runs a headless demo session driven by the autopilot. A windowed build
//! supplies its own `Engine` implementation and calls `Session::run_frame`
//! from its render loop.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use killer_quebes::autopilot::Autopilot;
use killer_quebes::engine::HeadlessEngine;
use killer_quebes::{Session, Tuning};

#[derive(Parser, Debug)]
#[command(name = "killer-quebes")]
#[command(about = "Headless Killer Quebes session played by the autopilot")]
struct Cli {
    /// Autopilot seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Stop after this many frames
    #[arg(long, default_value_t = 100_000)]
    frames: u64,
    /// Seconds reported per frame
    #[arg(long, default_value_t = 1.0 / 60.0, value_parser = parse_frame_time)]
    frame_time: f32,
    /// JSON tuning file
    #[arg(long)]
    tuning: Option<PathBuf>,
}

fn parse_frame_time(raw: &str) -> Result<f32, String> {
    let secs = raw.parse::<f32>().map_err(|e| e.to_string())?;
    if secs.is_finite() && secs >= 0.0 {
        Ok(secs)
    } else {
        Err(format!("must be a non-negative number of seconds, got {raw}"))
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Killer Quebes (headless) starting...");

    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    let mut engine = HeadlessEngine::new(cli.frame_time).with_frame_limit(cli.frames);
    let mut session = Session::new(&mut engine, tuning);
    let mut pilot = Autopilot::new(cli.seed);

    loop {
        let input = pilot.decide(&session.state);
        engine.apply_input(&input);
        if !session.run_frame(&mut engine) {
            break;
        }
    }

    let state = &session.state;
    println!(
        "{:?} after {} frames: {}/{} blocks destroyed",
        state.phase,
        state.frame,
        state.destroyed_count(),
        killer_quebes::consts::TOTAL_BLOCKS
    );
    match serde_json::to_string(state) {
        Ok(json) => log::debug!("Final state: {json}"),
        Err(e) => log::warn!("Could not serialize final state: {e}"),
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["killer-quebes"]).unwrap();
        assert_eq!(cli.seed, 1);
        assert_eq!(cli.frames, 100_000);
        assert!((cli.frame_time - 1.0 / 60.0).abs() < 1e-9);
        assert!(cli.tuning.is_none());
    }

    #[test]
    fn test_cli_all_flags() {
        let cli = Cli::try_parse_from([
            "killer-quebes",
            "--seed",
            "9",
            "--frames",
            "10",
            "--frame-time",
            "0.5",
            "--tuning",
            "t.json",
        ])
        .unwrap();
        assert_eq!(cli.seed, 9);
        assert_eq!(cli.frames, 10);
        assert_eq!(cli.frame_time, 0.5);
        assert_eq!(cli.tuning, Some(PathBuf::from("t.json")));
    }

    #[test]
    fn test_cli_rejects_bad_input() {
        assert!(Cli::try_parse_from(["killer-quebes", "--seed"]).is_err());
        assert!(Cli::try_parse_from(["killer-quebes", "--frame-time", "-1"]).is_err());
        assert!(Cli::try_parse_from(["killer-quebes", "--frame-time", "inf"]).is_err());
        assert!(Cli::try_parse_from(["killer-quebes", "--frame-time", "NaN"]).is_err());
        assert!(Cli::try_parse_from(["killer-quebes", "--wat"]).is_err());
    }
}
