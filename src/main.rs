//! Flappy Pilot headless runner
//!
//! Plays the game with the autopilot at a fixed 60 Hz tick and reports each
//! run through the logger. Set `RUST_LOG=debug` to see periodic frame
//! snapshots.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use flappy_pilot::Settings;
use flappy_pilot::audio::{AudioManager, SilentPlayer};
use flappy_pilot::consts::SIM_DT;
use flappy_pilot::renderer::{FrameRenderer, FrameSnapshot, present};
use flappy_pilot::sim::{GamePhase, GameState};

/// Log one snapshot per simulated second
const SNAPSHOT_EVERY: u64 = 60;
/// Longest session accepted on the command line (one simulated day)
const MAX_SECONDS: f32 = 86_400.0;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless bird vs. pipes run with the autopilot", long_about = None)]
struct Args {
    /// Seed for obstacle gap placement
    #[arg(default_value_t = 42)]
    seed: u64,

    /// Simulated seconds to play
    #[arg(default_value_t = 30.0, value_parser = parse_seconds)]
    seconds: f32,

    /// JSON settings file (partial documents override the defaults)
    #[arg(long, env = "FLAPPY_PILOT_SETTINGS")]
    settings: Option<PathBuf>,
}

fn parse_seconds(raw: &str) -> Result<f32, String> {
    let seconds: f32 = raw.parse().map_err(|e| format!("{e}"))?;
    if !(0.0..=MAX_SECONDS).contains(&seconds) {
        return Err(format!("must be between 0 and {MAX_SECONDS}"));
    }
    Ok(seconds)
}

/// Renderer that dumps occasional frames as JSON to the debug log
#[derive(Default)]
struct LogRenderer {
    frames: u64,
}

impl FrameRenderer for LogRenderer {
    fn draw_frame(&mut self, frame: &FrameSnapshot) {
        self.frames += 1;
        if self.frames % SNAPSHOT_EVERY != 0 || !log::log_enabled!(log::Level::Debug) {
            return;
        }
        match serde_json::to_string(frame) {
            Ok(json) => log::debug!("frame {}: {}", self.frames, json),
            Err(e) => log::warn!("failed to serialize frame: {e}"),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::init();

    let settings = match &args.settings {
        Some(path) => Settings::load_from(path),
        None => Ok(Settings::default()),
    };
    let state = settings.and_then(|settings| GameState::try_new(args.seed, settings));
    let mut state = match state {
        Ok(state) => state,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Flappy Pilot (headless) seed={} duration={}s",
        args.seed,
        args.seconds
    );

    let mut audio = AudioManager::new(SilentPlayer);
    let mut renderer = LogRenderer::default();
    let mut scores = Vec::new();

    state.set_autopilot(true);
    state.start_or_restart();

    let total_ticks = (args.seconds / SIM_DT).round() as u64;
    for _ in 0..total_ticks {
        state.tick(SIM_DT);
        if state.phase == GamePhase::Ended {
            scores.push(state.score);
            present(&mut state, &mut audio, &mut renderer);
            state.start_or_restart();
        }
        present(&mut state, &mut audio, &mut renderer);
    }

    if state.is_running() {
        log::info!("Time up with run {} in progress, score {}", state.runs, state.score);
    }
    let best = scores.iter().copied().max().unwrap_or(0).max(state.score);
    log::info!(
        "Finished {} run(s), best score {}, ended runs: {:?}",
        state.runs,
        best,
        scores
    );
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["flappy-pilot"]).unwrap();
        assert_eq!(args.seed, 42);
        assert_eq!(args.seconds, 30.0);
    }

    #[test]
    fn test_positional_seed_and_seconds() {
        let args = Args::try_parse_from(["flappy-pilot", "7", "2.5", "--settings", "s.json"]).unwrap();
        assert_eq!(args.seed, 7);
        assert_eq!(args.seconds, 2.5);
        assert_eq!(args.settings, Some(PathBuf::from("s.json")));
    }

    #[test]
    fn test_help_prints_usage() {
        let err = Args::try_parse_from(["flappy-pilot", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_unbounded_seconds_rejected() {
        for bad in ["inf", "NaN", "-1", "1e9"] {
            assert!(
                Args::try_parse_from(["flappy-pilot", "1", bad]).is_err(),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn test_bad_seed_rejected() {
        assert!(Args::try_parse_from(["flappy-pilot", "--", "-3"]).is_err());
        assert!(Args::try_parse_from(["flappy-pilot", "abc"]).is_err());
    }
}
