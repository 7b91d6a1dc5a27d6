//! Run state and the external control surface
//!
//! `GameState` owns the agent, the obstacle field and the score. Hosts drive it
//! through [`start_or_restart`](GameState::start_or_restart),
//! [`request_flap`](GameState::request_flap),
//! [`set_autopilot`](GameState::set_autopilot) and [`tick`](GameState::tick),
//! and read it back through the public fields and [`drain_events`](GameState::drain_events).

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::autopilot::Autopilot;
use super::collision::EndCause;
use super::difficulty::{DifficultyParams, params_for_score};
use super::field::ObstacleField;
use super::tick::{TickInput, tick};
use crate::settings::{Settings, SettingsError};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first run
    Idle,
    /// Physics and obstacles are live
    Running,
    /// Run over, state frozen until restart
    Ended,
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    /// A flap was accepted (rejected flaps produce nothing)
    Flapped { by_autopilot: bool },
    Scored { score: u32 },
    RunEnded { cause: EndCause, score: u32 },
    AutopilotToggled { enabled: bool },
    /// The autopilot found no schedule inside the safety margin
    AutopilotUncertain { flaps: u8, miss_distance: f32 },
}

/// Complete game state (deterministic for a given seed and input sequence)
///
/// Serializes with its generator position, so a restored copy plays on
/// exactly as the original would.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed for obstacle gap placement
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) settings: Settings,
    pub phase: GamePhase,
    pub score: u32,
    /// Ticks processed in the current run
    pub time_ticks: u64,
    /// Runs started so far
    pub runs: u32,
    pub agent: Agent,
    pub field: ObstacleField,
    pub autopilot: Autopilot,
    end_cause: Option<EndCause>,
    events: Vec<GameEvent>,
}

impl GameState {
    /// New idle game with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    /// New idle game with caller-provided settings (assumed valid)
    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            time_ticks: 0,
            runs: 0,
            agent: Agent::new(&settings.agent),
            field: ObstacleField::new(),
            autopilot: Autopilot::new(settings.autopilot),
            end_cause: None,
            events: Vec::new(),
            settings,
        }
    }

    /// Validate `settings` and build an idle game
    pub fn try_new(seed: u64, settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::with_settings(seed, settings))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Difficulty for the current score
    pub fn difficulty(&self) -> DifficultyParams {
        params_for_score(self.score, &self.settings.difficulty)
    }

    /// Why the last run ended (`None` while idle or running)
    pub fn end_cause(&self) -> Option<EndCause> {
        self.end_cause
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Begin a fresh run from `Idle` or `Ended`
    ///
    /// Returns `false` (and changes nothing) if a run is already in progress.
    pub fn start_or_restart(&mut self) -> bool {
        if self.is_running() {
            log::debug!("Start ignored: run already in progress");
            return false;
        }

        self.score = 0;
        self.time_ticks = 0;
        self.end_cause = None;
        self.agent.reset();
        let params = self.difficulty();
        self.field.populate_initial(&params, &self.settings, &mut self.rng);
        self.phase = GamePhase::Running;
        self.runs += 1;
        self.events.push(GameEvent::RunStarted);
        log::info!("Run {} started (seed {})", self.runs, self.seed);
        true
    }

    /// Manual flap input; debounced, only meaningful while running
    pub fn request_flap(&mut self) -> bool {
        self.flap(false)
    }

    /// Single path for every control impulse, manual or autopilot
    pub(crate) fn flap(&mut self, by_autopilot: bool) -> bool {
        if !self.is_running() || !self.agent.flap() {
            return false;
        }
        self.events.push(GameEvent::Flapped { by_autopilot });
        true
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.autopilot.set_enabled(enabled) {
            log::debug!("Autopilot {}", if enabled { "enabled" } else { "disabled" });
            self.events.push(GameEvent::AutopilotToggled { enabled });
        }
    }

    pub fn autopilot_enabled(&self) -> bool {
        self.autopilot.enabled()
    }

    /// Advance the simulation by `dt` seconds with no new input
    pub fn tick(&mut self, dt: f32) {
        tick(self, &TickInput::default(), dt);
    }

    /// Take all events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events accumulated since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn add_point(&mut self) {
        self.score += 1;
        self.events.push(GameEvent::Scored { score: self.score });
        log::debug!("Scored: {}", self.score);
    }

    pub(crate) fn end_run(&mut self, cause: EndCause) {
        self.phase = GamePhase::Ended;
        self.end_cause = Some(cause);
        self.events.push(GameEvent::RunEnded {
            cause,
            score: self.score,
        });
        log::info!(
            "Run {} ended ({:?}) after {} ticks, score {}",
            self.runs,
            cause,
            self.time_ticks,
            self.score
        );
    }
}
