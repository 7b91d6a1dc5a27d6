//! Game settings
//!
//! Every tunable the simulation reads lives here. Settings are fixed for the
//! lifetime of a [`GameState`](crate::sim::GameState); the host loads them once
//! at startup (optionally from a JSON file) and hands them over.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::DifficultyParams;

/// Failure to load or accept a settings document
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Playfield extent (origin at bottom-left, y grows upward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayfieldSettings {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

/// Agent body and flight physics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    pub launch_x: f32,
    pub launch_y: f32,
    pub width: f32,
    pub height: f32,
    /// Constant vertical acceleration (negative = down)
    pub gravity: f32,
    /// Velocity a flap sets, overriding the current one
    pub flap_velocity: f32,
    /// Debounce window between accepted flaps (seconds)
    pub min_flap_interval: f32,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            launch_x: AGENT_LAUNCH_X,
            // Vertically centered, rounded down like the playfield grid
            launch_y: (PLAYFIELD_HEIGHT / 2.0).floor() - (AGENT_HEIGHT / 2.0).floor(),
            width: AGENT_WIDTH,
            height: AGENT_HEIGHT,
            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,
            min_flap_interval: MIN_FLAP_INTERVAL,
        }
    }
}

/// Vertical band the random gap top is drawn from
///
/// The gap top is an integer in `[min_gap_y + bottom, height - gap - top]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapMargins {
    pub bottom: f32,
    pub top: f32,
}

impl GapMargins {
    /// Inclusive integer range of gap tops that keep a `gap_size` gap inside
    /// these margins. Empty when `hi < lo`.
    pub fn gap_top_range(&self, min_gap_y: f32, playfield_height: f32, gap_size: f32) -> (i32, i32) {
        let lo = (min_gap_y + self.bottom).ceil() as i32;
        let hi = (playfield_height - gap_size - self.top).floor() as i32;
        (lo, hi)
    }
}

/// Obstacle geometry and spawn layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleSettings {
    pub width: f32,
    pub min_gap_y: f32,
    pub cull_margin: f32,
    pub spawn_lead: f32,
    pub spacing_fraction: f32,
    /// Margins for the pair placed at run start
    pub initial_margins: GapMargins,
    /// Margins for obstacles spawned while running
    pub spawn_margins: GapMargins,
}

impl Default for ObstacleSettings {
    fn default() -> Self {
        Self {
            width: (PLAYFIELD_WIDTH * PIPE_WIDTH_FRACTION).floor(),
            min_gap_y: PIPE_MIN_GAP_Y,
            cull_margin: CULL_MARGIN,
            spawn_lead: SPAWN_LEAD,
            spacing_fraction: SPAWN_SPACING_FRACTION,
            initial_margins: GapMargins {
                bottom: 20.0,
                top: 40.0,
            },
            spawn_margins: GapMargins {
                bottom: 10.0,
                top: 30.0,
            },
        }
    }
}

/// Difficulty tiers and the ramp applied past the threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultySettings {
    pub easy: DifficultyParams,
    pub hard: DifficultyParams,
    /// Score at which the hard tier (and its ramp) begins
    pub threshold: u32,
    /// Points past the threshold to reach the full ramp
    pub ramp_span: u32,
    pub ramp_extra_speed: f32,
    pub ramp_gap_reduction: f32,
    pub min_gap: f32,
    pub ramp_interval_reduction: f32,
    pub min_spawn_interval: f32,
}

impl Default for DifficultySettings {
    fn default() -> Self {
        Self {
            easy: DifficultyParams {
                speed: 80.0,
                gap_size: 300.0,
                spawn_interval: 4.0,
                initial_spacing_multiplier: 1.3,
            },
            hard: DifficultyParams {
                speed: 180.0,
                gap_size: 200.0,
                spawn_interval: 2.0,
                initial_spacing_multiplier: 1.05,
            },
            threshold: 30,
            ramp_span: 50,
            ramp_extra_speed: 80.0,
            ramp_gap_reduction: 50.0,
            min_gap: 60.0,
            ramp_interval_reduction: 0.8,
            min_spawn_interval: 0.9,
        }
    }
}

/// Predictive autopilot tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotSettings {
    pub margin: f32,
    pub max_flaps: u8,
}

impl Default for AutopilotSettings {
    fn default() -> Self {
        Self {
            margin: AUTOPILOT_MARGIN,
            max_flaps: AUTOPILOT_MAX_FLAPS,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playfield: PlayfieldSettings,
    pub agent: AgentSettings,
    pub obstacles: ObstacleSettings,
    pub difficulty: DifficultySettings,
    pub autopilot: AutopilotSettings,
}

impl Settings {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json_pretty(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the configuration describes a playable field
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: String| Err(SettingsError::Invalid(msg));

        let field = &self.playfield;
        if !(field.width > 0.0 && field.height > 0.0) {
            return invalid(format!(
                "playfield must have positive size, got {}x{}",
                field.width, field.height
            ));
        }

        let agent = &self.agent;
        if !(agent.width > 0.0 && agent.height > 0.0) {
            return invalid("agent must have positive size".to_string());
        }
        if agent.gravity > 0.0 {
            return invalid(format!("gravity must not point upward, got {}", agent.gravity));
        }
        if agent.min_flap_interval <= 0.0 {
            return invalid("min_flap_interval must be positive".to_string());
        }
        if agent.launch_y < 0.0 || agent.launch_y + agent.height > field.height {
            return invalid("agent launch position is outside the playfield".to_string());
        }

        if self.obstacles.width <= 0.0 {
            return invalid("obstacle width must be positive".to_string());
        }

        let diff = &self.difficulty;
        for (tier, params) in [("easy", &diff.easy), ("hard", &diff.hard)] {
            if params.gap_size <= 0.0 || params.spawn_interval <= 0.0 {
                return invalid(format!("{tier} tier needs positive gap and spawn interval"));
            }
        }
        if diff.min_gap <= 0.0 || diff.min_spawn_interval <= 0.0 {
            return invalid("difficulty floors must be positive".to_string());
        }
        if diff.ramp_span == 0 {
            return invalid("ramp_span must be at least 1".to_string());
        }

        // The widest gap either tier can produce must leave room for both margin sets
        let widest_gap = diff.easy.gap_size.max(diff.hard.gap_size).max(diff.min_gap);
        for margins in [self.obstacles.initial_margins, self.obstacles.spawn_margins] {
            let (lo, hi) = margins.gap_top_range(self.obstacles.min_gap_y, field.height, widest_gap);
            if hi < lo {
                return invalid(format!(
                    "gap of {widest_gap} does not fit between margins ({lo}..={hi})"
                ));
            }
        }

        if self.autopilot.margin < 0.0 {
            return invalid("autopilot margin must not be negative".to_string());
        }

        Ok(())
    }
}
