//! Flappy Pilot - a bird vs. pipes side-scroller core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, difficulty, autopilot)
//! - `settings`: Fixed configuration supplied at startup
//! - `audio`: Sound effect capability seam
//! - `renderer`: Frame snapshot and drawing capability seam

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Default gameplay constants
pub mod consts {
    /// Nominal host tick (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = -480.0;
    /// Absolute upward speed set by a flap
    pub const FLAP_VELOCITY: f32 = 380.0;
    /// Minimum time between two accepted flaps
    pub const MIN_FLAP_INTERVAL: f32 = 0.18;

    /// Agent body
    pub const AGENT_WIDTH: f32 = 64.0;
    pub const AGENT_HEIGHT: f32 = 64.0;
    pub const AGENT_LAUNCH_X: f32 = 100.0;

    /// Pipe width as a fraction of playfield width
    pub const PIPE_WIDTH_FRACTION: f32 = 0.12;
    /// Lowest gap top before the spawn margins are added
    pub const PIPE_MIN_GAP_Y: f32 = 60.0;
    /// How far behind the origin a trailing edge travels before culling
    pub const CULL_MARGIN: f32 = 50.0;
    /// Minimum spawn x past the right edge of the playfield
    pub const SPAWN_LEAD: f32 = 20.0;
    /// Spacing after the rightmost obstacle, as a fraction of playfield width
    pub const SPAWN_SPACING_FRACTION: f32 = 0.7;

    /// Autopilot safety margin shrinking each side of the gap
    pub const AUTOPILOT_MARGIN: f32 = 6.0;
    /// Largest flap schedule the autopilot evaluates
    pub const AUTOPILOT_MAX_FLAPS: u8 = 3;
}
