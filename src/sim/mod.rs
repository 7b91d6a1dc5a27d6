//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time advances only through the `dt` handed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod agent;
pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod field;
pub mod kinematics;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use agent::Agent;
pub use autopilot::{Autopilot, FlightPlan, plan_flight, predict_center_with_flaps};
pub use collision::{Aabb, EndCause};
pub use difficulty::{DifficultyParams, params_for_score};
pub use field::ObstacleField;
pub use obstacle::Obstacle;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
