//! The player body
//!
//! Horizontal position is fixed; only the vertical state evolves. Bounds are
//! not enforced here, see [`collision`](super::collision).

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::kinematics::{apply_impulse, integrate};
use crate::settings::AgentSettings;

/// The bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Left edge (fixed for the whole run)
    pub x: f32,
    /// Bottom edge
    pub y: f32,
    /// Vertical velocity (positive = up)
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
    /// Simulated time since the last accepted flap
    since_last_flap: f32,
    physics: AgentSettings,
}

impl Agent {
    /// Create an agent at its launch position, at rest, ready to flap
    pub fn new(settings: &AgentSettings) -> Self {
        Self {
            x: settings.launch_x,
            y: settings.launch_y,
            velocity: 0.0,
            width: settings.width,
            height: settings.height,
            since_last_flap: settings.min_flap_interval,
            physics: *settings,
        }
    }

    /// Put the agent back at launch, at rest, with the debounce cleared
    pub fn reset(&mut self) {
        *self = Self::new(&self.physics);
    }

    /// Integrate gravity for `dt` seconds and advance the debounce clock
    pub fn step(&mut self, dt: f32) {
        assert!(dt >= 0.0, "Agent::step requires non-negative dt, got {dt}");
        (self.y, self.velocity) = integrate(self.y, self.velocity, self.physics.gravity, dt);
        self.since_last_flap += dt;
    }

    /// Whether a flap would be accepted right now
    #[inline]
    pub fn can_flap(&self) -> bool {
        self.since_last_flap >= self.physics.min_flap_interval
    }

    /// Set upward velocity to the flap constant, unless still debouncing
    ///
    /// Returns `true` if the flap was accepted. Rejected flaps are dropped,
    /// never queued.
    pub fn flap(&mut self) -> bool {
        if !self.can_flap() {
            return false;
        }
        self.velocity = apply_impulse(self.velocity, self.physics.flap_velocity);
        self.since_last_flap = 0.0;
        true
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Right edge (the side facing incoming obstacles)
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_rect(self.x, self.y, self.width, self.height)
    }

    /// Physics constants this agent flies with
    pub fn physics(&self) -> &AgentSettings {
        &self.physics
    }
}
