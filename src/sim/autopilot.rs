//! Predictive autopilot
//!
//! Each tick, forward-simulate the agent to the moment the next obstacle
//! reaches it under 0..=K flap schedules and pick the smallest schedule whose
//! predicted center lands inside the (margin-shrunk) gap. Only the first flap
//! of a schedule is ever issued; the rest are re-decided on later ticks, so
//! nothing has to be cancelled when the state changes under the plan.

use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::field::ObstacleField;
use super::kinematics::{apply_impulse, integrate};
use super::obstacle::Obstacle;
use crate::settings::AutopilotSettings;

/// Outcome of one planning pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
    /// Chosen schedule length; `>= 1` means flap now
    pub flaps: u8,
    /// Agent center predicted at `time_to_obstacle` under the schedule
    pub predicted_center: f32,
    pub gap_center: f32,
    pub time_to_obstacle: f32,
    /// `false` when no schedule cleared the margin and the closest was taken
    pub within_margin: bool,
}

impl FlightPlan {
    #[inline]
    pub fn wants_flap(&self) -> bool {
        self.flaps >= 1
    }

    /// Distance between the predicted center and the gap center
    #[inline]
    pub fn miss_distance(&self) -> f32 {
        (self.predicted_center - self.gap_center).abs()
    }
}

/// Predict the agent's vertical center after `time_to_obstacle` seconds
///
/// Flap `i` of `flaps` fires at `i * min_flap_interval`; flaps that would fire
/// at or after `time_to_obstacle` are dropped. Between events the motion is
/// integrated in closed form, and each flap replaces the velocity exactly like
/// [`Agent::flap`].
pub fn predict_center_with_flaps(agent: &Agent, time_to_obstacle: f32, flaps: u8) -> f32 {
    let physics = agent.physics();
    let mut y = agent.y;
    let mut v = agent.velocity;
    let mut t_prev = 0.0;

    for i in 0..flaps {
        let t_flap = f32::from(i) * physics.min_flap_interval;
        if t_flap >= time_to_obstacle {
            break;
        }
        (y, v) = integrate(y, v, physics.gravity, t_flap - t_prev);
        v = apply_impulse(v, physics.flap_velocity);
        t_prev = t_flap;
    }

    let (y, _) = integrate(y, v, physics.gravity, time_to_obstacle - t_prev);
    y + agent.height / 2.0
}

/// Choose a flap schedule for clearing `obstacle` at horizontal `speed`
///
/// Returns `None` when `speed <= 0`: the obstacle never arrives, so there is
/// nothing to plan against. An obstacle whose leading edge is already behind
/// the agent is planned at time zero.
pub fn plan_flight(
    agent: &Agent,
    obstacle: &Obstacle,
    speed: f32,
    settings: &AutopilotSettings,
) -> Option<FlightPlan> {
    if speed <= 0.0 {
        return None;
    }

    let time_to_obstacle = ((obstacle.x - agent.x) / speed).max(0.0);
    let gap_center = obstacle.gap_center();
    let half = obstacle.gap_size / 2.0;
    let lo = gap_center - half + settings.margin;
    let hi = gap_center + half - settings.margin;

    let predictions: Vec<(u8, f32)> = (0..=settings.max_flaps)
        .map(|k| (k, predict_center_with_flaps(agent, time_to_obstacle, k)))
        .collect();

    let plan = |(flaps, predicted_center): (u8, f32), within_margin| FlightPlan {
        flaps,
        predicted_center,
        gap_center,
        time_to_obstacle,
        within_margin,
    };

    if let Some(&hit) = predictions.iter().find(|(_, c)| (lo..=hi).contains(c)) {
        return Some(plan(hit, true));
    }

    // Best effort: closest to the gap center, ties to the fewest flaps
    let closest = predictions.iter().copied().fold(None, |best: Option<(u8, f32)>, cand| {
        match best {
            Some(b) if (b.1 - gap_center).abs() <= (cand.1 - gap_center).abs() => Some(b),
            _ => Some(cand),
        }
    })?;
    Some(plan(closest, false))
}

/// Autopilot toggle plus bookkeeping of the most recent plan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Autopilot {
    enabled: bool,
    settings: AutopilotSettings,
    last_plan: Option<FlightPlan>,
    last_tick: Option<u64>,
}

impl Autopilot {
    pub fn new(settings: AutopilotSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` if the flag actually changed
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let changed = self.enabled != enabled;
        self.enabled = enabled;
        if !enabled {
            self.last_plan = None;
        }
        changed
    }

    /// Most recent plan and the tick it was computed on
    pub fn last_plan(&self) -> Option<(u64, FlightPlan)> {
        self.last_tick.zip(self.last_plan)
    }

    /// Plan against the next obstacle ahead of the agent
    ///
    /// Read-only with respect to the game; the caller routes any flap
    /// through the normal flap path.
    pub fn evaluate(
        &mut self,
        tick: u64,
        agent: &Agent,
        field: &ObstacleField,
        speed: f32,
    ) -> Option<FlightPlan> {
        if !self.enabled {
            return None;
        }
        let obstacle = field.next_obstacle_ahead_of(agent.x)?;
        let plan = plan_flight(agent, obstacle, speed, &self.settings)?;

        log::trace!(
            "Autopilot tick {}: k={} predicted={:.1} gap={:.1} t={:.3}",
            tick,
            plan.flaps,
            plan.predicted_center,
            plan.gap_center,
            plan.time_to_obstacle
        );
        self.last_plan = Some(plan);
        self.last_tick = Some(tick);
        Some(plan)
    }
}
