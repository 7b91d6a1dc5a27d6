//! Per-tick simulation step
//!
//! One call advances a running game by `dt` seconds:
//! difficulty → agent physics → obstacle scroll/spawn → terminal checks →
//! autopilot → scoring.

use super::collision::detect_terminal;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands gathered by the host since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (space/click/tap); starts the first run while idle
    pub flap: bool,
    /// Start or restart a run
    pub start: bool,
    /// Flip the autopilot; enabling it while idle also starts a run
    pub toggle_autopilot: bool,
}

/// Apply `input`, then advance a running game by `dt` seconds
///
/// Idle and ended games only react to input; their state is otherwise frozen.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    assert!(
        dt >= 0.0 && dt.is_finite(),
        "tick requires a finite non-negative dt, got {dt}"
    );

    apply_input(state, input);

    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;

    let params = state.difficulty();
    state.agent.step(dt);
    state
        .field
        .advance(dt, params.speed, state.settings.obstacles.cull_margin);
    state
        .field
        .maybe_spawn(dt, &params, &state.settings, &mut state.rng);

    if let Some(cause) = detect_terminal(
        &mut state.agent,
        state.field.obstacles(),
        state.settings.playfield.height,
    ) {
        state.end_run(cause);
        return;
    }

    let plan = state
        .autopilot
        .evaluate(state.time_ticks, &state.agent, &state.field, params.speed);
    if let Some(plan) = plan {
        if !plan.within_margin {
            log::debug!(
                "Autopilot uncertain: best k={} misses gap center by {:.1}",
                plan.flaps,
                plan.miss_distance()
            );
            state.push_event(GameEvent::AutopilotUncertain {
                flaps: plan.flaps,
                miss_distance: plan.miss_distance(),
            });
        }
        if plan.wants_flap() {
            state.flap(true);
        }
    }

    let agent_x = state.agent.x;
    for _ in 0..state.field.collect_passed(agent_x) {
        state.add_point();
    }
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    if input.toggle_autopilot {
        let enable = !state.autopilot_enabled();
        state.set_autopilot(enable);
        if enable && state.phase == GamePhase::Idle {
            state.start_or_restart();
        }
    }

    if input.start && !state.is_running() {
        state.start_or_restart();
    }

    if input.flap {
        match state.phase {
            GamePhase::Idle => {
                state.start_or_restart();
            }
            GamePhase::Running => {
                state.request_flap();
            }
            // Restart needs an explicit start
            GamePhase::Ended => {}
        }
    }
}
