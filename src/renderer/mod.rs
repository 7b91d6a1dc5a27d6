//! Frame snapshot and drawing seam
//!
//! Renderers see an owned, serializable copy of what is on screen and never
//! touch the simulation's mutation paths.

use serde::{Deserialize, Serialize};

use crate::audio::{AudioManager, EffectPlayer};
use crate::sim::{EndCause, GamePhase, GameState};

/// Agent rectangle as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity: f32,
}

/// Obstacle as drawn: two segments around a gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: f32,
    pub width: f32,
    pub gap_top_y: f32,
    pub gap_size: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub end_cause: Option<EndCause>,
    pub autopilot: bool,
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub agent: AgentView,
    pub obstacles: Vec<ObstacleView>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let agent = &state.agent;
        let playfield = &state.settings().playfield;
        Self {
            phase: state.phase,
            score: state.score,
            end_cause: state.end_cause(),
            autopilot: state.autopilot_enabled(),
            playfield_width: playfield.width,
            playfield_height: playfield.height,
            agent: AgentView {
                x: agent.x,
                y: agent.y,
                width: agent.width,
                height: agent.height,
                velocity: agent.velocity,
            },
            obstacles: state
                .field
                .obstacles()
                .iter()
                .map(|o| ObstacleView {
                    x: o.x,
                    width: o.width,
                    gap_top_y: o.gap_top_y,
                    gap_size: o.gap_size,
                })
                .collect(),
        }
    }
}

/// Backend capable of drawing a frame
pub trait FrameRenderer {
    fn draw_frame(&mut self, frame: &FrameSnapshot);
}

/// Drain pending events into `audio`, then draw the current frame
pub fn present<P: EffectPlayer, R: FrameRenderer>(
    state: &mut GameState,
    audio: &mut AudioManager<P>,
    renderer: &mut R,
) {
    for event in state.drain_events() {
        audio.on_event(&event);
    }
    renderer.draw_frame(&FrameSnapshot::capture(state));
}
