//! Terminal-state detection
//!
//! Axis-aligned boxes, playfield bounds, and obstacle overlap. Touching is not
//! overlapping: every comparison is strict.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::obstacle::Obstacle;

/// Axis-aligned bounding box (y grows upward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from bottom-left corner and size
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(x + width, y + height))
    }

    /// Strict intersection: shared edges do not count
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// Agent bottom reached the floor
    Floor,
    /// Agent top reached the ceiling
    Ceiling,
    /// Agent overlapped an obstacle segment
    Obstacle,
}

/// Check the floor then the ceiling, clamping the agent onto the breached edge
pub fn check_bounds(agent: &mut Agent, playfield_height: f32) -> Option<EndCause> {
    if agent.y <= 0.0 {
        agent.y = 0.0;
        return Some(EndCause::Floor);
    }
    if agent.top() >= playfield_height {
        agent.y = playfield_height - agent.height;
        return Some(EndCause::Ceiling);
    }
    None
}

/// Index (in spawn order) of the first obstacle the agent overlaps
pub fn first_overlap(agent: &Agent, obstacles: &[Obstacle]) -> Option<usize> {
    let body = agent.bounding_box();
    obstacles.iter().position(|o| o.overlaps(&body))
}

/// Run every terminal check in order: floor, ceiling, obstacles
pub fn detect_terminal(
    agent: &mut Agent,
    obstacles: &[Obstacle],
    playfield_height: f32,
) -> Option<EndCause> {
    check_bounds(agent, playfield_height)
        .or_else(|| first_overlap(agent, obstacles).map(|_| EndCause::Obstacle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AgentSettings;

    fn agent_at(y: f32) -> Agent {
        let mut a = Agent::new(&AgentSettings::default());
        a.y = y;
        a
    }

    #[test]
    fn test_aabb_shared_edge_is_not_overlap() {
        let a = Aabb::from_rect(0.0, 0.0, 10.0, 10.0);
        let right = Aabb::from_rect(10.0, 0.0, 10.0, 10.0);
        let above = Aabb::from_rect(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&above));
    }

    #[test]
    fn test_aabb_penetration_is_overlap() {
        let a = Aabb::from_rect(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::from_rect(9.999, 9.999, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_floor_breach_clamps_to_zero() {
        let mut a = agent_at(-3.5);
        assert_eq!(check_bounds(&mut a, 600.0), Some(EndCause::Floor));
        assert_eq!(a.y, 0.0);
    }

    #[test]
    fn test_floor_contact_counts_as_breach() {
        let mut a = agent_at(0.0);
        assert_eq!(check_bounds(&mut a, 600.0), Some(EndCause::Floor));
    }

    #[test]
    fn test_ceiling_breach_clamps_to_top() {
        let mut a = agent_at(540.0);
        assert_eq!(check_bounds(&mut a, 600.0), Some(EndCause::Ceiling));
        assert_eq!(a.y, 536.0);
    }

    #[test]
    fn test_inside_bounds_is_fine() {
        let mut a = agent_at(268.0);
        assert_eq!(check_bounds(&mut a, 600.0), None);
        assert_eq!(a.y, 268.0);
    }

    #[test]
    fn test_detect_terminal_reports_obstacle() {
        let mut a = agent_at(268.0);
        // Gap far above the agent, so the lower segment covers it
        let blocker = Obstacle::new(120.0, 400.0, 100.0, 48.0, 600.0);
        let clear = Obstacle::new(300.0, 400.0, 100.0, 48.0, 600.0);
        assert_eq!(first_overlap(&a, &[clear.clone(), blocker.clone()]), Some(1));
        assert_eq!(
            detect_terminal(&mut a, &[blocker], 600.0),
            Some(EndCause::Obstacle)
        );
        assert_eq!(detect_terminal(&mut a, &[clear], 600.0), None);
    }
}
