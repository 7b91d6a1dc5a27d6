//! A single pipe pair
//!
//! Solid from the floor up to the gap and from the gap up to the ceiling.
//! The passable band is `[gap_top_y, gap_top_y + gap_size)`.

use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// One vertical obstacle with a gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Leading (left) edge
    pub x: f32,
    /// Bottom of the gap, equal to the lower segment's height
    pub gap_top_y: f32,
    pub gap_size: f32,
    pub width: f32,
    playfield_height: f32,
    /// Already counted toward the score
    pub scored: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_top_y: f32, gap_size: f32, width: f32, playfield_height: f32) -> Self {
        assert!(gap_size > 0.0, "obstacle gap must be positive, got {gap_size}");
        assert!(width > 0.0, "obstacle width must be positive, got {width}");
        Self {
            x,
            gap_top_y,
            gap_size,
            width,
            playfield_height,
            scored: false,
        }
    }

    /// Height of the segment rising from the floor
    #[inline]
    pub fn lower_height(&self) -> f32 {
        self.gap_top_y
    }

    /// Bottom edge of the segment hanging from the ceiling
    #[inline]
    pub fn upper_bottom(&self) -> f32 {
        self.gap_top_y + self.gap_size
    }

    /// Height of the segment hanging from the ceiling
    #[inline]
    pub fn upper_height(&self) -> f32 {
        self.playfield_height - self.upper_bottom()
    }

    #[inline]
    pub fn gap_center(&self) -> f32 {
        self.gap_top_y + self.gap_size / 2.0
    }

    /// Right edge, `x + width`
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    /// Translate horizontally (negative `dx` moves toward the origin)
    pub fn advance(&mut self, dx: f32) {
        self.x += dx;
    }

    pub fn lower_box(&self) -> Aabb {
        Aabb::from_rect(self.x, 0.0, self.width, self.lower_height())
    }

    pub fn upper_box(&self) -> Aabb {
        Aabb::from_rect(self.x, self.upper_bottom(), self.width, self.upper_height())
    }

    /// Whether `body` strictly intersects either solid segment
    pub fn overlaps(&self, body: &Aabb) -> bool {
        self.lower_box().intersects(body) || self.upper_box().intersects(body)
    }
}
