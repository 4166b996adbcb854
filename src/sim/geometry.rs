//! Axis-aligned rectangle geometry
//!
//! Playfield coordinates: origin at the top-left corner, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis of a rebound off a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    /// Ball struck a left/right side, reverse dx
    Horizontal,
    /// Ball struck a top/bottom side, reverse dy
    Vertical,
}

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Check if the bounding box of a circle overlaps this rectangle
    ///
    /// Touching edges count as overlap. Corners are treated as square, which
    /// is the coarse test bricks use.
    pub fn overlaps_circle_bounds(&self, center: Vec2, radius: f32) -> bool {
        center.x + radius >= self.left()
            && center.x - radius <= self.right()
            && center.y + radius >= self.top()
            && center.y - radius <= self.bottom()
    }

    /// Decide which axis a ball at `point` rebounds on
    ///
    /// Offsets from the center are normalized by the half extents so that
    /// wide, flat bricks compare fairly; the dominant axis wins and ties
    /// go vertical.
    pub fn bounce_axis(&self, point: Vec2) -> BounceAxis {
        let half = self.half_extents();
        let offset = (point - self.center()).abs();
        let nx = offset.x / half.x;
        let ny = offset.y / half.y;
        if nx > ny {
            BounceAxis::Horizontal
        } else {
            BounceAxis::Vertical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(5.0, 55.0, 74.5, 25.0);
        assert_eq!(r.left(), 5.0);
        assert_eq!(r.right(), 79.5);
        assert_eq!(r.top(), 55.0);
        assert_eq!(r.bottom(), 80.0);
        assert_eq!(r.center(), Vec2::new(42.25, 67.5));
    }

    #[test]
    fn test_circle_bounds_overlap() {
        let r = Rect::new(100.0, 100.0, 50.0, 20.0);

        // Inside
        assert!(r.overlaps_circle_bounds(Vec2::new(125.0, 110.0), 8.0));
        // Just touching the top edge
        assert!(r.overlaps_circle_bounds(Vec2::new(125.0, 92.0), 8.0));
        // Clearly above
        assert!(!r.overlaps_circle_bounds(Vec2::new(125.0, 91.0), 8.0));
        // Off to the right
        assert!(!r.overlaps_circle_bounds(Vec2::new(160.0, 110.0), 8.0));
    }

    #[test]
    fn test_bounce_axis() {
        let r = Rect::new(0.0, 0.0, 80.0, 20.0);

        // Coming in from the side, level with the center
        assert_eq!(r.bounce_axis(Vec2::new(-4.0, 10.0)), BounceAxis::Horizontal);
        // Coming in from below, near the middle
        assert_eq!(r.bounce_axis(Vec2::new(40.0, 26.0)), BounceAxis::Vertical);
        // Dead center ties go vertical
        assert_eq!(r.bounce_axis(r.center()), BounceAxis::Vertical);
    }
}
