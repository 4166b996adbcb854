//! Playfield entities: paddle, ball, bricks

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;

/// Fixed-size rectangular play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Horizontal center
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: u32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: PLAYFIELD_WIDTH / 2.0,
            y: PADDLE_START_Y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            color: PADDLE_COLOR,
        }
    }
}

impl Paddle {
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x - self.half_width(), self.y, self.width, self.height)
    }

    /// Move the paddle center to `x`, kept fully inside the playfield
    pub fn move_to(&mut self, x: f32, field: &Playfield) {
        let min = self.half_width();
        let max = field.width - self.half_width();
        self.x = x.clamp(min, max);
    }

    /// Shift the paddle by `dx`, clamped like `move_to`
    pub fn nudge(&mut self, dx: f32, field: &Playfield) {
        self.move_to(self.x + dx, field);
    }

    /// Back to the middle of the playfield
    pub fn recenter(&mut self, field: &Playfield) {
        self.x = field.width / 2.0;
    }
}

/// The ball. Velocity lives on the game, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Self::start_pos(),
            radius: BALL_RADIUS,
            color: BALL_COLOR,
        }
    }
}

impl Ball {
    /// Centered, resting just above the paddle
    pub fn start_pos() -> Vec2 {
        Vec2::new(BALL_START_X, BALL_START_Y)
    }

    pub fn reset(&mut self) {
        self.pos = Self::start_pos();
    }
}

/// A brick. Broken bricks stay in the list for the rest of the level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Unique within a level, row-major from 0
    pub id: u32,
    pub rect: Rect,
    pub color: u32,
    pub points: u32,
    pub broken: bool,
}

impl Brick {
    /// Bricks the ball can still hit
    #[inline]
    pub fn is_live(&self) -> bool {
        !self.broken
    }
}

/// Returns true once every brick in the list is broken
pub fn all_broken(bricks: &[Brick]) -> bool {
    bricks.iter().all(|b| b.broken)
}
