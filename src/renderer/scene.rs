//! Draw-list generation
//!
//! Pure function of the game: no canvas, no DOM.

use glam::Vec2;
use rand::Rng;

use super::colors;
use crate::sim::{Game, GamePhase, Rect};

/// Corner radius for bricks
const BRICK_CORNER: f32 = 2.0;
/// Corner radius for the paddle
const PADDLE_CORNER: f32 = 8.0;
/// Opacity of the full-screen dimming behind overlays
const MENU_DIM: f32 = 0.5;
const PAUSE_DIM: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// One primitive to paint, in playfield coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole playfield
    Clear { color: u32 },
    Rect {
        rect: Rect,
        color: u32,
        alpha: f32,
    },
    RoundedRect {
        rect: Rect,
        radius: f32,
        color: u32,
        outline: Option<u32>,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: u32,
    },
    Text {
        text: String,
        /// Baseline anchor
        pos: Vec2,
        size: f32,
        color: u32,
        align: TextAlign,
    },
}

impl DrawCommand {
    fn text(text: impl Into<String>, pos: Vec2, size: f32, color: u32, align: TextAlign) -> Self {
        DrawCommand::Text {
            text: text.into(),
            pos,
            size,
            color,
            align,
        }
    }

    fn centered(text: impl Into<String>, y: f32, width: f32, size: f32, color: u32) -> Self {
        Self::text(text, Vec2::new(width / 2.0, y), size, color, TextAlign::Center)
    }
}

/// Build everything visible this frame, back to front
pub fn build_frame<R: Rng>(game: &Game<R>) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(game.bricks.len() + 8);
    let field = &game.field;
    let full = Rect::new(0.0, 0.0, field.width, field.height);

    out.push(DrawCommand::Clear {
        color: colors::BACKGROUND,
    });

    // Broken bricks are not drawn
    out.extend(game.bricks.iter().filter(|b| b.is_live()).map(|b| {
        DrawCommand::RoundedRect {
            rect: b.rect,
            radius: BRICK_CORNER,
            color: b.color,
            outline: Some(colors::BRICK_OUTLINE),
        }
    }));

    out.push(DrawCommand::RoundedRect {
        rect: game.paddle.rect(),
        radius: PADDLE_CORNER,
        color: game.paddle.color,
        outline: None,
    });

    if game.state.phase != GamePhase::Menu {
        out.push(DrawCommand::Circle {
            center: game.ball.pos,
            radius: game.ball.radius,
            color: game.ball.color,
        });
    }

    hud(game, &mut out);

    let w = field.width;
    let mid = field.height / 2.0;
    match game.state.phase {
        GamePhase::Menu => {
            out.push(dim(full, MENU_DIM));
            out.push(DrawCommand::centered("BREAKOUT", mid - 60.0, w, 48.0, colors::TEXT));
            out.push(DrawCommand::centered(
                "Break all the bricks with the ball to win!",
                mid,
                w,
                18.0,
                colors::TEXT,
            ));
            out.push(DrawCommand::centered(
                "Use the left and right arrow keys or mouse to move the paddle.",
                mid + 30.0,
                w,
                18.0,
                colors::TEXT,
            ));
            out.push(DrawCommand::centered(
                "Press Enter to start",
                mid + 80.0,
                w,
                20.0,
                colors::TEXT_DIM,
            ));
        }
        GamePhase::GameOver | GamePhase::Win => {
            let title = if game.state.phase == GamePhase::Win {
                "You Win!"
            } else {
                "Game Over"
            };
            out.push(dim(full, MENU_DIM));
            out.push(DrawCommand::centered(title, mid - 40.0, w, 48.0, colors::TEXT));
            out.push(DrawCommand::centered(
                format!("Final Score: {}", game.state.score),
                mid + 10.0,
                w,
                28.0,
                colors::TEXT,
            ));
            out.push(DrawCommand::centered(
                "Press Enter to play again",
                mid + 60.0,
                w,
                20.0,
                colors::TEXT_DIM,
            ));
        }
        GamePhase::Playing if game.is_paused() => {
            out.push(dim(full, PAUSE_DIM));
            out.push(DrawCommand::centered("PAUSED", mid, w, 32.0, colors::TEXT));
            out.push(DrawCommand::centered(
                "Press 'P' to resume",
                mid + 30.0,
                w,
                16.0,
                colors::TEXT,
            ));
        }
        GamePhase::Playing => {}
    }

    out
}

fn dim(rect: Rect, alpha: f32) -> DrawCommand {
    DrawCommand::Rect {
        rect,
        color: colors::OVERLAY,
        alpha,
    }
}

/// Score on the left, lives and level on the right
fn hud<R: Rng>(game: &Game<R>, out: &mut Vec<DrawCommand>) {
    let y = 30.0;
    out.push(DrawCommand::text(
        format!("Score: {}", game.state.score),
        Vec2::new(10.0, y),
        20.0,
        colors::TEXT,
        TextAlign::Left,
    ));
    out.push(DrawCommand::text(
        format!("Lives: {}   Level: {}", game.state.lives, game.state.level),
        Vec2::new(game.field.width - 10.0, y),
        20.0,
        colors::TEXT,
        TextAlign::Right,
    ));
}
