//! Breakout - A classic brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `renderer`: Draw-list generation and Canvas 2D painting
//! - `platform`: Browser input mapping
//! - `audio`: Sound effects driven by simulation events
//! - `settings`: Player preferences and frame timing

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{FrameTiming, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Top edge of the paddle
    pub const PADDLE_START_Y: f32 = PLAYFIELD_HEIGHT - 30.0;
    /// Keyboard nudge distance per key press
    pub const PADDLE_KEY_STEP: f32 = 25.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_START_X: f32 = PLAYFIELD_WIDTH / 2.0;
    pub const BALL_START_Y: f32 = PADDLE_START_Y - BALL_RADIUS - 5.0;
    /// Launch speed at level 1 (pixels per reference frame)
    pub const BALL_SPEED_INITIAL: f32 = 5.0;
    /// Extra launch speed per level
    pub const BALL_SPEED_INCREMENT: f32 = 0.5;
    /// Largest deflection off the paddle edge (60 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

    /// Brick grid
    pub const BRICK_ROWS: u32 = 5;
    pub const BRICK_MAX_ROWS: u32 = 8;
    pub const BRICK_COLS: u32 = 10;
    pub const BRICK_HEIGHT: f32 = 25.0;
    pub const BRICK_GAP: f32 = 5.0;
    pub const BRICK_WIDTH: f32 =
        (PLAYFIELD_WIDTH - (BRICK_COLS as f32 + 1.0) * BRICK_GAP) / BRICK_COLS as f32;
    /// Distance from the top of the playfield to the grid
    pub const BRICK_TOP_OFFSET: f32 = 50.0;

    /// Row colors, top row first (cycled when there are more rows)
    pub const BRICK_COLORS: [u32; 5] = [
        0xFF5252, // Red
        0xFF9800, // Orange
        0xFFEB3B, // Yellow
        0x4CAF50, // Green
        0x2196F3, // Blue
    ];
    /// Row point values, top rows worth more
    pub const BRICK_POINTS: [u32; 5] = [50, 40, 30, 20, 10];

    pub const PADDLE_COLOR: u32 = 0xFFFFFF;
    pub const BALL_COLOR: u32 = 0xFFFFFF;

    /// Game progression
    pub const STARTING_LIVES: u8 = 3;
    pub const FIRST_LEVEL: u32 = 1;
    pub const MAX_LEVEL: u32 = 5;

    /// Duration of one reference frame; velocities are per reference frame
    pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Cap on reference frames advanced in a single step after a stall
    pub const MAX_FRAME_SCALE: f32 = 3.0;
}

/// Format a packed 0xRRGGBB color as a CSS hex string
pub fn css_color(rgb: u32) -> String {
    format!("#{:06X}", rgb & 0x00FF_FFFF)
}
