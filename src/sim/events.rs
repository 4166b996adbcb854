//! Simulation events for the host (audio, logging, HUD effects)
//!
//! The simulation only queues these; it never waits on a consumer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The ball changed direction this step (wall, ceiling, paddle, brick)
    /// or was lost. Queued at most once per step.
    Collision,
    /// Ball bounced off the paddle; offset in [-1, 1] from paddle center
    PaddleHit { offset: f32 },
    BrickBroken { id: u32, points: u32 },
    LifeLost { lives_left: u8 },
    /// Every brick of `level` is broken
    LevelCleared { level: u32 },
    /// Ball (re)launched at the start of a level or after a lost life
    Launched,
    GameOver { score: u64 },
    Won { score: u64 },
}
