//! Game-state store: phase plus score/lives/level counters
//!
//! The action methods are the only mutators. They do not guard against
//! out-of-phase calls (advancing a level from the menu, say); callers own that.

use serde::{Deserialize, Serialize};

use crate::consts::{FIRST_LEVEL, MAX_LEVEL, STARTING_LIVES};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Out of lives (or ended by the player)
    GameOver,
    /// Cleared the final level
    Win,
}

/// Score, lives and level plus the active phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u64,
    /// Remaining lives, 0..=3
    pub lives: u8,
    /// Current level, 1..=5
    pub level: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Menu,
            score: 0,
            lives: STARTING_LIVES,
            level: FIRST_LEVEL,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    fn reset_counters(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.level = FIRST_LEVEL;
    }

    /// Menu -> Playing with fresh counters
    pub fn start(&mut self) {
        self.phase = GamePhase::Playing;
        self.reset_counters();
    }

    /// GameOver/Win -> Playing with fresh counters
    pub fn restart(&mut self) {
        self.phase = GamePhase::Playing;
        self.reset_counters();
    }

    pub fn end(&mut self) {
        self.phase = GamePhase::GameOver;
    }

    pub fn win(&mut self) {
        self.phase = GamePhase::Win;
    }

    pub fn update_score(&mut self, points: u32) {
        self.score += u64::from(points);
    }

    /// Lose a life; reaching zero ends the game
    pub fn decrement_lives(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
        }
    }

    /// Move to the next level; going past the last level wins the game
    pub fn advance_level(&mut self) {
        let next = self.level + 1;
        if next > MAX_LEVEL {
            self.level = MAX_LEVEL;
            self.phase = GamePhase::Win;
        } else {
            self.level = next;
        }
    }
}
