//! Keyboard and mouse mapping
//!
//! Events arrive between frames; `InputState` accumulates them and hands the
//! frame loop one `TickInput` per frame.

use crate::consts::PLAYFIELD_WIDTH;
use crate::settings::Settings;
use crate::sim::TickInput;

/// What a key press means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    TogglePause,
    /// Start from the menu, or restart after game over / win
    Start,
    ToggleMute,
}

/// Map a `KeyboardEvent.key` value to an action
pub fn action_for_key(key: &str) -> Option<InputAction> {
    match key {
        "ArrowLeft" => Some(InputAction::MoveLeft),
        "ArrowRight" => Some(InputAction::MoveRight),
        "p" | "P" => Some(InputAction::TogglePause),
        "Enter" | " " => Some(InputAction::Start),
        "m" | "M" => Some(InputAction::ToggleMute),
        _ => None,
    }
}

/// Input accumulated since the last frame
#[derive(Debug, Clone)]
pub struct InputState {
    pending: TickInput,
    key_step: f32,
    mouse_control: bool,
    mute_requested: bool,
}

impl InputState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pending: TickInput::default(),
            key_step: settings.key_step,
            mouse_control: settings.mouse_control,
            mute_requested: false,
        }
    }

    pub fn apply(&mut self, action: InputAction) {
        match action {
            InputAction::MoveLeft => self.pending.paddle_nudge -= self.key_step,
            InputAction::MoveRight => self.pending.paddle_nudge += self.key_step,
            // Two presses in one frame cancel out
            InputAction::TogglePause => self.pending.pause = !self.pending.pause,
            InputAction::Start => self.pending.start = true,
            InputAction::ToggleMute => self.mute_requested = !self.mute_requested,
        }
    }

    /// Handle a key press; returns the action if the key is bound
    pub fn key_down(&mut self, key: &str) -> Option<InputAction> {
        let action = action_for_key(key)?;
        self.apply(action);
        Some(action)
    }

    /// Handle a mouse move at `client_x`, given the canvas' left edge and its
    /// on-screen width (CSS pixels)
    ///
    /// The position is scaled to playfield units; the paddle clamps it.
    pub fn mouse_move(&mut self, client_x: f32, canvas_left: f32, canvas_width: f32) {
        if !self.mouse_control || canvas_width <= 0.0 {
            return;
        }
        let relative = client_x - canvas_left;
        self.pending.paddle_target = Some(relative * PLAYFIELD_WIDTH / canvas_width);
    }

    /// Ask for a pause on the next frame (tab hidden, window blurred)
    pub fn request_pause(&mut self) {
        self.pending.pause = true;
    }

    /// Input for this frame; the pending input starts over
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }

    /// Whether the player asked to toggle mute since the last call
    pub fn take_mute_toggle(&mut self) -> bool {
        std::mem::replace(&mut self.mute_requested, false)
    }
}
