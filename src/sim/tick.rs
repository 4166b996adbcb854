//! Per-frame game loop
//!
//! `Game` owns everything the loop mutates: the state store, the entities, the
//! pause flag, the frame clock and the RNG. The host calls `tick` once per
//! display refresh; input between frames goes through the same `Game`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::{Outcome, resolve_collisions};
use super::entities::{Ball, Brick, Paddle, Playfield};
use super::events::GameEvent;
use super::level::{generate_bricks, launch_velocity};
use super::state::{GamePhase, GameState};
use crate::settings::FrameTiming;

/// Input gathered since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Absolute paddle center (mouse), clamped on apply
    pub paddle_target: Option<f32>,
    /// Relative paddle movement (keyboard)
    pub paddle_nudge: f32,
    /// Pause toggle
    pub pause: bool,
    /// Start from the menu or restart after game over / win
    pub start: bool,
}

impl TickInput {
    /// Forget one-shot inputs after they were applied
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The whole simulation
#[derive(Debug, Clone)]
pub struct Game<R = Pcg32> {
    pub state: GameState,
    pub field: Playfield,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Ball velocity in pixels per reference frame
    pub vel: Vec2,
    /// Current level's bricks, broken ones included
    pub bricks: Vec<Brick>,
    pub frame_timing: FrameTiming,
    paused: bool,
    /// Timestamp of the previous active frame (ms)
    last_frame_ms: Option<f64>,
    events: Vec<GameEvent>,
    rng: R,
}

impl Game<Pcg32> {
    /// Create a game at the menu, with a seeded RNG
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Create a game at the menu using the given random source
    pub fn with_rng(rng: R) -> Self {
        Self {
            state: GameState::new(),
            field: Playfield::default(),
            paddle: Paddle::default(),
            ball: Ball::default(),
            vel: Vec2::ZERO,
            bricks: Vec::new(),
            frame_timing: FrameTiming::default(),
            paused: false,
            last_frame_ms: None,
            events: Vec::new(),
            rng,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::debug!("Paused: {}", self.paused);
    }

    /// Menu -> Playing
    pub fn start(&mut self) {
        self.state.start();
        log::info!("Game started");
        self.reset_session();
    }

    /// GameOver/Win -> Playing
    pub fn restart(&mut self) {
        self.state.restart();
        log::info!("Game restarted");
        self.reset_session();
    }

    /// End the run early
    pub fn end(&mut self) {
        self.state.end();
        self.last_frame_ms = None;
    }

    fn reset_session(&mut self) {
        self.paused = false;
        self.last_frame_ms = None;
        self.paddle.recenter(&self.field);
        self.begin_level();
    }

    /// Fresh bricks for the current level, ball back at the start, relaunched
    pub fn begin_level(&mut self) {
        self.bricks = generate_bricks(self.state.level);
        log::info!(
            "Level {} with {} bricks",
            self.state.level,
            self.bricks.len()
        );
        self.ball.reset();
        self.launch();
    }

    /// Launch the ball at the current level's speed in a random direction
    fn launch(&mut self) {
        self.vel = launch_velocity(self.state.level, &mut self.rng);
        log::debug!("Ball launched with velocity {:?}", self.vel);
        self.events.push(GameEvent::Launched);
    }

    /// Move the paddle center to `x` (clamped to the playfield)
    pub fn update_paddle_position(&mut self, x: f32) {
        self.paddle.move_to(x, &self.field);
    }

    /// Shift the paddle by `dx` (clamped to the playfield)
    pub fn nudge_paddle(&mut self, dx: f32) {
        self.paddle.nudge(dx, &self.field);
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn live_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_live()).count()
    }

    /// Advance the simulation to `now_ms`
    ///
    /// Does nothing unless playing and unpaused; the frame clock is cleared
    /// then, so the first frame after resuming only records its timestamp.
    pub fn step(&mut self, now_ms: f64) {
        if !self.state.is_playing() || self.paused {
            self.last_frame_ms = None;
            return;
        }

        let Some(last) = self.last_frame_ms.replace(now_ms) else {
            return;
        };
        let scale = self.frame_timing.frame_scale(now_ms - last);

        let tentative = Ball {
            pos: self.ball.pos + self.vel * scale,
            ..self.ball.clone()
        };

        let result = resolve_collisions(
            &tentative,
            self.vel,
            &self.paddle,
            &mut self.bricks,
            &self.field,
            &mut self.state,
            &mut self.events,
        );

        self.ball.pos = result.pos;
        if result.collided {
            self.vel = result.vel;
        }

        // Resets only happen while the run continues
        if !self.state.is_playing() {
            self.last_frame_ms = None;
            return;
        }

        match result.outcome {
            Outcome::BallLost => {
                self.ball.reset();
                self.paddle.recenter(&self.field);
                self.launch();
            }
            Outcome::BrickBroken {
                level_cleared: true,
                ..
            } => self.begin_level(),
            _ => {}
        }
    }

    /// JSON snapshot of the visible game state, for debugging
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&Snapshot {
            state: &self.state,
            paused: self.paused,
            paddle: &self.paddle,
            ball: &self.ball,
            vel: self.vel,
            bricks: &self.bricks,
        })
    }
}

#[derive(Serialize)]
struct Snapshot<'a> {
    state: &'a GameState,
    paused: bool,
    paddle: &'a Paddle,
    ball: &'a Ball,
    vel: Vec2,
    bricks: &'a [Brick],
}

/// Apply one frame of input, then advance the simulation
pub fn tick<R: Rng>(game: &mut Game<R>, input: &TickInput, now_ms: f64) {
    if input.start {
        match game.state.phase {
            GamePhase::Menu => game.start(),
            GamePhase::GameOver | GamePhase::Win => game.restart(),
            GamePhase::Playing => {}
        }
    }

    if game.state.is_playing() {
        if input.pause {
            game.toggle_pause();
        }
        if let Some(x) = input.paddle_target {
            game.update_paddle_position(x);
        }
        if input.paddle_nudge != 0.0 {
            game.nudge_paddle(input.paddle_nudge);
        }
    }

    game.step(now_ms);
}
