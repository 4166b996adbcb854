//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Injected, seedable RNG only
//! - Stable brick order (by id)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod events;
pub mod geometry;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, Outcome, resolve_collisions};
pub use entities::{Ball, Brick, Paddle, Playfield};
pub use events::GameEvent;
pub use geometry::{BounceAxis, Rect};
pub use level::{generate_bricks, launch_velocity, rows_for_level};
pub use state::{GamePhase, GameState};
pub use tick::{Game, TickInput, tick};
