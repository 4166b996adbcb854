//! Rendering module
//!
//! `scene` turns the simulation into a flat draw list in playfield
//! coordinates; `canvas` (wasm only) paints that list with Canvas 2D.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

pub use scene::{DrawCommand, TextAlign, build_frame};

/// Colors not owned by an entity (0xRRGGBB)
pub mod colors {
    pub const BACKGROUND: u32 = 0x111827;
    pub const BRICK_OUTLINE: u32 = 0x000000;
    pub const TEXT: u32 = 0xFFFFFF;
    pub const TEXT_DIM: u32 = 0xB3B3B3;
    pub const OVERLAY: u32 = 0x000000;
}
