//! Platform abstraction layer
//!
//! Turns browser input events into simulation input. Kept free of `web_sys`
//! types so the mapping runs (and is tested) natively.

pub mod input;

pub use input::{InputAction, InputState, action_for_key};
