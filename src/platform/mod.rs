//! Platform abstraction layer
//!
//! Host-facing pieces that sit outside the deterministic simulation:
//! - Input events (key codes to per-frame commands)

pub mod input;

pub use input::{InputState, Key};
