//! Platform layer
//!
//! Terminal-specific glue between crossterm events and the simulation:
//! - Input events (keys held across frames, one-shot presses, mouse clicks)

pub mod input;

pub use input::{HOLD_WINDOW, InputTracker};
