//! Graphics side of the banded status screen
//!
//! This crate provides:
//! - `GraphicsBackend` trait: the drawing requests the status screen issues
//! - `BandBuffer`: a one-band pixel buffer for displays without a frame buffer
//! - `EgBackend`: `GraphicsBackend` over any embedded-graphics draw target
//! - `StatusScreen`: renders one band of the status screen per call
//! - `refresh`: runs a full cycle of bands through the buffer
//!
//! # Architecture
//!
//! The LCD driver cannot hold a whole frame, so the screen is rebuilt band by
//! band. For each band the buffer is cleared, the status screen draws the
//! widgets overlapping it, and the band is sent to the controller. Widgets
//! consult the core `PageController` before every draw call.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod band;
pub mod cycle;
pub mod eg;
pub mod screen;

#[cfg(test)]
mod recording;

// Re-export key types
pub use backend::{DisplayError, DrawColor, Font, GraphicsBackend};
pub use band::BandBuffer;
pub use cycle::refresh;
pub use eg::EgBackend;
pub use screen::{HeaderArt, StatusScreen};
