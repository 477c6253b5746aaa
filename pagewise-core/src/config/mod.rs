//! Configuration types
//!
//! Display geometry and the set of enabled widgets, resolved once when the
//! renderer is built.

pub mod types;

pub use types::*;
