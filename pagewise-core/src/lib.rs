//! Board-agnostic core logic for the banded status screen
//!
//! This crate contains all status screen logic that does not depend on a
//! specific display or graphics library:
//!
//! - Page visibility predicates for partial-buffer redraws
//! - UTF-8 cell scanning that never reads past a truncated sequence
//! - Status message buffer and the blink-synchronized scroller
//! - Axis value blinking driven by homing state
//! - Fan animation frame selection
//! - Numeric, progress and duration formatting
//! - The status provider trait and configuration types

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod axis;
pub mod cache;
pub mod config;
pub mod fan;
pub mod format;
pub mod message;
pub mod page;
pub mod progress;
pub mod scroll;
pub mod status;
pub mod utf8;

pub use axis::{Axis, AxisDisplay, AxisHoming, AxisText, AxisValueFormatter};
pub use cache::CachedAxisStrings;
pub use config::{ConfigError, ProgressPolicy, StatusScreenConfig};
pub use fan::FanAnimation;
pub use message::{StatusMessage, MAX_MESSAGE_LEN};
pub use page::{Page, PageController, PageSequence};
pub use scroll::{ScrollState, StatusLine, StatusMessageScroller, MAX_FIELD_CELLS};
pub use status::{HeaterReading, MachineStatus, StatusSnapshot};
