//! Per-cycle cache of formatted coordinates
//!
//! Numeric formatting is too slow to repeat for every page, so the strings
//! are rebuilt on the first page of a refresh cycle and reused for the rest
//! of it. An abandoned cycle leaves the last complete set in place.

use crate::axis::Axis;
use crate::format::{self, Digits};
use crate::status::MachineStatus;

/// Formatted X/Y/Z values and optional filament readings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CachedAxisStrings {
    x: Digits,
    y: Digits,
    z: Digits,
    filament_width: Digits,
    filament_ratio: Digits,
    refreshes: u32,
}

impl CachedAxisStrings {
    /// Empty cache; every string reads as ""
    pub const fn new() -> Self {
        Self {
            x: Digits::new(),
            y: Digits::new(),
            z: Digits::new(),
            filament_width: Digits::new(),
            filament_ratio: Digits::new(),
            refreshes: 0,
        }
    }

    /// Rebuild every string from live values
    ///
    /// Filament strings are only formatted when `with_filament` is set.
    pub fn refresh<S: MachineStatus + ?Sized>(&mut self, status: &S, with_filament: bool) {
        self.x = format::signed4(status.axis_position(Axis::X));
        self.y = format::signed4(status.axis_position(Axis::Y));
        self.z = format::fixed52(status.axis_position(Axis::Z));
        if with_filament {
            self.filament_width = format::fixed12(status.filament_width_mm());
            self.filament_ratio =
                format::int3(format::round_to_i32(100.0 * status.volumetric_ratio()));
        }
        self.refreshes = self.refreshes.wrapping_add(1);
    }

    /// Formatted value of an axis
    pub fn axis(&self, axis: Axis) -> &str {
        match axis {
            Axis::X => self.x.as_str(),
            Axis::Y => self.y.as_str(),
            Axis::Z => self.z.as_str(),
        }
    }

    /// Filament width, `d.dd`
    pub fn filament_width(&self) -> &str {
        self.filament_width.as_str()
    }

    /// Volumetric ratio as a 3-character percentage
    pub fn filament_ratio(&self) -> &str {
        self.filament_ratio.as_str()
    }

    /// Number of rebuilds so far
    pub const fn refreshes(&self) -> u32 {
        self.refreshes
    }
}
