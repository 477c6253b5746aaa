//! Status provider interface
//!
//! The renderer reads live machine values through [`MachineStatus`] and only
//! for widgets that draw on the current page. The thermal, motion, SD and
//! print-timer subsystems sit behind this trait.

use crate::axis::{Axis, AxisHoming};
use crate::message::StatusMessage;

/// Temperatures and flags for one heater
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeaterReading {
    /// Measured temperature (°C)
    pub current_c: f32,
    /// Target temperature (°C)
    pub target_c: f32,
    /// Output currently driving the heater
    pub heating: bool,
    /// Heater timed out into idle
    pub idle: bool,
}

/// Trait for live status values
///
/// Implementations adapt the machine's subsystems. Reads must be cheap; they
/// happen on the display tick and may be repeated for several pages.
pub trait MachineStatus {
    /// Logical position of an axis (mm)
    fn axis_position(&self, axis: Axis) -> f32;

    /// Homing flags of an axis
    fn axis_homing(&self, axis: Axis) -> AxisHoming;

    /// Hotend heater by index
    fn hotend(&self, index: u8) -> HeaterReading;

    /// Heated bed
    fn bed(&self) -> HeaterReading;

    /// Part-cooling fan duty (0-255)
    fn fan_speed(&self) -> u8;

    /// Feed-rate override (100 = no override)
    fn feedrate_percent(&self) -> u16;

    /// A file is open on the SD card
    fn sd_file_open(&self) -> bool;

    /// Progress set by the host, when any
    fn manual_progress(&self) -> Option<u8>;

    /// Progress of the SD print, when one is running
    fn sd_progress(&self) -> Option<u8>;

    /// Print job elapsed time (s)
    fn elapsed_seconds(&self) -> u32;

    /// Host-supplied time remaining at 100% feed rate (min)
    fn remaining_minutes(&self) -> Option<u16>;

    /// Host-supplied time until the next filament change at 100% feed rate (min)
    fn minutes_to_change(&self) -> Option<u16>;

    /// Machine is running (not halted)
    fn is_running(&self) -> bool;

    /// Measured filament width (mm)
    fn filament_width_mm(&self) -> f32;

    /// Volumetric flow ratio (1.0 = nominal)
    fn volumetric_ratio(&self) -> f32;

    /// Current status message
    fn status_message(&self) -> &StatusMessage;

    /// Time since the status message was last set (ms)
    fn status_message_age_ms(&self) -> u32;
}

/// Plain copy of every status value
///
/// Useful for simulators, host tools and tests.
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub positions: [f32; 3],
    pub homing: [AxisHoming; 3],
    pub hotends: [HeaterReading; 4],
    pub bed: HeaterReading,
    pub fan_speed: u8,
    pub feedrate_percent: u16,
    pub sd_file_open: bool,
    pub manual_progress: Option<u8>,
    pub sd_progress: Option<u8>,
    pub elapsed_seconds: u32,
    pub remaining_minutes: Option<u16>,
    pub minutes_to_change: Option<u16>,
    pub running: bool,
    pub filament_width_mm: f32,
    pub volumetric_ratio: f32,
    pub message: StatusMessage,
    pub message_age_ms: u32,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            positions: [0.0; 3],
            homing: [AxisHoming::UNHOMED; 3],
            hotends: [HeaterReading::default(); 4],
            bed: HeaterReading::default(),
            fan_speed: 0,
            feedrate_percent: 100,
            sd_file_open: false,
            manual_progress: None,
            sd_progress: None,
            elapsed_seconds: 0,
            remaining_minutes: None,
            minutes_to_change: None,
            running: true,
            filament_width_mm: 1.75,
            volumetric_ratio: 1.0,
            message: StatusMessage::new(),
            message_age_ms: 0,
        }
    }
}

const fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::X => 0,
        Axis::Y => 1,
        Axis::Z => 2,
    }
}

impl MachineStatus for StatusSnapshot {
    fn axis_position(&self, axis: Axis) -> f32 {
        self.positions[axis_index(axis)]
    }

    fn axis_homing(&self, axis: Axis) -> AxisHoming {
        self.homing[axis_index(axis)]
    }

    fn hotend(&self, index: u8) -> HeaterReading {
        self.hotends.get(index as usize).copied().unwrap_or_default()
    }

    fn bed(&self) -> HeaterReading {
        self.bed
    }

    fn fan_speed(&self) -> u8 {
        self.fan_speed
    }

    fn feedrate_percent(&self) -> u16 {
        self.feedrate_percent
    }

    fn sd_file_open(&self) -> bool {
        self.sd_file_open
    }

    fn manual_progress(&self) -> Option<u8> {
        self.manual_progress
    }

    fn sd_progress(&self) -> Option<u8> {
        self.sd_progress
    }

    fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    fn remaining_minutes(&self) -> Option<u16> {
        self.remaining_minutes
    }

    fn minutes_to_change(&self) -> Option<u16> {
        self.minutes_to_change
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn filament_width_mm(&self) -> f32 {
        self.filament_width_mm
    }

    fn volumetric_ratio(&self) -> f32 {
        self.volumetric_ratio
    }

    fn status_message(&self) -> &StatusMessage {
        &self.message
    }

    fn status_message_age_ms(&self) -> u32 {
        self.message_age_ms
    }
}
