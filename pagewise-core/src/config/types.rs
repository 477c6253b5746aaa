//! Status screen configuration
//!
//! Every optional widget and presentation policy is a field here, so the
//! render path branches on plain data instead of build-time switches.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::scroll::MAX_FIELD_CELLS;

/// Narrowest supported display (pixels)
pub const MIN_WIDTH: u16 = 128;

/// Widest supported display (pixels)
pub const MAX_WIDTH: u16 = 256;

/// Shortest supported display (rows); the layout reaches row 63
pub const MIN_HEIGHT: u16 = 64;

/// Tallest supported display (rows)
pub const MAX_HEIGHT: u16 = 255;

/// Tallest band the page buffer can hold
pub const MAX_PAGE_ROWS: u16 = 16;

/// Most hotends shown on the status screen
pub const MAX_HOTENDS: u8 = 4;

/// Most fan animation frames (header bitmaps)
pub const MAX_FAN_FRAMES: u8 = 4;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Display width or height outside the supported range
    InvalidGeometry,
    /// Band height is zero or larger than the page buffer
    InvalidPageRows,
    /// Status field wider than the scroller supports, or empty
    StatusWidthOutOfRange,
    /// More hotends than the header has room for
    TooManyHotends,
    /// Fan animation frame count outside 1..=MAX_FAN_FRAMES
    InvalidFanFrames,
}

/// How print progress and time are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProgressPolicy {
    /// Progress bar with elapsed time (and optional percent) beside it
    #[default]
    ElapsedBar,
    /// Percent and elapsed time on one row; the coordinate row shows the
    /// remaining-time estimate while printing
    RemainingEstimate,
}

/// Status screen configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct StatusScreenConfig {
    /// Display width (pixels)
    pub width: u16,
    /// Display height (rows)
    pub height: u16,
    /// Rows per redraw band
    pub page_rows: u16,
    /// Status line width (cells)
    pub status_width: u8,
    /// Number of hotends
    pub hotends: u8,
    /// Heated bed present
    pub heated_bed: bool,
    /// Part-cooling fan present
    pub fan: bool,
    /// Header bitmaps available for the fan animation
    pub fan_frames: u8,
    /// Blink the target of an idle heater
    pub heater_idle_blink: bool,
    /// SD card support (icon and progress source)
    pub sd_support: bool,
    /// Host can set progress manually
    pub manual_progress: bool,
    /// Draw the percentage next to the progress bar
    pub sd_percent: bool,
    /// Progress and time presentation
    pub progress: ProgressPolicy,
    /// Show filament width and volumetric ratio
    pub filament_display: bool,
    /// Status message shown before the filament line takes over (ms)
    pub filament_message_ms: u32,
    /// Outline the coordinate row instead of filling it
    pub xyz_hollow_frame: bool,
    /// Scroll status messages longer than the field
    pub message_scrolling: bool,
    /// Blank homed axes whose position is no longer trusted
    pub reduced_accuracy_warning: bool,
}

impl Default for StatusScreenConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
            page_rows: 8,
            status_width: 21,
            hotends: 1,
            heated_bed: true,
            fan: true,
            fan_frames: 2,
            heater_idle_blink: true,
            sd_support: true,
            manual_progress: false,
            sd_percent: false,
            progress: ProgressPolicy::ElapsedBar,
            filament_display: false,
            filament_message_ms: 5000,
            xyz_hollow_frame: true,
            message_scrolling: true,
            reduced_accuracy_warning: true,
        }
    }
}

impl StatusScreenConfig {
    /// Check every field against what the renderer supports
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&self.width)
            || !(MIN_HEIGHT..=MAX_HEIGHT).contains(&self.height)
        {
            return Err(ConfigError::InvalidGeometry);
        }
        if self.page_rows == 0 || self.page_rows > MAX_PAGE_ROWS {
            return Err(ConfigError::InvalidPageRows);
        }
        if self.status_width == 0 || self.status_width as usize > MAX_FIELD_CELLS {
            return Err(ConfigError::StatusWidthOutOfRange);
        }
        if self.hotends > MAX_HOTENDS {
            return Err(ConfigError::TooManyHotends);
        }
        if self.fan_frames == 0 || self.fan_frames > MAX_FAN_FRAMES {
            return Err(ConfigError::InvalidFanFrames);
        }
        Ok(())
    }

    /// The bed shares the header with the hotends only while there is room
    pub const fn shows_bed(&self) -> bool {
        self.heated_bed && self.hotends < MAX_HOTENDS
    }

    /// Progress widgets have a data source
    pub const fn shows_progress(&self) -> bool {
        self.sd_support || self.manual_progress
    }

    /// Progress to show: host-set progress first, then the SD print
    pub fn progress_percent(&self, manual: Option<u8>, sd: Option<u8>) -> Option<u8> {
        let manual = manual.filter(|_| self.manual_progress);
        manual.or(sd.filter(|_| self.sd_support))
    }

    /// Filament readings go on the feed-rate row
    pub const fn filament_on_feedrate_row(&self) -> bool {
        self.filament_display && !self.sd_support
    }

    /// Filament readings alternate with the status message
    pub const fn filament_on_status_row(&self) -> bool {
        self.filament_display && self.sd_support
    }

    /// Bands in one refresh cycle
    pub const fn page_count(&self) -> u16 {
        if self.page_rows == 0 {
            return 0;
        }
        self.height.div_ceil(self.page_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = StatusScreenConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.page_count(), 8);
        assert!(config.shows_bed());
        assert!(config.shows_progress());
    }

    #[test]
    fn test_geometry_limits() {
        let narrow = StatusScreenConfig {
            width: 96,
            ..Default::default()
        };
        assert_eq!(narrow.validate(), Err(ConfigError::InvalidGeometry));

        let short = StatusScreenConfig {
            height: 32,
            ..Default::default()
        };
        assert_eq!(short.validate(), Err(ConfigError::InvalidGeometry));
    }

    #[test]
    fn test_page_rows_limits() {
        for rows in [0, MAX_PAGE_ROWS + 1] {
            let config = StatusScreenConfig {
                page_rows: rows,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::InvalidPageRows));
        }
    }

    #[test]
    fn test_status_width_limits() {
        let config = StatusScreenConfig {
            status_width: 40,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::StatusWidthOutOfRange));
    }

    #[test]
    fn test_hotend_and_fan_limits() {
        let config = StatusScreenConfig {
            hotends: 5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TooManyHotends));

        let config = StatusScreenConfig {
            fan_frames: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidFanFrames));
    }

    #[test]
    fn test_bed_hidden_with_four_hotends() {
        let config = StatusScreenConfig {
            hotends: 4,
            ..Default::default()
        };
        assert!(!config.shows_bed());
    }

    #[test]
    fn test_progress_source_priority() {
        let mut config = StatusScreenConfig {
            manual_progress: true,
            ..Default::default()
        };
        assert_eq!(config.progress_percent(Some(75), Some(40)), Some(75));
        assert_eq!(config.progress_percent(None, Some(40)), Some(40));
        assert_eq!(config.progress_percent(None, None), None);

        config.manual_progress = false;
        assert_eq!(config.progress_percent(Some(75), None), None);
        config.sd_support = false;
        assert_eq!(config.progress_percent(None, Some(40)), None);
    }

    #[test]
    fn test_filament_placement() {
        let mut config = StatusScreenConfig {
            filament_display: true,
            ..Default::default()
        };
        assert!(config.filament_on_status_row());
        assert!(!config.filament_on_feedrate_row());
        config.sd_support = false;
        assert!(config.filament_on_feedrate_row());
        assert!(!config.filament_on_status_row());
    }
}
