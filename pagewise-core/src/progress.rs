//! Progress bar and print time formatting
//!
//! Stateless; every function is a pure function of its inputs.

use core::fmt::Write;

use heapless::String;

/// Formatted duration or estimate
pub type TimeText = String<16>;

/// Seconds in a day
const DAY_S: u32 = 60 * 60 * 24;

/// Glyph marking a remaining-time estimate
pub const CLOCK_SYMBOL: char = '@';

/// Glyph marking time until the next filament change
pub const CHANGE_SYMBOL: char = '»';

/// Percentages at or below this are not meaningful yet
pub const PERCENT_THRESHOLD: u8 = 1;

/// Horizontal progress bar with a one-pixel frame on each side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgressBar {
    width: u16,
}

impl ProgressBar {
    /// Bar of `width` pixels including the frame
    pub const fn new(width: u16) -> Self {
        Self { width }
    }

    /// Outer width including the frame
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Pixel width of the solid fill for `percent`
    ///
    /// Zero until the percentage passes [`PERCENT_THRESHOLD`]; percentages
    /// above 100 fill the bar.
    pub const fn fill_width(&self, percent: u8) -> u16 {
        if !shows_percent(percent) {
            return 0;
        }
        let inner = self.width.saturating_sub(2) as u32;
        let p = if percent > 100 { 100 } else { percent };
        (inner * p as u32 / 100) as u16
    }
}

/// Whether a percentage is worth drawing
pub const fn shows_percent(percent: u8) -> bool {
    percent > PERCENT_THRESHOLD
}

/// Elapsed print time in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Elapsed(pub u32);

impl Elapsed {
    /// Whether the duration reaches a full day
    pub const fn has_days(&self) -> bool {
        self.0 >= DAY_S
    }

    /// Digital clock form
    ///
    /// `HH:MM` below 100 hours, `H:MM` above, `Dd HH:MM` once a full day has
    /// passed.
    pub fn to_digital(&self) -> TimeText {
        let hours = self.0 / 3600;
        let minutes = (self.0 / 60) % 60;
        let mut out = TimeText::new();
        if self.has_days() {
            let _ = write!(out, "{}d {:02}:{:02}", self.0 / DAY_S, hours % 24, minutes);
        } else if hours < 100 {
            let _ = write!(out, "{:02}:{:02}", hours, minutes);
        } else {
            let _ = write!(out, "{}:{:02}", hours, minutes);
        }
        out
    }
}

/// Kind of remaining-time estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EstimateKind {
    /// Time until the print completes
    Remaining,
    /// Time until the next filament change
    ToChange,
}

impl EstimateKind {
    /// Symbol drawn in front of the estimate
    pub const fn symbol(self) -> char {
        match self {
            EstimateKind::Remaining => CLOCK_SYMBOL,
            EstimateKind::ToChange => CHANGE_SYMBOL,
        }
    }
}

/// Remaining-time estimate in minutes at 100% feed rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RemainingEstimate {
    pub kind: EstimateKind,
    pub minutes: u16,
}

impl RemainingEstimate {
    /// Pick the estimate to show; time-to-change wins over remaining time
    pub fn select(to_change: Option<u16>, remaining: Option<u16>) -> Option<Self> {
        match (to_change, remaining) {
            (Some(minutes), _) => Some(Self {
                kind: EstimateKind::ToChange,
                minutes,
            }),
            (None, Some(minutes)) => Some(Self {
                kind: EstimateKind::Remaining,
                minutes,
            }),
            (None, None) => None,
        }
    }

    /// Estimate scaled for the active feed-rate override
    pub const fn scaled_minutes(&self, feedrate_percent: u16) -> u32 {
        scale_for_feedrate(self.minutes, feedrate_percent)
    }

    /// Text for the coordinate row
    ///
    /// `S HH:MM D` normally, `S    HHHh D` past 99 hours, where `S` is the
    /// estimate symbol and `D` is `?` while a feed-rate override is active.
    pub fn format(&self, feedrate_percent: u16) -> TimeText {
        let total = self.scaled_minutes(feedrate_percent);
        let hours = (total / 60).min(999);
        let minutes = total % 60;
        let doubt = if feedrate_percent != 100 { '?' } else { ' ' };
        let symbol = self.kind.symbol();
        let mut out = TimeText::new();
        if hours > 99 {
            let _ = write!(out, "{}    {:>3}h {}", symbol, hours, doubt);
        } else {
            let _ = write!(out, "{} {:>2}:{:02} {}", symbol, hours, minutes, doubt);
        }
        out
    }
}

/// Scale a time at 100% feed rate to the active override
///
/// A zero override leaves the time unscaled.
pub const fn scale_for_feedrate(minutes: u16, feedrate_percent: u16) -> u32 {
    if feedrate_percent == 0 {
        minutes as u32
    } else {
        100 * minutes as u32 / feedrate_percent as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fill_width_values() {
        let bar = ProgressBar::new(70);
        assert_eq!(bar.fill_width(0), 0);
        assert_eq!(bar.fill_width(1), 0);
        assert_eq!(bar.fill_width(2), 1);
        assert_eq!(bar.fill_width(50), 34);
        assert_eq!(bar.fill_width(100), 68);
    }

    #[test]
    fn test_fill_width_out_of_range() {
        let bar = ProgressBar::new(74);
        assert_eq!(bar.fill_width(250), 72);
        assert_eq!(ProgressBar::new(1).fill_width(100), 0);
    }

    #[test]
    fn test_percent_threshold() {
        assert!(!shows_percent(0));
        assert!(!shows_percent(1));
        assert!(shows_percent(2));
    }

    #[test]
    fn test_elapsed_digital() {
        assert_eq!(Elapsed(0).to_digital().as_str(), "00:00");
        assert_eq!(Elapsed(3 * 3600 + 7 * 60 + 59).to_digital().as_str(), "03:07");
        assert_eq!(Elapsed(23 * 3600 + 59 * 60).to_digital().as_str(), "23:59");
    }

    #[test]
    fn test_elapsed_with_days() {
        let e = Elapsed(DAY_S + 2 * 3600 + 5 * 60);
        assert!(e.has_days());
        assert_eq!(e.to_digital().as_str(), "1d 02:05");
        assert_eq!(Elapsed(12 * DAY_S).to_digital().as_str(), "12d 00:00");
    }

    #[test]
    fn test_estimate_selection() {
        assert_eq!(RemainingEstimate::select(None, None), None);
        let est = RemainingEstimate::select(None, Some(90)).unwrap();
        assert_eq!(est.kind, EstimateKind::Remaining);
        let est = RemainingEstimate::select(Some(10), Some(90)).unwrap();
        assert_eq!(est.kind, EstimateKind::ToChange);
        assert_eq!(est.minutes, 10);
    }

    #[test]
    fn test_estimate_format_normal() {
        let est = RemainingEstimate {
            kind: EstimateKind::Remaining,
            minutes: 125,
        };
        assert_eq!(est.format(100).as_str(), "@  2:05  ");
    }

    #[test]
    fn test_estimate_feedrate_override() {
        let est = RemainingEstimate {
            kind: EstimateKind::ToChange,
            minutes: 120,
        };
        assert_eq!(est.scaled_minutes(200), 60);
        assert_eq!(est.format(200).as_str(), "»  1:00 ?");
        assert_eq!(est.scaled_minutes(50), 240);
        assert_eq!(est.scaled_minutes(0), 120);
    }

    #[test]
    fn test_estimate_hours_only_past_99h() {
        let est = RemainingEstimate {
            kind: EstimateKind::Remaining,
            minutes: 100 * 60 + 30,
        };
        assert_eq!(est.format(100).as_str(), "@    100h  ");

        let huge = RemainingEstimate {
            kind: EstimateKind::Remaining,
            minutes: u16::MAX,
        };
        assert_eq!(huge.format(1).as_str(), "@    999h ?");
    }

    proptest! {
        #[test]
        fn prop_fill_monotonic(width in 0u16..200, p in 0u8..=100) {
            let bar = ProgressBar::new(width);
            let next = p.saturating_add(1);
            prop_assert!(bar.fill_width(p) <= bar.fill_width(next));
            prop_assert!(bar.fill_width(p) <= width.saturating_sub(2));
        }
    }
}
