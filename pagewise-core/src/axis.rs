//! Axis value blinking
//!
//! Before homing, blink `123` <-> `???`.
//! Homed but position unknown, blink `123` <-> blank.
//! Homed and known, show the value constantly.

use heapless::String;

/// Capacity of a formatted axis value
pub const AXIS_TEXT_LEN: usize = 8;

/// Formatted axis value as drawn
pub type AxisText = String<AXIS_TEXT_LEN>;

/// Motion axis shown on the status screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All displayed axes in screen order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Axis label
    pub const fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// Homing flags for one axis, owned by the motion subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisHoming {
    /// Reference-finding sequence completed
    pub homed: bool,
    /// Reported position is trustworthy
    pub known_position: bool,
}

impl AxisHoming {
    /// Axis never homed
    pub const UNHOMED: Self = Self {
        homed: false,
        known_position: false,
    };

    /// Homed with a trusted position
    pub const TRUSTED: Self = Self {
        homed: true,
        known_position: true,
    };
}

/// What to draw in an axis value slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisDisplay {
    /// The formatted value as is
    Value,
    /// Digits replaced with `?`
    Masked,
    /// Spaces of the same width
    Blank,
}

/// Chooses between value, masked value and blank per axis
///
/// Pure: depends only on the homing flags and the blink sample of the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisValueFormatter {
    reduced_accuracy_warning: bool,
}

impl Default for AxisValueFormatter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AxisValueFormatter {
    /// Create a formatter
    ///
    /// `reduced_accuracy_warning` enables blanking of homed axes whose
    /// position is no longer trusted.
    pub const fn new(reduced_accuracy_warning: bool) -> Self {
        Self {
            reduced_accuracy_warning,
        }
    }

    /// Display mode for this pass
    pub const fn mode(&self, homing: AxisHoming, blink: bool) -> AxisDisplay {
        if !blink {
            return AxisDisplay::Value;
        }
        if !homing.homed {
            AxisDisplay::Masked
        } else if self.reduced_accuracy_warning && !homing.known_position {
            AxisDisplay::Blank
        } else {
            AxisDisplay::Value
        }
    }

    /// Text to draw for `value` on this pass
    pub fn format(&self, value: &str, homing: AxisHoming, blink: bool) -> AxisText {
        match self.mode(homing, blink) {
            AxisDisplay::Value => copy(value),
            AxisDisplay::Masked => mask(value),
            AxisDisplay::Blank => blank(value),
        }
    }
}

/// Replace every character above `.` with `?`
///
/// Keeps spaces, signs and the decimal point so the field shape survives.
pub fn mask(value: &str) -> AxisText {
    let mut out = AxisText::new();
    for c in value.chars() {
        let _ = out.push(if c <= '.' { c } else { '?' });
    }
    out
}

fn blank(value: &str) -> AxisText {
    let mut out = AxisText::new();
    for _ in value.chars() {
        let _ = out.push(' ');
    }
    out
}

fn copy(value: &str) -> AxisText {
    let mut out = AxisText::new();
    for c in value.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HOMED_UNKNOWN: AxisHoming = AxisHoming {
        homed: true,
        known_position: false,
    };

    #[test]
    fn test_unhomed_masks_on_blink() {
        let f = AxisValueFormatter::new(true);
        assert_eq!(f.format("123.4", AxisHoming::UNHOMED, true).as_str(), "???.?");
        assert_eq!(f.format("123.4", AxisHoming::UNHOMED, false).as_str(), "123.4");
    }

    #[test]
    fn test_mask_keeps_sign_and_padding() {
        assert_eq!(mask(" -12").as_str(), " -??");
        assert_eq!(mask("+5.00").as_str(), "+?.??");
        assert_eq!(mask("  0.00").as_str(), "  ?.??");
    }

    #[test]
    fn test_homed_unknown_blanks() {
        let f = AxisValueFormatter::new(true);
        assert_eq!(f.mode(HOMED_UNKNOWN, true), AxisDisplay::Blank);
        assert_eq!(f.format(" 120", HOMED_UNKNOWN, true).as_str(), "    ");
        assert_eq!(f.format("  1.25", HOMED_UNKNOWN, true).as_str(), "      ");
        assert_eq!(f.format(" 120", HOMED_UNKNOWN, false).as_str(), " 120");
    }

    #[test]
    fn test_homed_unknown_without_warning_shows_value() {
        let f = AxisValueFormatter::new(false);
        assert_eq!(f.mode(HOMED_UNKNOWN, true), AxisDisplay::Value);
        assert_eq!(f.format(" 120", HOMED_UNKNOWN, true).as_str(), " 120");
    }

    #[test]
    fn test_homed_known_never_blinks() {
        let f = AxisValueFormatter::default();
        for blink in [false, true] {
            assert_eq!(f.mode(AxisHoming::TRUSTED, blink), AxisDisplay::Value);
            assert_eq!(f.format("-45", AxisHoming::TRUSTED, blink).as_str(), "-45");
        }
    }

    #[test]
    fn test_axis_labels() {
        let labels: heapless::Vec<&str, 3> = Axis::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(labels.as_slice(), &["X", "Y", "Z"]);
    }

    proptest! {
        #[test]
        fn prop_masked_form_preserves_punctuation(value in "[ +\\-.0-9]{1,7}") {
            let masked = mask(&value);
            prop_assert_eq!(masked.chars().count(), value.chars().count());
            for (orig, out) in value.chars().zip(masked.chars()) {
                if orig <= '.' {
                    prop_assert_eq!(out, orig);
                } else {
                    prop_assert_eq!(out, '?');
                }
            }
        }

        #[test]
        fn prop_unhomed_alternates(value in "[ \\-.0-9]{1,7}", toggles in 1usize..12) {
            let f = AxisValueFormatter::default();
            let mut blink = false;
            for _ in 0..toggles {
                let out = f.format(&value, AxisHoming::UNHOMED, blink);
                if blink {
                    prop_assert_eq!(out, mask(&value));
                } else {
                    prop_assert_eq!(out.as_str(), value.as_str());
                }
                blink = !blink;
            }
        }
    }
}
