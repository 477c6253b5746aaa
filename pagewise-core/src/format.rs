//! Fixed-width number formatting for status widgets
//!
//! Each helper clamps to the range its field can hold, so the result never
//! grows wider than the slot it is drawn into.

use core::fmt::Write;

use heapless::String;

/// Formatted number, at most 8 bytes
pub type Digits = String<8>;

/// Round half away from zero; NaN becomes 0
pub fn round_to_i32(value: f32) -> i32 {
    if value.is_nan() {
        0
    } else if value >= 0.0 {
        (value + 0.5) as i32
    } else {
        (value - 0.5) as i32
    }
}

/// Right-justified 3-character integer, clamped to `-99..=999`
pub fn int3(value: i32) -> Digits {
    let mut out = Digits::new();
    let _ = write!(out, "{:>3}", value.clamp(-99, 999));
    out
}

/// Rounded, right-justified 4-character integer, clamped to `-999..=9999`
pub fn signed4(value: f32) -> Digits {
    let mut out = Digits::new();
    let _ = write!(out, "{:>4}", round_to_i32(value).clamp(-999, 9999));
    out
}

/// Right-justified 6-character value with two decimals
pub fn fixed52(value: f32) -> Digits {
    let v = if value.is_nan() { 0.0 } else { value.clamp(-99.99, 999.99) };
    let mut out = Digits::new();
    let _ = write!(out, "{:>6.2}", v);
    out
}

/// `d.dd` value, clamped to `0.00..=9.99`
pub fn fixed12(value: f32) -> Digits {
    let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 9.99) };
    let mut out = Digits::new();
    let _ = write!(out, "{:.2}", v);
    out
}

/// Fan duty (0-255) as a percentage, 0 stays 0 and 255 reaches 100
pub const fn fan_percent(speed: u8) -> u8 {
    (((speed as u16 + 1) * 100) / 256) as u8
}
