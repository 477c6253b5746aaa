//! UTF-8 cell scanning over raw bytes
//!
//! One display cell per codepoint. Any byte that is not a continuation byte
//! (`0b10xx_xxxx`) starts a new cell, so a truncated multi-byte sequence
//! counts as one cell and scanning never runs past the end of the buffer.

/// Whether `byte` begins a codepoint
#[inline]
pub const fn is_char_start(byte: u8) -> bool {
    byte & 0xC0 != 0x80
}

/// Number of display cells in `bytes`
pub fn cell_len(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| is_char_start(b)).count()
}

/// Byte offset of the codepoint boundary following `offset`
///
/// Returns `bytes.len()` when there is no further boundary.
pub fn next_boundary(bytes: &[u8], offset: usize) -> usize {
    let mut pos = offset.saturating_add(1);
    while pos < bytes.len() && !is_char_start(bytes[pos]) {
        pos += 1;
    }
    pos.min(bytes.len())
}

/// Byte offset reached after taking up to `cells` cells starting at `start`
///
/// Stops early at the end of the buffer.
pub fn advance_cells(bytes: &[u8], start: usize, cells: usize) -> usize {
    let mut pos = start.min(bytes.len());
    for _ in 0..cells {
        if pos >= bytes.len() {
            break;
        }
        pos = next_boundary(bytes, pos);
    }
    pos
}

/// Leading slice of `text` holding at most `cells` cells
pub fn take_cells(text: &str, cells: usize) -> &str {
    let end = advance_cells(text.as_bytes(), 0, cells);
    text.get(..end).unwrap_or("")
}
