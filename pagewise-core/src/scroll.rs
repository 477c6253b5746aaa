//! Status message scroller
//!
//! Scrolls a message longer than its field one codepoint per blink toggle.
//! The renderer calls [`StatusMessageScroller::render`] once per page, so
//! what gets drawn is decoupled from when the offset moves: the offset only
//! advances on a blink edge, however many passes happen in between.
//!
//! When the tail of the message no longer fills the field it is followed by
//! one or two `.` guard cells and then the start of the message again.

use heapless::String;

use crate::message::StatusMessage;
use crate::utf8;

/// Widest status field supported, in cells
pub const MAX_FIELD_CELLS: usize = 32;

/// Byte capacity of a rendered status line (4 bytes per cell worst case)
pub const MAX_LINE_BYTES: usize = MAX_FIELD_CELLS * 4;

/// Exact cells to draw for the status field on this pass
pub type StatusLine = String<MAX_LINE_BYTES>;

/// Scroll position carried across passes and refresh cycles
///
/// `offset` is a byte index that always sits on a codepoint boundary and
/// is always inside the message (or 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollState {
    offset: usize,
    last_blink: bool,
    generation: u32,
}

impl ScrollState {
    /// Start of message, blink low
    pub const fn new() -> Self {
        Self {
            offset: 0,
            last_blink: false,
            generation: 0,
        }
    }

    /// Byte offset of the first visible codepoint
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Blink value seen on the last scrolling pass
    pub const fn last_blink(&self) -> bool {
        self.last_blink
    }
}

/// Stateful scroller for the status line
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusMessageScroller {
    state: ScrollState,
    scrolling: bool,
}

impl Default for StatusMessageScroller {
    fn default() -> Self {
        Self::new(true)
    }
}

impl StatusMessageScroller {
    /// Create a scroller
    ///
    /// With `scrolling` disabled long messages are truncated to the field
    /// and the blink signal is ignored.
    pub const fn new(scrolling: bool) -> Self {
        Self {
            state: ScrollState::new(),
            scrolling,
        }
    }

    /// Current scroll state
    pub const fn state(&self) -> ScrollState {
        self.state
    }

    /// Produce the status field for this pass
    ///
    /// `field_width` is in cells and is capped at [`MAX_FIELD_CELLS`].
    pub fn render(
        &mut self,
        message: &StatusMessage,
        field_width: usize,
        blink: bool,
    ) -> StatusLine {
        let width = field_width.min(MAX_FIELD_CELLS);
        let text = message.as_str();
        let bytes = text.as_bytes();

        if message.generation() != self.state.generation {
            #[cfg(feature = "defmt")]
            defmt::debug!("status message replaced, scroll reset");
            self.state.generation = message.generation();
            self.state.offset = 0;
        }

        let len = utf8::cell_len(bytes);
        let mut line = StatusLine::new();

        if !self.scrolling || len <= width {
            let shown = utf8::take_cells(text, width);
            let _ = line.push_str(shown);
            pad(&mut line, width - utf8::cell_len(shown.as_bytes()));
            return line;
        }

        if self.state.offset >= bytes.len() || !utf8::is_char_start(bytes[self.state.offset]) {
            self.state.offset = 0;
        }

        let rest = text.get(self.state.offset..).unwrap_or("");
        let remaining = utf8::cell_len(rest.as_bytes());

        if remaining >= width {
            let _ = line.push_str(utf8::take_cells(rest, width));
        } else {
            let _ = line.push_str(rest);
            let mut room = width - remaining;
            let _ = line.push('.');
            room -= 1;
            if room > 0 {
                let _ = line.push('.');
                room -= 1;
                if room > 0 {
                    let _ = line.push_str(utf8::take_cells(text, room));
                }
            }
        }

        if blink != self.state.last_blink {
            self.state.last_blink = blink;
            let next = utf8::next_boundary(bytes, self.state.offset);
            if next >= bytes.len() {
                #[cfg(feature = "defmt")]
                defmt::trace!("status scroll wrapped");
                self.state.offset = 0;
            } else {
                self.state.offset = next;
            }
        }

        line
    }
}

fn pad(line: &mut StatusLine, cells: usize) {
    for _ in 0..cells {
        let _ = line.push(' ');
    }
}
