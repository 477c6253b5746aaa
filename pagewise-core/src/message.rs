//! Status message buffer
//!
//! Written by whatever subsystem reports status, read by the scroller.

use heapless::String;

/// Capacity of the status message in bytes
pub const MAX_MESSAGE_LEN: usize = 64;

/// Capacity-bounded UTF-8 status text
///
/// Every [`set`](Self::set) bumps a generation counter so readers that keep
/// per-message state (the scroll offset) can tell a replacement apart from
/// the same text being read again.
#[derive(Debug, Clone, Default)]
pub struct StatusMessage {
    text: String<MAX_MESSAGE_LEN>,
    generation: u32,
}

impl StatusMessage {
    /// Create an empty message
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            generation: 0,
        }
    }

    /// Create a message holding `text`
    pub fn from_text(text: &str) -> Self {
        let mut msg = Self::new();
        msg.set(text);
        msg
    }

    /// Replace the message
    ///
    /// Text longer than the capacity is cut at the last codepoint boundary
    /// that fits.
    pub fn set(&mut self, text: &str) {
        self.text.clear();
        let mut end = text.len().min(MAX_MESSAGE_LEN);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let _ = self.text.push_str(&text[..end]);
        self.generation = self.generation.wrapping_add(1);
    }

    /// Clear the message
    pub fn clear(&mut self) {
        self.set("");
    }

    /// Current text
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Bumped on every replacement
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether the message is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusMessage {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "StatusMessage[{}] {}", self.generation, self.text.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_read() {
        let mut msg = StatusMessage::new();
        assert!(msg.is_empty());
        msg.set("Ready.");
        assert_eq!(msg.as_str(), "Ready.");
        assert!(!msg.is_empty());
    }

    #[test]
    fn test_generation_bumps_on_every_set() {
        let mut msg = StatusMessage::from_text("Heating...");
        let first = msg.generation();
        msg.set("Heating...");
        assert_ne!(msg.generation(), first);
        msg.clear();
        assert_eq!(msg.generation(), first.wrapping_add(2));
    }

    #[test]
    fn test_truncates_at_capacity() {
        let long = "x".repeat(100);
        let msg = StatusMessage::from_text(&long);
        assert_eq!(msg.as_str().len(), MAX_MESSAGE_LEN);
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        // 63 ASCII bytes then a 2-byte char that would straddle the limit
        let mut text = "a".repeat(MAX_MESSAGE_LEN - 1);
        text.push('é');
        let msg = StatusMessage::from_text(&text);
        assert_eq!(msg.as_str().len(), MAX_MESSAGE_LEN - 1);
        assert!(msg.as_str().chars().all(|c| c == 'a'));
    }
}
