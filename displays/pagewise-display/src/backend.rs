//! Graphics backend trait
//!
//! The narrow set of drawing requests the status screen issues. The renderer
//! never touches a pixel buffer; whatever sits behind this trait owns it.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
    /// Buffer overflow
    BufferOverflow,
}

/// Font selection
///
/// Both fonts are fixed 6-pixel-wide cells; the menu font carries the
/// special glyphs (feed rate, filament diameter and multiplier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// Compact status font
    #[default]
    Status,
    /// Menu font
    Menu,
}

impl Font {
    /// Rows from the top of a glyph cell down to the baseline, inclusive
    pub const fn ascent(self) -> u16 {
        match self {
            Font::Status => 8,
            Font::Menu => 11,
        }
    }

    /// Rows of a glyph cell below the baseline
    pub const fn descent(self) -> u16 {
        match self {
            Font::Status => 2,
            Font::Menu => 2,
        }
    }

    /// First and last row a line of text with its baseline at `baseline` can touch
    pub const fn rows(self, baseline: u16) -> (u16, u16) {
        (
            baseline.saturating_sub(self.ascent() - 1),
            baseline + self.descent(),
        )
    }
}

/// Drawing color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawColor {
    /// Pixels on (dark on a positive LCD)
    #[default]
    Set,
    /// Pixels off, used for text over filled boxes
    Clear,
}

/// Graphics backend trait
///
/// Coordinates are display pixels with the origin at the top left. Text is
/// positioned by its baseline. Implementations clip to whatever band they
/// currently back; drawing outside it is not an error.
pub trait GraphicsBackend {
    /// Select the font for subsequent text
    fn set_font(&mut self, font: Font);

    /// Select the color for subsequent drawing
    fn set_color(&mut self, color: DrawColor);

    /// Draw text with its baseline at `y`
    fn draw_text(&mut self, x: i16, y: i16, text: &str) -> Result<(), DisplayError>;

    /// Fill a rectangle
    fn draw_box(&mut self, x: i16, y: i16, width: u16, height: u16) -> Result<(), DisplayError>;

    /// Draw a one-pixel rectangle outline
    fn draw_frame(&mut self, x: i16, y: i16, width: u16, height: u16)
        -> Result<(), DisplayError>;

    /// Set a single pixel
    fn draw_pixel(&mut self, x: i16, y: i16) -> Result<(), DisplayError>;

    /// Draw a 1bpp bitmap, MSB first, `bytes_per_row` bytes per row
    ///
    /// Set bits are drawn in the current color, clear bits are left alone.
    fn draw_bitmap(
        &mut self,
        x: i16,
        y: i16,
        bytes_per_row: u16,
        height: u16,
        data: &[u8],
    ) -> Result<(), DisplayError>;
}

impl<T: GraphicsBackend + ?Sized> GraphicsBackend for &mut T {
    fn set_font(&mut self, font: Font) {
        (**self).set_font(font)
    }

    fn set_color(&mut self, color: DrawColor) {
        (**self).set_color(color)
    }

    fn draw_text(&mut self, x: i16, y: i16, text: &str) -> Result<(), DisplayError> {
        (**self).draw_text(x, y, text)
    }

    fn draw_box(&mut self, x: i16, y: i16, width: u16, height: u16) -> Result<(), DisplayError> {
        (**self).draw_box(x, y, width, height)
    }

    fn draw_frame(
        &mut self,
        x: i16,
        y: i16,
        width: u16,
        height: u16,
    ) -> Result<(), DisplayError> {
        (**self).draw_frame(x, y, width, height)
    }

    fn draw_pixel(&mut self, x: i16, y: i16) -> Result<(), DisplayError> {
        (**self).draw_pixel(x, y)
    }

    fn draw_bitmap(
        &mut self,
        x: i16,
        y: i16,
        bytes_per_row: u16,
        height: u16,
        data: &[u8],
    ) -> Result<(), DisplayError> {
        (**self).draw_bitmap(x, y, bytes_per_row, height, data)
    }
}
