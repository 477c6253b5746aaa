//! Band buffer: the partial page buffer behind a refresh cycle
//!
//! Holds one horizontal band of at most `MAX_PAGE_ROWS` rows instead of a
//! full frame. Drawing uses full-screen coordinates and anything outside the
//! current band is clipped. Rows are packed MSB first, bit set = pixel on,
//! the layout ST7920 and KS0108 style controllers take per page.

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
    primitives::Rectangle,
    Pixel,
};

use pagewise_core::config::{MAX_PAGE_ROWS, MAX_WIDTH};
use pagewise_core::Page;

use crate::backend::DisplayError;

/// Bytes in one row at the widest supported display
pub const BAND_BYTES_PER_ROW: usize = MAX_WIDTH as usize / 8;

/// Bytes backing one band
pub const BAND_BUF_SIZE: usize = BAND_BYTES_PER_ROW * MAX_PAGE_ROWS as usize;

/// One-band pixel buffer with an embedded-graphics draw target
pub struct BandBuffer {
    buf: [u8; BAND_BUF_SIZE],
    width: u16,
    height: u16,
    start_row: u16,
    rows: u16,
    row_bytes: u16,
}

impl BandBuffer {
    /// Buffer for a `width` x `height` display; no band is active yet
    pub fn new(width: u16, height: u16) -> Result<Self, DisplayError> {
        if width == 0 || width > MAX_WIDTH || height == 0 {
            return Err(DisplayError::InvalidCoordinates);
        }
        Ok(Self {
            buf: [0; BAND_BUF_SIZE],
            width,
            height,
            start_row: 0,
            rows: 0,
            row_bytes: width.div_ceil(8),
        })
    }

    /// Start a band: clear it and clip drawing to its rows
    pub fn begin(&mut self, page: &Page) -> Result<(), DisplayError> {
        if page.start_row >= self.height || page.end_row < page.start_row {
            return Err(DisplayError::InvalidCoordinates);
        }
        let rows = page.end_row.min(self.height - 1) - page.start_row + 1;
        if rows > MAX_PAGE_ROWS {
            #[cfg(feature = "defmt")]
            defmt::warn!("band: {} rows exceed buffer of {}", rows, MAX_PAGE_ROWS);
            return Err(DisplayError::BufferOverflow);
        }
        self.start_row = page.start_row;
        self.rows = rows;
        let total = self.row_bytes as usize * rows as usize;
        self.buf[..total].fill(0);
        Ok(())
    }

    /// Packed rows of the current band
    pub fn data(&self) -> &[u8] {
        let total = self.row_bytes as usize * self.rows as usize;
        &self.buf[..total]
    }

    /// First row and row count of the current band
    pub fn window(&self) -> (u16, u16) {
        (self.start_row, self.rows)
    }

    /// Bytes per packed row
    pub fn row_bytes(&self) -> u16 {
        self.row_bytes
    }

    /// Whether the pixel at screen coordinates is on; false outside the band
    pub fn is_set(&self, x: u16, y: u16) -> bool {
        if x >= self.width || y < self.start_row || y >= self.start_row + self.rows {
            return false;
        }
        let idx = (x as usize / 8) + (y - self.start_row) as usize * self.row_bytes as usize;
        self.buf[idx] & (0x80 >> (x % 8)) != 0
    }

    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        let top = self.start_row as i32;
        if x < 0 || x >= self.width as i32 || y < top || y >= top + self.rows as i32 {
            return;
        }
        let local_y = (y - top) as usize;
        let idx = (x as usize / 8) + local_y * self.row_bytes as usize;
        let mask = 0x80u8 >> (x as usize % 8);
        if on {
            self.buf[idx] |= mask;
        } else {
            self.buf[idx] &= !mask;
        }
    }

    // byte-aligned rect fill in screen coords, clipped to the band
    fn fill_rect(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, on: bool) {
        let cx1 = x1.min(self.width);
        let cy0 = y0.max(self.start_row);
        let cy1 = y1.min(self.start_row + self.rows);
        if x0 >= cx1 || cy0 >= cy1 {
            return;
        }

        let lx0 = x0 as usize;
        let lx1 = cx1 as usize;
        let rb = self.row_bytes as usize;

        let first_byte = lx0 / 8;
        let last_byte = (lx1 - 1) / 8;
        let first_mask: u8 = 0xFF >> (lx0 & 7);
        let last_mask: u8 = 0xFF << (7 - ((lx1 - 1) & 7));

        let (fill, edge_op): (u8, fn(&mut u8, u8)) = if on {
            (0xFF, |b, m| *b |= m)
        } else {
            (0x00, |b, m| *b &= !m)
        };

        for ly in (cy0 - self.start_row) as usize..(cy1 - self.start_row) as usize {
            let row = ly * rb;
            if first_byte == last_byte {
                edge_op(&mut self.buf[row + first_byte], first_mask & last_mask);
            } else {
                edge_op(&mut self.buf[row + first_byte], first_mask);
                self.buf[row + first_byte + 1..row + last_byte].fill(fill);
                edge_op(&mut self.buf[row + last_byte], last_mask);
            }
        }
    }
}

impl OriginDimensions for BandBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for BandBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set_pixel(coord.x, coord.y, color == BinaryColor::On);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clamp = |v: i32, max: u16| v.clamp(0, max as i32) as u16;
        let x0 = clamp(area.top_left.x, self.width);
        let y0 = clamp(area.top_left.y, self.height);
        let x1 = clamp(
            area.top_left.x.saturating_add(area.size.width as i32),
            self.width,
        );
        let y1 = clamp(
            area.top_left.y.saturating_add(area.size.height as i32),
            self.height,
        );
        self.fill_rect(x0, y0, x1, y1, color == BinaryColor::On);
        Ok(())
    }
}
