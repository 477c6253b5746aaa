//! embedded-graphics adapter for [`GraphicsBackend`]
//!
//! Lets the status screen draw into any `DrawTarget<Color = BinaryColor>`,
//! most usefully the [`BandBuffer`](crate::band::BandBuffer).

use embedded_graphics::{
    mono_font::{
        iso_8859_1::{FONT_6X10, FONT_6X13},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
    text::Text,
};

use crate::backend::{DisplayError, DrawColor, Font, GraphicsBackend};

/// [`GraphicsBackend`] over an embedded-graphics draw target
pub struct EgBackend<'a, D> {
    target: &'a mut D,
    font: Font,
    color: DrawColor,
}

impl<'a, D> EgBackend<'a, D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    /// Wrap a draw target; status font, set color
    pub fn new(target: &'a mut D) -> Self {
        Self {
            target,
            font: Font::Status,
            color: DrawColor::Set,
        }
    }

    fn mono_font(&self) -> &'static MonoFont<'static> {
        match self.font {
            Font::Status => &FONT_6X10,
            Font::Menu => &FONT_6X13,
        }
    }

    fn binary(&self) -> BinaryColor {
        match self.color {
            DrawColor::Set => BinaryColor::On,
            DrawColor::Clear => BinaryColor::Off,
        }
    }
}

fn map_err<E>(_: E) -> DisplayError {
    DisplayError::Communication
}

impl<D> GraphicsBackend for EgBackend<'_, D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn set_color(&mut self, color: DrawColor) {
        self.color = color;
    }

    fn draw_text(&mut self, x: i16, y: i16, text: &str) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(self.mono_font(), self.binary());
        Text::new(text, Point::new(x as i32, y as i32), style)
            .draw(&mut *self.target)
            .map(|_| ())
            .map_err(map_err)
    }

    fn draw_box(&mut self, x: i16, y: i16, width: u16, height: u16) -> Result<(), DisplayError> {
        Rectangle::new(
            Point::new(x as i32, y as i32),
            Size::new(width as u32, height as u32),
        )
        .into_styled(PrimitiveStyle::with_fill(self.binary()))
        .draw(&mut *self.target)
        .map_err(map_err)
    }

    fn draw_frame(
        &mut self,
        x: i16,
        y: i16,
        width: u16,
        height: u16,
    ) -> Result<(), DisplayError> {
        let style = PrimitiveStyleBuilder::new()
            .stroke_color(self.binary())
            .stroke_width(1)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        Rectangle::new(
            Point::new(x as i32, y as i32),
            Size::new(width as u32, height as u32),
        )
        .into_styled(style)
        .draw(&mut *self.target)
        .map_err(map_err)
    }

    fn draw_pixel(&mut self, x: i16, y: i16) -> Result<(), DisplayError> {
        Pixel(Point::new(x as i32, y as i32), self.binary())
            .draw(&mut *self.target)
            .map_err(map_err)
    }

    fn draw_bitmap(
        &mut self,
        x: i16,
        y: i16,
        bytes_per_row: u16,
        height: u16,
        data: &[u8],
    ) -> Result<(), DisplayError> {
        let stride = bytes_per_row as usize;
        if stride == 0 {
            return Ok(());
        }
        if stride * height as usize > data.len() {
            return Err(DisplayError::BufferOverflow);
        }
        let color = self.binary();
        let origin = Point::new(x as i32, y as i32);
        let pixels = data
            .chunks_exact(stride)
            .take(height as usize)
            .enumerate()
            .flat_map(move |(row, bytes)| {
                bytes.iter().enumerate().flat_map(move |(col, &byte)| {
                    (0..8).filter_map(move |bit| {
                        (byte & (0x80 >> bit) != 0).then(|| {
                            Pixel(
                                origin + Point::new((col * 8 + bit) as i32, row as i32),
                                color,
                            )
                        })
                    })
                })
            });
        self.target.draw_iter(pixels).map_err(map_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::BandBuffer;
    use pagewise_core::Page;

    fn band(start: u16, end: u16) -> BandBuffer {
        let mut buf = BandBuffer::new(128, 64).unwrap();
        buf.begin(&Page::new(0, start, end)).unwrap();
        buf
    }

    #[test]
    fn test_box_and_clear_color() {
        let mut buf = band(0, 15);
        {
            let mut gfx = EgBackend::new(&mut buf);
            gfx.draw_box(0, 0, 8, 8).unwrap();
            gfx.set_color(DrawColor::Clear);
            gfx.draw_box(2, 2, 2, 2).unwrap();
        }
        assert!(buf.is_set(0, 0));
        assert!(!buf.is_set(2, 2));
        assert!(buf.is_set(7, 7));
        assert!(!buf.is_set(8, 0));
    }

    #[test]
    fn test_frame_is_hollow() {
        let mut buf = band(0, 15);
        EgBackend::new(&mut buf).draw_frame(0, 0, 10, 4).unwrap();
        assert!(buf.is_set(0, 0));
        assert!(buf.is_set(9, 3));
        assert!(!buf.is_set(10, 3));
        assert!(!buf.is_set(4, 1));
    }

    #[test]
    fn test_bitmap_msb_first_and_transparent() {
        let mut buf = band(0, 7);
        {
            let mut gfx = EgBackend::new(&mut buf);
            gfx.draw_box(0, 1, 16, 1).unwrap();
            gfx.draw_bitmap(0, 0, 2, 2, &[0x80, 0x01, 0x00, 0x00]).unwrap();
        }
        assert!(buf.is_set(0, 0));
        assert!(!buf.is_set(1, 0));
        assert!(buf.is_set(15, 0));
        // clear bits leave what was there
        assert!(buf.is_set(3, 1));
    }

    #[test]
    fn test_bitmap_short_data_rejected() {
        let mut buf = band(0, 7);
        let mut gfx = EgBackend::new(&mut buf);
        assert_eq!(
            gfx.draw_bitmap(0, 0, 2, 4, &[0xFF; 4]),
            Err(DisplayError::BufferOverflow)
        );
    }

    #[test]
    fn test_font_rows_match_glyph_cells() {
        for font in [Font::Status, Font::Menu] {
            let mut buf = band(0, 15);
            let mut gfx = EgBackend::new(&mut buf);
            gfx.set_font(font);
            let mono = gfx.mono_font();
            assert_eq!(font.ascent() as u32, mono.baseline + 1);
            assert_eq!(
                (font.ascent() + font.descent()) as u32,
                mono.character_size.height
            );
        }
    }

    #[test]
    fn test_descender_drawn_below_baseline() {
        let mut buf = band(0, 15);
        EgBackend::new(&mut buf).draw_text(0, 8, "g").unwrap();
        let (_, bottom) = Font::Status.rows(8);
        let lit_row = |y: u16| (0..6).any(|x| buf.is_set(x, y));
        assert!((9..=bottom).any(lit_row));
        assert!(!lit_row(bottom + 1));
    }

    #[test]
    fn test_text_lands_above_baseline() {
        let mut buf = band(0, 15);
        EgBackend::new(&mut buf).draw_text(0, 10, "X").unwrap();
        let lit_above = (0..=10).any(|y| (0..6).any(|x| buf.is_set(x, y)));
        let lit_below = (12..16).any(|y| (0..6).any(|x| buf.is_set(x, y)));
        assert!(lit_above);
        assert!(!lit_below);
    }
}
