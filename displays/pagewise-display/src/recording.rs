//! Recording backend for renderer tests

use crate::backend::{DisplayError, DrawColor, Font, GraphicsBackend};

/// One captured draw request
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: i16,
        y: i16,
        text: String,
        font: Font,
        color: DrawColor,
    },
    Box {
        x: i16,
        y: i16,
        width: u16,
        height: u16,
        color: DrawColor,
    },
    Frame {
        x: i16,
        y: i16,
        width: u16,
        height: u16,
        color: DrawColor,
    },
    Pixel {
        x: i16,
        y: i16,
    },
    Bitmap {
        x: i16,
        y: i16,
        bytes_per_row: u16,
        height: u16,
        data: Vec<u8>,
    },
}

impl DrawOp {
    /// Rows touched, inclusive; text covers the whole glyph cell of its font
    pub fn rows(&self) -> (i32, i32) {
        match self {
            DrawOp::Text { y, font, .. } => (
                *y as i32 - (font.ascent() as i32 - 1),
                *y as i32 + font.descent() as i32,
            ),
            DrawOp::Box { y, height, .. }
            | DrawOp::Frame { y, height, .. }
            | DrawOp::Bitmap { y, height, .. } => (*y as i32, *y as i32 + *height as i32 - 1),
            DrawOp::Pixel { y, .. } => (*y as i32, *y as i32),
        }
    }
}

/// Captures draw requests instead of drawing
#[derive(Debug, Default)]
pub struct RecordingBackend {
    ops: Vec<DrawOp>,
    font: Font,
    color: DrawColor,
    fail_after: Option<usize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose draw calls fail once `n` have succeeded
    pub fn failing_after(n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::default()
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn font(&self) -> Font {
        self.font
    }

    pub fn color(&self) -> DrawColor {
        self.color
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, wanted: &str) -> bool {
        self.texts().contains(&wanted)
    }

    pub fn has_text_starting(&self, prefix: &str) -> bool {
        self.texts().iter().any(|t| t.starts_with(prefix))
    }

    /// Position of the first text op equal to `wanted`
    pub fn text_at(&self, wanted: &str) -> Option<(i16, i16)> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Text { x, y, text, .. } if text == wanted => Some((*x, *y)),
            _ => None,
        })
    }

    pub fn bitmaps(&self) -> Vec<Vec<u8>> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Bitmap { data, .. } => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, op: DrawOp) -> Result<(), DisplayError> {
        if self.fail_after.is_some_and(|n| self.ops.len() >= n) {
            return Err(DisplayError::Communication);
        }
        self.ops.push(op);
        Ok(())
    }
}

impl GraphicsBackend for RecordingBackend {
    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn set_color(&mut self, color: DrawColor) {
        self.color = color;
    }

    fn draw_text(&mut self, x: i16, y: i16, text: &str) -> Result<(), DisplayError> {
        let op = DrawOp::Text {
            x,
            y,
            text: text.to_owned(),
            font: self.font,
            color: self.color,
        };
        self.record(op)
    }

    fn draw_box(&mut self, x: i16, y: i16, width: u16, height: u16) -> Result<(), DisplayError> {
        let color = self.color;
        self.record(DrawOp::Box {
            x,
            y,
            width,
            height,
            color,
        })
    }

    fn draw_frame(
        &mut self,
        x: i16,
        y: i16,
        width: u16,
        height: u16,
    ) -> Result<(), DisplayError> {
        let color = self.color;
        self.record(DrawOp::Frame {
            x,
            y,
            width,
            height,
            color,
        })
    }

    fn draw_pixel(&mut self, x: i16, y: i16) -> Result<(), DisplayError> {
        self.record(DrawOp::Pixel { x, y })
    }

    fn draw_bitmap(
        &mut self,
        x: i16,
        y: i16,
        bytes_per_row: u16,
        height: u16,
        data: &[u8],
    ) -> Result<(), DisplayError> {
        self.record(DrawOp::Bitmap {
            x,
            y,
            bytes_per_row,
            height,
            data: data.to_vec(),
        })
    }
}
