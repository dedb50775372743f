//! Terminal-sized pixel framebuffer.
//!
//! Each terminal cell holds two vertically stacked pixels (drawn later as an
//! upper half block), so a `cols x rows` terminal gives a `cols x 2*rows`
//! image. Logical window units are scaled onto it with nearest-neighbour
//! sampling. Text lives in a separate layer of whole cells.

use crate::assets::Sprite;
use crate::render::{FontSize, Rect, Rgb, Surface};

/// A run of text anchored to a terminal cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSpan {
    pub col: u16,
    pub row: u16,
    pub text: String,
    pub color: Rgb,
    pub bold: bool,
}

#[derive(Clone, Debug)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    logical_width: f32,
    logical_height: f32,
    pixels: Vec<Rgb>,
    spans: Vec<TextSpan>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16, logical_width: f32, logical_height: f32) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            logical_width,
            logical_height,
            pixels: vec![[0, 0, 0]; cols as usize * rows as usize * 2],
            spans: Vec::new(),
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Follow a terminal resize; contents are cleared.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if (cols.max(1), rows.max(1)) != (self.cols, self.rows) {
            *self = Self::new(cols, rows, self.logical_width, self.logical_height);
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill([0, 0, 0]);
        self.spans.clear();
    }

    fn pixel_width(&self) -> u32 {
        self.cols as u32
    }

    fn pixel_height(&self) -> u32 {
        self.rows as u32 * 2
    }

    fn scale(&self) -> (f32, f32) {
        (
            self.pixel_width() as f32 / self.logical_width,
            self.pixel_height() as f32 / self.logical_height,
        )
    }

    /// Colour of framebuffer pixel `(px, py)`; black outside the buffer.
    pub fn pixel(&self, px: u32, py: u32) -> Rgb {
        if px >= self.pixel_width() || py >= self.pixel_height() {
            return [0, 0, 0];
        }
        self.pixels[(py * self.pixel_width() + px) as usize]
    }

    /// Colours of the upper and lower pixel of terminal cell `(col, row)`.
    pub fn cell(&self, col: u16, row: u16) -> (Rgb, Rgb) {
        let py = row as u32 * 2;
        (self.pixel(col as u32, py), self.pixel(col as u32, py + 1))
    }

    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    /// Framebuffer pixel range covered by the logical interval `[start, start + len)`.
    fn span_range(start: f32, len: f32, scale: f32, limit: u32) -> std::ops::Range<u32> {
        let lo = (start * scale).floor().max(0.0) as u32;
        let hi = ((start + len) * scale).ceil().clamp(0.0, limit as f32) as u32;
        lo.min(limit)..hi
    }
}

impl Surface for Canvas {
    fn size(&self) -> (f32, f32) {
        (self.logical_width, self.logical_height)
    }

    fn blit(&mut self, sprite: &Sprite, x: f32, y: f32) {
        let (sx, sy) = self.scale();
        let width = self.pixel_width();
        let cols = Self::span_range(x, sprite.width() as f32, sx, width);
        let rows = Self::span_range(y, sprite.height() as f32, sy, self.pixel_height());

        for py in rows {
            let src_y = ((py as f32 + 0.5) / sy - y).floor();
            if src_y < 0.0 {
                continue;
            }
            for px in cols.clone() {
                let src_x = ((px as f32 + 0.5) / sx - x).floor();
                if src_x < 0.0 {
                    continue;
                }
                if let Some(color) = sprite.pixel(src_x as u32, src_y as u32) {
                    self.pixels[(py * width + px) as usize] = color;
                }
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let (sx, sy) = self.scale();
        let width = self.pixel_width();
        let cols = Self::span_range(rect.x, rect.width, sx, width);
        let rows = Self::span_range(rect.y, rect.height, sy, self.pixel_height());
        for py in rows {
            for px in cols.clone() {
                self.pixels[(py * width + px) as usize] = color;
            }
        }
    }

    fn draw_text(&mut self, text: &str, size: FontSize, x: f32, y: f32, color: Rgb) {
        let col = (x / self.logical_width * self.cols as f32).floor();
        let row = (y / self.logical_height * self.rows as f32).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return;
        }
        self.spans.push(TextSpan {
            col: col as u16,
            row: row as u16,
            text: text.to_string(),
            color,
            bold: size == FontSize::Large,
        });
    }

    fn text_size(&self, text: &str, _size: FontSize) -> (f32, f32) {
        let cell_w = self.logical_width / self.cols as f32;
        let cell_h = self.logical_height / self.rows as f32;
        (text.chars().count() as f32 * cell_w, cell_h)
    }
}
