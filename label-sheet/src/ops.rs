//! Drawing instructions exchanged between the composers and a rendering backend.
//!
//! Coordinates are millimetres from the bottom-left corner of the page, font
//! sizes are points.

use serde::Deserialize;

/// RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Built-in faces every backend must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawingOperation {
    /// Rectangle with its lower-left corner at `(x, y)`. Without a fill
    /// colour only the outline is stroked.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
    },
    /// Single line of text; `(x, y)` is the start of the baseline.
    TextLine {
        x: f32,
        y: f32,
        text: String,
        font: Font,
        size: f32,
        color: Color,
    },
    /// 1-D barcode symbol with its lower-left corner at `(x, y)`.
    Barcode {
        x: f32,
        y: f32,
        payload: String,
        height: f32,
        width: Option<f32>,
    },
    PageBreak,
}

impl DrawingOperation {
    pub fn is_page_break(&self) -> bool {
        matches!(self, DrawingOperation::PageBreak)
    }
}
