//! The drawing contract the composers render through, and its implementations.

mod pdf;

pub use pdf::PdfBackend;

use crate::error::Result;
use crate::ops::{Color, DrawingOperation, Font};

/// A document sink. Coordinates are millimetres from the page's lower-left
/// corner; the engine calls `finalize` exactly once per job.
pub trait RenderBackend {
    fn draw_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
    ) -> Result<()>;

    fn draw_text_line(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font: Font,
        size: f32,
        color: Color,
    ) -> Result<()>;

    fn draw_barcode(
        &mut self,
        x: f32,
        y: f32,
        payload: &str,
        height: f32,
        width: Option<f32>,
    ) -> Result<()>;

    fn page_break(&mut self) -> Result<()>;

    /// Persist or close the document.
    fn finalize(&mut self) -> Result<()>;

    /// Dispatch one operation to the matching drawing call.
    fn apply(&mut self, op: &DrawingOperation) -> Result<()> {
        match op {
            DrawingOperation::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => self.draw_rect(*x, *y, *width, *height, *fill),
            DrawingOperation::TextLine {
                x,
                y,
                text,
                font,
                size,
                color,
            } => self.draw_text_line(*x, *y, text, *font, *size, *color),
            DrawingOperation::Barcode {
                x,
                y,
                payload,
                height,
                width,
            } => self.draw_barcode(*x, *y, payload, *height, *width),
            DrawingOperation::PageBreak => self.page_break(),
        }
    }
}

/// Keeps the operation stream in memory instead of producing a file.
/// Serves dry runs and print previews.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    operations: Vec<DrawingOperation>,
    finalize_calls: usize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operations(&self) -> &[DrawingOperation] {
        &self.operations
    }

    pub fn page_breaks(&self) -> usize {
        self.operations.iter().filter(|op| op.is_page_break()).count()
    }

    /// Pages that received drawing; an untouched document has none.
    pub fn pages(&self) -> usize {
        if self.operations.is_empty() {
            0
        } else {
            self.page_breaks() + 1
        }
    }

    pub fn finalize_calls(&self) -> usize {
        self.finalize_calls
    }

    /// Operations drawn on page `page` (zero-based).
    pub fn page(&self, page: usize) -> Vec<&DrawingOperation> {
        self.operations
            .split(DrawingOperation::is_page_break)
            .nth(page)
            .map(|ops| ops.iter().collect())
            .unwrap_or_default()
    }
}

impl RenderBackend for RecordingBackend {
    fn draw_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
    ) -> Result<()> {
        self.operations.push(DrawingOperation::Rect {
            x,
            y,
            width,
            height,
            fill,
        });
        Ok(())
    }

    fn draw_text_line(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font: Font,
        size: f32,
        color: Color,
    ) -> Result<()> {
        self.operations.push(DrawingOperation::TextLine {
            x,
            y,
            text: text.to_string(),
            font,
            size,
            color,
        });
        Ok(())
    }

    fn draw_barcode(
        &mut self,
        x: f32,
        y: f32,
        payload: &str,
        height: f32,
        width: Option<f32>,
    ) -> Result<()> {
        self.operations.push(DrawingOperation::Barcode {
            x,
            y,
            payload: payload.to_string(),
            height,
            width,
        });
        Ok(())
    }

    fn page_break(&mut self) -> Result<()> {
        self.operations.push(DrawingOperation::PageBreak);
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.finalize_calls += 1;
        Ok(())
    }
}
