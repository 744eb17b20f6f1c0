//! Sheet geometry and label styling for one render job.

use crate::error::{LabelError, Result};
use crate::ops::Color;
use serde::Deserialize;
use std::path::Path;

/// Millimetres per inch.
pub const MM_PER_INCH: f32 = 25.4;

/// US Letter dimensions in mm
pub const LETTER_WIDTH_MM: f32 = 215.9;
pub const LETTER_HEIGHT_MM: f32 = 279.4;

/// Convert inches to millimetres.
pub fn inches(value: f32) -> f32 {
    value * MM_PER_INCH
}

/// What to do with a record whose price or UPC cannot be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Draw the documented default and keep going.
    #[default]
    Substitute,
    /// Abort the job at the first malformed record.
    Reject,
}

/// Layout of one label sheet. Lengths are millimetres, font sizes points.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub label_width: f32,
    pub label_height: f32,
    pub margin_x: f32,
    pub margin_y: f32,
    pub spacing_x: f32,
    pub spacing_y: f32,
    pub labels_per_row: usize,
    pub labels_per_column: usize,
    pub color_highlight_enabled: bool,
    pub expiry_line_enabled: bool,
    pub name_font_size: f32,
    pub expiry_font_size: f32,
    pub price_font_size: f32,
    pub currency_font_size: f32,
    pub currency_symbol: String,
    pub highlight_color: Color,
    /// Character budget per wrapped name line.
    pub name_wrap_limit: usize,
    pub malformed_policy: MalformedPolicy,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            page_width: LETTER_WIDTH_MM,
            page_height: LETTER_HEIGHT_MM,
            label_width: inches(2.5),
            label_height: inches(1.0),
            margin_x: inches(0.1875),
            margin_y: inches(0.2),
            spacing_x: inches(0.2),
            spacing_y: inches(0.2),
            labels_per_row: 3,
            labels_per_column: 9,
            color_highlight_enabled: true,
            expiry_line_enabled: false,
            name_font_size: 11.0,
            expiry_font_size: 6.0,
            price_font_size: 24.0,
            currency_font_size: 14.0,
            currency_symbol: "$".to_string(),
            highlight_color: Color::YELLOW,
            name_wrap_limit: 25,
            malformed_policy: MalformedPolicy::Substitute,
        }
    }
}

impl SheetConfig {
    /// Load a (possibly partial) JSON configuration; absent fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| LabelError::Configuration(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| LabelError::Configuration(format!("Invalid JSON: {}", e)))
    }

    pub fn slots_per_page(&self) -> usize {
        self.labels_per_row * self.labels_per_column
    }

    /// Total width and height taken by the label grid, spacing included.
    pub fn grid_extent(&self) -> (f32, f32) {
        let cols = self.labels_per_row as f32;
        let rows = self.labels_per_column as f32;
        (
            cols * self.label_width + (cols - 1.0).max(0.0) * self.spacing_x,
            rows * self.label_height + (rows - 1.0).max(0.0) * self.spacing_y,
        )
    }

    /// Check the configuration before a job starts.
    pub fn validate(&self) -> Result<()> {
        if self.labels_per_row == 0 || self.labels_per_column == 0 {
            return Err(LabelError::Configuration(format!(
                "labels per row ({}) and per column ({}) must both be positive",
                self.labels_per_row, self.labels_per_column
            )));
        }

        let lengths = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("label_width", self.label_width),
            ("label_height", self.label_height),
            ("margin_x", self.margin_x),
            ("margin_y", self.margin_y),
            ("spacing_x", self.spacing_x),
            ("spacing_y", self.spacing_y),
            ("name_font_size", self.name_font_size),
            ("expiry_font_size", self.expiry_font_size),
            ("price_font_size", self.price_font_size),
            ("currency_font_size", self.currency_font_size),
        ];
        for (field, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(LabelError::Configuration(format!(
                    "{} must be a non-negative number, got {}",
                    field, value
                )));
            }
        }
        if self.label_width == 0.0 || self.label_height == 0.0 {
            return Err(LabelError::Configuration(
                "label width and height must be greater than zero".to_string(),
            ));
        }
        if self.name_wrap_limit == 0 {
            return Err(LabelError::Configuration(
                "name_wrap_limit must be greater than zero".to_string(),
            ));
        }

        let (grid_width, grid_height) = self.grid_extent();
        if self.margin_x + grid_width > self.page_width {
            return Err(LabelError::Configuration(format!(
                "{} columns need {:.2} mm but the page is {:.2} mm wide",
                self.labels_per_row,
                self.margin_x + grid_width,
                self.page_width
            )));
        }
        if self.margin_y + grid_height > self.page_height {
            return Err(LabelError::Configuration(format!(
                "{} rows need {:.2} mm but the page is {:.2} mm tall",
                self.labels_per_column,
                self.margin_y + grid_height,
                self.page_height
            )));
        }

        Ok(())
    }
}
