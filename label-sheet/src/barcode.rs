//! Code 128 symbols for the label barcode.

use crate::error::{LabelError, Result};
use barcoders::sym::code128::Code128;
use image::{GrayImage, Luma};

/// Width of one bar module (0.75 pt).
pub const MODULE_WIDTH_MM: f32 = 0.75 * 25.4 / 72.0;

/// Payload drawn when a record has no usable UPC.
pub const PLACEHOLDER_PAYLOAD: &str = "000000000000";

/// Code set selectors understood by the encoder.
const CODE_SET_B: char = 'Ɓ';
const CODE_SET_C: char = 'Ć';

/// Whether `payload` can be represented in a Code 128 symbol.
pub fn is_encodable(payload: &str) -> bool {
    !payload.is_empty() && payload.chars().all(|c| (' '..='~').contains(&c))
}

/// Digit-only payloads pack two digits per symbol in code set C. An odd
/// trailing digit switches to code set B.
fn symbol_data(payload: &str) -> String {
    let numeric = payload.chars().all(|c| c.is_ascii_digit());
    let paired = payload.len() - payload.len() % 2;
    if !numeric || paired == 0 {
        return format!("{}{}", CODE_SET_B, payload);
    }
    match payload.split_at(paired) {
        (pairs, "") => format!("{}{}", CODE_SET_C, pairs),
        (pairs, last) => format!("{}{}{}{}", CODE_SET_C, pairs, CODE_SET_B, last),
    }
}

/// Encode `payload` into its bar modules (1 = bar, 0 = space).
pub fn encode(payload: &str) -> Result<Vec<u8>> {
    if !is_encodable(payload) {
        return Err(LabelError::Barcode(format!(
            "{:?} contains characters outside printable ASCII",
            payload
        )));
    }
    let symbol = Code128::new(symbol_data(payload))
        .map_err(|e| LabelError::Barcode(format!("{:?}: {:?}", payload, e)))?;
    Ok(symbol.encode())
}

/// Printed width of the symbol at the standard module width.
pub fn natural_width_mm(payload: &str) -> Result<f32> {
    Ok(encode(payload)?.len() as f32 * MODULE_WIDTH_MM)
}

/// Rasterise the modules one pixel per module, black bars on white.
pub fn render_modules(modules: &[u8], height_px: u32) -> GrayImage {
    let width = modules.len().max(1) as u32;
    GrayImage::from_fn(width, height_px.max(1), |x, _| {
        match modules.get(x as usize) {
            Some(1) => Luma([0u8]),
            _ => Luma([255u8]),
        }
    })
}

/// Pixel height giving roughly square pixels at `height_mm`.
pub fn raster_height_px(height_mm: f32) -> u32 {
    (height_mm / MODULE_WIDTH_MM).round().max(1.0) as u32
}
