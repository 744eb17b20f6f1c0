//! Advance widths of the built-in PDF Helvetica faces.
//!
//! The composers need string widths to right-align the price block without
//! asking the backend, so the standard AFM widths for printable ASCII are
//! carried here. Units are 1/1000 em.

use crate::ops::Font;

const PT_TO_MM: f32 = 25.4 / 72.0;

/// Width used for characters outside printable ASCII.
const FALLBACK_WIDTH: u16 = 556;

/// Helvetica, characters 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold, characters 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn char_width(font: Font, c: char) -> u16 {
    let table = match font {
        Font::Regular => &HELVETICA,
        Font::Bold => &HELVETICA_BOLD,
    };
    match c as u32 {
        code @ 0x20..=0x7E => table[(code - 0x20) as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Rendered width of `text` in millimetres at `size` points.
pub fn text_width_mm(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(font, c))).sum();
    units as f32 / 1000.0 * size * PT_TO_MM
}

/// Convert a length in points to millimetres.
pub fn pt_to_mm(points: f32) -> f32 {
    points * PT_TO_MM
}
