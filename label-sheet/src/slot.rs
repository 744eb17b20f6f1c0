//! Drawing operations for a single label slot.
//!
//! Slot layout, top to bottom: wrapped product name, optional expiry line,
//! then the barcode on the left and the price block on the right sharing
//! the bottom band.

use crate::barcode;
use crate::config::SheetConfig;
use crate::error::Result;
use crate::grid::SlotPlacement;
use crate::metrics::{pt_to_mm, text_width_mm};
use crate::ops::{Color, DrawingOperation, Font};
use crate::record::{LabelText, ProductRecord};

/// Inset of the slot content from the border.
const PADDING_MM: f32 = 1.8;

/// Baseline of the first name line below the slot top.
const NAME_TOP_PT: f32 = 15.0;

/// Distance between successive name lines.
const NAME_LINE_PITCH_PT: f32 = 10.0;

/// Space kept between the lowest text baseline and the barcode top.
const TEXT_CLEARANCE_MM: f32 = 1.0;

/// Room around the price text inside the highlight.
const PRICE_BLOCK_PAD_MM: f32 = 1.0;

/// Gap between the currency symbol and the amount.
const CURRENCY_GAP_MM: f32 = 0.5;

/// Resolve `record` and compose its slot.
pub fn compose(
    record: &ProductRecord,
    placement: &SlotPlacement,
    config: &SheetConfig,
) -> Result<Vec<DrawingOperation>> {
    let text = record.resolve(placement.record_index, config)?;
    Ok(compose_text(&text, placement, config))
}

/// Price block geometry, anchored to the slot's right edge.
struct PriceBlock {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    currency_x: f32,
    amount_x: f32,
    baseline: f32,
}

impl PriceBlock {
    fn layout(text: &LabelText, placement: &SlotPlacement, config: &SheetConfig) -> Self {
        let amount_width = text_width_mm(&text.price, Font::Bold, config.price_font_size);
        let currency_width =
            text_width_mm(&config.currency_symbol, Font::Bold, config.currency_font_size);
        let em = pt_to_mm(config.price_font_size);

        let right = placement.origin_x + config.label_width - PADDING_MM - PRICE_BLOCK_PAD_MM;
        let amount_x = right - amount_width;
        let currency_x = amount_x - CURRENCY_GAP_MM - currency_width;

        let x = currency_x - PRICE_BLOCK_PAD_MM;
        let y = placement.origin_y + PADDING_MM;
        PriceBlock {
            x,
            y,
            width: right + PRICE_BLOCK_PAD_MM - x,
            height: em * 1.1,
            currency_x,
            amount_x,
            baseline: y + em * 0.25,
        }
    }
}

/// Compose the operations for one slot from already-resolved text.
pub fn compose_text(
    text: &LabelText,
    placement: &SlotPlacement,
    config: &SheetConfig,
) -> Vec<DrawingOperation> {
    let x = placement.origin_x;
    let y = placement.origin_y;
    let top = y + config.label_height;
    let mut ops = Vec::new();

    ops.push(DrawingOperation::Rect {
        x,
        y,
        width: config.label_width,
        height: config.label_height,
        fill: None,
    });

    let barcode_y = y + PADDING_MM;
    let barcode_height = config.label_height / 3.0;
    let baseline = |line: usize| top - pt_to_mm(NAME_TOP_PT + line as f32 * NAME_LINE_PITCH_PT);

    // Text baselines stay above the barcode band; the expiry line takes the
    // last one and the name gets the rest, never fewer than one line.
    let text_floor = barcode_y + barcode_height + TEXT_CLEARANCE_MM;
    let fitting = (0..).take_while(|&line| baseline(line) >= text_floor).count();
    let name_budget = fitting
        .saturating_sub(usize::from(config.expiry_line_enabled))
        .max(1);

    let mut name_lines = crate::wrap::wrap(&text.name, config.name_wrap_limit);
    if name_lines.len() > name_budget {
        tracing::debug!(
            record = placement.record_index,
            lines = name_lines.len(),
            kept = name_budget,
            "name truncated to fit above barcode"
        );
        name_lines.truncate(name_budget);
    }
    let line_count = name_lines.len();
    for (line_index, line) in name_lines.into_iter().enumerate() {
        ops.push(DrawingOperation::TextLine {
            x: x + PADDING_MM,
            y: baseline(line_index),
            text: line,
            font: Font::Bold,
            size: config.name_font_size,
            color: Color::BLACK,
        });
    }

    if config.expiry_line_enabled {
        ops.push(DrawingOperation::TextLine {
            x: x + PADDING_MM,
            y: baseline(line_count),
            text: format!("EXP: {}", text.expiry),
            font: Font::Regular,
            size: config.expiry_font_size,
            color: Color::BLACK,
        });
    }

    let price = PriceBlock::layout(text, placement, config);

    let barcode_x = x + PADDING_MM;
    let available = (price.x - PADDING_MM - barcode_x).max(0.0);
    let width = barcode::natural_width_mm(&text.upc)
        .ok()
        .map(|natural| natural.min(available));
    ops.push(DrawingOperation::Barcode {
        x: barcode_x,
        y: barcode_y,
        payload: text.upc.clone(),
        height: barcode_height,
        width,
    });

    if config.color_highlight_enabled {
        ops.push(DrawingOperation::Rect {
            x: price.x,
            y: price.y,
            width: price.width,
            height: price.height,
            fill: Some(config.highlight_color),
        });
    }

    ops.push(DrawingOperation::TextLine {
        x: price.currency_x,
        y: price.baseline,
        text: config.currency_symbol.clone(),
        font: Font::Bold,
        size: config.currency_font_size,
        color: Color::BLACK,
    });
    ops.push(DrawingOperation::TextLine {
        x: price.amount_x,
        y: price.baseline,
        text: text.price.clone(),
        font: Font::Bold,
        size: config.price_font_size,
        color: Color::BLACK,
    });

    ops
}
