//! Mapping from a record's position in the job to its slot on the sheet.

use crate::config::SheetConfig;

/// Where one record lands. The origin is the slot's lower-left corner in
/// page coordinates (millimetres, y growing upwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotPlacement {
    pub record_index: usize,
    pub page_index: usize,
    pub row_index: usize,
    pub column_index: usize,
    pub origin_x: f32,
    pub origin_y: f32,
}

impl SlotPlacement {
    /// Position of the slot within its page, counted row by row.
    pub fn index_on_page(&self, config: &SheetConfig) -> usize {
        self.row_index * config.labels_per_row + self.column_index
    }

    /// Whether this slot opens a page after the first one.
    pub fn starts_new_page(&self) -> bool {
        self.page_index > 0 && self.row_index == 0 && self.column_index == 0
    }
}

/// Resolve the slot of the record at `record_index`.
///
/// Row 0 hangs from the top margin; every following row sits one label
/// height plus one vertical spacing lower. Expects a validated config.
pub fn resolve(record_index: usize, config: &SheetConfig) -> SlotPlacement {
    let slots_per_page = config.slots_per_page();
    let page_index = record_index / slots_per_page;
    let index_on_page = record_index % slots_per_page;
    let row_index = index_on_page / config.labels_per_row;
    let column_index = index_on_page % config.labels_per_row;

    let origin_x = config.margin_x + column_index as f32 * (config.label_width + config.spacing_x);
    let origin_y = config.page_height
        - config.margin_y
        - row_index as f32 * (config.label_height + config.spacing_y)
        - config.label_height;

    SlotPlacement {
        record_index,
        page_index,
        row_index,
        column_index,
        origin_x,
        origin_y,
    }
}

/// Pages needed for `record_count` records; an empty job needs none.
pub fn page_count(record_count: usize, config: &SheetConfig) -> usize {
    record_count.div_ceil(config.slots_per_page())
}
