use label_sheet::barcode::PLACEHOLDER_PAYLOAD;
use label_sheet::config::inches;
use label_sheet::{
    render_labels, resolve, wrap, Color, DrawingOperation, Font, LabelError, MalformedPolicy,
    PriceValue, ProductRecord, RecordingBackend, RenderBackend, SheetConfig,
};
use proptest::prelude::*;

fn catalog(count: usize) -> Vec<ProductRecord> {
    (0..count)
        .map(|i| {
            ProductRecord::new(
                format!("Product number {}", i),
                1.25 + i as f64,
                format!("{:012}", i),
            )
        })
        .collect()
}

fn borders(ops: &[&DrawingOperation]) -> usize {
    ops.iter()
        .filter(|op| matches!(op, DrawingOperation::Rect { fill: None, .. }))
        .count()
}

/// Accepts a fixed number of drawing calls, then reports a write failure.
struct FailingBackend {
    remaining: usize,
    finalize_calls: usize,
}

impl FailingBackend {
    fn step(&mut self) -> label_sheet::Result<()> {
        if self.remaining == 0 {
            return Err(LabelError::Backend("disk full".to_string()));
        }
        self.remaining -= 1;
        Ok(())
    }
}

impl RenderBackend for FailingBackend {
    fn draw_rect(
        &mut self,
        _: f32,
        _: f32,
        _: f32,
        _: f32,
        _: Option<Color>,
    ) -> label_sheet::Result<()> {
        self.step()
    }

    fn draw_text_line(
        &mut self,
        _: f32,
        _: f32,
        _: &str,
        _: Font,
        _: f32,
        _: Color,
    ) -> label_sheet::Result<()> {
        self.step()
    }

    fn draw_barcode(
        &mut self,
        _: f32,
        _: f32,
        _: &str,
        _: f32,
        _: Option<f32>,
    ) -> label_sheet::Result<()> {
        self.step()
    }

    fn page_break(&mut self) -> label_sheet::Result<()> {
        self.step()
    }

    fn finalize(&mut self) -> label_sheet::Result<()> {
        self.finalize_calls += 1;
        Ok(())
    }
}

#[test]
fn thirty_records_fill_two_pages() {
    let config = SheetConfig {
        labels_per_row: 3,
        labels_per_column: 9,
        ..SheetConfig::default()
    };
    let records = catalog(30);
    let mut backend = RecordingBackend::new();

    let summary = render_labels(&records, &config, &mut backend).unwrap();

    assert_eq!(summary.records, 30);
    assert_eq!(summary.pages, 2);
    assert_eq!(summary.page_breaks, 1);
    assert_eq!(backend.pages(), 2);
    assert_eq!(borders(&backend.page(0)), 27);
    assert_eq!(borders(&backend.page(1)), 3);

    let twenty_eighth = resolve(27, &config);
    assert_eq!(twenty_eighth.page_index, 1);
    assert_eq!(twenty_eighth.row_index, 0);
    assert_eq!(twenty_eighth.column_index, 0);

    // The second page opens with the 28th record's border at the top-left slot.
    match backend.page(1)[0] {
        DrawingOperation::Rect { x, y, .. } => {
            assert_eq!(*x, twenty_eighth.origin_x);
            assert_eq!(*y, twenty_eighth.origin_y);
        }
        other => panic!("expected slot border, got {:?}", other),
    }
}

#[test]
fn empty_catalog_draws_nothing_and_finalizes_once() {
    let config = SheetConfig::default();
    let mut backend = RecordingBackend::new();

    let records: Vec<ProductRecord> = Vec::new();

    let summary = render_labels(&records, &config, &mut backend).unwrap();

    assert_eq!(summary.pages, 0);
    assert_eq!(summary.page_breaks, 0);
    assert!(backend.operations().is_empty());
    assert_eq!(backend.finalize_calls(), 1);
}

#[test]
fn missing_upc_uses_placeholder_without_error() {
    let config = SheetConfig::default();
    let record = ProductRecord {
        upc: None,
        ..ProductRecord::new("Bulk Oats", 4.0, "")
    };
    let mut backend = RecordingBackend::new();

    let summary = render_labels(&[record], &config, &mut backend).unwrap();

    assert_eq!(summary.substitutions, 1);
    let payloads: Vec<&str> = backend
        .operations()
        .iter()
        .filter_map(|op| match op {
            DrawingOperation::Barcode { payload, .. } => Some(payload.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(payloads, vec![PLACEHOLDER_PAYLOAD]);
}

#[test]
fn column_origins_match_inch_layout() {
    let config = SheetConfig {
        margin_x: inches(0.1875),
        label_width: inches(2.5),
        spacing_x: inches(0.2),
        ..SheetConfig::default()
    };
    let expected = [0.1875, 2.8875, 5.5875];
    for (column, inches_x) in expected.iter().enumerate() {
        let slot = resolve(column, &config);
        assert_eq!(slot.column_index, column);
        assert!((slot.origin_x - inches(*inches_x)).abs() < 1e-3);
    }
}

#[test]
fn forty_character_name_wraps_into_two_lines() {
    let name = "Fresh Atlantic Salmon Fillet Skin On 1lb";
    assert_eq!(name.chars().count(), 40);
    let lines = wrap(name, 25);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines.join(" "), name);
}

#[test]
fn backend_failure_aborts_and_still_finalizes() {
    let config = SheetConfig::default();
    let records = catalog(5);
    let mut backend = FailingBackend {
        remaining: 10,
        finalize_calls: 0,
    };

    // Each record takes six drawing calls, so the eleventh belongs to record 1.
    let err = render_labels(&records, &config, &mut backend).unwrap_err();

    match &err {
        LabelError::AtRecord { index, source } => {
            assert_eq!(*index, 1);
            assert!(matches!(**source, LabelError::Backend(_)));
        }
        other => panic!("expected backend error for a record, got {:?}", other),
    }
    assert!(err.to_string().starts_with("Record 1: "));
    assert_eq!(backend.finalize_calls, 1);
}

#[test]
fn failed_page_break_names_the_record_that_needed_it() {
    let config = SheetConfig {
        labels_per_row: 1,
        labels_per_column: 1,
        ..SheetConfig::default()
    };
    let records = catalog(3);
    let mut backend = FailingBackend {
        remaining: 6,
        finalize_calls: 0,
    };

    let err = render_labels(&records, &config, &mut backend).unwrap_err();

    assert_eq!(err.record_index(), Some(1));
    assert_eq!(backend.finalize_calls, 1);
}

#[test]
fn strict_mode_reports_offending_record() {
    let config = SheetConfig {
        malformed_policy: MalformedPolicy::Reject,
        ..SheetConfig::default()
    };
    let mut records = catalog(4);
    records[2].price = Some(PriceValue::Text("twelve".to_string()));
    let mut backend = RecordingBackend::new();

    let result = render_labels(&records, &config, &mut backend);

    match result {
        Err(LabelError::MalformedRecord { index, field, .. }) => {
            assert_eq!(index, 2);
            assert_eq!(field, "price");
        }
        other => panic!("expected malformed record error, got {:?}", other),
    }
    assert_eq!(backend.finalize_calls(), 1);
    assert_eq!(borders(&backend.page(0)), 2);
}

#[test]
fn lenient_mode_keeps_going_past_bad_records() {
    let config = SheetConfig::default();
    let mut records = catalog(4);
    records[1].price = Some(PriceValue::Text("twelve".to_string()));
    records[3].upc = Some("ünicode".into());
    let mut backend = RecordingBackend::new();

    let summary = render_labels(&records, &config, &mut backend).unwrap();

    assert_eq!(summary.records, 4);
    assert_eq!(summary.substitutions, 2);
}

#[test]
fn same_job_renders_identically_twice() {
    let config = SheetConfig {
        expiry_line_enabled: true,
        ..SheetConfig::default()
    };
    let records = catalog(40);
    let mut first = RecordingBackend::new();
    let mut second = RecordingBackend::new();

    render_labels(&records, &config, &mut first).unwrap();
    render_labels(&records, &config, &mut second).unwrap();

    assert_eq!(first.operations(), second.operations());
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    #[test]
    fn page_breaks_track_page_count(count in 0usize..120, per_row in 1usize..4, per_col in 1usize..10) {
        let config = SheetConfig {
            labels_per_row: per_row,
            labels_per_column: per_col,
            ..SheetConfig::default()
        };
        let records = catalog(count);
        let mut backend = RecordingBackend::new();

        let summary = render_labels(&records, &config, &mut backend).unwrap();

        let slots = per_row * per_col;
        let expected_pages = if count == 0 { 0 } else { count.div_ceil(slots) };
        prop_assert_eq!(summary.pages, expected_pages);
        prop_assert_eq!(backend.pages(), expected_pages);
        prop_assert_eq!(backend.page_breaks(), expected_pages.saturating_sub(1));
        prop_assert_eq!(backend.finalize_calls(), 1);
        if count <= slots {
            prop_assert_eq!(backend.page_breaks(), 0);
        }
    }
}
