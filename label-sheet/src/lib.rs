//! label-sheet: lay out product records on printable label sheets.
//!
//! A job maps each record to a slot on a fixed grid ([`grid`]), composes the
//! slot's drawing operations ([`slot`]) and streams them, with page breaks,
//! into a [`backend::RenderBackend`] ([`sheet`]).

pub mod backend;
pub mod barcode;
pub mod catalog;
pub mod config;
pub mod error;
pub mod grid;
pub mod metrics;
pub mod ops;
pub mod record;
pub mod sheet;
pub mod slot;
pub mod wrap;

pub use backend::{PdfBackend, RecordingBackend, RenderBackend};
pub use config::{MalformedPolicy, SheetConfig};
pub use error::{LabelError, Result};
pub use grid::{resolve, SlotPlacement};
pub use ops::{Color, DrawingOperation, Font};
pub use record::{PriceValue, ProductRecord, UpcValue};
pub use sheet::{render_labels, JobState, RenderSummary, SheetComposer};
pub use wrap::wrap;
