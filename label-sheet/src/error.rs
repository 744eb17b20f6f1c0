use thiserror::Error;

/// Errors raised while preparing or rendering a label job.
#[derive(Error, Debug)]
pub enum LabelError {
    #[error("Invalid sheet configuration: {0}")]
    Configuration(String),
    #[error("Record {index}: cannot interpret {field} value {value:?}")]
    MalformedRecord {
        index: usize,
        field: &'static str,
        value: String,
    },
    #[error("Rendering backend failed: {0}")]
    Backend(String),
    #[error("Failed to read catalog: {0}")]
    Catalog(String),
    #[error("Failed to encode barcode: {0}")]
    Barcode(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Record {index}: {source}")]
    AtRecord {
        index: usize,
        source: Box<LabelError>,
    },
}

impl LabelError {
    /// Attach the index of the record being drawn when `self` was raised.
    /// Errors that already name their record are returned unchanged.
    pub fn at_record(self, index: usize) -> Self {
        match self {
            LabelError::MalformedRecord { .. } | LabelError::AtRecord { .. } => self,
            other => LabelError::AtRecord {
                index,
                source: Box::new(other),
            },
        }
    }

    /// Index of the record this error belongs to, if any.
    pub fn record_index(&self) -> Option<usize> {
        match self {
            LabelError::MalformedRecord { index, .. } | LabelError::AtRecord { index, .. } => {
                Some(*index)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LabelError>;
