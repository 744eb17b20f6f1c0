//! Loading the product catalog handed to a render job.

use crate::error::{LabelError, Result};
use crate::record::ProductRecord;
use std::path::Path;

/// Read a JSON array of product records, keeping file order.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<ProductRecord>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| LabelError::Catalog(format!("{}: {}", path.display(), e)))?;
    parse_catalog(&content)
}

pub fn parse_catalog(json: &str) -> Result<Vec<ProductRecord>> {
    serde_json::from_str(json).map_err(|e| LabelError::Catalog(format!("Invalid JSON: {}", e)))
}
