use std::fs;
use std::path::Path;

use crate::state::types::Catalog;

/// Failure to read or parse the dataset file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The dataset file could not be read.
    #[error("failed to read dataset {path}: {source}")]
    Io {
        /// Path that was attempted.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The dataset file is not valid catalog JSON.
    #[error("failed to parse dataset {path}: {source}")]
    Json {
        /// Path that was attempted.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// What: Load the catalog dataset from a JSON file.
///
/// Inputs:
/// - `path`: Dataset file (object with `cards` and `editions` arrays).
///
/// Output:
/// - Parsed `Catalog` or a `LoadError` naming the path.
///
/// # Errors
/// - Returns `LoadError::Io` when the file cannot be read
/// - Returns `LoadError::Json` when the content is not a valid catalog
///
/// Details:
/// - Dangling item references inside groups are kept; the pipeline skips them.
pub fn load_catalog(path: &Path) -> Result<Catalog, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog: Catalog = serde_json::from_str(&raw).map_err(|source| LoadError::Json {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        cards = catalog.cards.len(),
        editions = catalog.editions.len(),
        "loaded catalog"
    );
    Ok(catalog)
}
