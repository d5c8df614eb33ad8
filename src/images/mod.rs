//! Persistent store of user-supplied card images.
//!
//! Images are keyed by item ID and kept in a local SQLite database. Display
//! handles materialize a stored image as a temporary file that a renderer can
//! load; callers own those handles and release them explicitly.

mod error;
mod handle;
mod ingest;
mod store;

pub use error::StoreError;
pub use handle::{DisplayHandle, ImageSlot};
pub use ingest::{IngestSummary, UploadFile, extract_card_id, ingest_batch};
pub use store::{IMAGE_DB_PATH_ENV, ImageStore, StoredImage, sniff_content_type};
