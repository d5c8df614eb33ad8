//! Command-line image store maintenance.

use std::path::PathBuf;

use cardshelf::images::{ImageStore, IngestSummary, UploadFile, ingest_batch};

use crate::app::Result;

/// What: Read upload files from disk.
///
/// Inputs:
/// - `paths`: Files named on the command line.
///
/// Output:
/// - Files that could be read plus the number that could not.
fn read_upload_files(paths: Vec<PathBuf>) -> (Vec<UploadFile>, usize) {
    let mut files = Vec::with_capacity(paths.len());
    let mut failed = 0;
    for path in paths {
        let file_name = path
            .file_name()
            .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy())
            .into_owned();
        match std::fs::read(&path) {
            Ok(bytes) => files.push(UploadFile { file_name, bytes }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read image file");
                failed += 1;
            }
        }
    }
    (files, failed)
}

/// What: Import image files into the store and report the outcome.
///
/// Inputs:
/// - `store`: Destination image store.
/// - `paths`: Image files; each card ID is derived from the file name.
///
/// Output:
/// - Summary where unreadable files count as errors.
///
/// Details:
/// - Never aborts on a single bad file.
///
/// # Errors
/// - Returns `Err` when the file-reading task fails
pub async fn handle_import(store: &ImageStore, paths: Vec<PathBuf>) -> Result<IngestSummary> {
    tracing::info!(files = paths.len(), "image import requested from CLI");
    let (files, unreadable) = tokio::task::spawn_blocking(move || read_upload_files(paths)).await?;
    let mut summary = ingest_batch(store, files).await;
    summary.errors += unreadable;
    println!(
        "Stored {} image(s), {} error(s)",
        summary.stored, summary.errors
    );
    Ok(summary)
}

/// Remove every stored image.
///
/// # Errors
/// - Returns `Err` when the store cannot be cleared
pub async fn handle_clear(store: &ImageStore) -> Result<()> {
    store.clear().await?;
    println!("Cleared all stored images");
    Ok(())
}

/// Print the number of stored images.
///
/// # Errors
/// - Returns `Err` when the store cannot be queried
pub async fn handle_count(store: &ImageStore) -> Result<usize> {
    let n = store.count().await?;
    println!("{n} stored image(s)");
    Ok(n)
}
