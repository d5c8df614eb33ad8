//! Renderable handles onto stored images and the per-view slot that owns one.

use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::store::ImageStore;

/// Temporary file holding a stored image, addressable by a `file://` URI.
///
/// Handles are not reclaimed automatically. Call [`DisplayHandle::release`]
/// once the image is no longer shown; dropping an unreleased handle logs a
/// warning and leaves the file behind.
#[derive(Debug)]
pub struct DisplayHandle {
    card_id: String,
    path: PathBuf,
    uri: String,
    outstanding: Arc<AtomicUsize>,
    released: bool,
}

impl DisplayHandle {
    pub(super) fn new(card_id: String, path: PathBuf, outstanding: Arc<AtomicUsize>) -> Self {
        let uri = file_uri(&path);
        Self {
            card_id,
            path,
            uri,
            outstanding,
            released: false,
        }
    }

    /// Item ID this handle shows.
    #[must_use]
    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    /// Location of the materialized image.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// URI a renderer can load.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// What: Release the handle and delete its backing file.
    ///
    /// Details:
    /// - A missing file is not an error; other delete failures are logged.
    pub fn release(mut self) {
        self.released = true;
        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "[ImageStore] failed to remove display handle file"
            );
        }
        self.outstanding.fetch_sub(1, Ordering::SeqCst);
        tracing::trace!(card_id = %self.card_id, "[ImageStore] released display handle");
    }
}

impl Drop for DisplayHandle {
    fn drop(&mut self) {
        if !self.released {
            tracing::warn!(
                card_id = %self.card_id,
                path = %self.path.display(),
                "[ImageStore] display handle dropped without release"
            );
        }
    }
}

/// What: Build a `file://` URI for an absolute path.
///
/// Inputs:
/// - `path`: Location of the materialized image.
///
/// Output:
/// - URI with every byte outside the unreserved set and `/` percent-encoded.
///
/// Details:
/// - Backslash separators become `/` and a drive-letter path gains a leading
///   `/`, so `C:\x` maps to `file:///C:/x`.
fn file_uri(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    let mut out = String::with_capacity(raw.len() + 8);
    out.push_str("file://");
    if !raw.starts_with('/') {
        out.push('/');
    }
    for (i, &b) in raw.as_bytes().iter().enumerate() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(b as char);
            }
            b':' if i == 1 => out.push(':'),
            _ => {
                let _ = write!(out, "%{b:02X}");
            }
        }
    }
    out
}

/// Holds at most one display handle for the currently shown item.
///
/// Switching items releases the previous handle before the next one is
/// acquired, so an item view never accumulates handles.
#[derive(Debug, Default)]
pub struct ImageSlot {
    current: Option<DisplayHandle>,
}

impl ImageSlot {
    /// Empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// What: Show the stored image for `card_id`, replacing any previous one.
    ///
    /// Inputs:
    /// - `store`: Image store to fetch from.
    /// - `card_id`: Item to show.
    ///
    /// Output:
    /// - The held handle, or `None` when no image is stored or the lookup failed.
    ///
    /// Details:
    /// - Always re-resolves against the store, so calling it again for the
    ///   same item after an update notification picks up replaced or removed images.
    /// - Store failures are logged and degrade to the "no image" state.
    pub async fn show(&mut self, store: &ImageStore, card_id: &str) -> Option<&DisplayHandle> {
        self.clear();
        match store.get_display_handle(card_id).await {
            Ok(handle) => self.current = handle,
            Err(e) => {
                tracing::error!(card_id, error = %e, "[ImageStore] failed to load image for display");
            }
        }
        self.current.as_ref()
    }

    /// Currently held handle.
    #[must_use]
    pub const fn current(&self) -> Option<&DisplayHandle> {
        self.current.as_ref()
    }

    /// Release the held handle, if any.
    pub fn clear(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.release();
        }
    }
}

impl Drop for ImageSlot {
    fn drop(&mut self) {
        self.clear();
    }
}
