//! SQLite-backed blob store for user-supplied card images.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension, params};
use tokio::sync::{OnceCell, broadcast};

use super::error::StoreError;
use super::handle::DisplayHandle;

/// Environment override for the database location.
pub const IMAGE_DB_PATH_ENV: &str = "CARDSHELF_IMAGE_DB_PATH";

/// Database file name inside the images directory.
const DB_FILE_NAME: &str = "images.db";

/// Capacity of the update notification channel; lagging receivers only miss duplicates.
const UPDATE_CHANNEL_CAPACITY: usize = 16;

/// Stored image payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// MIME type sniffed from the payload at insert time.
    pub content_type: String,
    /// Raw image bytes.
    pub data: Vec<u8>,
}

/// What: Guess a MIME type from the leading bytes of an image.
///
/// Inputs:
/// - `bytes`: Image payload.
///
/// Output:
/// - `image/jpeg`, `image/png`, `image/gif`, `image/webp`, or `application/octet-stream`.
#[must_use]
pub fn sniff_content_type(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "application/octet-stream"
    }
}

/// File extension matching a sniffed MIME type.
pub(crate) fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "bin",
    }
}

/// Open connection plus schema.
#[derive(Debug)]
struct Backend {
    conn: Mutex<Connection>,
}

impl Backend {
    /// Open or create the database and ensure the schema exists.
    fn open(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path)?;
        conn.execute_batch(
            r"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;

            CREATE TABLE IF NOT EXISTS images (
              card_id      TEXT PRIMARY KEY,
              content_type TEXT NOT NULL,
              data         BLOB NOT NULL,
              stored_at    INTEGER NOT NULL
            );
            ",
        )?;
        tracing::info!(path = %db_path.display(), "[ImageStore] database initialized");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

/// Asynchronous key-value store of card images keyed by card ID.
///
/// The database is opened lazily on first use. Concurrent first callers share
/// one initialization and all observe its outcome, including failure.
///
/// Every operation runs on tokio's blocking pool behind a single connection
/// lock, so operations are applied one at a time in the order they take the
/// lock. For a `put` racing a `get` on the same ID, the `get` sees either the
/// old or the new payload in full, and the last completed `put` wins.
#[derive(Debug)]
pub struct ImageStore {
    /// Database file location.
    db_path: PathBuf,
    /// Directory for materialized display handles.
    handles_dir: PathBuf,
    /// Shared lazy initialization outcome.
    backend: OnceCell<Result<Arc<Backend>, String>>,
    /// Fire-and-forget change notifications.
    updates: broadcast::Sender<()>,
    /// Display handles acquired and not yet released.
    outstanding: Arc<AtomicUsize>,
    /// Sequence for unique handle file names.
    next_handle: AtomicU64,
}

impl ImageStore {
    /// What: Create a store rooted at `dir`.
    ///
    /// Inputs:
    /// - `dir`: Directory holding the database and a `handles/` subdirectory.
    ///
    /// Output:
    /// - Store that has not touched the filesystem yet.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self::with_paths(dir.join(DB_FILE_NAME), dir.join("handles"))
    }

    /// Create a store with explicit database and handle locations.
    #[must_use]
    pub fn with_paths(db_path: PathBuf, handles_dir: PathBuf) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            db_path,
            handles_dir,
            backend: OnceCell::new(),
            updates,
            outstanding: Arc::new(AtomicUsize::new(0)),
            next_handle: AtomicU64::new(0),
        }
    }

    /// What: Create the store at its default location.
    ///
    /// Output:
    /// - Store under `<config>/images`, or at `CARDSHELF_IMAGE_DB_PATH` when set.
    #[must_use]
    pub fn open_default() -> Self {
        let dir = crate::theme::images_dir();
        match std::env::var(IMAGE_DB_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                Self::with_paths(PathBuf::from(path), dir.join("handles"))
            }
            _ => Self::new(&dir),
        }
    }

    /// Database file location.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Resolve the shared backend, opening it on first use.
    async fn backend(&self) -> Result<Arc<Backend>, StoreError> {
        let outcome = self
            .backend
            .get_or_init(|| {
                let path = self.db_path.clone();
                async move {
                    match tokio::task::spawn_blocking(move || Backend::open(&path)).await {
                        Ok(Ok(backend)) => Ok(Arc::new(backend)),
                        Ok(Err(e)) => Err(e.to_string()),
                        Err(e) => Err(e.to_string()),
                    }
                }
            })
            .await;
        match outcome {
            Ok(backend) => Ok(Arc::clone(backend)),
            Err(msg) => {
                tracing::warn!(
                    path = %self.db_path.display(),
                    error = %msg,
                    "[ImageStore] store unavailable"
                );
                Err(StoreError::Unavailable(msg.clone()))
            }
        }
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let backend = self.backend().await?;
        tokio::task::spawn_blocking(move || {
            let conn = backend.conn.lock().map_err(|_| StoreError::Poisoned)?;
            f(&conn).map_err(StoreError::from)
        })
        .await?
    }

    /// What: Insert or replace the image for `card_id`.
    ///
    /// Inputs:
    /// - `card_id`: Item ID.
    /// - `data`: Image bytes; the content type is sniffed.
    ///
    /// Output:
    /// - `Ok(())` once committed; `StoreError` when the backend rejects the write.
    ///
    /// # Errors
    /// - Returns `StoreError` when the store is unavailable or the write fails
    ///
    /// Details:
    /// - Does not emit an update notification; batch callers notify once when done.
    pub async fn put(&self, card_id: &str, data: Vec<u8>) -> Result<(), StoreError> {
        let id = card_id.to_string();
        let content_type = sniff_content_type(&data);
        let size = data.len();
        let stored_at = chrono::Utc::now().timestamp();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO images (card_id, content_type, data, stored_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(card_id) DO UPDATE SET
                   content_type = excluded.content_type,
                   data = excluded.data,
                   stored_at = excluded.stored_at",
                params![id, content_type, data, stored_at],
            )
        })
        .await?;
        tracing::debug!(card_id, bytes = size, content_type, "[ImageStore] stored image");
        Ok(())
    }

    /// What: Fetch the image for `card_id`.
    ///
    /// Output:
    /// - `Ok(Some(image))` when stored, `Ok(None)` when not; a missing key is never an error.
    ///
    /// # Errors
    /// - Returns `StoreError` when the store is unavailable or the read fails
    pub async fn get(&self, card_id: &str) -> Result<Option<StoredImage>, StoreError> {
        let id = card_id.to_string();
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT content_type, data FROM images WHERE card_id = ?1",
                params![id],
                |row| {
                    Ok(StoredImage {
                        content_type: row.get(0)?,
                        data: row.get(1)?,
                    })
                },
            )
            .optional()
        })
        .await
    }

    /// What: Materialize the stored image as a renderable file handle.
    ///
    /// Inputs:
    /// - `card_id`: Item ID.
    ///
    /// Output:
    /// - `Ok(Some(handle))` when an image exists; `Ok(None)` otherwise.
    ///
    /// # Errors
    /// - Returns `StoreError` when the lookup fails or the file cannot be written
    ///
    /// Details:
    /// - Each call writes a fresh temporary file; the caller must `release` it.
    /// - The store counts unreleased handles (see [`Self::outstanding_handles`]).
    pub async fn get_display_handle(
        &self,
        card_id: &str,
    ) -> Result<Option<DisplayHandle>, StoreError> {
        let Some(image) = self.get(card_id).await? else {
            return Ok(None);
        };
        let seq = self.next_handle.fetch_add(1, Ordering::Relaxed);
        let file_name = format!(
            "{}-{seq}.{}",
            sanitize_file_stem(card_id),
            extension_for(&image.content_type)
        );
        let dir = self.handles_dir.clone();
        let path = dir.join(file_name);
        let write_path = path.clone();
        tokio::task::spawn_blocking(move || {
            std::fs::create_dir_all(&dir)?;
            std::fs::write(&write_path, &image.data)
        })
        .await??;
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        tracing::trace!(card_id, path = %path.display(), "[ImageStore] acquired display handle");
        Ok(Some(DisplayHandle::new(
            card_id.to_string(),
            path,
            Arc::clone(&self.outstanding),
        )))
    }

    /// What: Remove every stored image.
    ///
    /// Output:
    /// - `Ok(())` when the table is empty; emits an update notification on success.
    ///
    /// # Errors
    /// - Returns `StoreError` when the store is unavailable or the delete fails
    pub async fn clear(&self) -> Result<(), StoreError> {
        let removed = self
            .with_conn(|conn| conn.execute("DELETE FROM images", []))
            .await?;
        tracing::info!(removed, "[ImageStore] cleared all images");
        self.notify_updated();
        Ok(())
    }

    /// What: Number of stored images.
    ///
    /// # Errors
    /// - Returns `StoreError` when the store is unavailable or the query fails
    pub async fn count(&self) -> Result<usize, StoreError> {
        let n: i64 = self
            .with_conn(|conn| conn.query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0)))
            .await?;
        Ok(usize::try_from(n).unwrap_or(0))
    }

    /// What: Check whether an image is stored, degrading failures to `false`.
    ///
    /// Output:
    /// - `true` only when the lookup succeeded and found an image.
    pub async fn has_stored_image(&self, card_id: &str) -> bool {
        let id = card_id.to_string();
        let lookup = self
            .with_conn(move |conn| {
                conn.query_row(
                    "SELECT 1 FROM images WHERE card_id = ?1 LIMIT 1",
                    params![id],
                    |_| Ok(()),
                )
                .optional()
            })
            .await;
        match lookup {
            Ok(found) => found.is_some(),
            Err(e) => {
                tracing::warn!(card_id, error = %e, "[ImageStore] lookup failed; treating as no image");
                false
            }
        }
    }

    /// What: Check many IDs with independent concurrent lookups.
    ///
    /// Inputs:
    /// - `ids`: Item IDs to check.
    ///
    /// Output:
    /// - Subset of `ids` with a stored image; failed lookups count as absent.
    pub async fn stored_among<'a, I>(&self, ids: I) -> HashSet<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let lookups = ids.into_iter().map(|id| async move {
            let found = self.has_stored_image(id).await;
            (id, found)
        });
        futures::future::join_all(lookups)
            .await
            .into_iter()
            .filter_map(|(id, found)| found.then(|| id.to_string()))
            .collect()
    }

    /// Display handles acquired and not yet released.
    #[must_use]
    pub fn outstanding_handles(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Subscribe to store-change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.updates.subscribe()
    }

    /// Broadcast that stored images changed; having no listeners is fine.
    pub fn notify_updated(&self) {
        let listeners = self.updates.send(()).unwrap_or(0);
        tracing::trace!(listeners, "[ImageStore] broadcast image update");
    }
}

/// Replace characters that are unsafe in file names.
fn sanitize_file_stem(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    fn temp_store() -> (tempfile::TempDir, ImageStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path());
        (dir, store)
    }

    #[test]
    /// What: Magic bytes select the MIME type
    fn sniff_known_formats() {
        assert_eq!(sniff_content_type(PNG), "image/png");
        assert_eq!(sniff_content_type(JPEG), "image/jpeg");
        assert_eq!(sniff_content_type(b"GIF89a..."), "image/gif");
        assert_eq!(sniff_content_type(b"RIFF\0\0\0\0WEBPVP8 "), "image/webp");
        assert_eq!(sniff_content_type(b"hello"), "application/octet-stream");
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("text/plain"), "bin");
    }

    #[tokio::test]
    /// What: Re-upload overwrites; a new ID increments the count by one
    ///
    /// - Input: put a, put a again, put b
    /// - Output: counts 1, 1, 2; `get(a)` returns the second payload
    async fn put_overwrites_and_counts() {
        let (_dir, store) = temp_store();
        store.put("a", PNG.to_vec()).await.expect("put a");
        assert_eq!(store.count().await.expect("count"), 1);
        store.put("a", JPEG.to_vec()).await.expect("re-put a");
        assert_eq!(store.count().await.expect("count"), 1);
        store.put("b", PNG.to_vec()).await.expect("put b");
        assert_eq!(store.count().await.expect("count"), 2);

        let a = store.get("a").await.expect("get").expect("present");
        assert_eq!(a.content_type, "image/jpeg");
        assert_eq!(a.data, JPEG);
    }

    #[tokio::test]
    /// What: Missing keys resolve to `None`, not an error
    async fn get_missing_is_none() {
        let (_dir, store) = temp_store();
        assert!(store.get("nope").await.expect("get").is_none());
        assert!(!store.has_stored_image("nope").await);
        assert!(store.get_display_handle("nope").await.expect("handle").is_none());
    }

    #[tokio::test]
    /// What: Clear empties the store and notifies listeners
    async fn clear_empties_and_notifies() {
        let (_dir, store) = temp_store();
        let mut rx = store.subscribe();
        store.put("a", PNG.to_vec()).await.expect("put");
        store.put("b", PNG.to_vec()).await.expect("put");
        store.clear().await.expect("clear");
        assert_eq!(store.count().await.expect("count"), 0);
        assert!(store.get("a").await.expect("get").is_none());
        assert!(store.get("b").await.expect("get").is_none());
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    /// What: Concurrent first use shares one initialization
    async fn concurrent_first_use_shares_init() {
        let (_dir, store) = temp_store();
        let (r1, r2, r3) = tokio::join!(store.count(), store.count(), store.put("x", PNG.to_vec()));
        assert!(r1.is_ok() && r2.is_ok() && r3.is_ok());
        assert_eq!(store.count().await.expect("count"), 1);
    }

    #[tokio::test]
    /// What: Unopenable database fails every operation with `Unavailable`
    ///
    /// - Input: Database path whose parent is a regular file
    /// - Output: put/get/count all return `StoreError::Unavailable`; `has_stored_image` degrades to false
    async fn unavailable_backend_is_shared_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file").expect("write blocker");
        let store = ImageStore::with_paths(blocker.join("images.db"), dir.path().join("h"));
        assert!(matches!(store.count().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.put("a", PNG.to_vec()).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(store.get("a").await, Err(StoreError::Unavailable(_))));
        assert!(!store.has_stored_image("a").await);
    }

    #[tokio::test]
    /// What: Display handles are files that must be released explicitly
    async fn display_handle_lifecycle() {
        let (_dir, store) = temp_store();
        store.put("card/1", PNG.to_vec()).await.expect("put");
        let handle = store
            .get_display_handle("card/1")
            .await
            .expect("handle")
            .expect("present");
        assert_eq!(store.outstanding_handles(), 1);
        assert!(handle.path().is_file());
        assert!(handle.uri().starts_with("file://"));
        assert!(handle.uri().ends_with(".png"));
        assert_eq!(std::fs::read(handle.path()).expect("read"), PNG);
        let path = handle.path().to_path_buf();
        handle.release();
        assert_eq!(store.outstanding_handles(), 0);
        assert!(!path.exists());
    }

    #[tokio::test]
    /// What: Batch lookups report only stored IDs
    async fn stored_among_filters_ids() {
        let (_dir, store) = temp_store();
        store.put("a", PNG.to_vec()).await.expect("put");
        let found = store.stored_among(["a", "b"]).await;
        assert_eq!(found, HashSet::from(["a".to_string()]));
    }

    #[tokio::test]
    /// What: Presence checks track puts and clears, including empty payloads
    ///
    /// - Input: Missing ID, empty blob, then a clear
    /// - Output: false, true, false
    async fn has_stored_image_tracks_rows() {
        let (_dir, store) = temp_store();
        assert!(!store.has_stored_image("a").await);
        store.put("a", Vec::new()).await.expect("put empty");
        assert!(store.has_stored_image("a").await);
        store.clear().await.expect("clear");
        assert!(!store.has_stored_image("a").await);
    }
}
