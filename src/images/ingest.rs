//! Bulk image upload: map file names to item IDs and store them.

use std::path::Path;

use super::store::ImageStore;

/// One uploaded file.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Original file name; the item ID is derived from it.
    pub file_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Outcome of an upload batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Files stored under a derived item ID.
    pub stored: usize,
    /// Files rejected (no derivable ID) or that failed to store.
    pub errors: usize,
}

/// Length of a hyphenated UUID.
const UUID_LEN: usize = 36;

/// Check whether `candidate` is an 8-4-4-4-12 hex UUID.
fn is_uuid(candidate: &[u8]) -> bool {
    candidate.len() == UUID_LEN
        && candidate.iter().enumerate().all(|(i, b)| match i {
            8 | 13 | 18 | 23 => *b == b'-',
            _ => b.is_ascii_hexdigit(),
        })
}

/// What: Derive an item ID from an uploaded file name.
///
/// Inputs:
/// - `file_name`: Name or path of the uploaded file.
///
/// Output:
/// - The first UUID in the file stem, else its first run of ASCII digits, else `None`.
///
/// Details:
/// - Only the file stem is searched, so extensions like `.mp4` never contribute digits.
#[must_use]
pub fn extract_card_id(file_name: &str) -> Option<String> {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let bytes = stem.as_bytes();

    if bytes.len() >= UUID_LEN
        && let Some(start) = (0..=bytes.len() - UUID_LEN).find(|&i| is_uuid(&bytes[i..i + UUID_LEN]))
    {
        return Some(stem[start..start + UUID_LEN].to_string());
    }

    let start = bytes.iter().position(u8::is_ascii_digit)?;
    let len = bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    Some(stem[start..start + len].to_string())
}

/// What: Store a batch of uploaded files under their derived item IDs.
///
/// Inputs:
/// - `store`: Destination image store.
/// - `files`: Uploaded files.
///
/// Output:
/// - Counts of stored and failed files.
///
/// Details:
/// - Writes for different IDs run concurrently; within the batch a later file
///   with the same ID may overwrite an earlier one.
/// - Emits one update notification after the batch when anything was stored.
pub async fn ingest_batch(store: &ImageStore, files: Vec<UploadFile>) -> IngestSummary {
    let mut summary = IngestSummary::default();
    let mut writes = Vec::with_capacity(files.len());
    for file in files {
        let Some(card_id) = extract_card_id(&file.file_name) else {
            tracing::warn!(file = %file.file_name, "[ImageIngest] no item ID in file name");
            summary.errors += 1;
            continue;
        };
        writes.push(async move {
            let outcome = store.put(&card_id, file.bytes).await;
            (file.file_name, card_id, outcome)
        });
    }

    for (file_name, card_id, outcome) in futures::future::join_all(writes).await {
        match outcome {
            Ok(()) => summary.stored += 1,
            Err(e) => {
                tracing::error!(file = %file_name, card_id = %card_id, error = %e, "[ImageIngest] failed to store image");
                summary.errors += 1;
            }
        }
    }

    tracing::info!(
        stored = summary.stored,
        errors = summary.errors,
        "[ImageIngest] upload batch finished"
    );
    if summary.stored > 0 {
        store.notify_updated();
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: UUIDs win over digit runs; digit runs are the fallback
    fn extract_card_id_variants() {
        assert_eq!(
            extract_card_id("scan-2024-0f8fad5b-d9cb-469f-a165-70867728950e.jpg").as_deref(),
            Some("0f8fad5b-d9cb-469f-a165-70867728950e")
        );
        assert_eq!(extract_card_id("card_0042_front.png").as_deref(), Some("0042"));
        assert_eq!(extract_card_id("17.webp").as_deref(), Some("17"));
        assert_eq!(extract_card_id("/tmp/uploads/village 12.png").as_deref(), Some("12"));
        assert_eq!(extract_card_id("moat.mp4"), None);
        assert_eq!(extract_card_id("no-digits.png"), None);
    }

    #[test]
    /// What: Malformed UUID shapes fall back to digits
    fn extract_card_id_rejects_bad_uuid() {
        assert_eq!(
            extract_card_id("0f8fad5b_d9cb_469f_a165_70867728950e.png").as_deref(),
            Some("0")
        );
    }

    #[tokio::test]
    /// What: Batch stores derivable files, counts the rest, and notifies once
    async fn ingest_batch_counts_and_notifies() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path());
        let mut rx = store.subscribe();
        let files = vec![
            UploadFile {
                file_name: "1.png".into(),
                bytes: b"\x89PNG\r\n\x1a\n".to_vec(),
            },
            UploadFile {
                file_name: "card-2.jpg".into(),
                bytes: vec![0xFF, 0xD8, 0xFF],
            },
            UploadFile {
                file_name: "unnamed.png".into(),
                bytes: vec![1, 2, 3],
            },
        ];
        let summary = ingest_batch(&store, files).await;
        assert_eq!(summary, IngestSummary { stored: 2, errors: 1 });
        assert_eq!(store.count().await.expect("count"), 2);
        assert!(store.has_stored_image("2").await);
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    /// What: A batch with nothing stored stays silent
    async fn ingest_batch_without_ids_does_not_notify() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path());
        let mut rx = store.subscribe();
        let summary = ingest_batch(
            &store,
            vec![UploadFile {
                file_name: "x.png".into(),
                bytes: vec![0],
            }],
        )
        .await;
        assert_eq!(summary, IngestSummary { stored: 0, errors: 1 });
        assert!(rx.try_recv().is_err());
    }
}
