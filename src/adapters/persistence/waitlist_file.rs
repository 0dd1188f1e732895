//! Waitlist persisted as a single JSON document on the local filesystem.
//!
//! On-disk layout:
//!
//! ```json
//! { "version": 1, "entries": [ { "id": "…", "email": "…", "timestamp": "…" } ] }
//! ```
//!
//! Files holding a bare array of entries (the pre-versioned layout) are still
//! readable and are rewritten in the versioned layout on the next append. Legacy
//! records keep their id, email and timestamp text; timestamps in any RFC 3339
//! form other than `…sss Z` milliseconds are rewritten in that form.
//!
//! Any other top-level shape, or a record that does not decode as an entry,
//! fails every read the same way, so `count()` and `list()` always agree.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{io::AsyncWriteExt as _, sync::Mutex};

use crate::{
    app_error::{AppError, AppResult},
    application::validators::WaitlistEmail,
    domain::entities::waitlist_entry::WaitlistEntry,
    use_cases::waitlist::WaitlistRepo,
};

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct WaitlistDocument<'a> {
    version: u32,
    entries: &'a [WaitlistEntry],
}

#[derive(Deserialize)]
struct StoredDocument {
    version: u32,
    entries: Vec<WaitlistEntry>,
}

/// Decodes either layout. The top-level JSON kind picks the layout: an object
/// is a versioned document, an array is a legacy entry list.
fn decode_entries(bytes: &[u8]) -> AppResult<Vec<WaitlistEntry>> {
    match serde_json::from_slice::<Value>(bytes)? {
        doc @ Value::Object(_) => {
            let doc: StoredDocument = serde_json::from_value(doc)?;
            if doc.version != FORMAT_VERSION {
                return Err(AppError::Storage(format!(
                    "unsupported waitlist file version {}",
                    doc.version
                )));
            }
            Ok(doc.entries)
        }
        legacy @ Value::Array(_) => Ok(serde_json::from_value(legacy)?),
        _ => Err(AppError::Storage(
            "waitlist file is neither a document nor an entry array".into(),
        )),
    }
}

/// Single-writer waitlist store backed by one JSON file.
///
/// Appends are serialized through `write_lock`; every write replaces the file
/// via temp file + rename, so readers never see a partial document and need no
/// lock of their own.
#[derive(Debug)]
pub struct JsonFileWaitlistStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileWaitlistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> AppResult<Vec<WaitlistEntry>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        decode_entries(&bytes)
    }

    async fn persist(&self, entries: &[WaitlistEntry]) -> AppResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(dir).await?;
        }

        let bytes = serde_json::to_vec_pretty(&WaitlistDocument {
            version: FORMAT_VERSION,
            entries,
        })?;
        write_atomic(&self.path, &bytes).await?;

        tracing::debug!(
            path = %self.path.display(),
            entries = entries.len(),
            "Waitlist persisted"
        );
        Ok(())
    }
}

#[async_trait]
impl WaitlistRepo for JsonFileWaitlistStore {
    async fn add(&self, email: &WaitlistEmail) -> AppResult<usize> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_entries().await?;
        if entries.iter().any(|e| e.email == email.as_ref()) {
            return Err(AppError::AlreadyRegistered);
        }

        let last_timestamp = entries.last().map(|e| e.timestamp);
        entries.push(WaitlistEntry::new(email.to_string(), last_timestamp));
        self.persist(&entries).await?;

        Ok(entries.len())
    }

    async fn list(&self) -> AppResult<Vec<WaitlistEntry>> {
        self.read_entries().await
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.read_entries().await?.len())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Replaces `path` with `bytes` via a sibling temp file. The temp file is
/// removed if any step fails.
async fn write_atomic(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let tmp = tmp_path(path);
    if let Err(err) = write_and_rename(&tmp, path, bytes).await {
        if let Err(cleanup) = tokio::fs::remove_file(&tmp).await
            && cleanup.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %tmp.display(), error = %cleanup, "Temp file left behind");
        }
        return Err(err);
    }
    sync_parent_dir(path).await
}

async fn write_and_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> AppResult<()> {
    {
        let mut f = tokio::fs::File::create(tmp).await?;
        f.write_all(bytes).await?;
        f.flush().await?;
        f.sync_all().await?;
    }
    tokio::fs::rename(tmp, path).await?;
    Ok(())
}

/// Makes the rename itself durable.
#[cfg(unix)]
async fn sync_parent_dir(path: &Path) -> AppResult<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    tokio::fs::File::open(dir).await?.sync_all().await?;
    Ok(())
}

#[cfg(not(unix))]
async fn sync_parent_dir(_path: &Path) -> AppResult<()> {
    Ok(())
}
