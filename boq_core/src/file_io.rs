//! # File I/O
//!
//! Plan documents are stored as `.boq` files containing pretty-printed JSON.
//!
//! - **Atomic saves**: serialize, write `.boq.tmp`, fsync, rename over the target
//! - **Locking**: an OS lock plus a `.boq.lock` sidecar naming the holder
//! - **Version check**: documents from a newer schema are refused
//!
//! Bare plan files (a [`Plan`] as JSON, no document header) are read with
//! [`load_plan`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use boq_core::document::PlanDocument;
//! use boq_core::file_io::{save_document, FileLock};
//! use boq_core::templates;
//! use std::path::Path;
//!
//! let doc = PlanDocument::new("owner-1", templates::get("bungalow_3bed", "douala")?);
//! let path = Path::new("house.boq");
//!
//! let lock = FileLock::acquire(path, "owner-1")?;
//! save_document(&doc, path)?;
//! drop(lock);
//! # Ok::<(), boq_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::document::{PlanDocument, SCHEMA_VERSION};
use crate::errors::{CalcError, CalcResult};
use crate::plan::Plan;

/// Locks older than this are ignored
const STALE_LOCK_HOURS: i64 = 24;

/// Contents of a `.boq.lock` sidecar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    pub user_id: String,
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// A lock is stale when its process is gone (same host only) or it has
    /// outlived [`STALE_LOCK_HOURS`].
    fn is_stale(&self) -> bool {
        let same_host = hostname().is_some_and(|h| h == self.machine);
        if same_host && !process_alive(self.pid) {
            return true;
        }
        (Utc::now() - self.locked_at).num_hours() > STALE_LOCK_HOURS
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME").ok().or_else(|| std::env::var("HOST").ok())
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(windows)]
fn process_alive(pid: u32) -> bool {
    std::process::Command::new("tasklist")
        .args(["/FI", &format!("PID eq {}", pid), "/NH"])
        .output()
        .map(|out| String::from_utf8_lossy(&out.stdout).contains(&pid.to_string()))
        .unwrap_or(true)
}

#[cfg(not(any(unix, windows)))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive lock on a document. Released (and the sidecar removed) on drop.
pub struct FileLock {
    document_path: PathBuf,
    lock_path: PathBuf,
    // holds the OS lock
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire the lock for `path`.
    ///
    /// Fails with `FileLocked` if a live lock is held by anyone, including
    /// another `FileLock` in this process. Stale sidecars are taken over.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        if let Some(existing) = FileLock::check(path) {
            return Err(CalcError::file_locked(
                path.display().to_string(),
                format!("{} ({})", existing.user_id, existing.machine),
                existing.locked_at.to_rfc3339(),
            ));
        }

        let lock_path = lock_path_for(path);
        if lock_path.exists() {
            tracing::warn!(lock = %lock_path.display(), "Taking over stale lock");
        }
        let info = LockInfo::new(user_id);

        let mut lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| io_error("create lock", &lock_path, e))?;

        // The holder's metadata stays intact unless we actually win the OS lock.
        lock_file.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let json = serde_json::to_string_pretty(&info).map_err(|e| CalcError::serialization(e.to_string()))?;
        lock_file
            .set_len(0)
            .and_then(|_| lock_file.write_all(json.as_bytes()))
            .and_then(|_| lock_file.sync_all())
            .map_err(|e| io_error("write lock", &lock_path, e))?;

        tracing::debug!(path = %path.display(), user = %info.user_id, "Lock acquired");
        Ok(FileLock {
            document_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Current holder of a live lock on `path`, if any.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if !lock_path.exists() {
            return None;
        }
        read_json::<LockInfo>(&lock_path, "read lock")
            .ok()
            .filter(|info| !info.is_stale())
    }

    pub fn document_path(&self) -> &Path {
        &self.document_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `house.boq` → `house.boq.lock`
fn lock_path_for(path: &Path) -> PathBuf {
    let extension = path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    path.with_extension(extension)
}

fn io_error(operation: &str, path: &Path, e: std::io::Error) -> CalcError {
    CalcError::file_error(operation, path.display().to_string(), e.to_string())
}

fn read_json<T: DeserializeOwned>(path: &Path, operation: &str) -> CalcResult<T> {
    let contents = fs::read_to_string(path).map_err(|e| io_error(operation, path, e))?;
    serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))
}

/// Save a document with atomic write semantics.
///
/// A crash mid-save leaves at most a stray `.boq.tmp`; the target file is
/// either the old document or the new one, never a partial write.
pub fn save_document(doc: &PlanDocument, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(doc).map_err(|e| CalcError::serialization(e.to_string()))?;

    let tmp_path = path.with_extension("boq.tmp");
    let mut tmp_file = File::create(&tmp_path).map_err(|e| io_error("create temp file", &tmp_path, e))?;
    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| io_error("write temp file", &tmp_path, e))?;
    tmp_file
        .sync_all()
        .map_err(|e| io_error("sync temp file", &tmp_path, e))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        io_error("rename to final", path, e)
    })?;

    tracing::info!(path = %path.display(), plan_id = %doc.meta.plan_id, "Document saved");
    Ok(())
}

/// Load a document, refusing incompatible schema versions.
pub fn load_document(path: &Path) -> CalcResult<PlanDocument> {
    let doc: PlanDocument = read_json(path, "read")?;
    validate_version(&doc.meta.version)?;
    tracing::debug!(path = %path.display(), plan_id = %doc.meta.plan_id, "Document loaded");
    Ok(doc)
}

/// Load a document together with the holder of any live lock on it.
///
/// A locked document still loads; callers treat it as read-only.
pub fn load_document_with_lock_check(path: &Path) -> CalcResult<(PlanDocument, Option<LockInfo>)> {
    let doc = load_document(path)?;
    Ok((doc, FileLock::check(path)))
}

/// Load a bare plan (no document header) from JSON.
pub fn load_plan(path: &Path) -> CalcResult<Plan> {
    read_json(path, "read plan")
}

fn parse_version(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.split('.').map(|p| p.parse::<u32>());
    let major = parts.next()?.ok()?;
    let minor = parts.next().and_then(|p| p.ok()).unwrap_or(0);
    Some((major, minor))
}

/// Major versions must match. Within 0.x, files from a newer minor are refused.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let (file_major, file_minor) = parse_version(file_version).ok_or_else(mismatch)?;
    let (major, minor) = parse_version(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_major != major || (major == 0 && file_minor > minor) {
        return Err(mismatch());
    }
    Ok(())
}
