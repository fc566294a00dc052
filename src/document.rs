// Snapshot document I/O
//
// The document is a single JSON array of tasks. Every save rewrites the whole
// file; loading never fails and falls back to an empty collection.

use crate::error::StoreError;
use crate::task::Task;
use fs2::FileExt;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Why a snapshot could not be used
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("malformed task document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate task id: {0}")]
    DuplicateId(String),

    #[error("task {0} has an empty description")]
    EmptyDescription(String),
}

/// Parse and validate a document
///
/// Any violation rejects the whole document rather than the offending record.
pub fn parse(content: &str) -> Result<Vec<Task>, DocumentError> {
    let tasks: Vec<Task> = serde_json::from_str(content)?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(DocumentError::DuplicateId(task.id.clone()));
        }
        if task.description.trim().is_empty() {
            return Err(DocumentError::EmptyDescription(task.id.clone()));
        }
    }

    Ok(tasks)
}

/// Load the collection from `path`
///
/// A missing file is created as an empty document. An unreadable or invalid
/// document is copied to `<file>.corrupt` and the collection starts empty.
pub fn load(path: &Path) -> Vec<Task> {
    if !path.exists() {
        debug!(file = ?path, "No task document, creating an empty one");
        if let Err(e) = save(path, &[]) {
            warn!(file = ?path, error = %e, "Failed to create empty task document");
        }
        return Vec::new();
    }

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(file = ?path, error = ?e, "Failed to read task document, starting empty");
            return Vec::new();
        }
    };

    match parse(&content) {
        Ok(tasks) => {
            info!(file = ?path, count = tasks.len(), "Loaded tasks");
            tasks
        }
        Err(e) => {
            warn!(file = ?path, error = %e, "Unreadable task document, starting empty");
            let backup = corrupt_path(path);
            match fs::copy(path, &backup) {
                Ok(_) => warn!(backup = ?backup, "Kept a copy of the unreadable document"),
                Err(e) => warn!(backup = ?backup, error = ?e, "Failed to copy unreadable document"),
            }
            Vec::new()
        }
    }
}

/// Overwrite `path` with the full collection
pub fn save(path: &Path, tasks: &[Task]) -> Result<(), StoreError> {
    write_document(path, tasks).map_err(|e| StoreError::persist(path, e))?;
    debug!(file = ?path, count = tasks.len(), "Saved tasks");
    Ok(())
}

fn write_document(path: &Path, tasks: &[Task]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(tasks).map_err(io::Error::other)?;

    let mut file = OpenOptions::new().write(true).create(true).truncate(false).open(path)?;

    // Truncate only once the lock is held
    file.lock_exclusive()?;
    file.set_len(0)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;

    // Lock is released when file is dropped
    Ok(())
}

fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_else(|| OsString::from("tasks.json"));
    name.push(".corrupt");
    path.with_file_name(name)
}
