// Task store: in-memory collection mirrored to a JSON document

use crate::document;
use crate::error::StoreError;
use crate::filter::{FilterView, StatusFilter};
use crate::task::{Task, TaskStatus};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Owns the authoritative task collection and its on-disk snapshot
///
/// Every mutation builds the next collection, writes it in full, and only
/// then replaces the in-memory copy. A failed write leaves the store exactly
/// as it was.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl Store {
    /// Open the store backed by the document at `path`
    ///
    /// Never fails: a missing document is created empty and an unreadable one
    /// yields an empty collection.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let tasks = document::load(&path);
        info!(file = ?path, count = tasks.len(), "Opened task store");
        Self { path, tasks }
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Find a task by full id or by a unique id prefix
    pub fn resolve(&self, id_or_prefix: &str) -> Result<&Task, StoreError> {
        let needle = id_or_prefix.trim();
        if needle.is_empty() {
            return Err(StoreError::not_found(needle));
        }
        if let Some(task) = self.get(needle) {
            return Ok(task);
        }

        let mut matches = self.tasks.iter().filter(|t| t.id.starts_with(needle));
        match (matches.next(), matches.count()) {
            (Some(task), 0) => Ok(task),
            (Some(_), rest) => Err(StoreError::AmbiguousId {
                prefix: needle.to_string(),
                matches: rest + 1,
            }),
            (None, _) => Err(StoreError::not_found(needle)),
        }
    }

    /// Write the current collection to disk
    pub fn save(&self) -> Result<(), StoreError> {
        document::save(&self.path, &self.tasks)
    }

    /// Append a new `todo` task
    ///
    /// The description is trimmed; a blank one creates nothing.
    pub fn create(&mut self, description: &str) -> Result<&Task, StoreError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(StoreError::EmptyDescription);
        }

        let task = Task::new(description);
        debug!(id = %task.id, "create: appending task");

        let mut next = self.tasks.clone();
        next.push(task);
        self.commit(next)?;

        let index = self.tasks.len() - 1;
        Ok(&self.tasks[index])
    }

    /// Replace a task's description
    ///
    /// Returns `Ok(None)` without touching the store when the new description
    /// is blank.
    pub fn update_description(&mut self, id: &str, description: &str) -> Result<Option<&Task>, StoreError> {
        let index = self.position(id)?;

        let description = description.trim();
        if description.is_empty() {
            debug!(id, "update_description: blank description ignored");
            return Ok(None);
        }

        let mut next = self.tasks.clone();
        next[index].description = description.to_string();
        next[index].touch();
        self.commit(next)?;

        debug!(id, "update_description: updated");
        Ok(Some(&self.tasks[index]))
    }

    /// Change a task's status
    pub fn set_status(&mut self, id: &str, status: TaskStatus) -> Result<&Task, StoreError> {
        let index = self.position(id)?;

        let mut next = self.tasks.clone();
        next[index].status = status;
        next[index].touch();
        self.commit(next)?;

        debug!(id, %status, "set_status: updated");
        Ok(&self.tasks[index])
    }

    /// Remove a task
    ///
    /// An unknown id is not an error. The collection is persisted either way.
    pub fn delete(&mut self, id: &str) -> Result<Option<Task>, StoreError> {
        let mut next = self.tasks.clone();
        let removed = next.iter().position(|t| t.id == id).map(|index| next.remove(index));
        self.commit(next)?;

        debug!(id, removed = removed.is_some(), "delete: done");
        Ok(removed)
    }

    /// Lazy view of the tasks matching `filter`, in insertion order
    pub fn filter(&self, filter: impl Into<StatusFilter>) -> FilterView<'_> {
        FilterView::new(&self.tasks, filter.into())
    }

    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found(id))
    }

    fn commit(&mut self, next: Vec<Task>) -> Result<(), StoreError> {
        document::save(&self.path, &next)?;
        self.tasks = next;
        Ok(())
    }
}
