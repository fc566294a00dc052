// Status filtering over the task collection

use crate::error::StoreError;
use crate::task::{Task, TaskStatus};
use std::fmt;
use std::str::FromStr;

/// Which statuses are visible
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    /// The four filter states in display order
    pub const CHOICES: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Only(TaskStatus::Todo),
        StatusFilter::Only(TaskStatus::InProgress),
        StatusFilter::Only(TaskStatus::Done),
    ];

    pub fn matches(self, task: &Task) -> bool {
        self.status().is_none_or(|status| task.status == status)
    }

    /// The single visible status, `None` for `all`
    pub fn status(self) -> Option<TaskStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(status),
        }
    }
}

impl From<Option<TaskStatus>> for StatusFilter {
    fn from(status: Option<TaskStatus>) -> Self {
        status.map_or(StatusFilter::All, StatusFilter::Only)
    }
}

impl From<TaskStatus> for StatusFilter {
    fn from(status: TaskStatus) -> Self {
        StatusFilter::Only(status)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" | "" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

/// Read-only, order-preserving view of the collection
///
/// Holds only a borrow and the filter, so it can be iterated any number of
/// times; nothing is materialized until iteration.
#[derive(Debug, Clone, Copy)]
pub struct FilterView<'a> {
    tasks: &'a [Task],
    filter: StatusFilter,
}

impl<'a> FilterView<'a> {
    pub fn new(tasks: &'a [Task], filter: StatusFilter) -> Self {
        Self { tasks, filter }
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Task> + Clone + use<'a> {
        let filter = self.filter;
        self.tasks.iter().filter(move |task| filter.matches(task))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Task at a zero-based row of the view
    pub fn row(&self, index: usize) -> Option<&'a Task> {
        self.iter().nth(index)
    }
}

impl<'a> IntoIterator for FilterView<'a> {
    type Item = &'a Task;
    type IntoIter = Box<dyn Iterator<Item = &'a Task> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
