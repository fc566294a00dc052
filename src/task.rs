// Task data model

use crate::error::StoreError;
use chrono::{Local, NaiveDateTime, SubsecRound, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A single to-do item
///
/// Serialized with camelCase keys (`createdAt`, `updatedAt`) and timestamps
/// as ISO-8601 local time without an offset, see [`iso_timestamp`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub description: String,
    pub status: TaskStatus,
    #[serde(with = "iso_timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "iso_timestamp")]
    pub updated_at: NaiveDateTime,
}

impl Task {
    /// Build a fresh `todo` task. The caller is responsible for trimming and
    /// rejecting blank descriptions.
    pub fn new(description: impl Into<String>) -> Self {
        let now = now();
        Self {
            id: Uuid::new_v4().to_string(),
            description: description.into(),
            status: TaskStatus::Todo,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump `updated_at`. Never stands still or goes backwards, even when two
    /// mutations land in the same microsecond or the clock steps back.
    pub(crate) fn touch(&mut self) {
        let now = now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + TimeDelta::microseconds(1)
        };
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Canonical order, as offered when picking a status
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "todo" => Ok(TaskStatus::Todo),
            "in-progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(StoreError::InvalidStatus(other.to_string())),
        }
    }
}

/// Current local wall-clock time, at the microsecond precision the
/// document stores
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

/// `YYYY-MM-DDTHH:MM:SS[.ffffff]`
///
/// Fractions are always six digits and left out entirely when zero, so a
/// document written by this crate or by the earlier tool survives a load/save
/// unchanged.
pub mod iso_timestamp {
    use chrono::{NaiveDateTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer, de};

    const SECONDS: &str = "%Y-%m-%dT%H:%M:%S";
    const MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6f";

    pub fn format(value: &NaiveDateTime) -> String {
        let fmt = if value.nanosecond() / 1_000 == 0 { SECONDS } else { MICROS };
        value.format(fmt).to_string()
    }

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<NaiveDateTime>()
            .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
    }
}
