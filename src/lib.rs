// TaskTracker - personal task list persisted as a single JSON document

pub mod app;
pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod filter;
pub mod shell;
pub mod store;
pub mod task;
pub mod view;

// Re-export main types for convenience
pub use app::{App, Flow, Ui};
pub use command::Command;
pub use config::Config;
pub use error::StoreError;
pub use filter::{FilterView, StatusFilter};
pub use store::Store;
pub use task::{Task, TaskStatus};
