//! Demo 02: Filtering by Status
//!
//! Builds a small task list and shows the four filter views.
//!
//! Run with: cargo run --example 02_filtering

use eyre::Result;
use tasktracker::{StatusFilter, Store, TaskStatus, view};

fn main() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let mut store = Store::open(temp_dir.path().join("tasks.json"));

    println!("TaskTracker Filtering Demo");
    println!("==========================\n");

    let tasks = [
        ("Write spec", TaskStatus::Done),
        ("Review PR", TaskStatus::InProgress),
        ("Update changelog", TaskStatus::Todo),
        ("Tag release", TaskStatus::Todo),
        ("Archive old branches", TaskStatus::Done),
    ];

    for (description, status) in tasks {
        let id = store.create(description)?.id.clone();
        store.set_status(&id, status)?;
    }

    let mut stdout = std::io::stdout().lock();
    for filter in StatusFilter::CHOICES {
        view::render(&mut stdout, store.filter(filter), None, true)?;
        println!();
    }

    // Views are lazy and can be walked more than once
    let done = store.filter(TaskStatus::Done);
    println!("{} of {} tasks are done:", done.len(), store.len());
    for task in done.iter() {
        println!("  - {}", task.description);
    }

    Ok(())
}
