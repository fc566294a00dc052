//! Demo 01: Basic CRUD Operations
//!
//! Adds, edits, re-statuses and deletes tasks, showing the JSON document
//! after each step.
//!
//! Run with: cargo run --example 01_basic_crud

use eyre::Result;
use std::fs;
use tasktracker::{Store, StoreError, TaskStatus};

fn main() -> Result<()> {
    // Create a temporary directory for this demo
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("tasks.json");

    println!("TaskTracker Basic CRUD Demo");
    println!("===========================\n");
    println!("Document: {}\n", path.display());

    // Opening a missing document creates an empty one
    let mut store = Store::open(&path);
    println!("Opened store with {} tasks.\n", store.len());

    // CREATE
    println!("1. CREATE - Adding a task...");
    let id = store.create("Write the release notes")?.id.clone();
    println!("   Created task {}\n", id);

    // Blank descriptions are rejected
    match store.create("   ") {
        Err(StoreError::EmptyDescription) => println!("   Blank description rejected, nothing created.\n"),
        other => println!("   Unexpected: {:?}\n", other),
    }

    // UPDATE
    println!("2. UPDATE - Changing the description...");
    store.update_description(&id, "Write and publish the release notes")?;
    if let Some(task) = store.get(&id) {
        println!("   - Description: {}", task.description);
        println!("   - Updated at:  {}\n", task.updated_at);
    }

    // SET STATUS
    println!("3. SET STATUS - Moving through the workflow...");
    for status in [TaskStatus::InProgress, TaskStatus::Done] {
        let task = store.set_status(&id, status)?;
        println!("   - now {}", task.status);
    }
    println!();

    println!("   Document on disk:");
    println!("{}\n", fs::read_to_string(&path)?);

    // DELETE
    println!("4. DELETE - Removing the task...");
    store.delete(&id)?;
    println!("   Task exists = {}", store.get(&id).is_some());

    // Deleting again is not an error
    store.delete(&id)?;
    println!("   Deleting it again is a no-op.\n");

    println!("Demo complete!");
    Ok(())
}
