// Presentation controller
//
// Drives the store from user commands. Each command runs to completion
// (validate, one store call, re-render) before the next one is read.

use crate::command::{Command, HELP};
use crate::error::StoreError;
use crate::filter::{FilterView, StatusFilter};
use crate::store::Store;
use crate::task::{Task, TaskStatus};
use std::io;
use std::num::NonZeroUsize;
use tracing::debug;

/// Whatever the user is looking at and talking through
pub trait Ui {
    /// Ask for a task description. `None` means the prompt was cancelled.
    fn ask_description(&mut self, title: &str, initial: Option<&str>) -> io::Result<Option<String>>;

    /// Yes/no question; anything but an explicit yes is a no
    fn confirm(&mut self, question: &str) -> io::Result<bool>;

    /// Offer the three statuses. `None` means the prompt was cancelled.
    fn choose_status(&mut self, current: TaskStatus) -> io::Result<Option<TaskStatus>>;

    fn warn(&mut self, message: &str) -> io::Result<()>;

    fn show(&mut self, message: &str) -> io::Result<()>;

    /// Redraw the whole list
    fn render(&mut self, view: FilterView<'_>, selected: Option<&str>) -> io::Result<()>;
}

/// Whether the session should keep reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App<U> {
    store: Store,
    filter: StatusFilter,
    selected: Option<String>,
    ui: U,
}

impl<U: Ui> App<U> {
    pub fn new(store: Store, ui: U) -> Self {
        Self {
            store,
            filter: StatusFilter::All,
            selected: None,
            ui,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn selected(&self) -> Option<&Task> {
        self.selected.as_deref().and_then(|id| self.store.get(id))
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn into_store(self) -> Store {
        self.store
    }

    /// Redraw the current view, dropping a selection that is no longer visible
    pub fn refresh(&mut self) -> io::Result<()> {
        let view = self.store.filter(self.filter);
        let visible = self
            .selected
            .as_deref()
            .is_some_and(|id| view.iter().any(|t| t.id == id));
        if !visible {
            self.selected = None;
        }
        self.ui.render(view, self.selected.as_deref())
    }

    /// Run one command
    ///
    /// Store failures are shown to the user and never end the session; only
    /// I/O errors from the UI itself are returned.
    pub fn dispatch(&mut self, command: Command) -> io::Result<Flow> {
        debug!(?command, "dispatch");

        let result = match command {
            Command::AddTask(text) => self.add_task(text),
            Command::UpdateDescription(text) => self.update_description(text),
            Command::DeleteTask => self.delete_task(),
            Command::SetStatus(value) => self.set_status(value),
            Command::SetFilter(filter) => {
                self.filter = filter;
                Ok(())
            }
            Command::Select(row) => self.select(row),
            Command::List => Ok(()),
            Command::Help => {
                self.ui.show(HELP)?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        match result {
            Ok(()) => {}
            Err(Action::Ui(e)) => return Err(e),
            Err(Action::Store(e)) => self.ui.warn(&user_message(&e))?,
        }

        self.refresh()?;
        Ok(Flow::Continue)
    }

    fn add_task(&mut self, text: Option<String>) -> Result<(), Action> {
        let text = match text {
            Some(text) => text,
            None => match self.ui.ask_description("Add Task", None)? {
                Some(text) => text,
                None => return Ok(()),
            },
        };

        match self.store.create(&text) {
            Ok(task) => {
                self.selected = Some(task.id.clone());
                Ok(())
            }
            // A blank prompt just means nothing was added
            Err(StoreError::EmptyDescription) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn update_description(&mut self, text: Option<String>) -> Result<(), Action> {
        let Some(task) = self.require_selection("Select a task to update.")? else {
            return Ok(());
        };

        let text = match text {
            Some(text) => text,
            None => match self.ui.ask_description("Update Task", Some(&task.description))? {
                Some(text) => text,
                None => return Ok(()),
            },
        };

        self.store.update_description(&task.id, &text)?;
        Ok(())
    }

    fn delete_task(&mut self) -> Result<(), Action> {
        let Some(task) = self.require_selection("Select a task to delete.")? else {
            return Ok(());
        };

        if self.ui.confirm("Are you sure you want to delete this task?")? {
            self.store.delete(&task.id)?;
            self.selected = None;
        }
        Ok(())
    }

    fn set_status(&mut self, value: Option<String>) -> Result<(), Action> {
        let Some(task) = self.require_selection("Select a task to change status.")? else {
            return Ok(());
        };

        let status = match value {
            Some(value) => value.parse::<TaskStatus>()?,
            None => match self.ui.choose_status(task.status)? {
                Some(status) => status,
                None => return Ok(()),
            },
        };

        self.store.set_status(&task.id, status)?;
        Ok(())
    }

    fn select(&mut self, row: NonZeroUsize) -> Result<(), Action> {
        let id = self.store.filter(self.filter).row(row.get() - 1).map(|t| t.id.clone());
        match id {
            Some(id) => self.selected = Some(id),
            None => self.ui.warn(&format!("There is no task on row {}.", row))?,
        }
        Ok(())
    }

    /// The selected task, or a warning when nothing (still existing) is selected
    fn require_selection(&mut self, warning: &str) -> Result<Option<Task>, Action> {
        let Some(id) = self.selected.clone() else {
            self.ui.warn(warning)?;
            return Ok(None);
        };
        match self.store.get(&id) {
            Some(task) => Ok(Some(task.clone())),
            None => {
                self.selected = None;
                Err(StoreError::not_found(id).into())
            }
        }
    }
}

fn user_message(err: &StoreError) -> String {
    match err {
        StoreError::NotFound { .. } => "Task not found.".to_string(),
        e if e.is_invalid_input() => format!("Invalid input: {}", e),
        other => other.to_string(),
    }
}

/// Why a command stopped early
enum Action {
    Store(StoreError),
    Ui(io::Error),
}

impl From<StoreError> for Action {
    fn from(e: StoreError) -> Self {
        Action::Store(e)
    }
}

impl From<io::Error> for Action {
    fn from(e: io::Error) -> Self {
        Action::Ui(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::fs;
    use tempfile::TempDir;

    /// Replays canned answers and records what was shown
    #[derive(Default)]
    struct ScriptedUi {
        descriptions: VecDeque<Option<String>>,
        confirmations: VecDeque<bool>,
        statuses: VecDeque<Option<TaskStatus>>,
        warnings: Vec<String>,
        messages: Vec<String>,
        renders: Vec<Vec<String>>,
    }

    impl Ui for ScriptedUi {
        fn ask_description(&mut self, _title: &str, _initial: Option<&str>) -> io::Result<Option<String>> {
            Ok(self.descriptions.pop_front().flatten())
        }

        fn confirm(&mut self, _question: &str) -> io::Result<bool> {
            Ok(self.confirmations.pop_front().unwrap_or(false))
        }

        fn choose_status(&mut self, _current: TaskStatus) -> io::Result<Option<TaskStatus>> {
            Ok(self.statuses.pop_front().flatten())
        }

        fn warn(&mut self, message: &str) -> io::Result<()> {
            self.warnings.push(message.to_string());
            Ok(())
        }

        fn show(&mut self, message: &str) -> io::Result<()> {
            self.messages.push(message.to_string());
            Ok(())
        }

        fn render(&mut self, view: FilterView<'_>, _selected: Option<&str>) -> io::Result<()> {
            self.renders
                .push(view.iter().map(|t| t.description.clone()).collect());
            Ok(())
        }
    }

    fn new_app() -> (TempDir, App<ScriptedUi>) {
        let temp = TempDir::new().unwrap();
        let store = Store::open(temp.path().join("tasks.json"));
        (temp, App::new(store, ScriptedUi::default()))
    }

    fn run(app: &mut App<ScriptedUi>, line: &str) -> Flow {
        let command = Command::parse(line).unwrap().unwrap();
        app.dispatch(command).unwrap()
    }

    fn descriptions(app: &App<ScriptedUi>) -> Vec<String> {
        app.store().tasks().iter().map(|t| t.description.clone()).collect()
    }

    #[test]
    fn test_concrete_scenario() {
        let (_temp, mut app) = new_app();

        run(&mut app, "add Write spec");
        run(&mut app, "add Review PR");
        run(&mut app, "select 1");
        run(&mut app, "status done");
        run(&mut app, "filter done");

        assert_eq!(app.ui().renders.last().unwrap(), &vec!["Write spec".to_string()]);

        run(&mut app, "filter all");
        assert_eq!(
            app.ui().renders.last().unwrap(),
            &vec!["Write spec".to_string(), "Review PR".to_string()]
        );
        assert!(app.ui().warnings.is_empty());
    }

    #[test]
    fn test_every_command_re_renders() {
        let (_temp, mut app) = new_app();
        for line in ["add a", "list", "filter todo", "select 1", "status in-progress"] {
            let before = app.ui().renders.len();
            run(&mut app, line);
            assert_eq!(app.ui().renders.len(), before + 1, "no render after '{}'", line);
        }
    }

    #[test]
    fn test_add_prompt_cancelled_or_blank_creates_nothing() {
        let (_temp, mut app) = new_app();
        app.ui_mut().descriptions.extend([None, Some("   ".to_string())]);

        run(&mut app, "add");
        run(&mut app, "add");

        assert!(app.store().is_empty());
        assert!(app.ui().warnings.is_empty());
    }

    #[test]
    fn test_add_prompt_trims() {
        let (_temp, mut app) = new_app();
        app.ui_mut().descriptions.push_back(Some("  Buy milk ".to_string()));

        run(&mut app, "add");
        assert_eq!(descriptions(&app), vec!["Buy milk"]);
    }

    #[test]
    fn test_actions_require_selection() {
        let (_temp, mut app) = new_app();
        run(&mut app, "add a");
        app.selected = None;

        run(&mut app, "edit b");
        run(&mut app, "delete");
        run(&mut app, "status done");

        assert_eq!(
            app.ui().warnings,
            vec![
                "Select a task to update.",
                "Select a task to delete.",
                "Select a task to change status."
            ]
        );
        assert_eq!(descriptions(&app), vec!["a"]);
        assert_eq!(app.store().tasks()[0].status, TaskStatus::Todo);
    }

    #[test]
    fn test_select_out_of_range_warns() {
        let (_temp, mut app) = new_app();
        run(&mut app, "add a");
        run(&mut app, "select 5");
        assert_eq!(app.ui().warnings, vec!["There is no task on row 5."]);
    }

    #[test]
    fn test_edit_via_prompt() {
        let (_temp, mut app) = new_app();
        run(&mut app, "add a");
        run(&mut app, "add b");
        run(&mut app, "1");
        app.ui_mut().descriptions.push_back(Some("a2".to_string()));

        run(&mut app, "edit");
        assert_eq!(descriptions(&app), vec!["a2", "b"]);

        // Blank and cancelled edits leave it alone
        app.ui_mut().descriptions.extend([Some(" ".to_string()), None]);
        run(&mut app, "edit");
        run(&mut app, "edit");
        assert_eq!(descriptions(&app), vec!["a2", "b"]);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (_temp, mut app) = new_app();
        run(&mut app, "add a");
        run(&mut app, "add b");
        run(&mut app, "select 1");

        app.ui_mut().confirmations.push_back(false);
        run(&mut app, "delete");
        assert_eq!(descriptions(&app), vec!["a", "b"]);

        app.ui_mut().confirmations.push_back(true);
        run(&mut app, "delete");
        assert_eq!(descriptions(&app), vec!["b"]);
        assert!(app.selected().is_none());
    }

    #[test]
    fn test_status_via_picker_and_invalid_value() {
        let (_temp, mut app) = new_app();
        run(&mut app, "add a");
        run(&mut app, "select 1");

        app.ui_mut().statuses.push_back(Some(TaskStatus::InProgress));
        run(&mut app, "status");
        assert_eq!(app.store().tasks()[0].status, TaskStatus::InProgress);

        run(&mut app, "status blocked");
        assert_eq!(app.store().tasks()[0].status, TaskStatus::InProgress);
        assert_eq!(
            app.ui().warnings,
            vec!["Invalid input: invalid status: 'blocked' (expected todo, in-progress or done)"]
        );
    }

    #[test]
    fn test_selection_of_vanished_task_reports_not_found() {
        let (temp, mut app) = new_app();
        run(&mut app, "add a");
        run(&mut app, "select 1");

        // Reload from a document where the task is gone
        fs::write(temp.path().join("tasks.json"), "[]").unwrap();
        let store = Store::open(temp.path().join("tasks.json"));
        let selected = app.selected.clone();
        let mut app = App::new(store, ScriptedUi::default());
        app.selected = selected;

        run(&mut app, "status done");
        assert_eq!(app.ui().warnings, vec!["Task not found."]);
        assert!(app.selected.is_none());
    }

    #[test]
    fn test_persist_failure_is_reported_verbatim() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("tasks.json");
        fs::create_dir(&dir).unwrap();
        let mut app = App::new(Store::open(&dir), ScriptedUi::default());

        run(&mut app, "add a");
        assert!(app.store().is_empty());
        assert_eq!(app.ui().warnings.len(), 1);
        assert!(app.ui().warnings[0].starts_with("failed to persist tasks to "));
    }

    #[test]
    fn test_filter_command_updates_filter() {
        let (_temp, mut app) = new_app();
        assert_eq!(app.filter(), StatusFilter::All);
        run(&mut app, "filter in-progress");
        assert_eq!(app.filter(), StatusFilter::Only(TaskStatus::InProgress));
    }

    #[test]
    fn test_filter_drops_hidden_selection() {
        let (_temp, mut app) = new_app();
        run(&mut app, "add a");
        run(&mut app, "select 1");
        run(&mut app, "filter done");
        assert!(app.selected().is_none());
    }

    #[test]
    fn test_help_and_quit() {
        let (_temp, mut app) = new_app();
        assert_eq!(run(&mut app, "help"), Flow::Continue);
        assert_eq!(app.ui().messages, vec![HELP]);
        assert_eq!(run(&mut app, "quit"), Flow::Quit);
    }
}
