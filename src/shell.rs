// Interactive terminal session

use crate::app::{App, Flow, Ui};
use crate::command::Command;
use crate::filter::{FilterView, StatusFilter};
use crate::store::Store;
use crate::task::TaskStatus;
use crate::view;
use colored::Colorize;
use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

/// Prompt for the current filter, `tasks> ` or e.g. `tasks [done]> `
fn prompt_for(filter: StatusFilter) -> String {
    match filter {
        StatusFilter::All => "tasks> ".to_string(),
        only => format!("tasks [{}]> ", only),
    }
}

/// Line-oriented [`Ui`] over any reader/writer pair
pub struct TerminalUi<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl TerminalUi<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(color: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), color)
    }
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self { input, output, color }
    }

    /// Print `prompt` and read one line. `None` on end of input.
    ///
    /// Bytes that are not valid UTF-8 become U+FFFD instead of failing the read.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = line {
            warn!("Replaced invalid UTF-8 in input line");
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead, W: Write> Ui for TerminalUi<R, W> {
    fn ask_description(&mut self, title: &str, initial: Option<&str>) -> io::Result<Option<String>> {
        writeln!(self.output, "{}", title)?;
        if let Some(initial) = initial {
            writeln!(self.output, "  current: {}", initial)?;
        }
        self.read_line("Enter task description (blank to cancel): ")
    }

    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.read_line(&format!("{} [y/N] ", question))?;
        Ok(matches!(answer.as_deref().map(str::trim), Some("y" | "Y" | "yes" | "Yes" | "YES")))
    }

    fn choose_status(&mut self, current: TaskStatus) -> io::Result<Option<TaskStatus>> {
        writeln!(self.output, "Select status:")?;
        for (index, status) in TaskStatus::ALL.iter().enumerate() {
            let marker = if *status == current { '*' } else { ' ' };
            writeln!(self.output, " {} {}) {}", marker, index + 1, status)?;
        }

        let Some(answer) = self.read_line("Status [1-3, blank to cancel]: ")? else {
            return Ok(None);
        };
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }

        let choice = match answer.parse::<usize>() {
            Ok(n) => n.checked_sub(1).and_then(|i| TaskStatus::ALL.get(i).copied()),
            Err(_) => answer.parse().ok(),
        };
        if choice.is_none() {
            self.warn(&format!("'{}' is not one of the listed statuses.", answer))?;
        }
        Ok(choice)
    }

    fn warn(&mut self, message: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.output, "{}", message.yellow())
        } else {
            writeln!(self.output, "warning: {}", message)
        }
    }

    fn show(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    fn render(&mut self, view: FilterView<'_>, selected: Option<&str>) -> io::Result<()> {
        writeln!(self.output)?;
        view::render(&mut self.output, view, selected, self.color)
    }
}

/// Run the read-dispatch-render loop until `quit` or end of input
pub fn run<R: BufRead, W: Write>(store: Store, ui: TerminalUi<R, W>) -> io::Result<Store> {
    info!(file = ?store.path(), "Starting interactive session");

    let mut app = App::new(store, ui);
    app.ui_mut().show("Task Tracker - type 'help' for commands")?;
    app.refresh()?;

    loop {
        let prompt = prompt_for(app.filter());
        let Some(line) = app.ui_mut().read_line(&prompt)? else {
            break;
        };

        match Command::parse(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => {
                if app.dispatch(command)? == Flow::Quit {
                    break;
                }
            }
            Err(e) => app.ui_mut().warn(&e.to_string())?,
        }
    }

    info!("Session ended");
    Ok(app.into_store())
}
