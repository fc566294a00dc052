// Commands accepted by the interactive session

use crate::filter::StatusFilter;
use std::num::NonZeroUsize;

/// One user action
///
/// The first five map to exactly one store operation (or a filter change)
/// followed by a re-render. The rest only drive the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a task, prompting for the description when none is given
    AddTask(Option<String>),
    /// Edit the selected task's description
    UpdateDescription(Option<String>),
    /// Delete the selected task after confirmation
    DeleteTask,
    /// Change the selected task's status, prompting when none is given
    SetStatus(Option<String>),
    /// Change which statuses are listed
    SetFilter(StatusFilter),
    /// Select a task by its 1-based row in the current view
    Select(NonZeroUsize),
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("invalid row '{0}' (expected a number from the list)")]
    InvalidRow(String),

    #[error("invalid filter '{0}' (expected all, todo, in-progress or done)")]
    InvalidFilter(String),
}

pub const HELP: &str = "\
Commands:
  add [text]          add a task (prompts when text is omitted)
  select <n>          select the task on row n
  edit [text]         change the selected task's description
  status [value]      set the selected task's status (todo, in-progress, done)
  delete              delete the selected task
  filter <value>      show all, todo, in-progress or done tasks
  list                redraw the list
  help                show this help
  quit                leave";

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        let command = match word.to_ascii_lowercase().as_str() {
            "add" | "a" => Command::AddTask(arg),
            "edit" | "update" | "e" => Command::UpdateDescription(arg),
            "delete" | "del" | "rm" => Command::DeleteTask,
            "status" | "s" => Command::SetStatus(arg),
            "filter" | "f" => {
                let value = arg.ok_or(ParseError::MissingArgument("filter"))?;
                let filter = value.parse().map_err(|_| ParseError::InvalidFilter(value))?;
                Command::SetFilter(filter)
            }
            "select" | "sel" => {
                let value = arg.ok_or(ParseError::MissingArgument("select"))?;
                let row = value.parse().map_err(|_| ParseError::InvalidRow(value))?;
                Command::Select(row)
            }
            "list" | "ls" => Command::List,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            // A bare number selects that row
            other => match other.parse() {
                Ok(row) if rest.is_empty() => Command::Select(row),
                _ => return Err(ParseError::Unknown(word.to_string())),
            },
        };

        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;

    fn row(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn test_add_with_and_without_text() {
        assert_eq!(Command::parse("add"), Ok(Some(Command::AddTask(None))));
        assert_eq!(
            Command::parse("add  Buy milk and eggs "),
            Ok(Some(Command::AddTask(Some("Buy milk and eggs".to_string()))))
        );
    }

    #[test]
    fn test_status_and_filter() {
        assert_eq!(
            Command::parse("status done"),
            Ok(Some(Command::SetStatus(Some("done".to_string()))))
        );
        assert_eq!(Command::parse("status"), Ok(Some(Command::SetStatus(None))));
        assert_eq!(
            Command::parse("filter in-progress"),
            Ok(Some(Command::SetFilter(StatusFilter::Only(TaskStatus::InProgress))))
        );
        assert_eq!(Command::parse("filter all"), Ok(Some(Command::SetFilter(StatusFilter::All))));
        assert_eq!(
            Command::parse("filter later"),
            Err(ParseError::InvalidFilter("later".to_string()))
        );
        assert_eq!(Command::parse("filter"), Err(ParseError::MissingArgument("filter")));
    }

    #[test]
    fn test_select() {
        assert_eq!(Command::parse("select 2"), Ok(Some(Command::Select(row(2)))));
        assert_eq!(Command::parse("3"), Ok(Some(Command::Select(row(3)))));
        assert_eq!(Command::parse("select 0"), Err(ParseError::InvalidRow("0".to_string())));
        assert_eq!(Command::parse("select x"), Err(ParseError::InvalidRow("x".to_string())));
    }

    #[test]
    fn test_session_commands() {
        assert_eq!(Command::parse("DELETE"), Ok(Some(Command::DeleteTask)));
        assert_eq!(Command::parse("ls"), Ok(Some(Command::List)));
        assert_eq!(Command::parse("help"), Ok(Some(Command::Help)));
        assert_eq!(Command::parse("q"), Ok(Some(Command::Quit)));
        assert_eq!(Command::parse("frobnicate"), Err(ParseError::Unknown("frobnicate".to_string())));
    }
}
