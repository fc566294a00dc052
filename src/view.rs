// Text rendering of a filter view

use crate::filter::FilterView;
use crate::task::TaskStatus;
use colored::Colorize;
use std::io::{self, Write};

const DESCRIPTION_HEADER: &str = "Description";

/// Write the view as a numbered table, marking the selected task with `>`
pub fn render<W: Write>(out: &mut W, view: FilterView<'_>, selected: Option<&str>, color: bool) -> io::Result<()> {
    let title = format!("Tasks ({})", view.filter());
    if color {
        writeln!(out, "{}", title.bold())?;
    } else {
        writeln!(out, "{}", title)?;
    }

    if view.is_empty() {
        writeln!(out, "  No tasks.")?;
        return Ok(());
    }

    let width = view
        .iter()
        .map(|t| t.description.chars().count())
        .max()
        .unwrap_or(0)
        .max(DESCRIPTION_HEADER.len());
    let rows = view.len().to_string().len().max(1);

    writeln!(out, "  {:>rows$}  {:<width$}  Status", "#", DESCRIPTION_HEADER)?;
    for (index, task) in view.iter().enumerate() {
        let marker = if selected == Some(task.id.as_str()) { '>' } else { ' ' };
        writeln!(
            out,
            "{} {:>rows$}  {:<width$}  {}",
            marker,
            index + 1,
            task.description,
            paint(task.status, color)
        )?;
    }

    Ok(())
}

fn paint(status: TaskStatus, color: bool) -> String {
    if !color {
        return status.to_string();
    }
    match status {
        TaskStatus::Todo => status.as_str().truecolor(227, 98, 9).to_string(),
        TaskStatus::InProgress => status.as_str().yellow().to_string(),
        TaskStatus::Done => status.as_str().green().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::StatusFilter;
    use crate::task::Task;

    fn rendered(tasks: &[Task], filter: StatusFilter, selected: Option<&str>) -> String {
        let mut out = Vec::new();
        render(&mut out, FilterView::new(tasks, filter), selected, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_rows_and_selection() {
        let mut done = Task::new("Write spec");
        done.status = TaskStatus::Done;
        let todo = Task::new("Review PR");
        let tasks = vec![done.clone(), todo];

        let text = rendered(&tasks, StatusFilter::All, Some(&done.id));
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Tasks (all)");
        assert_eq!(lines[1], "  #  Description  Status");
        assert_eq!(lines[2], "> 1  Write spec   done");
        assert_eq!(lines[3], "  2  Review PR    todo");
    }

    #[test]
    fn test_render_empty_view() {
        let tasks = vec![Task::new("a")];
        let text = rendered(&tasks, StatusFilter::Only(TaskStatus::Done), None);
        assert_eq!(text, "Tasks (done)\n  No tasks.\n");
    }
}
