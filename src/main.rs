use clap::{ArgAction, Parser, Subcommand};
use eyre::{Context, Result};
use std::io;
use std::path::PathBuf;
use tasktracker::app::Ui;
use tasktracker::shell::{self, TerminalUi};
use tasktracker::{Config, StatusFilter, Store, TaskStatus, view};
use tracing::Level;

#[derive(Parser)]
#[command(name = "tasktracker")]
#[command(about = "TaskTracker - a personal task list backed by a JSON file")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Task document (default: tasks.json, or data-file from the config)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Config file (default: <config dir>/tasktracker/tasktracker.yml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (default)
    Shell,

    /// Add a task
    Add {
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// List tasks
    List {
        /// all, todo, in-progress or done
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,
    },

    /// Change a task's description
    Edit {
        /// Task id or unique id prefix
        id: String,
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Set a task's status (todo, in-progress, done)
    Status {
        /// Task id or unique id prefix
        id: String,
        status: String,
    },

    /// Delete a task
    Delete {
        /// Task id or unique id prefix
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    // Setup tracing
    let level = match cli.verbose {
        0 => config.log_level()?,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let color = config.color && !cli.no_color;
    if !color {
        colored::control::set_override(false);
    }

    let data_file = cli.file.unwrap_or(config.data_file);
    let mut store = Store::open(&data_file);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            shell::run(store, TerminalUi::stdio(color)).context("Terminal session failed")?;
        }
        Commands::Add { description } => {
            let task = store.create(&description.join(" "))?;
            println!("Added {}", short_id(&task.id));
            print_list(&store, StatusFilter::All, color)?;
        }
        Commands::List { status } => {
            print_list(&store, status, color)?;
        }
        Commands::Edit { id, description } => {
            let id = store.resolve(&id)?.id.clone();
            if store.update_description(&id, &description.join(" "))?.is_none() {
                println!("Description unchanged");
            }
            print_list(&store, StatusFilter::All, color)?;
        }
        Commands::Status { id, status } => {
            let id = store.resolve(&id)?.id.clone();
            let status: TaskStatus = status.parse()?;
            store.set_status(&id, status)?;
            print_list(&store, StatusFilter::All, color)?;
        }
        Commands::Delete { id, yes } => {
            let task = store.resolve(&id)?.clone();
            let confirmed =
                yes || TerminalUi::stdio(color).confirm(&format!("Delete '{}'?", task.description))?;
            if !confirmed {
                println!("Nothing deleted");
                return Ok(());
            }
            store.delete(&task.id)?;
            print_list(&store, StatusFilter::All, color)?;
        }
    }

    Ok(())
}

fn print_list(store: &Store, filter: StatusFilter, color: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    view::render(&mut stdout, store.filter(filter), None, color)?;
    Ok(())
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
