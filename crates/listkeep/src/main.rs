//! Command-line front end for the task and todo surfaces.
//!
//! Presentation only: parses intents, confirms deletions, and prints the
//! collection after each operation. All state logic lives in
//! `listkeep-client`.

#![deny(unsafe_code)]

use std::io::{self, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use listkeep_client::{HttpRemoteStore, TaskSync, TodoSync};
use listkeep_core::records::{Task, TaskDraft, TaskKind, Todo, TodoDraft, TodoKind};
use listkeep_settings::{load_settings, Settings};

#[derive(Parser)]
#[command(name = "listkeep", version, about = "CRUD client for the task/todo API")]
struct Cli {
    /// Override the API base URL from settings.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Work with tasks (title + description).
    Tasks {
        #[command(subcommand)]
        command: TaskCommand,
    },
    /// Work with todos (single text line).
    Todos {
        #[command(subcommand)]
        command: TodoCommand,
    },
}

#[derive(Subcommand)]
enum TaskCommand {
    /// List all tasks.
    List,
    /// Create a task.
    Add {
        /// Short summary line.
        title: String,
        /// Free-form description.
        description: String,
    },
    /// Edit a task in place.
    Edit {
        /// Id of the task to edit.
        id: i64,
        /// New title, if changing.
        #[arg(long)]
        title: Option<String>,
        /// New description, if changing.
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a task (asks for confirmation).
    Rm {
        /// Id of the task to delete.
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TodoCommand {
    /// List all todos.
    List,
    /// Create a todo.
    Add {
        /// The todo text.
        text: String,
    },
    /// Replace a todo's text.
    Edit {
        /// Id of the todo to edit.
        id: i64,
        /// The new text.
        text: String,
    },
    /// Delete a todo (asks for confirmation).
    Rm {
        /// Id of the todo to delete.
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings()?;
    if let Some(url) = cli.api_url {
        settings.api_url = url.trim_end_matches('/').to_string();
    }

    match cli.command {
        Command::Tasks { command } => run_tasks(command, &settings).await,
        Command::Todos { command } => run_todos(command, &settings).await,
    }
}

async fn run_tasks(command: TaskCommand, settings: &Settings) -> Result<()> {
    let mut tasks = TaskSync::new(HttpRemoteStore::<TaskKind>::new(settings));
    match command {
        TaskCommand::List => {
            tasks.refresh().await?;
            print_tasks(tasks.records());
        }
        TaskCommand::Add { title, description } => {
            tasks.create(&TaskDraft::new(title, description)).await?;
            print_tasks(tasks.records());
        }
        TaskCommand::Edit {
            id,
            title,
            description,
        } => {
            tasks.refresh().await?;
            anyhow::ensure!(tasks.begin_edit(id), "no task with id {id}");
            if let Some(draft) = tasks.draft_mut() {
                if let Some(title) = title {
                    draft.title = title;
                }
                if let Some(description) = description {
                    draft.description = description;
                }
            }
            tasks.commit().await?;
            print_tasks(tasks.records());
        }
        TaskCommand::Rm { id, yes } => {
            if !yes && !confirm(&format!("Delete task {id}?"))? {
                println!("aborted");
                return Ok(());
            }
            tasks.remove(id).await?;
            print_tasks(tasks.records());
        }
    }
    Ok(())
}

async fn run_todos(command: TodoCommand, settings: &Settings) -> Result<()> {
    let mut todos = TodoSync::new(HttpRemoteStore::<TodoKind>::new(settings));
    match command {
        TodoCommand::List => {
            todos.refresh().await?;
            print_todos(todos.records());
        }
        TodoCommand::Add { text } => {
            todos.create(&TodoDraft::new(text)).await?;
            print_todos(todos.records());
        }
        TodoCommand::Edit { id, text } => {
            todos.refresh().await?;
            anyhow::ensure!(todos.begin_edit(id), "no todo with id {id}");
            if let Some(buffer) = todos.buffer_mut(id) {
                buffer.text = text;
            }
            todos.commit(id).await?;
            print_todos(todos.records());
        }
        TodoCommand::Rm { id, yes } => {
            if !yes && !confirm(&format!("Delete todo {id}?"))? {
                println!("aborted");
                return Ok(());
            }
            todos.remove(id).await?;
            print_todos(todos.records());
        }
    }
    Ok(())
}

fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("no tasks");
        return;
    }
    for task in tasks {
        println!("{:>5}  {}  -  {}", task.id, task.title, task.description);
    }
}

fn print_todos(todos: &[Todo]) {
    if todos.is_empty() {
        println!("no todos");
        return;
    }
    for todo in todos {
        println!(
            "{:>5}  {}  (updated {})",
            todo.id,
            todo.text,
            todo.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
}

/// Yes/no prompt gating destructive operations. Defaults to no.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
