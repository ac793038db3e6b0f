use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "todo", about = concat!("todo v", env!("CARGO_PKG_VERSION"), " - a personal to-do list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Task file to use (default: [storage] file from todo.toml, or tasks.json)
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,

    /// Config file to use instead of ./todo.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the full-screen form UI (the default)
    Ui,
    /// Run the numbered terminal menu
    Menu,
    /// List tasks
    List(ListArgs),
    /// Add a task and save
    Add(AddArgs),
    /// Mark a task completed and save
    Done(PositionArgs),
    /// Delete a task and save
    Rm(PositionArgs),
    /// List distinct categories
    Categories,
}

#[derive(Args)]
pub struct ListArgs {
    /// All, Completed, Pending, or a category name (exact match)
    #[arg(long, default_value = "All")]
    pub filter: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Task category, e.g. Work or Personal
    #[arg(short, long)]
    pub category: String,
    /// Longer description
    #[arg(short, long, default_value = "")]
    pub description: String,
}

#[derive(Args)]
pub struct PositionArgs {
    /// Task number as shown by `todo list` (1-based)
    #[arg(allow_hyphen_values = true)]
    pub number: String,
}
