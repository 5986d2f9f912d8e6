use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Terminal todo list")]
pub struct Cli {
    /// Tasks file (defaults to the platform data directory)
    #[arg(long, global = true, env = "TODO_FILE")]
    pub file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a task
    Add {
        /// Task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Open the interactive list
    List {
        /// Include completed tasks
        #[arg(long)]
        all: bool,
    },
    /// Print tasks that were deleted before being completed
    Deleted,
    /// Start the interactive prompt
    Shell,
}
