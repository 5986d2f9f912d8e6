mod cli;
mod commands;
mod logging;
mod model;
mod repl;
mod storage;
mod ui;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logging::init(&log_dir(args.file.as_ref())?)?;
    let command = args.command.unwrap_or(cli::Command::Shell);
    tracing::debug!(?command, "starting");
    match command {
        cli::Command::Add { text } => commands::add(args.file, text),
        cli::Command::List { all } => commands::list(args.file, all),
        cli::Command::Deleted => commands::deleted(args.file),
        cli::Command::Shell => commands::shell(args.file),
    }
}

fn log_dir(file: Option<&PathBuf>) -> Result<PathBuf> {
    match file.and_then(|f| f.parent()) {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
        Some(_) => Ok(PathBuf::from(".")),
        None => Ok(storage::default_data_dir()?),
    }
}
