use crate::model::{Filter, TaskList};
use crate::repl::{self, Line};
use crate::storage::{default_tasks_path, TaskStore, YamlStore};
use crate::ui;
use anyhow::{bail, Context, Result};
use chrono::Local;
use crossterm::style::Stylize;
use std::io::{self, Write};
use std::path::PathBuf;

pub fn add(file: Option<PathBuf>, words: Vec<String>) -> Result<()> {
    let (mut tasks, mut store) = load(file)?;
    let text = words.join(" ");
    if text.trim().is_empty() {
        bail!("task text is empty");
    }
    add_task(&mut tasks, &mut store, &text)
}

pub fn list(file: Option<PathBuf>, all: bool) -> Result<()> {
    let (mut tasks, mut store) = load(file)?;
    ui::run(&mut tasks, &mut store, filter_for(all))
}

pub fn deleted(file: Option<PathBuf>) -> Result<()> {
    let (_, store) = load(file)?;
    let deleted = store.load_deleted()?;
    if deleted.is_empty() {
        println!("(no deleted tasks)");
    }
    for task in deleted {
        println!(
            "  {:>3}  {}  {}",
            task.id,
            task.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            task.text
        );
    }
    Ok(())
}

pub fn shell(file: Option<PathBuf>) -> Result<()> {
    let (mut tasks, mut store) = load(file)?;
    println!("{}", "todo · add <text> | list | list all | exit".cyan());
    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        match repl::parse(&input) {
            Line::Add(text) if text.is_empty() => {
                println!("{}", "Please provide task text.".red());
            }
            Line::Add(text) => add_task(&mut tasks, &mut store, &text)?,
            Line::List => open_list(&mut tasks, &mut store, Filter::OpenOnly),
            Line::ListAll => open_list(&mut tasks, &mut store, Filter::All),
            Line::Exit => {
                println!("{}", "Goodbye.".cyan());
                break;
            }
            Line::Unknown(text) if text.is_empty() => {}
            Line::Unknown(text) => {
                println!("{}", format!("Unknown command: {}", text).red());
            }
        }
    }
    Ok(())
}

fn open_list(tasks: &mut TaskList, store: &mut YamlStore, filter: Filter) {
    if let Err(err) = ui::run(tasks, store, filter) {
        tracing::error!(%err, "list screen ended with an error");
        println!("{}", format!("Error: {:#}", err).red());
    }
}

fn add_task(tasks: &mut TaskList, store: &mut YamlStore, text: &str) -> Result<()> {
    let task = tasks.add(text.trim());
    store
        .save(tasks)
        .with_context(|| format!("saving {:?}", store.path()))?;
    tracing::info!(id = task.id, "added task from the command line");
    println!("{}", format!("✔ Added: {}", task.text).cyan());
    Ok(())
}

fn load(file: Option<PathBuf>) -> Result<(TaskList, YamlStore)> {
    let path = match file {
        Some(path) => path,
        None => default_tasks_path()?,
    };
    let store = YamlStore::new(path);
    let tasks = store
        .load()
        .with_context(|| format!("loading {:?}", store.path()))?;
    Ok((tasks, store))
}

fn filter_for(all: bool) -> Filter {
    if all {
        Filter::All
    } else {
        Filter::OpenOnly
    }
}
