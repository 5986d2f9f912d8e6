use anyhow::{anyhow, Context, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TODO_LOG";
const LOG_FILE: &str = "todo.log";

/// Sends tracing output to `<dir>/todo.log` when `TODO_LOG` holds a filter.
/// The terminal is never written to, so the list screen stays intact.
pub fn init(dir: &Path) -> Result<()> {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return Ok(());
    };
    fs::create_dir_all(dir).with_context(|| format!("creating {:?}", dir))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {:?}", path))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("installing logger: {}", err))?;
    tracing::debug!(path = %path.display(), "logging started");
    Ok(())
}
