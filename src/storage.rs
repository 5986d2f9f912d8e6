use crate::model::{Task, TaskList};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const TASKS_FILE: &str = "tasks.yml";
const DELETED_FILE: &str = "deleted.yml";

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("could not locate a data directory")]
    NoDataDir,
    #[error("reading {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("serializing tasks: {0}")]
    Serialize(#[from] serde_yaml::Error),
    #[error("writing {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where the list UI sends its writes. Both calls must report failure so the
/// session can stop instead of silently losing data.
pub trait TaskStore {
    fn save(&mut self, tasks: &TaskList) -> Result<(), StorageError>;
    fn append_deleted(&mut self, task: &Task) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
pub struct YamlStore {
    path: PathBuf,
    deleted_path: PathBuf,
}

impl YamlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let deleted_path = path.with_file_name(DELETED_FILE);
        YamlStore { path, deleted_path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<TaskList, StorageError> {
        let tasks = read_tasks(&self.path)?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(TaskList::new(tasks))
    }

    pub fn load_deleted(&self) -> Result<Vec<Task>, StorageError> {
        read_tasks(&self.deleted_path)
    }
}

impl TaskStore for YamlStore {
    fn save(&mut self, tasks: &TaskList) -> Result<(), StorageError> {
        write_tasks(&self.path, tasks.all())?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    fn append_deleted(&mut self, task: &Task) -> Result<(), StorageError> {
        let mut deleted = read_tasks(&self.deleted_path)?;
        deleted.push(task.clone());
        write_tasks(&self.deleted_path, &deleted)?;
        tracing::debug!(id = task.id, "logged deleted task");
        Ok(())
    }
}

pub fn default_data_dir() -> Result<PathBuf, StorageError> {
    let dirs = ProjectDirs::from("", "", "todo").ok_or(StorageError::NoDataDir)?;
    Ok(dirs.data_dir().to_path_buf())
}

pub fn default_tasks_path() -> Result<PathBuf, StorageError> {
    Ok(default_data_dir()?.join(TASKS_FILE))
}

fn read_tasks(path: &Path) -> Result<Vec<Task>, StorageError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(&data).map_err(|source| StorageError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_tasks(path: &Path, tasks: &[Task]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let serialized = serde_yaml::to_string(tasks)?;
    fs::write(path, serialized).map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_in(dir: &tempfile::TempDir) -> YamlStore {
        YamlStore::new(dir.path().join("nested").join(TASKS_FILE))
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let list = store_in(&dir).load().unwrap();
        assert!(list.all().is_empty());
    }

    #[test]
    fn save_then_load_keeps_fields_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let mut list = TaskList::default();
        list.add("buy milk");
        list.add("call mom");
        list.add("water plants");
        list.toggle_done(1);
        store.save(&list).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.all(), list.all());
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let mut list = TaskList::default();
        list.add("old");
        store.save(&list).unwrap();
        list.delete(0);
        list.add("new");
        store.save(&list).unwrap();

        let loaded = store.load().unwrap();
        let texts: Vec<&str> = loaded.all().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["new"]);
    }

    #[test]
    fn deleted_log_appends() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.append_deleted(&Task::new(1, "first")).unwrap();
        store.append_deleted(&Task::new(2, "second")).unwrap();
        let deleted: Vec<String> = store
            .load_deleted()
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(deleted, vec!["first", "second"]);
    }

    #[test]
    fn garbage_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TASKS_FILE);
        fs::write(&path, "{ not: [valid").unwrap();
        let err = YamlStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }));
    }

    #[test]
    fn unwritable_location_reports_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let mut store = YamlStore::new(blocker.join(TASKS_FILE));
        let err = store.save(&TaskList::default()).unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
    }
}
