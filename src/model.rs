use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TaskId = u64;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    OpenOnly,
    All,
}

/// Ordered task collection. Every index taken here is a position in the full,
/// unfiltered list; out-of-range indexes leave the list untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: TaskId,
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Task {
            id,
            text: text.into(),
            done: false,
            created_at: Utc::now(),
        }
    }
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        TaskList { tasks, next_id }
    }

    pub fn add(&mut self, text: impl Into<String>) -> Task {
        let task = Task::new(self.next_id, text);
        self.next_id += 1;
        self.tasks.push(task.clone());
        task
    }

    pub fn delete(&mut self, index: usize) -> Option<Task> {
        if index >= self.tasks.len() {
            return None;
        }
        Some(self.tasks.remove(index))
    }

    pub fn toggle_done(&mut self, index: usize) -> bool {
        match self.tasks.get_mut(index) {
            Some(task) => {
                task.done = !task.done;
                true
            }
            None => false,
        }
    }

    pub fn update_text(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.tasks.get_mut(index) {
            Some(task) => {
                task.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.tasks.len() {
            return false;
        }
        self.tasks.swap(index - 1, index);
        true
    }

    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.tasks.len() {
            return false;
        }
        self.tasks.swap(index, index + 1);
        true
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn open(&self) -> Vec<Task> {
        self.tasks.iter().filter(|t| !t.done).cloned().collect()
    }

    pub fn view(&self, filter: Filter) -> Vec<Task> {
        match filter {
            Filter::OpenOnly => self.open(),
            Filter::All => self.tasks.clone(),
        }
    }

    pub fn position_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Returns `(done, remaining)` over the whole list.
    pub fn counts(&self) -> (usize, usize) {
        let done = self.tasks.iter().filter(|t| t.done).count();
        (done, self.tasks.len() - done)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(list: &TaskList) -> Vec<&str> {
        list.all().iter().map(|t| t.text.as_str()).collect()
    }

    fn abc() -> TaskList {
        let mut list = TaskList::default();
        list.add("a");
        list.add("b");
        list.add("c");
        list
    }

    #[test]
    fn add_assigns_increasing_ids_and_starts_open() {
        let mut list = TaskList::default();
        let first = list.add("buy milk");
        let second = list.add("call mom");
        assert!(second.id > first.id);
        assert!(!first.done);
        assert_eq!(texts(&list), vec!["buy milk", "call mom"]);
    }

    #[test]
    fn ids_continue_after_loaded_maximum() {
        let mut list = TaskList::new(vec![Task::new(7, "old"), Task::new(3, "older")]);
        assert_eq!(list.add("new").id, 8);
    }

    #[test]
    fn delete_returns_removed_task() {
        let mut list = abc();
        let removed = list.delete(1).map(|t| t.text);
        assert_eq!(removed.as_deref(), Some("b"));
        assert_eq!(texts(&list), vec!["a", "c"]);
        assert!(list.delete(5).is_none());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn toggle_flips_and_rejects_out_of_range() {
        let mut list = abc();
        assert!(list.toggle_done(0));
        assert!(list.all()[0].done);
        assert!(list.toggle_done(0));
        assert!(!list.all()[0].done);
        assert!(!list.toggle_done(3));
    }

    #[test]
    fn update_text_keeps_identity() {
        let mut list = abc();
        let id = list.all()[2].id;
        assert!(list.update_text(2, "see"));
        assert_eq!(list.all()[2].id, id);
        assert_eq!(list.all()[2].text, "see");
        assert!(!list.update_text(9, "nope"));
    }

    #[test]
    fn moves_swap_neighbours() {
        let mut list = abc();
        assert!(list.move_up(2));
        assert_eq!(texts(&list), vec!["a", "c", "b"]);
        assert!(list.move_down(0));
        assert_eq!(texts(&list), vec!["c", "a", "b"]);
    }

    #[test]
    fn moves_at_boundaries_are_rejected() {
        let mut list = abc();
        assert!(!list.move_up(0));
        assert!(!list.move_down(2));
        assert!(!list.move_down(10));
        assert_eq!(texts(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn open_view_skips_done_tasks() {
        let mut list = abc();
        list.toggle_done(0);
        let open: Vec<String> = list
            .view(Filter::OpenOnly)
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(open, vec!["b", "c"]);
        assert_eq!(list.view(Filter::All).len(), 3);
        assert_eq!(list.counts(), (1, 2));
    }
}
