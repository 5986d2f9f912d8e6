use crate::model::{Filter, Task, TaskId, TaskList};
use crate::storage::{StorageError, TaskStore};
use crate::ui::render::{self, Fragment, Overlay, Scene, VIEWPORT_ROWS};
use crate::ui::scroll::adjust_scroll;
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Key(KeyEvent),
    Resize,
    Closed,
}

/// What the driver should do after an input was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Redraw,
    Saved,
    Fatal(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Browse,
    Adding(Composer),
    Editing { task_id: TaskId, composer: Composer },
}

#[derive(Debug, Clone, Copy)]
enum Shift {
    Up,
    Down,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Composer {
    buffer: String,
}

impl Composer {
    fn new(text: &str) -> Self {
        Composer {
            buffer: text.to_string(),
        }
    }

    fn insert_char(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    fn backspace(&mut self) {
        self.buffer.pop();
    }
}

impl Mode {
    fn composer_mut(&mut self) -> Option<&mut Composer> {
        match self {
            Mode::Browse => None,
            Mode::Adding(composer) | Mode::Editing { composer, .. } => Some(composer),
        }
    }
}

/// Interactive list session. Owns the cursor, scroll offset and mode, and
/// holds the task list and store for as long as the screen is open.
pub struct App<'a> {
    tasks: &'a mut TaskList,
    store: &'a mut dyn TaskStore,
    filter: Filter,
    cursor: usize,
    scroll: usize,
    show_timestamps: bool,
    mode: Mode,
}

impl<'a> App<'a> {
    pub fn new(tasks: &'a mut TaskList, store: &'a mut dyn TaskStore, filter: Filter) -> Self {
        let mut app = App {
            tasks,
            store,
            filter,
            cursor: 0,
            scroll: 0,
            show_timestamps: false,
            mode: Mode::Browse,
        };
        app.reconcile();
        app
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[cfg(test)]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    #[cfg(test)]
    pub fn show_timestamps(&self) -> bool {
        self.show_timestamps
    }

    #[cfg(test)]
    pub fn is_composing(&self) -> bool {
        self.mode != Mode::Browse
    }

    pub fn view(&self) -> Vec<Task> {
        self.tasks.view(self.filter)
    }

    pub fn update(&mut self, input: Input) -> Step {
        let step = match input {
            Input::Closed => self.quit(),
            Input::Resize => Step::Redraw,
            Input::Key(key) => match self.mode {
                Mode::Browse => self.browse_key(key),
                Mode::Adding(_) | Mode::Editing { .. } => self.compose_key(key),
            },
        };
        self.reconcile();
        step
    }

    pub fn frame(&self) -> Vec<Fragment> {
        self.frame_on(Local::now().date_naive())
    }

    pub fn frame_on(&self, today: NaiveDate) -> Vec<Fragment> {
        let view = self.view();
        let (done, remaining) = self.tasks.counts();
        let overlay = match &self.mode {
            Mode::Browse => Overlay::None,
            Mode::Adding(composer) => Overlay::Adding {
                buffer: &composer.buffer,
            },
            Mode::Editing { composer, .. } => Overlay::Editing {
                buffer: &composer.buffer,
            },
        };
        render::render(&Scene {
            view: &view,
            cursor: self.cursor,
            scroll: self.scroll,
            show_timestamps: self.show_timestamps,
            done,
            remaining,
            today,
            overlay,
        })
    }

    fn browse_key(&mut self, key: KeyEvent) -> Step {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Up if shift => self.reorder(Shift::Up),
            KeyCode::Down if shift => self.reorder(Shift::Down),
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                Step::Redraw
            }
            KeyCode::Down => {
                if self.cursor + 1 < self.view().len() {
                    self.cursor += 1;
                }
                Step::Redraw
            }
            KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('s') if ctrl => match self.store.save(self.tasks) {
                Ok(()) => Step::Saved,
                Err(err) => fail(err),
            },
            KeyCode::Char(_) if ctrl => Step::Redraw,
            KeyCode::Char('a') => {
                tracing::debug!("composing new task");
                self.mode = Mode::Adding(Composer::default());
                Step::Redraw
            }
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('e') => {
                if let Some((_, task)) = self.selected() {
                    tracing::debug!(id = task.id, "editing task");
                    self.mode = Mode::Editing {
                        task_id: task.id,
                        composer: Composer::new(&task.text),
                    };
                }
                Step::Redraw
            }
            KeyCode::Char('t') => {
                self.show_timestamps = !self.show_timestamps;
                Step::Redraw
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            _ => Step::Redraw,
        }
    }

    fn compose_key(&mut self, key: KeyEvent) -> Step {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let mut mode = std::mem::replace(&mut self.mode, Mode::Browse);
        match key.code {
            KeyCode::Esc => {
                tracing::debug!("composer canceled");
                return Step::Redraw;
            }
            KeyCode::Enter => return self.submit(mode),
            KeyCode::Char('s') if ctrl => return self.submit(mode),
            _ => {}
        }
        if let Some(composer) = mode.composer_mut() {
            match key.code {
                KeyCode::Backspace => composer.backspace(),
                KeyCode::Char(c)
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    composer.insert_char(c)
                }
                _ => {}
            }
        }
        self.mode = mode;
        Step::Redraw
    }

    fn submit(&mut self, mode: Mode) -> Step {
        match mode {
            Mode::Browse => Step::Redraw,
            Mode::Adding(composer) => {
                let text = composer.buffer.trim();
                if text.is_empty() {
                    return Step::Redraw;
                }
                let task = self.tasks.add(text);
                tracing::info!(id = task.id, "added task");
                self.follow(task.id);
                self.persist()
            }
            Mode::Editing { task_id, composer } => {
                let text = composer.buffer.trim();
                if text.is_empty() {
                    return Step::Redraw;
                }
                let updated = self
                    .tasks
                    .position_of(task_id)
                    .map(|index| self.tasks.update_text(index, text))
                    .unwrap_or(false);
                if !updated {
                    return Step::Redraw;
                }
                tracing::info!(id = task_id, "updated task");
                self.persist()
            }
        }
    }

    fn toggle_selected(&mut self) -> Step {
        let Some((index, task)) = self.selected() else {
            return Step::Redraw;
        };
        if !self.tasks.toggle_done(index) {
            return Step::Redraw;
        }
        tracing::info!(id = task.id, done = !task.done, "toggled task");
        self.persist()
    }

    fn delete_selected(&mut self) -> Step {
        let Some((index, _)) = self.selected() else {
            return Step::Redraw;
        };
        let Some(removed) = self.tasks.delete(index) else {
            return Step::Redraw;
        };
        tracing::info!(id = removed.id, "deleted task");
        if !removed.done {
            if let Err(err) = self.store.append_deleted(&removed) {
                return fail(err);
            }
        }
        self.clamp_cursor();
        self.persist()
    }

    fn reorder(&mut self, direction: Shift) -> Step {
        let Some((index, task)) = self.selected() else {
            return Step::Redraw;
        };
        let moved = match direction {
            Shift::Up => self.tasks.move_up(index),
            Shift::Down => self.tasks.move_down(index),
        };
        if !moved {
            return Step::Redraw;
        }
        tracing::debug!(id = task.id, ?direction, "moved task");
        self.follow(task.id);
        self.persist()
    }

    fn quit(&mut self) -> Step {
        self.mode = Mode::Browse;
        match self.store.save(self.tasks) {
            Ok(()) => Step::Quit,
            Err(err) => fail(err),
        }
    }

    fn persist(&mut self) -> Step {
        match self.store.save(self.tasks) {
            Ok(()) => Step::Redraw,
            Err(err) => fail(err),
        }
    }

    /// The task under the cursor with its index in the full list.
    fn selected(&self) -> Option<(usize, Task)> {
        let task = self.view().into_iter().nth(self.cursor)?;
        let index = self.tasks.position_of(task.id)?;
        Some((index, task))
    }

    fn follow(&mut self, id: TaskId) {
        if let Some(pos) = self.view().iter().position(|t| t.id == id) {
            self.cursor = pos;
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.view().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    fn reconcile(&mut self) {
        self.clamp_cursor();
        let view = self.view();
        let mut heights: Vec<usize> = view
            .iter()
            .map(|task| render::item_lines(task, self.show_timestamps).len())
            .collect();
        let cursor = match &self.mode {
            Mode::Browse => self.cursor,
            // the composer row stands in for the cursor while adding
            Mode::Adding(composer) => {
                heights.push(render::composer_lines(&composer.buffer).len());
                heights.len() - 1
            }
            Mode::Editing { composer, .. } => {
                if let Some(height) = heights.get_mut(self.cursor) {
                    *height = render::composer_lines(&composer.buffer).len();
                }
                self.cursor
            }
        };
        self.scroll = adjust_scroll(&heights, cursor, self.scroll, VIEWPORT_ROWS);
    }
}

fn fail(err: StorageError) -> Step {
    tracing::error!(%err, "persisting tasks failed");
    Step::Fatal(err.to_string())
}
