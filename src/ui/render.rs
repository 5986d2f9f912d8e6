use crate::model::Task;
use crate::ui::wrap::{self, DisplayLine};
use chrono::{Local, NaiveDate};
use ratatui::prelude::Color;

pub const WIDTH: u16 = 120;
pub const HEIGHT: u16 = 24;
pub const TEXT_START: usize = 10;
pub const TEXT_WIDTH: usize = WIDTH as usize - TEXT_START;
pub const TASK_START: u16 = 3;
pub const TASK_END: u16 = HEIGHT - 4;
pub const VIEWPORT_ROWS: usize = (TASK_END - TASK_START + 1) as usize;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
const CARET: &str = "_";
const MARKER: &str = "▶ ";
const RULE: &str = "─";
const EMPTY_HINT: &str = "  (No tasks – press 'a' to add one)";
const COMPOSER_PREFIX: &str = "      [+] ";

const BROWSE_HINTS: &[(&str, &str)] = &[
    ("↑↓", "navigate"),
    ("Enter", "toggle"),
    ("a", "add"),
    ("d", "delete"),
    ("e", "edit"),
    ("t", "timestamps"),
    ("Shift+↑↓", "move"),
    ("q", "quit"),
];
const COMPOSE_HINTS: &[(&str, &str)] = &[("Enter", "confirm"), ("Esc", "cancel")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Accent,
    Success,
    Warning,
    Error,
    Default,
    Neutral,
}

impl Tone {
    pub fn color(self) -> Color {
        match self {
            Tone::Accent => Color::Cyan,
            Tone::Success => Color::Green,
            Tone::Warning => Color::Yellow,
            Tone::Error => Color::Red,
            Tone::Default => Color::White,
            Tone::Neutral => Color::Gray,
        }
    }
}

/// One run of same-colored text at a grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub col: u16,
    pub row: u16,
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay<'a> {
    None,
    Adding { buffer: &'a str },
    Editing { buffer: &'a str },
}

/// Everything one frame is drawn from. Built fresh for every frame.
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    pub view: &'a [Task],
    pub cursor: usize,
    pub scroll: usize,
    pub show_timestamps: bool,
    pub done: usize,
    pub remaining: usize,
    pub today: NaiveDate,
    pub overlay: Overlay<'a>,
}

#[derive(Default)]
struct Canvas {
    fragments: Vec<Fragment>,
}

impl Canvas {
    fn put(&mut self, col: u16, row: u16, text: impl Into<String>, tone: Tone) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.fragments.push(Fragment {
            col,
            row,
            text,
            tone,
        });
    }

    fn rule(&mut self, row: u16) {
        self.put(0, row, RULE.repeat(WIDTH as usize), Tone::Neutral);
    }

    fn legend(&mut self, row: u16, pairs: &[(&str, &str)]) {
        let mut col = 2u16;
        for (idx, (key, label)) in pairs.iter().enumerate() {
            if idx > 0 {
                self.put(col, row, " │ ", Tone::Neutral);
                col += 3;
            }
            self.put(col, row, *key, Tone::Warning);
            col += wrap::width(key) as u16;
            self.put(col, row, format!(" {}", label), Tone::Default);
            col += 1 + wrap::width(label) as u16;
        }
    }
}

pub fn timestamp_suffix(task: &Task, show_timestamps: bool) -> String {
    if !show_timestamps {
        return String::new();
    }
    format!(
        "  {}",
        task.created_at.with_timezone(&Local).format(TIMESTAMP_FORMAT)
    )
}

pub fn item_lines(task: &Task, show_timestamps: bool) -> Vec<DisplayLine> {
    wrap::display_lines(
        &task.text,
        &timestamp_suffix(task, show_timestamps),
        TEXT_WIDTH,
    )
}

/// Live composer text, wrapped one column short so the caret always fits.
pub fn composer_lines(buffer: &str) -> Vec<DisplayLine> {
    let mut lines = wrap::display_lines(buffer, "", TEXT_WIDTH - 1);
    if let Some(last) = lines.last_mut() {
        last.content.push_str(CARET);
    }
    lines
}

pub fn render(scene: &Scene<'_>) -> Vec<Fragment> {
    let mut canvas = Canvas::default();
    header(&mut canvas, scene);

    match scene.overlay {
        Overlay::Adding { buffer } => {
            let next = task_rows(&mut canvas, scene, None);
            block(
                &mut canvas,
                next.min(TASK_END),
                COMPOSER_PREFIX,
                &composer_lines(buffer),
                Tone::Accent,
            );
        }
        _ if scene.view.is_empty() => canvas.put(0, TASK_START, EMPTY_HINT, Tone::Default),
        _ => {
            task_rows(&mut canvas, scene, Some(scene.cursor));
        }
    }

    canvas.rule(HEIGHT - 3);
    let hints = match scene.overlay {
        Overlay::None => BROWSE_HINTS,
        _ => COMPOSE_HINTS,
    };
    canvas.legend(HEIGHT - 2, hints);
    canvas.fragments
}

pub fn render_saved() -> Vec<Fragment> {
    let mut canvas = Canvas::default();
    canvas.put(0, 0, "✔ Saved.", Tone::Success);
    canvas.fragments
}

pub fn render_error(message: &str) -> Vec<Fragment> {
    let mut canvas = Canvas::default();
    canvas.put(0, 0, format!(" Error: {}", message), Tone::Error);
    canvas.put(0, 2, " Press any key to exit.", Tone::Warning);
    canvas.fragments
}

fn header(canvas: &mut Canvas, scene: &Scene<'_>) {
    let right = format!(
        "{} done · {} remaining · {}",
        scene.done,
        scene.remaining,
        scene.today.format("%Y-%m-%d")
    );
    canvas.put(0, 1, " Todo", Tone::Accent);
    let col = (WIDTH as usize).saturating_sub(wrap::width(&right) + 1);
    canvas.put(col as u16, 1, right, Tone::Default);
    canvas.rule(2);
}

/// Draws items from the scroll offset down until the task area is full.
/// Returns the first row left free.
fn task_rows(canvas: &mut Canvas, scene: &Scene<'_>, active: Option<usize>) -> u16 {
    let mut row = TASK_START;
    for (idx, task) in scene.view.iter().enumerate().skip(scene.scroll) {
        if row > TASK_END {
            break;
        }
        let ordinal = format!("{:>2}. ", idx + 1);
        let is_active = active == Some(idx);
        let marker = if is_active { MARKER } else { "  " };
        let height = match scene.overlay {
            Overlay::Editing { buffer } if is_active => block(
                canvas,
                row,
                &format!("{}{}[e] ", marker, ordinal),
                &composer_lines(buffer),
                Tone::Accent,
            ),
            _ => {
                let checkbox = if task.done { "[x] " } else { "[ ] " };
                let tone = if task.done { Tone::Success } else { Tone::Default };
                block(
                    canvas,
                    row,
                    &format!("{}{}{}", marker, ordinal, checkbox),
                    &item_lines(task, scene.show_timestamps),
                    tone,
                )
            }
        };
        row += height as u16;
    }
    row
}

/// First line behind `prefix`, the rest indented to the text column.
/// Rows past the task area are dropped. Returns the block's full height.
fn block(
    canvas: &mut Canvas,
    row: u16,
    prefix: &str,
    lines: &[DisplayLine],
    tone: Tone,
) -> usize {
    let indent = " ".repeat(TEXT_START);
    for (offset, line) in lines.iter().enumerate() {
        let target = row + offset as u16;
        if target > TASK_END {
            break;
        }
        let lead = if line.continuation { indent.as_str() } else { prefix };
        canvas.put(0, target, format!("{}{}", lead, line.content), tone);
    }
    lines.len()
}
