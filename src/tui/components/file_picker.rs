//! # File Picker Component
//!
//! Full-screen overlay standing in for a native "open files" dialog. Opened
//! with Ctrl+O or the attach button, dismissed with Esc.
//!
//! Only directories and files with an accepted extension are listed. Space
//! toggles a file into the selection (or replaces it when `multiple` is off);
//! Enter descends into a directory or confirms. Cancelling produces no
//! selection at all.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FilePickerState` lives in `TuiState`
//! - `FilePicker` is created each frame with borrowed state

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::core::attach::PickerOptions;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Events emitted by the file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// File names (not paths) of the confirmed selection, in pick order.
    Confirm(Vec<String>),
    Cancel,
}

/// Persistent state for the file picker overlay.
pub struct FilePickerState {
    pub options: PickerOptions,
    pub dir: PathBuf,
    pub entries: Vec<PickerEntry>,
    pub chosen: Vec<PathBuf>,
    pub selected: usize,
    pub list_state: ListState,
    pub error: Option<String>,
}

impl FilePickerState {
    pub fn open(options: PickerOptions, dir: &Path) -> Self {
        let mut state = Self {
            options,
            dir: dir.to_path_buf(),
            entries: Vec::new(),
            chosen: Vec::new(),
            selected: 0,
            list_state: ListState::default(),
            error: None,
        };
        state.reload();
        state
    }

    /// Re-read the current directory.
    fn reload(&mut self) {
        match list_dir(&self.dir, &self.options) {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(e) => {
                warn!("Failed to list {}: {}", self.dir.display(), e);
                self.entries.clear();
                self.error = Some(e.to_string());
            }
        }
        self.selected = 0;
        self.list_state
            .select(if self.entries.is_empty() { None } else { Some(0) });
    }

    fn change_dir(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.reload();
    }

    fn toggle(&mut self, path: PathBuf) {
        if let Some(i) = self.chosen.iter().position(|p| *p == path) {
            self.chosen.remove(i);
        } else if self.options.multiple {
            self.chosen.push(path);
        } else {
            self.chosen = vec![path];
        }
    }

    pub fn is_chosen(&self, path: &Path) -> bool {
        self.chosen.iter().any(|p| p == path)
    }

    /// Handle a key event, returning a PickerEvent if the overlay should close.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<PickerEvent> {
        match event {
            TuiEvent::Escape => Some(PickerEvent::Cancel),
            TuiEvent::CursorUp => {
                if !self.entries.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.entries.is_empty() {
                    self.selected = (self.selected + 1).min(self.entries.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Backspace => {
                if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
                    self.change_dir(parent);
                }
                None
            }
            TuiEvent::InputChar(' ') => {
                if let Some(entry) = self.entries.get(self.selected)
                    && !entry.is_dir
                {
                    let path = entry.path.clone();
                    self.toggle(path);
                }
                None
            }
            TuiEvent::Enter => {
                let entry = self.entries.get(self.selected)?.clone();
                if entry.is_dir {
                    self.change_dir(entry.path);
                    return None;
                }
                let picked = if self.chosen.is_empty() {
                    vec![entry.path]
                } else {
                    std::mem::take(&mut self.chosen)
                };
                Some(PickerEvent::Confirm(file_names(&picked)))
            }
            _ => None,
        }
    }
}

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect()
}

/// Directories first, then accepted files, each group sorted by name.
/// Hidden entries are skipped; `..` leads when a parent exists.
fn list_dir(dir: &Path, options: &PickerOptions) -> std::io::Result<Vec<PickerEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for item in fs::read_dir(dir)? {
        let item = item?;
        let name = item.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = item.path();
        if path.is_dir() {
            dirs.push(PickerEntry {
                name,
                path,
                is_dir: true,
            });
        } else if options.accepts(&path) {
            files.push(PickerEntry {
                name,
                path,
                is_dir: false,
            });
        }
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let mut entries = Vec::with_capacity(dirs.len() + files.len() + 1);
    if let Some(parent) = dir.parent() {
        entries.push(PickerEntry {
            name: "..".to_string(),
            path: parent.to_path_buf(),
            is_dir: true,
        });
    }
    entries.extend(dirs);
    entries.extend(files);
    Ok(entries)
}

/// Transient render wrapper for the file picker overlay.
pub struct FilePicker<'a> {
    state: &'a mut FilePickerState,
}

impl<'a> FilePicker<'a> {
    pub fn new(state: &'a mut FilePickerState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 70, area);
        frame.render_widget(Clear, overlay);

        let help_text = if self.state.options.multiple {
            " Space Toggle  Enter Open/Attach  Bksp Up  Esc Cancel "
        } else {
            " Enter Open/Attach  Bksp Up  Esc Cancel "
        };
        let title = format!(
            " Attach files ({} selected) · {} ",
            self.state.chosen.len(),
            self.state.dir.display()
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if let Some(ref err) = self.state.error {
            let msg = Paragraph::new(format!("Cannot read directory:\n{err}"))
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(msg, overlay);
            return;
        }

        if self.state.entries.is_empty() {
            let empty = Paragraph::new("No matching files here.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .entries
            .iter()
            .map(|entry| {
                let line = if entry.is_dir {
                    Line::from(Span::styled(
                        format!("    ▸ {}/", entry.name),
                        Style::default().fg(Color::Blue),
                    ))
                } else {
                    let mark = if self.state.is_chosen(&entry.path) {
                        "[x]"
                    } else {
                        "[ ]"
                    };
                    Line::from(vec![
                        Span::styled(mark, Style::default().fg(Color::Cyan)),
                        Span::raw(format!(" {}", entry.name)),
                    ])
                };
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );

        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
