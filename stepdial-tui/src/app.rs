//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. Each setting is a `Box<dyn Setting>` so integer
//! and float settings share one list.

use std::path::PathBuf;

use chrono::NaiveTime;
use stepdial_core::Setting;

/// What keys currently act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Selection, steppers, rescale.
    Normal,
    /// Typing into the selected setting's text field.
    EditText,
    /// Keyboard or mouse drag of the selected slider.
    Drag,
    /// Typing a new external value into the prompt overlay.
    EditExternal,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::EditText => "EDIT",
            Mode::Drag => "DRAG",
            Mode::EditExternal => "EXTERNAL",
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub at: NaiveTime,
}

/// Top-level application state.
pub struct AppState {
    pub settings: Vec<Box<dyn Setting>>,
    pub selected: usize,
    pub mode: Mode,
    pub running: bool,

    /// Setting index grabbed by a mouse press on its slider bar.
    pub mouse_drag: Option<usize>,
    /// Prompt buffer for the external value overlay.
    pub prompt_input: String,

    pub status_message: Option<StatusMessage>,
    pub values_path: PathBuf,
}

impl AppState {
    pub fn new(settings: Vec<Box<dyn Setting>>, values_path: PathBuf) -> Self {
        Self {
            settings,
            selected: 0,
            mode: Mode::Normal,
            running: true,
            mouse_drag: None,
            prompt_input: String::new(),
            status_message: None,
            values_path,
        }
    }

    pub fn current(&self) -> Option<&dyn Setting> {
        self.settings.get(self.selected).map(|s| s.as_ref())
    }

    pub fn current_mut(&mut self) -> Option<&mut (dyn Setting + 'static)> {
        self.settings.get_mut(self.selected).map(|s| s.as_mut())
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.settings.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.push_status(msg.into(), StatusLevel::Info);
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.push_status(msg.into(), StatusLevel::Warning);
    }

    /// Set an error status message.
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.push_status(msg.into(), StatusLevel::Error);
    }

    fn push_status(&mut self, text: String, level: StatusLevel) {
        self.status_message = Some(StatusMessage {
            text,
            level,
            at: chrono::Local::now().time(),
        });
    }
}
