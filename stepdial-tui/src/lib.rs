//! StepDial TUI: interactive settings panel.
//!
//! Each setting is drawn as:
//! - a text field holding the quantity's text (edits apply on commit)
//! - a slider bar with the slider range's bounds on either side
//! - the step size, step number, maximum range and external value
//!
//! Values persist as JSON between runs.

pub mod app;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;

pub use app::{AppState, Mode};
pub use theme::Theme;
