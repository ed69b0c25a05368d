//! StepDial TUI: settings panel with text fields, sliders and steppers.
//!
//! Usage: `stepdial [panel.toml]`. Without a panel file the built-in demo
//! panel is shown. Setting values are restored from and saved to
//! `<config_dir>/stepdial/values.json`; logs go to `stepdial.log` beside it.

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stepdial_core::PanelConfig;
use stepdial_tui::app::AppState;
use stepdial_tui::ui::ScreenLayout;
use stepdial_tui::{input, persistence, ui};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));

    // Paths
    let state_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stepdial");
    let values_path = state_dir.join("values.json");
    init_logging(&state_dir.join("stepdial.log"))?;

    // Panel
    let panel = match std::env::args_os().nth(1) {
        Some(path) => PanelConfig::load(Path::new(&path))
            .with_context(|| format!("loading panel {}", PathBuf::from(&path).display()))?,
        None => PanelConfig::default_panel(),
    };
    let settings = panel.build()?;
    info!(settings = settings.len(), "panel built");

    let mut app = AppState::new(settings, values_path.clone());

    // Apply persisted values
    let persisted = persistence::load(&values_path);
    let restored = persistence::apply(&mut app, &persisted);
    if restored > 0 {
        app.set_status(format!("Restored {restored} values"));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Save values before exit
    let values = persistence::extract(&app);
    if let Err(e) = persistence::save(&values_path, &values) {
        warn!(error = %e, "failed to save values on exit");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    input::handle_mouse(app, mouse, ScreenLayout::new(area).settings_inner());
                }
                _ => {}
            }
        }

        // 3. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Logs go to a file so they do not tear the alternate screen.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}
