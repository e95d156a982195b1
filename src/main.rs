//! bricks-gallery - an interactive showcase for the bricks
//!
//! Usage: `bricks-gallery [DATASET]` where DATASET is a `.csv` or `.json`
//! file with an `id` column. Without one, the configured `data_path` or the
//! built-in members are shown.

mod app;
mod gallery;
mod tui;

use crate::app::App;
use crate::tui::Tui;
use anyhow::{Context, Result};
use bricks::config::Config;
use bricks::model::Dataset;
use bricks::{logging, Action, Component, Theme};
use crossterm::event::Event;
use std::path::PathBuf;
use std::time::Duration;

fn main() -> Result<()> {
    let config = Config::load().unwrap_or_default();
    let log_path = logging::init(&config.log_level)?;
    tracing::info!(log = ?log_path, "starting gallery");

    let theme = Theme::load().context("loading theme.yaml")?;
    let data_path = std::env::args()
        .nth(1)
        .or_else(|| config.data_path.clone())
        .map(PathBuf::from);
    let dataset = match data_path {
        Some(path) => Some(
            Dataset::load(&path).with_context(|| format!("loading {}", path.display()))?,
        ),
        None => None,
    };

    let mut app = App::new(config, theme, dataset)?;
    app.init()?;

    // Setup terminal; ticks drive the sidebar's close delay
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(50));
    tui.enter()?;

    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        tracing::error!("gallery failed: {:#}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(err) = app.draw(frame, frame.area()) {
                tracing::error!("draw failed: {:#}", err);
            }
        })?;

        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Mouse(mouse)) => app.handle_mouse_event(mouse)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            _ => None,
        };
        if let Some(action) = &action {
            tracing::trace!(%action, "dispatch");
        }
        dispatch(app, action)?;

        // Timers are checked on every pass, not only when idle
        dispatch(app, Some(Action::Tick))?;
    }
    Ok(())
}

/// Process an action and any follow-up actions it produces
fn dispatch(app: &mut App, action: Option<Action>) -> Result<()> {
    let mut current = action;
    while let Some(action) = current {
        current = app.update(action)?;
    }
    Ok(())
}
