//! Component trait - Interface for interactive bricks
//!
//! Stateful bricks (table, pagination, items-per-page selector, sidebar)
//! own their state, turn terminal events into Actions and render themselves.
//! Purely presentational bricks are plain ratatui widgets instead.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

/// Trait for interactive bricks
///
/// 1. `handle_key_event` / `handle_mouse_event` turn events into Actions
/// 2. `update` applies Actions to local state, optionally emitting a follow-up
/// 3. `draw` renders into the given area
///
/// Mouse events arrive in terminal coordinates; bricks hit-test against the
/// area they were last drawn into.
pub trait Component {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let _ = mouse;
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Whether this brick currently receives key events
    fn set_focused(&mut self, focused: bool) {
        let _ = focused;
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
