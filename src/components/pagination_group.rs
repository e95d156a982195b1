//! PaginationGroup - page indicator, pagination controls and page size
//!
//! ```text
//! Page 3 of 12        « ‹ 1 … 2 3 4 5 … 12 › »        ┌10 / page ▾┐
//! ```

use super::items_per_page::{ItemsPerPageSelector, DEFAULT_OPTIONS};
use super::pagination::Pagination;
use super::text::{Text, TextColor};
use crate::action::Action;
use crate::component::Component;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

pub struct PaginationGroup {
    pagination: Pagination,
    /// Present only when page-size changes are offered
    selector: Option<ItemsPerPageSelector>,
    theme: Theme,
}

impl PaginationGroup {
    pub fn new(current_page: usize, total_pages: usize, theme: Theme) -> Self {
        Self {
            pagination: Pagination::new(current_page, total_pages, theme.clone()),
            selector: None,
            theme,
        }
    }

    /// Offer a page-size selector on the right
    pub fn with_items_per_page(mut self, items_per_page: usize, options: Vec<usize>) -> Self {
        self.selector = Some(ItemsPerPageSelector::new(
            items_per_page,
            options,
            self.theme.clone(),
        ));
        self
    }

    pub fn with_default_items_per_page(self) -> Self {
        self.with_items_per_page(DEFAULT_ITEMS_PER_PAGE, DEFAULT_OPTIONS.to_vec())
    }

    pub fn label(&self) -> String {
        format!(
            "Page {} of {}",
            self.pagination.current_page(),
            self.pagination.total_pages()
        )
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    pub fn items_per_page(&self) -> Option<usize> {
        self.selector.as_ref().map(|s| s.items_per_page())
    }

    pub fn is_selector_open(&self) -> bool {
        self.selector.as_ref().is_some_and(|s| s.is_open())
    }

    /// Sync with the table (or whatever owns the page state)
    pub fn set_state(&mut self, current_page: usize, total_pages: usize, items_per_page: usize) {
        self.pagination.set_pages(current_page, total_pages);
        if let Some(selector) = self.selector.as_mut() {
            selector.set_items_per_page(items_per_page);
        }
    }
}

impl Component for PaginationGroup {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(selector) = self.selector.as_mut() {
            if selector.is_open() || matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                return selector.handle_key_event(key);
            }
        }
        self.pagination.handle_key_event(key)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let Some(selector) = self.selector.as_mut() {
            if let Some(action) = selector.handle_mouse_event(mouse)? {
                return Ok(Some(action));
            }
        }
        self.pagination.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::GoToPage(_) => self.pagination.update(action),
            Action::OpenItemsPerPage
            | Action::CloseItemsPerPage
            | Action::SetItemsPerPage(_)
            | Action::OptionUp
            | Action::OptionDown => {
                match self.selector.as_mut() {
                    Some(selector) => selector.update(action),
                    None => Ok(None),
                }
            }
            _ => Ok(None),
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.pagination.set_focused(focused);
        if let Some(selector) = self.selector.as_mut() {
            selector.set_focused(focused);
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let label = self.label();
        let label_width = label.len() as u16 + 2;
        let selector_width = self.selector.as_ref().map_or(0, |s| s.width());

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(label_width),
                Constraint::Min(0),
                Constraint::Length(selector_width),
            ])
            .split(area);

        // Text and pagination sit on the selector's middle row
        let middle = |rect: Rect| {
            let y = rect.y + rect.height.saturating_sub(1) / 2;
            Rect::new(rect.x, y, rect.width, rect.height.min(1))
        };

        frame.render_widget(
            Text::new(label, &self.theme).color(TextColor::Gray),
            middle(chunks[0]),
        );
        self.pagination.draw(frame, middle(chunks[1]))?;
        if let Some(selector) = self.selector.as_mut() {
            selector.draw(frame, chunks[2])?;
        }
        Ok(())
    }
}
