//! Pagination - first/previous/page numbers/next/last buttons
//!
//! Pages are 1-based here. The page window comes from
//! [`page_numbers`](crate::model::pages::page_numbers).

use crate::action::Action;
use crate::component::Component;
use crate::model::pages::{page_numbers, PageItem};
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// One clickable (or inert) slot in the pagination bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationButton {
    pub label: String,
    pub aria_label: String,
    /// Page this button goes to, `None` for ellipses
    pub target: Option<usize>,
    pub enabled: bool,
    pub active: bool,
}

impl PaginationButton {
    fn nav(label: &str, aria_label: &str, target: usize, enabled: bool) -> Self {
        Self {
            label: label.to_string(),
            aria_label: aria_label.to_string(),
            target: Some(target),
            enabled,
            active: false,
        }
    }

    fn width(&self) -> u16 {
        (self.label.width() + 2) as u16
    }
}

pub struct Pagination {
    current_page: usize,
    total_pages: usize,
    disabled: bool,
    focused: bool,
    theme: Theme,
    /// Button rectangles from the last draw, for mouse hit-testing
    hit_areas: Vec<(Rect, usize)>,
}

impl Pagination {
    pub fn new(current_page: usize, total_pages: usize, theme: Theme) -> Self {
        Self {
            current_page: current_page.max(1),
            total_pages: total_pages.max(1),
            disabled: false,
            focused: false,
            theme,
            hit_areas: Vec::new(),
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Sync with the owner's page state
    pub fn set_pages(&mut self, current_page: usize, total_pages: usize) {
        self.total_pages = total_pages.max(1);
        self.current_page = current_page.clamp(1, self.total_pages);
    }

    pub fn buttons(&self) -> Vec<PaginationButton> {
        let current = self.current_page;
        let total = self.total_pages;
        let enabled = !self.disabled;
        let at_first = current <= 1;
        let at_last = current >= total;

        let mut buttons = vec![
            PaginationButton::nav("«", "Go to first page", 1, enabled && !at_first),
            PaginationButton::nav(
                "‹",
                "Go to previous page",
                current.saturating_sub(1).max(1),
                enabled && !at_first,
            ),
        ];

        for item in page_numbers(current, total) {
            buttons.push(match item {
                PageItem::Page(page) => PaginationButton {
                    label: page.to_string(),
                    aria_label: format!("Go to page {}", page),
                    target: Some(page),
                    enabled,
                    active: page == current,
                },
                PageItem::EllipsisStart | PageItem::EllipsisEnd => PaginationButton {
                    label: "…".to_string(),
                    aria_label: "More pages".to_string(),
                    target: None,
                    enabled: false,
                    active: false,
                },
            });
        }

        buttons.push(PaginationButton::nav(
            "›",
            "Go to next page",
            (current + 1).min(total),
            enabled && !at_last,
        ));
        buttons.push(PaginationButton::nav("»", "Go to last page", total, enabled && !at_last));
        buttons
    }

    /// Columns needed to draw every button with one column of spacing
    pub fn width(&self) -> u16 {
        let buttons = self.buttons();
        let widths: u16 = buttons.iter().map(PaginationButton::width).sum();
        widths + buttons.len().saturating_sub(1) as u16
    }

    fn go_to(&self, page: usize) -> Option<Action> {
        if self.disabled || page == 0 || page > self.total_pages || page == self.current_page {
            return None;
        }
        Some(Action::GoToPage(page))
    }

    fn button_style(&self, button: &PaginationButton) -> Style {
        if button.active {
            Style::default()
                .fg(self.theme.neutral_950)
                .bg(self.theme.neutral_200)
                .add_modifier(Modifier::BOLD)
        } else if button.target.is_none() {
            self.theme.muted()
        } else if !button.enabled {
            self.theme.disabled()
        } else {
            Style::default().fg(self.theme.neutral_600)
        }
    }
}

impl Component for Pagination {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.go_to(self.current_page.saturating_sub(1)),
            KeyCode::Right | KeyCode::Char('l') => self.go_to(self.current_page + 1),
            KeyCode::Home | KeyCode::Char('g') => self.go_to(1),
            KeyCode::End | KeyCode::Char('G') => self.go_to(self.total_pages),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let position = Position::new(mouse.column, mouse.row);
        let action = self
            .hit_areas
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .and_then(|(_, page)| self.go_to(*page));
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if let Action::GoToPage(page) = action {
            self.set_pages(page, self.total_pages);
        }
        Ok(None)
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let buttons = self.buttons();
        let total_width = self.width().min(area.width);
        let mut x = area.x + area.width.saturating_sub(total_width) / 2;

        self.hit_areas.clear();
        let mut spans = Vec::with_capacity(buttons.len() * 2);
        for (i, button) in buttons.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
                x += 1;
            }
            let width = button.width();
            if let (Some(page), true) = (button.target, button.enabled) {
                self.hit_areas.push((Rect::new(x, area.y, width, 1), page));
            }
            let mut style = self.button_style(button);
            if self.focused && button.active {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            spans.push(Span::styled(format!(" {} ", button.label), style));
            x += width;
        }

        let paragraph = Paragraph::new(Line::from(spans)).alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(paragraph, area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_nav_disabled_at_edges() {
        let first = Pagination::new(1, 10, Theme::default()).buttons();
        assert!(!first[0].enabled && !first[1].enabled);
        assert!(first[first.len() - 1].enabled);

        let last = Pagination::new(10, 10, Theme::default()).buttons();
        assert!(last[0].enabled);
        assert!(!last[last.len() - 1].enabled && !last[last.len() - 2].enabled);
    }

    #[test]
    fn test_active_page_and_ellipsis() {
        let buttons = Pagination::new(10, 50, Theme::default()).buttons();
        let active: Vec<_> = buttons.iter().filter(|b| b.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "10");
        assert_eq!(buttons.iter().filter(|b| b.target.is_none()).count(), 2);
        assert_eq!(buttons[0].aria_label, "Go to first page");
    }

    #[test]
    fn test_disabled_blocks_everything() {
        let mut pagination = Pagination::new(5, 10, Theme::default()).disabled(true);
        assert!(pagination.buttons().iter().all(|b| !b.enabled));
        assert_eq!(pagination.handle_key_event(key(KeyCode::Right)).unwrap(), None);
    }

    #[test]
    fn test_keys_emit_page_changes() {
        let mut pagination = Pagination::new(5, 10, Theme::default());
        assert_eq!(
            pagination.handle_key_event(key(KeyCode::Right)).unwrap(),
            Some(Action::GoToPage(6))
        );
        assert_eq!(
            pagination.handle_key_event(key(KeyCode::Left)).unwrap(),
            Some(Action::GoToPage(4))
        );
        assert_eq!(
            pagination.handle_key_event(key(KeyCode::End)).unwrap(),
            Some(Action::GoToPage(10))
        );

        pagination.update(Action::GoToPage(1)).unwrap();
        assert_eq!(pagination.current_page(), 1);
        assert_eq!(pagination.handle_key_event(key(KeyCode::Left)).unwrap(), None);
    }

    #[test]
    fn test_set_pages_clamps() {
        let mut pagination = Pagination::new(1, 1, Theme::default());
        pagination.set_pages(7, 3);
        assert_eq!(pagination.current_page(), 3);
        pagination.set_pages(2, 0);
        assert_eq!((pagination.current_page(), pagination.total_pages()), (1, 1));
    }

    #[test]
    fn test_click_page_button() {
        let mut pagination = Pagination::new(1, 3, Theme::default());
        let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();
        terminal
            .draw(|frame| pagination.draw(frame, frame.area()).unwrap())
            .unwrap();

        // « ‹ 1 2 3 › »  → seven buttons of width 3 with single spaces
        let width = pagination.width();
        assert_eq!(width, 7 * 3 + 6);
        let start = (40 - width) / 2;
        let page_three_x = start + 4 * 4 + 1;
        assert_eq!(
            pagination.handle_mouse_event(click(page_three_x, 0)).unwrap(),
            Some(Action::GoToPage(3))
        );
        // previous is disabled on the first page
        assert_eq!(pagination.handle_mouse_event(click(start + 5, 0)).unwrap(), None);
    }
}
