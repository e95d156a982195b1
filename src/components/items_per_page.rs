//! Items-per-page selector
//!
//! A trigger showing "{n} / page" that opens a small option list.

use crate::action::Action;
use crate::component::Component;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

pub const DEFAULT_OPTIONS: [usize; 3] = [10, 20, 50];

pub fn page_label(n: usize) -> String {
    format!("{} / page", n)
}

pub struct ItemsPerPageSelector {
    items_per_page: usize,
    options: Vec<usize>,
    open: bool,
    list_state: ListState,
    focused: bool,
    theme: Theme,
    trigger_area: Rect,
    popup_area: Option<Rect>,
}

impl ItemsPerPageSelector {
    pub fn new(items_per_page: usize, options: Vec<usize>, theme: Theme) -> Self {
        let options = if options.is_empty() {
            DEFAULT_OPTIONS.to_vec()
        } else {
            options
        };
        Self {
            items_per_page,
            options,
            open: false,
            list_state: ListState::default(),
            focused: false,
            theme,
            trigger_area: Rect::default(),
            popup_area: None,
        }
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn options(&self) -> &[usize] {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_items_per_page(&mut self, n: usize) {
        self.items_per_page = n;
    }

    /// Width of the trigger including its border
    pub fn width(&self) -> u16 {
        let widest = self
            .options
            .iter()
            .chain(std::iter::once(&self.items_per_page))
            .map(|n| page_label(*n).len())
            .max()
            .unwrap_or(0);
        (widest + 6) as u16
    }

    fn highlighted(&self) -> Option<usize> {
        self.list_state
            .selected()
            .and_then(|i| self.options.get(i).copied())
    }

    fn open_list(&mut self) {
        self.open = true;
        let current = self
            .options
            .iter()
            .position(|n| *n == self.items_per_page)
            .unwrap_or(0);
        self.list_state.select(Some(current));
    }

    fn select_next(&mut self) {
        let i = self.list_state.selected().unwrap_or(0);
        if i + 1 < self.options.len() {
            self.list_state.select(Some(i + 1));
        }
    }

    fn select_prev(&mut self) {
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(i.saturating_sub(1)));
    }
}

impl Component for ItemsPerPageSelector {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if !self.open {
            let action = match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => Some(Action::OpenItemsPerPage),
                _ => None,
            };
            return Ok(action);
        }

        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseItemsPerPage),
            KeyCode::Enter => self.highlighted().map(Action::SetItemsPerPage),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::OptionUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::OptionDown),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let position = Position::new(mouse.column, mouse.row);

        if let Some(popup) = self.popup_area.filter(|_| self.open) {
            if popup.contains(position) {
                let row = position.y.saturating_sub(popup.y + 1) as usize;
                let chosen = self.options.get(row + self.list_state.offset()).copied();
                return Ok(chosen.map(Action::SetItemsPerPage));
            }
        }

        if self.trigger_area.contains(position) {
            return Ok(Some(if self.open {
                Action::CloseItemsPerPage
            } else {
                Action::OpenItemsPerPage
            }));
        }

        Ok(self.open.then_some(Action::CloseItemsPerPage))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::OpenItemsPerPage => self.open_list(),
            Action::CloseItemsPerPage => self.open = false,
            Action::OptionUp if self.open => self.select_prev(),
            Action::OptionDown if self.open => self.select_next(),
            Action::SetItemsPerPage(n) => {
                self.items_per_page = n;
                self.open = false;
            }
            _ => {}
        }
        Ok(None)
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.open = false;
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let border = if self.focused {
            self.theme.accent
        } else {
            self.theme.neutral_200
        };
        let trigger = Paragraph::new(Line::from(vec![
            Span::styled(page_label(self.items_per_page), self.theme.muted()),
            Span::styled(" ▾", self.theme.muted()),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        self.trigger_area = area;
        frame.render_widget(trigger, area);

        if !self.open {
            self.popup_area = None;
            return Ok(());
        }

        // Open upwards when there is room, since the group usually sits at the bottom
        let height = (self.options.len() as u16 + 2).min(frame.area().height);
        let y = if area.y >= height {
            area.y - height
        } else {
            (area.y + area.height).min(frame.area().height.saturating_sub(height))
        };
        let popup = Rect::new(area.x, y, area.width, height);
        self.popup_area = Some(popup);

        let items: Vec<ListItem> = self
            .options
            .iter()
            .map(|n| {
                let style = if *n == self.items_per_page {
                    Style::default()
                        .fg(self.theme.neutral_950)
                        .bg(self.theme.neutral_50)
                } else {
                    self.theme.muted()
                };
                ListItem::new(Line::from(Span::styled(page_label(*n), style)))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.neutral_200)),
            )
            .highlight_style(
                Style::default()
                    .fg(self.theme.neutral_950)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("› ");

        frame.render_widget(Clear, popup);
        frame.render_stateful_widget(list, popup, &mut self.list_state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn selector() -> ItemsPerPageSelector {
        ItemsPerPageSelector::new(10, vec![10, 20, 50], Theme::default())
    }

    #[test]
    fn test_label() {
        assert_eq!(page_label(20), "20 / page");
    }

    #[test]
    fn test_open_navigate_choose() {
        let mut s = selector();
        let open = s.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(open, Some(Action::OpenItemsPerPage));
        s.update(Action::OpenItemsPerPage).unwrap();
        assert!(s.is_open());

        for _ in 0..3 {
            let action = s.handle_key_event(key(KeyCode::Down)).unwrap();
            assert_eq!(action, Some(Action::OptionDown));
            s.update(Action::OptionDown).unwrap();
        }
        let chosen = s.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(chosen, Some(Action::SetItemsPerPage(50)));

        s.update(Action::SetItemsPerPage(50)).unwrap();
        assert_eq!(s.items_per_page(), 50);
        assert!(!s.is_open());
    }

    #[test]
    fn test_open_highlights_current() {
        let mut s = ItemsPerPageSelector::new(20, vec![10, 20, 50], Theme::default());
        s.update(Action::OpenItemsPerPage).unwrap();
        assert_eq!(s.highlighted(), Some(20));
        assert_eq!(
            s.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseItemsPerPage)
        );
    }

    #[test]
    fn test_option_keys_move_only_through_update() {
        let mut s = selector();
        s.update(Action::OpenItemsPerPage).unwrap();
        s.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(s.highlighted(), Some(10));

        s.update(Action::OptionDown).unwrap();
        assert_eq!(s.highlighted(), Some(20));
        s.update(Action::OptionUp).unwrap();
        s.update(Action::OptionUp).unwrap();
        assert_eq!(s.highlighted(), Some(10));
    }

    #[test]
    fn test_option_actions_ignored_when_closed() {
        let mut s = selector();
        s.update(Action::OptionDown).unwrap();
        assert_eq!(s.highlighted(), None);
    }

    #[test]
    fn test_empty_options_use_defaults() {
        let s = ItemsPerPageSelector::new(10, Vec::new(), Theme::default());
        assert_eq!(s.options(), &DEFAULT_OPTIONS);
    }

    #[test]
    fn test_losing_focus_closes() {
        let mut s = selector();
        s.update(Action::OpenItemsPerPage).unwrap();
        s.set_focused(false);
        assert!(!s.is_open());
    }
}
