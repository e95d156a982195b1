//! Help dialog component
//!
//! Displays keyboard shortcuts grouped into sections in a centered overlay.

use super::layout::centered_popup;
use crate::action::Action;
use crate::component::Component;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

const DIALOG_WIDTH: u16 = 64;

/// A titled group of `(keys, description)` pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpSection {
    pub title: String,
    pub shortcuts: Vec<(String, String)>,
}

impl HelpSection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            shortcuts: Vec::new(),
        }
    }

    pub fn shortcut(mut self, keys: impl Into<String>, description: impl Into<String>) -> Self {
        self.shortcuts.push((keys.into(), description.into()));
        self
    }
}

pub struct HelpDialog {
    sections: Vec<HelpSection>,
    scroll_offset: usize,
    theme: Theme,
}

impl HelpDialog {
    pub fn new(sections: Vec<HelpSection>, theme: Theme) -> Self {
        Self {
            sections,
            scroll_offset: 0,
            theme,
        }
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    fn content(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let key_style = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);

        for section in &self.sections {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  {} ", section.title),
                Style::default()
                    .fg(self.theme.title)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!("  {}", "─".repeat(section.title.chars().count() + 2)),
                Style::default().fg(self.theme.separator),
            )));
            for (keys, description) in &section.shortcuts {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:12}", keys), key_style),
                    Span::styled(description.clone(), self.theme.muted()),
                ]));
            }
        }
        lines
    }
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::ToggleHelp),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::ToggleHelp {
            self.scroll_offset = 0;
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let content = self.content();
        let dialog_area = centered_popup(
            area,
            DIALOG_WIDTH,
            (content.len() as u16 + 2).min(area.height.saturating_sub(4)),
        );
        frame.render_widget(Clear, dialog_area);

        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;
        let max_scroll = total.saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(" Keyboard Shortcuts ")
                    .title_style(
                        Style::default()
                            .fg(self.theme.title)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(self.theme.neutral_400)),
            )
            .scroll((self.scroll_offset as u16, 0));
        frame.render_widget(paragraph, dialog_area);

        if total > visible_height {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn dialog() -> HelpDialog {
        HelpDialog::new(
            vec![HelpSection::new("Table")
                .shortcut("space", "Toggle row")
                .shortcut("a", "Toggle page")],
            Theme::default(),
        )
    }

    #[test]
    fn test_close_keys() {
        let mut help = dialog();
        for code in [KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('?')] {
            let action = help
                .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
                .unwrap();
            assert_eq!(action, Some(Action::ToggleHelp));
        }
    }

    #[test]
    fn test_scroll_is_clamped_on_draw() {
        let mut help = dialog();
        for _ in 0..20 {
            help.handle_key_event(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE))
                .unwrap();
        }
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| help.draw(frame, frame.area()).unwrap())
            .unwrap();
        // five lines of content fit entirely
        assert_eq!(help.scroll_offset(), 0);
    }

    #[test]
    fn test_content_lists_shortcuts() {
        let lines: Vec<String> = dialog().content().iter().map(|l| l.to_string()).collect();
        assert!(lines.iter().any(|l| l.contains("Table")));
        assert!(lines.iter().any(|l| l.contains("space") && l.contains("Toggle row")));
    }
}
