//! TableRowText - title with a muted subtitle, for table cells

use crate::theme::Theme;
use ratatui::{
    style::Style,
    text::{Line, Span, Text},
};

#[derive(Debug, Clone)]
pub struct TableRowText {
    text: String,
    sub_text: Option<String>,
    style: Style,
}

impl TableRowText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sub_text: None,
            style: Style::default(),
        }
    }

    pub fn sub_text(mut self, sub_text: impl Into<String>) -> Self {
        let sub_text = sub_text.into();
        self.sub_text = (!sub_text.is_empty()).then_some(sub_text);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn into_text(self, theme: &Theme) -> Text<'static> {
        let mut lines = vec![Line::from(Span::styled(
            self.text,
            Style::default().fg(theme.table_row_title).patch(self.style),
        ))];
        if let Some(sub_text) = self.sub_text {
            lines.push(Line::from(Span::styled(
                sub_text,
                Style::default().fg(theme.table_row_subtitle),
            )));
        }
        Text::from(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_lines_with_sub_text() {
        let theme = Theme::default();
        let text = TableRowText::new("Jane Smith")
            .sub_text("jane@example.com")
            .into_text(&theme);
        assert_eq!(text.lines.len(), 2);
        assert_eq!(text.lines[1].spans[0].style.fg, Some(theme.table_row_subtitle));
    }

    #[test]
    fn test_single_line_without_sub_text() {
        let theme = Theme::default();
        let text = TableRowText::new("Jane").sub_text("").into_text(&theme);
        assert_eq!(text.height(), 1);
    }
}
