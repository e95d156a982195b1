//! TitleWithSubText - a title over a smaller sub text, centred vertically

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use std::borrow::Cow;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct TitleWithSubText<'a> {
    title: Cow<'a, str>,
    sub_text: Cow<'a, str>,
    title_style: Style,
    sub_text_style: Style,
    theme: &'a Theme,
}

impl<'a> TitleWithSubText<'a> {
    pub fn new(
        title: impl Into<Cow<'a, str>>,
        sub_text: impl Into<Cow<'a, str>>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            title: title.into(),
            sub_text: sub_text.into(),
            title_style: Style::default(),
            sub_text_style: Style::default(),
            theme,
        }
    }

    /// Patched over the default title style
    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    pub fn sub_text_style(mut self, style: Style) -> Self {
        self.sub_text_style = style;
        self
    }

    fn lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(Span::styled(
                self.title.clone(),
                Style::default()
                    .fg(self.theme.title)
                    .add_modifier(Modifier::BOLD)
                    .patch(self.title_style),
            )),
            Line::from(Span::styled(
                self.sub_text.clone(),
                Style::default()
                    .fg(self.theme.subtitle)
                    .patch(self.sub_text_style),
            )),
        ]
    }

    /// Rows needed at the given width once both parts wrap
    pub fn height(&self, width: u16) -> u16 {
        let width = width.max(1) as usize;
        let rows = |s: &str| s.width().div_ceil(width).max(1);
        (rows(&self.title) + rows(&self.sub_text)) as u16
    }
}

impl Widget for TitleWithSubText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let height = self.height(area.width).min(area.height);
        let top = area.y + (area.height - height) / 2;
        let inner = Rect::new(area.x, top, area.width, height);
        Paragraph::new(self.lines())
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_centred_vertically() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        TitleWithSubText::new("Acme", "Workspace", &theme).render(area, &mut buf);
        assert_eq!(row_text(&buf, 0), "");
        assert_eq!(row_text(&buf, 1), "Acme");
        assert_eq!(row_text(&buf, 2), "Workspace");
        assert_eq!(buf[(0, 1)].fg, theme.title);
    }

    #[test]
    fn test_height_accounts_for_wrapping() {
        let theme = Theme::default();
        let widget = TitleWithSubText::new("A long title", "sub", &theme);
        assert_eq!(widget.height(20), 2);
        assert_eq!(widget.height(6), 3);
    }

    #[test]
    fn test_style_override() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        TitleWithSubText::new("T", "S", &theme)
            .sub_text_style(Style::default().fg(theme.neutral_600))
            .render(area, &mut buf);
        assert_eq!(buf[(0, 1)].fg, theme.neutral_600);
    }
}
