//! Text - a line of text with an optional sub text beneath it
//!
//! Terminals have a single font size, so sizes and weights map onto
//! modifiers: `Lg` and the heavier weights render bold, `Xs` renders italic.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    Xs,
    #[default]
    Sm,
    Md,
    Lg,
}

impl TextSize {
    pub fn modifier(self) -> Modifier {
        match self {
            TextSize::Xs => Modifier::ITALIC,
            TextSize::Sm | TextSize::Md => Modifier::empty(),
            TextSize::Lg => Modifier::BOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextWeight {
    #[default]
    Normal,
    Medium,
    Semibold,
    Bold,
}

impl TextWeight {
    pub fn modifier(self) -> Modifier {
        match self {
            TextWeight::Normal | TextWeight::Medium => Modifier::empty(),
            TextWeight::Semibold | TextWeight::Bold => Modifier::BOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextColor {
    #[default]
    Black,
    Gray,
}

impl TextColor {
    pub fn color(self, theme: &Theme) -> Color {
        match self {
            TextColor::Black => theme.neutral_950,
            TextColor::Gray => theme.neutral_600,
        }
    }
}

fn text_style(size: TextSize, weight: TextWeight, color: TextColor, theme: &Theme) -> Style {
    Style::default()
        .fg(color.color(theme))
        .add_modifier(size.modifier() | weight.modifier())
}

#[derive(Debug, Clone)]
pub struct Text<'a> {
    text: Cow<'a, str>,
    sub_text: Option<Cow<'a, str>>,
    size: TextSize,
    weight: TextWeight,
    color: TextColor,
    sub_text_size: TextSize,
    sub_text_weight: TextWeight,
    sub_text_color: TextColor,
    style: Style,
    theme: &'a Theme,
}

impl<'a> Text<'a> {
    pub fn new(text: impl Into<Cow<'a, str>>, theme: &'a Theme) -> Self {
        Self {
            text: text.into(),
            sub_text: None,
            size: TextSize::Sm,
            weight: TextWeight::Normal,
            color: TextColor::Black,
            sub_text_size: TextSize::Xs,
            sub_text_weight: TextWeight::Normal,
            sub_text_color: TextColor::Gray,
            style: Style::default(),
            theme,
        }
    }

    pub fn sub_text(mut self, sub_text: impl Into<Cow<'a, str>>) -> Self {
        self.sub_text = Some(sub_text.into());
        self
    }

    pub fn size(mut self, size: TextSize) -> Self {
        self.size = size;
        self
    }

    pub fn weight(mut self, weight: TextWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn color(mut self, color: TextColor) -> Self {
        self.color = color;
        self
    }

    pub fn sub_text_size(mut self, size: TextSize) -> Self {
        self.sub_text_size = size;
        self
    }

    pub fn sub_text_weight(mut self, weight: TextWeight) -> Self {
        self.sub_text_weight = weight;
        self
    }

    pub fn sub_text_color(mut self, color: TextColor) -> Self {
        self.sub_text_color = color;
        self
    }

    /// Patched over the main line only
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn lines(&self) -> Vec<Line<'a>> {
        let mut lines = vec![Line::from(Span::styled(
            self.text.clone(),
            text_style(self.size, self.weight, self.color, self.theme).patch(self.style),
        ))];
        if let Some(sub_text) = self.sub_text.as_ref().filter(|s| !s.is_empty()) {
            lines.push(Line::from(Span::styled(
                sub_text.clone(),
                text_style(
                    self.sub_text_size,
                    self.sub_text_weight,
                    self.sub_text_color,
                    self.theme,
                ),
            )));
        }
        lines
    }

    pub fn height(&self) -> u16 {
        self.lines().len() as u16
    }
}

impl Widget for Text<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines()).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let theme = Theme::default();
        let lines = Text::new("Title", &theme).sub_text("Sub").lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].style.fg, Some(theme.neutral_950));
        assert_eq!(lines[1].spans[0].style.fg, Some(theme.neutral_600));
        assert!(lines[1].spans[0].style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_empty_sub_text_is_omitted() {
        let theme = Theme::default();
        assert_eq!(Text::new("Only", &theme).sub_text("").height(), 1);
        assert_eq!(Text::new("Only", &theme).height(), 1);
    }

    #[test]
    fn test_size_weight_color() {
        let theme = Theme::default();
        let lines = Text::new("Big", &theme)
            .size(TextSize::Lg)
            .weight(TextWeight::Semibold)
            .color(TextColor::Gray)
            .lines();
        let style = lines[0].spans[0].style;
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(style.fg, Some(theme.neutral_600));
    }
}
