//! Badge - a small pill-shaped status label
//!
//! Base variants come from the design system; `Success` and `Danger` are
//! brick variants that replace the base styling entirely.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::Widget,
};
use std::borrow::Cow;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    #[default]
    Default,
    Secondary,
    Destructive,
    Outline,
    Success,
    Danger,
}

impl BadgeVariant {
    /// Brick variants that do not pass through to the base badge
    pub fn is_custom(&self) -> bool {
        matches!(self, BadgeVariant::Success | BadgeVariant::Danger)
    }

    /// Map a status word to a variant, e.g. for table cells
    pub fn for_status(status: &str) -> BadgeVariant {
        match status.to_ascii_lowercase().as_str() {
            "active" | "success" | "ok" | "done" => BadgeVariant::Success,
            "suspended" | "failed" | "error" | "danger" => BadgeVariant::Danger,
            "invited" | "pending" => BadgeVariant::Secondary,
            _ => BadgeVariant::Outline,
        }
    }

    pub fn style(&self, theme: &Theme) -> Style {
        match self {
            BadgeVariant::Default => Style::default()
                .fg(theme.badge_default_fg)
                .bg(theme.badge_default_bg),
            BadgeVariant::Secondary => Style::default()
                .fg(theme.badge_secondary_fg)
                .bg(theme.badge_secondary_bg),
            BadgeVariant::Destructive => Style::default()
                .fg(theme.badge_destructive_fg)
                .bg(theme.badge_destructive_bg),
            BadgeVariant::Outline => Style::default().fg(theme.neutral_950),
            BadgeVariant::Success => Style::default()
                .fg(theme.badge_success_fg)
                .bg(theme.badge_success_bg),
            BadgeVariant::Danger => Style::default()
                .fg(theme.badge_danger_fg)
                .bg(theme.badge_danger_bg),
        }
    }
}

/// Pill-shaped label
#[derive(Debug, Clone)]
pub struct Badge<'a> {
    content: Cow<'a, str>,
    variant: BadgeVariant,
    style: Style,
    theme: &'a Theme,
}

impl<'a> Badge<'a> {
    pub fn new(content: impl Into<Cow<'a, str>>, theme: &'a Theme) -> Self {
        Self {
            content: content.into(),
            variant: BadgeVariant::default(),
            style: Style::default(),
            theme,
        }
    }

    pub fn variant(mut self, variant: BadgeVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Extra style patched over the variant, like an extra class name
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Columns the badge occupies
    pub fn width(&self) -> u16 {
        (self.content.width() + 2) as u16
    }

    pub fn span(&self) -> Span<'static> {
        let style = self
            .variant
            .style(self.theme)
            .add_modifier(Modifier::BOLD)
            .patch(self.style);
        let text = if self.variant == BadgeVariant::Outline {
            format!("({})", self.content)
        } else {
            format!(" {} ", self.content)
        };
        Span::styled(text, style)
    }
}

impl Widget for Badge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let span = self.span();
        buf.set_span(area.x, area.y, &span, area.width);
    }
}
