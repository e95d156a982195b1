//! Separator - a one-cell line across an area

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::line,
    widgets::Widget,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy)]
pub struct Separator {
    orientation: Orientation,
    color: Color,
}

impl Separator {
    pub fn new(theme: &Theme) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            color: theme.separator,
        }
    }

    pub fn horizontal(mut self, horizontal: bool) -> Self {
        self.orientation = if horizontal {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Widget for Separator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let style = Style::default().fg(self.color);
        match self.orientation {
            Orientation::Horizontal => {
                for x in area.left()..area.right() {
                    buf[(x, area.top())].set_symbol(line::HORIZONTAL).set_style(style);
                }
            }
            Orientation::Vertical => {
                for y in area.top()..area.bottom() {
                    buf[(area.left(), y)].set_symbol(line::VERTICAL).set_style(style);
                }
            }
        }
    }
}
