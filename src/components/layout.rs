//! Layout calculations for the gallery screen

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Gallery screen areas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryLayout {
    pub sidebar: Rect,
    pub content: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Sidebar on the left at its current width; content, a status line and
/// the key hint bar on the right
pub fn calculate_gallery_layout(area: Rect, sidebar_width: u16) -> GalleryLayout {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
        .split(area);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(horizontal[1]);

    GalleryLayout {
        sidebar: horizontal[0],
        content: right[0],
        status: right[1],
        help: right[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_is_inside() {
        let area = Rect::new(10, 5, 40, 20);
        let popup = centered_popup(area, 20, 10);
        assert_eq!(popup, Rect::new(20, 10, 20, 10));

        let clamped = centered_popup(area, 100, 100);
        assert_eq!(clamped, area);
    }

    #[test]
    fn test_gallery_layout() {
        let layout = calculate_gallery_layout(Rect::new(0, 0, 100, 30), 32);
        assert_eq!(layout.sidebar.width, 32);
        assert_eq!(layout.content.x, 32);
        assert_eq!(layout.content.height, 28);
        assert_eq!(layout.status.y, 28);
        assert_eq!(layout.help.y, 29);
    }
}
