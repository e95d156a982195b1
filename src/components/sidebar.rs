//! Sidebar - collapsible navigation with a header and a user footer
//!
//! Hovering a collapsed sidebar opens it; leaving closes it again after a
//! short delay unless it is pinned open through `is_open`.
//!
//! ```text
//! ┌ open ─────────────────────┐   ┌ collapsed ┐
//! │ ◆  Acme                   │   │    ◆      │
//! │    Workspace              │   │           │
//! │▌▦  Members              › │   │▌   ▦      │
//! │ ⚙  Settings               │   │    ⚙      │
//! │ ───────────────────────── │   │  ─────    │
//! │ ?  Help                   │   │    ?      │
//! │ ───────────────────────── │   │  ─────    │
//! │ JD Jane Doe               │   │    JD     │
//! │    jane@acme.io           │   │           │
//! └───────────────────────────┘   └───────────┘
//! ```

use super::separator::Separator;
use super::title_with_sub_text::TitleWithSubText;
use crate::action::Action;
use crate::component::Component;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

pub const DEFAULT_CLOSE_DELAY: Duration = Duration::from_millis(300);
pub const OPEN_WIDTH: u16 = 32;
pub const COLLAPSED_WIDTH: u16 = 9;

const LOGO: &str = "◆";
const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;

pub type OpenChangeCallback = Box<dyn FnMut(bool)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub title: String,
    /// A single glyph
    pub icon: String,
    pub href: String,
    pub is_active: bool,
}

impl NavItem {
    pub fn new(title: impl Into<String>, icon: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: icon.into(),
            href: href.into(),
            is_active: false,
        }
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarHeader {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarUser {
    pub name: String,
    pub email: String,
    pub initials: String,
    /// Falls back to the theme's avatar colour
    pub avatar_color: Option<Color>,
}

pub struct Sidebar {
    header: SidebarHeader,
    main_nav_items: Vec<NavItem>,
    bottom_nav_items: Vec<NavItem>,
    user: SidebarUser,
    /// Pinned open by the owner
    is_open: bool,
    open: bool,
    close_delay: Duration,
    close_deadline: Option<Instant>,
    on_open_change: Option<OpenChangeCallback>,
    hovered: bool,
    cursor: usize,
    focused: bool,
    theme: Theme,
    area: Rect,
    item_areas: Vec<(Rect, usize)>,
}

impl Sidebar {
    pub fn new(header: SidebarHeader, user: SidebarUser, theme: Theme) -> Self {
        Self {
            header,
            main_nav_items: Vec::new(),
            bottom_nav_items: Vec::new(),
            user,
            is_open: true,
            open: true,
            close_delay: DEFAULT_CLOSE_DELAY,
            close_deadline: None,
            on_open_change: None,
            hovered: false,
            cursor: 0,
            focused: false,
            theme,
            area: Rect::default(),
            item_areas: Vec::new(),
        }
    }

    pub fn main_nav_items(mut self, items: Vec<NavItem>) -> Self {
        self.main_nav_items = items;
        self
    }

    pub fn bottom_nav_items(mut self, items: Vec<NavItem>) -> Self {
        self.bottom_nav_items = items;
        self
    }

    /// Initial pinned state; the sidebar starts open exactly when pinned
    pub fn is_open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self.open = is_open;
        self
    }

    pub fn close_delay(mut self, delay: Duration) -> Self {
        self.close_delay = delay;
        self
    }

    pub fn on_open_change(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_open_change = Some(Box::new(callback));
        self
    }

    pub fn open(&self) -> bool {
        self.open
    }

    pub fn is_pinned(&self) -> bool {
        self.is_open
    }

    pub fn close_pending(&self) -> bool {
        self.close_deadline.is_some()
    }

    pub fn width(&self) -> u16 {
        if self.open {
            OPEN_WIDTH
        } else {
            COLLAPSED_WIDTH
        }
    }

    /// Owner-driven sync of the pinned state. Does not report a change.
    pub fn set_is_open(&mut self, is_open: bool) {
        self.is_open = is_open;
        self.open = is_open;
        self.close_deadline = None;
    }

    /// Mark items whose href matches as active
    pub fn set_active(&mut self, href: &str) {
        for item in self
            .main_nav_items
            .iter_mut()
            .chain(self.bottom_nav_items.iter_mut())
        {
            item.is_active = item.href == href;
        }
    }

    fn set_open(&mut self, open: bool) -> Option<Action> {
        if self.open == open {
            return None;
        }
        self.open = open;
        tracing::debug!(open, "sidebar open state changed");
        if let Some(callback) = self.on_open_change.as_mut() {
            callback(open);
        }
        Some(Action::SidebarOpenChanged(open))
    }

    /// Pointer entered: cancel any pending close and open
    pub fn mouse_enter(&mut self) -> Option<Action> {
        self.close_deadline = None;
        self.set_open(true)
    }

    /// Pointer left: a hover-opened sidebar closes after the delay
    pub fn mouse_leave(&mut self, now: Instant) {
        if self.open && !self.is_open {
            self.close_deadline = Some(now + self.close_delay);
        }
    }

    /// Close once the pending deadline has passed
    pub fn tick(&mut self, now: Instant) -> Option<Action> {
        match self.close_deadline {
            Some(deadline) if now >= deadline => {
                self.close_deadline = None;
                self.set_open(false)
            }
            _ => None,
        }
    }

    fn items(&self) -> impl Iterator<Item = &NavItem> {
        self.main_nav_items.iter().chain(self.bottom_nav_items.iter())
    }

    fn item_count(&self) -> usize {
        self.main_nav_items.len() + self.bottom_nav_items.len()
    }

    fn nav_line(&self, item: &NavItem, index: usize, width: u16) -> Line<'static> {
        let marker = if item.is_active {
            Span::styled("▌", Style::default().fg(self.theme.neutral_200))
        } else {
            Span::raw(" ")
        };
        let (icon_style, title_style) = if item.is_active {
            (
                Style::default().fg(self.theme.neutral_950),
                Style::default()
                    .fg(self.theme.neutral_950)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Style::default().fg(self.theme.neutral_400),
                Style::default().fg(self.theme.neutral_600),
            )
        };

        let mut spans = vec![marker];
        if self.open {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(item.icon.clone(), icon_style));
            spans.push(Span::raw("  "));
            spans.push(Span::styled(item.title.clone(), title_style));
            if item.is_active {
                let used = 4 + item.icon.width() + item.title.width();
                let pad = (width as usize).saturating_sub(used + 2);
                spans.push(Span::raw(" ".repeat(pad)));
                spans.push(Span::styled("›", Style::default().fg(self.theme.neutral_600)));
            }
        } else {
            let pad = (width as usize).saturating_sub(1 + item.icon.width()) / 2;
            spans.push(Span::raw(" ".repeat(pad)));
            spans.push(Span::styled(item.icon.clone(), icon_style));
        }

        let mut line = Line::from(spans);
        if self.focused && index == self.cursor {
            line = line.style(Style::default().bg(self.theme.neutral_50));
        }
        line
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        if !self.open {
            let logo = Paragraph::new(LOGO)
                .alignment(Alignment::Center)
                .style(Style::default().fg(self.theme.accent));
            frame.render_widget(logo, Rect::new(area.x, area.y + 1, area.width, 1));
            return;
        }
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(area);
        frame.render_widget(
            Paragraph::new(format!(" {}", LOGO)).style(Style::default().fg(self.theme.accent)),
            Rect::new(chunks[0].x, area.y + 1, chunks[0].width, 1),
        );
        frame.render_widget(
            TitleWithSubText::new(
                self.header.title.as_str(),
                self.header.description.as_str(),
                &self.theme,
            )
            .sub_text_style(Style::default().fg(self.theme.neutral_600)),
            chunks[1],
        );
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let avatar_bg = self.user.avatar_color.unwrap_or(self.theme.avatar);
        let avatar = Span::styled(
            format!(" {} ", self.user.initials),
            Style::default()
                .fg(self.theme.neutral_0)
                .bg(avatar_bg)
                .add_modifier(Modifier::BOLD),
        );
        let avatar_width = avatar.width() as u16;
        let y = area.y + area.height.saturating_sub(1) / 2;

        if !self.open {
            let x = area.x + area.width.saturating_sub(avatar_width) / 2;
            frame.render_widget(
                Paragraph::new(Line::from(avatar)),
                Rect::new(x, y, avatar_width.min(area.width), 1),
            );
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(avatar_width + 2), Constraint::Min(0)])
            .split(area);
        frame.render_widget(
            Paragraph::new(Line::from(vec![Span::raw(" "), avatar])),
            Rect::new(chunks[0].x, y, chunks[0].width, 1),
        );
        frame.render_widget(
            TitleWithSubText::new(self.user.name.as_str(), self.user.email.as_str(), &self.theme)
                .sub_text_style(Style::default().fg(self.theme.neutral_600)),
            chunks[1],
        );
    }
}

impl Component for Sidebar {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.cursor + 1 < self.item_count() {
                    self.cursor += 1;
                }
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Enter => self
                .items()
                .nth(self.cursor)
                .map(|item| Action::Navigate(item.href.clone())),
            KeyCode::Char('p') => Some(Action::ToggleSidebarPin),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let position = Position::new(mouse.column, mouse.row);
        let inside = self.area.contains(position);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if inside && !self.hovered {
                    self.hovered = true;
                    return Ok(Some(Action::SidebarEnter));
                }
                if !inside && self.hovered {
                    self.hovered = false;
                    return Ok(Some(Action::SidebarLeave));
                }
                Ok(None)
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .item_areas
                    .iter()
                    .find(|(rect, _)| rect.contains(position))
                    .map(|(_, index)| *index);
                let Some(index) = hit else {
                    return Ok(None);
                };
                self.cursor = index;
                Ok(self
                    .items()
                    .nth(index)
                    .map(|item| Action::Navigate(item.href.clone())))
            }
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let now = Instant::now();
        let follow_up = match action {
            Action::Tick => self.tick(now),
            Action::SidebarEnter => self.mouse_enter(),
            Action::SidebarLeave => {
                self.mouse_leave(now);
                None
            }
            Action::ToggleSidebarPin => {
                self.is_open = !self.is_open;
                self.close_deadline = None;
                self.set_open(self.is_open)
            }
            Action::Navigate(href) => {
                self.set_active(&href);
                None
            }
            _ => None,
        };
        Ok(follow_up)
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let area = Rect::new(area.x, area.y, self.width().min(area.width), area.height);
        self.area = area;
        self.item_areas.clear();

        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(self.theme.neutral_200));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < HEADER_HEIGHT + FOOTER_HEIGHT + 2 || inner.width == 0 {
            return Ok(());
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(inner);
        let (header_area, nav_area, separator_area, footer_area) =
            (chunks[0], chunks[2], chunks[3], chunks[4]);

        self.draw_header(frame, header_area);

        // Separators are inset like the surrounding padding
        let inset = |rect: Rect| {
            let pad = if self.open { 1 } else { 2 };
            Rect::new(
                rect.x + pad,
                rect.y,
                rect.width.saturating_sub(pad * 2),
                rect.height,
            )
        };

        let mut y = nav_area.y;
        let bottom = nav_area.y + nav_area.height;
        let mut index = 0;
        for item in &self.main_nav_items {
            if y >= bottom {
                break;
            }
            let row = Rect::new(nav_area.x, y, nav_area.width, 1);
            frame.render_widget(Paragraph::new(self.nav_line(item, index, nav_area.width)), row);
            self.item_areas.push((row, index));
            index += 1;
            y += 1;
        }
        if !self.bottom_nav_items.is_empty() && y < bottom {
            frame.render_widget(
                Separator::new(&self.theme).color(self.theme.neutral_200),
                inset(Rect::new(nav_area.x, y, nav_area.width, 1)),
            );
            y += 1;
        }
        for item in &self.bottom_nav_items {
            if y >= bottom {
                break;
            }
            let row = Rect::new(nav_area.x, y, nav_area.width, 1);
            frame.render_widget(Paragraph::new(self.nav_line(item, index, nav_area.width)), row);
            self.item_areas.push((row, index));
            index += 1;
            y += 1;
        }

        frame.render_widget(
            Separator::new(&self.theme).color(self.theme.neutral_200),
            inset(separator_area),
        );
        self.draw_footer(frame, footer_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sidebar() -> Sidebar {
        Sidebar::new(
            SidebarHeader {
                title: "Test Header".to_string(),
                description: "Test Description".to_string(),
            },
            SidebarUser {
                name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                initials: "JD".to_string(),
                avatar_color: None,
            },
            Theme::default(),
        )
        .main_nav_items(vec![
            NavItem::new("Dashboard", "▦", "/dashboard").active(true),
            NavItem::new("Settings", "⚙", "/settings"),
        ])
        .bottom_nav_items(vec![NavItem::new("Help", "?", "/help")])
    }

    fn recorder(sidebar: Sidebar) -> (Sidebar, Rc<RefCell<Vec<bool>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (sidebar.on_open_change(move |open| sink.borrow_mut().push(open)), seen)
    }

    fn moved(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn render(sidebar: &mut Sidebar, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(40, height)).unwrap();
        terminal
            .draw(|frame| sidebar.draw(frame, frame.area()).unwrap())
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..40)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_enter_opens_immediately() {
        let (mut s, seen) = recorder(sidebar().is_open(false));
        assert!(!s.open());
        let action = s.mouse_enter();
        assert_eq!(action, Some(Action::SidebarOpenChanged(true)));
        assert!(s.open());
        assert_eq!(*seen.borrow(), vec![true]);
    }

    #[test]
    fn test_leave_closes_after_delay() {
        let (mut s, seen) = recorder(sidebar().is_open(false));
        let start = Instant::now();
        s.mouse_enter();
        s.mouse_leave(start);
        assert!(s.close_pending());

        assert_eq!(s.tick(start + Duration::from_millis(299)), None);
        assert!(s.open());
        assert_eq!(
            s.tick(start + Duration::from_millis(300)),
            Some(Action::SidebarOpenChanged(false))
        );
        assert!(!s.open());
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_reenter_cancels_close() {
        let (mut s, seen) = recorder(sidebar().is_open(false));
        let start = Instant::now();
        s.mouse_enter();
        s.mouse_leave(start);
        // already open, so no second report
        assert_eq!(s.mouse_enter(), None);
        assert!(!s.close_pending());
        assert_eq!(s.tick(start + Duration::from_secs(1)), None);
        assert!(s.open());
        assert_eq!(*seen.borrow(), vec![true]);
    }

    #[test]
    fn test_pinned_stays_open() {
        let mut s = sidebar();
        assert!(s.is_pinned());
        s.mouse_leave(Instant::now());
        assert!(!s.close_pending());
        assert!(s.open());
    }

    #[test]
    fn test_custom_delay() {
        let mut s = sidebar().is_open(false).close_delay(Duration::from_millis(50));
        let start = Instant::now();
        s.mouse_enter();
        s.mouse_leave(start);
        s.tick(start + Duration::from_millis(50));
        assert!(!s.open());
    }

    #[test]
    fn test_set_is_open_syncs_silently() {
        let (mut s, seen) = recorder(sidebar());
        s.set_is_open(false);
        assert!(!s.open());
        assert_eq!(s.width(), COLLAPSED_WIDTH);
        s.set_is_open(true);
        assert_eq!(s.width(), OPEN_WIDTH);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_keys_navigate() {
        let mut s = sidebar();
        let down = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        s.handle_key_event(down).unwrap();
        s.handle_key_event(down).unwrap();
        s.handle_key_event(down).unwrap();
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let action = s.handle_key_event(enter).unwrap();
        assert_eq!(action, Some(Action::Navigate("/help".to_string())));

        s.update(Action::Navigate("/help".to_string())).unwrap();
        assert!(s.items().all(|item| item.is_active == (item.href == "/help")));
    }

    #[test]
    fn test_draw_open() {
        let mut s = sidebar();
        let screen = render(&mut s, 16).join("\n");
        assert!(screen.contains("Test Header"));
        assert!(screen.contains("Dashboard"));
        assert!(screen.contains('›'));
        assert!(screen.contains("Help"));
        assert!(screen.contains("JD"));
        assert!(screen.contains("john@example.com"));
        // one separator above the bottom items, one above the footer
        assert_eq!(screen.lines().filter(|l| l.contains("───")).count(), 2);
    }

    #[test]
    fn test_draw_collapsed_shows_icons_only() {
        let mut s = sidebar().is_open(false);
        let screen = render(&mut s, 16).join("\n");
        assert!(!screen.contains("Dashboard"));
        assert!(!screen.contains("Test Header"));
        assert!(screen.contains('⚙'));
        assert!(screen.contains("JD"));
    }

    #[test]
    fn test_no_bottom_separator_without_bottom_items() {
        let mut s = sidebar().bottom_nav_items(Vec::new());
        let screen = render(&mut s, 16).join("\n");
        assert_eq!(screen.lines().filter(|l| l.contains("───")).count(), 1);
    }

    #[test]
    fn test_hover_through_mouse_events() {
        let mut s = sidebar().is_open(false);
        render(&mut s, 16);
        assert_eq!(
            s.handle_mouse_event(moved(2, 5)).unwrap(),
            Some(Action::SidebarEnter)
        );
        assert_eq!(s.handle_mouse_event(moved(3, 5)).unwrap(), None);
        assert_eq!(
            s.handle_mouse_event(moved(30, 5)).unwrap(),
            Some(Action::SidebarLeave)
        );
    }
}
