//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that routes events to the focused brick and keeps the table and its
//! pagination bar in sync. App coordinates between bricks; it does not
//! contain table logic itself.

use crate::gallery::{self, Page};
use anyhow::Result;
use bricks::components::{
    calculate_gallery_layout, HelpDialog, HelpSection, NavItem, PaginationGroup, Sidebar,
    SidebarHeader, SidebarUser, TableComponent,
};
use bricks::config::Config;
use bricks::model::sample_data::sample_dataset;
use bricks::model::{DataRow, Dataset};
use bricks::{Action, Component, Theme};
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Duration;

/// Which brick receives key events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
    Pagination,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

pub struct App {
    /// Flag to indicate the app should quit
    pub should_quit: bool,
    config: Config,
    theme: Theme,
    page: Page,
    focus: Focus,
    show_help: bool,
    /// Ids reported by the table's last selection change
    selected_ids: Vec<String>,
    status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    sidebar: Sidebar,
    table: TableComponent<DataRow>,
    pagination: PaginationGroup,
    help: HelpDialog,
}

fn help_sections() -> Vec<HelpSection> {
    vec![
        HelpSection::new("General")
            .shortcut("Tab", "Focus next brick")
            .shortcut("Shift+Tab", "Focus previous brick")
            .shortcut("?", "Toggle this help")
            .shortcut("q", "Quit"),
        HelpSection::new("Sidebar")
            .shortcut("j / k", "Move between items")
            .shortcut("Enter", "Open page")
            .shortcut("p", "Pin or unpin"),
        HelpSection::new("Table")
            .shortcut("j / k", "Move between rows")
            .shortcut("h / l", "Move between columns")
            .shortcut("space", "Toggle row selection")
            .shortcut("a", "Toggle all rows on the page")
            .shortcut("s / Enter", "Cycle sorting")
            .shortcut("S", "Cycle sorting, keep other columns")
            .shortcut("/", "Filter column (/regex/, a..b, >=a)")
            .shortcut("x", "Clear filters")
            .shortcut("[ / ]", "Previous / next page"),
        HelpSection::new("Pagination")
            .shortcut("← / →", "Previous / next page")
            .shortcut("Home / End", "First / last page")
            .shortcut("Enter", "Choose items per page"),
    ]
}

impl App {
    /// Build the gallery. Without a dataset the built-in members are shown.
    pub fn new(config: Config, theme: Theme, dataset: Option<Dataset>) -> Result<App> {
        let dataset = dataset.unwrap_or_else(sample_dataset);
        let columns = gallery::columns_for(&dataset.fields);

        let mut table = TableComponent::new(dataset.rows, columns, theme.clone())?
            .show_checkboxes(config.show_checkboxes)
            .page_size(config.items_per_page)
            .title("Members")
            .on_rows_selected(|ids| tracing::info!(count = ids.len(), ids = ?ids, "rows selected"));
        if let Some(message) = &config.empty_message {
            table = table.empty_message(message.clone());
        }

        let (current, total) = table.page_info();
        let pagination = PaginationGroup::new(current, total, theme.clone())
            .with_items_per_page(config.items_per_page, config.items_per_page_options.clone());

        let sidebar = Sidebar::new(
            SidebarHeader {
                title: "Bricks".to_string(),
                description: "Component gallery".to_string(),
            },
            SidebarUser {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                initials: "JD".to_string(),
                avatar_color: None,
            },
            theme.clone(),
        )
        .main_nav_items(vec![
            NavItem::new("Members", "▦", Page::Members.href()).active(true),
            NavItem::new("Badges", "●", Page::Badges.href()),
            NavItem::new("Typography", "¶", Page::Typography.href()),
        ])
        .bottom_nav_items(vec![NavItem::new("Help", "?", "/help")])
        .is_open(config.sidebar_pinned)
        .close_delay(Duration::from_millis(config.sidebar_close_delay_ms));

        let help = HelpDialog::new(help_sections(), theme.clone());

        Ok(App {
            should_quit: false,
            config,
            theme,
            page: Page::Members,
            focus: Focus::Content,
            show_help: false,
            selected_ids: Vec::new(),
            status_message: None,
            sidebar,
            table,
            pagination,
            help,
        })
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn selected_ids(&self) -> &[String] {
        &self.selected_ids
    }

    fn focus_order(&self) -> Vec<Focus> {
        match self.page {
            Page::Members => vec![Focus::Sidebar, Focus::Content, Focus::Pagination],
            Page::Badges | Page::Typography => vec![Focus::Sidebar, Focus::Content],
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.sidebar.set_focused(focus == Focus::Sidebar);
        self.table.set_focused(focus == Focus::Content);
        self.pagination.set_focused(focus == Focus::Pagination);
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let position = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (position + 1) % order.len()
        } else {
            (position + order.len() - 1) % order.len()
        };
        self.set_focus(order[next]);
    }

    fn sync_pagination(&mut self) {
        let (current, total) = self.table.page_info();
        let page_size = self.table.model().page_size();
        self.pagination.set_state(current, total, page_size);
    }

    fn navigate(&mut self, href: &str) -> Result<Option<Action>> {
        if href == "/help" {
            self.show_help = true;
            return Ok(None);
        }
        let Some(page) = Page::from_href(href) else {
            tracing::warn!(href, "no page for nav item");
            return Ok(None);
        };
        self.sidebar.update(Action::Navigate(href.to_string()))?;
        self.page = page;
        self.set_focus(Focus::Content);
        Ok(None)
    }

    fn toggle_pin(&mut self) -> Result<Option<Action>> {
        let follow_up = self.sidebar.update(Action::ToggleSidebarPin)?;
        self.config.sidebar_pinned = self.sidebar.is_pinned();
        if let Err(err) = self.config.save() {
            tracing::warn!("could not save config: {:#}", err);
            self.status_message = Some(format!("Could not save config: {}", err));
        }
        Ok(follow_up)
    }

    fn status_line(&self) -> Line<'static> {
        if let Some(message) = &self.status_message {
            return Line::from(Span::styled(
                message.clone(),
                Style::default().fg(self.theme.badge_danger_fg),
            ));
        }
        let text = if self.selected_ids.is_empty() {
            "No rows selected".to_string()
        } else {
            format!("Selected ids: {}", self.selected_ids.join(", "))
        };
        Line::from(Span::styled(format!(" {}", text), self.theme.muted()))
    }

    fn help_line(&self) -> Line<'static> {
        let hint = match self.focus {
            Focus::Sidebar => "j/k move · Enter open · p pin",
            Focus::Content if self.page == Page::Members => {
                "j/k rows · h/l columns · space select · s sort · / filter"
            }
            Focus::Content => "Tab to move focus",
            Focus::Pagination => "←/→ page · Enter page size",
        };
        Line::from(vec![
            Span::styled(format!(" {}", hint), self.theme.disabled()),
            Span::styled("  · ? help · q quit", self.theme.disabled()),
        ])
    }
}

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.table.init()?;
        self.set_focus(self.focus);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.show_help {
            return self.help.handle_key_event(key);
        }

        // Text entry and open option lists take every key
        if self.focus == Focus::Content && self.page == Page::Members && self.table.is_filtering() {
            return self.table.handle_key_event(key);
        }
        if self.focus == Focus::Pagination && self.pagination.is_selector_open() {
            return self.pagination.handle_key_event(key);
        }

        match key.code {
            KeyCode::Char('q') => return Ok(Some(Action::Quit)),
            KeyCode::Tab => return Ok(Some(Action::FocusNext)),
            KeyCode::BackTab => return Ok(Some(Action::FocusPrev)),
            KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
            _ => {}
        }

        match self.focus {
            Focus::Sidebar => self.sidebar.handle_key_event(key),
            Focus::Content if self.page == Page::Members => self.table.handle_key_event(key),
            Focus::Content => Ok(None),
            Focus::Pagination => self.pagination.handle_key_event(key),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.show_help {
            return Ok(None);
        }
        if let Some(action) = self.sidebar.handle_mouse_event(mouse)? {
            return Ok(Some(action));
        }
        if self.page != Page::Members {
            return Ok(None);
        }
        if let Some(action) = self.pagination.handle_mouse_event(mouse)? {
            return Ok(Some(action));
        }
        self.table.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                Ok(None)
            }
            Action::Resize(_, _) => Ok(None),
            Action::FocusNext => {
                self.cycle_focus(true);
                Ok(None)
            }
            Action::FocusPrev => {
                self.cycle_focus(false);
                Ok(None)
            }
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
                self.help.update(Action::ToggleHelp)
            }

            // Sidebar
            Action::Tick | Action::SidebarEnter | Action::SidebarLeave => {
                self.sidebar.update(action)
            }
            Action::ToggleSidebarPin => self.toggle_pin(),
            Action::SidebarOpenChanged(open) => {
                tracing::debug!(open, "sidebar toggled");
                Ok(None)
            }
            Action::Navigate(href) => self.navigate(&href),

            // Table
            Action::NextRow
            | Action::PrevRow
            | Action::NextColumn
            | Action::PrevColumn
            | Action::ToggleRowSelection
            | Action::ToggleAllRows
            | Action::ToggleSort
            | Action::ToggleSortMulti
            | Action::EnterFilterMode
            | Action::ExitFilterMode
            | Action::FilterInput(_)
            | Action::FilterBackspace
            | Action::ClearFilters => {
                let follow_up = self.table.update(action)?;
                self.sync_pagination();
                Ok(follow_up)
            }
            Action::SelectionChanged(ids) => {
                self.selected_ids = ids;
                self.status_message = None;
                Ok(None)
            }

            // Pagination
            Action::GoToPage(_) => {
                self.table.update(action)?;
                self.sync_pagination();
                Ok(None)
            }
            Action::SetItemsPerPage(size) => {
                self.table.update(action.clone())?;
                self.pagination.update(action)?;
                self.sync_pagination();
                self.config.items_per_page = size;
                Ok(None)
            }
            Action::OpenItemsPerPage
            | Action::CloseItemsPerPage
            | Action::OptionUp
            | Action::OptionDown => self.pagination.update(action),
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_gallery_layout(area, self.sidebar.width());
        self.sidebar.draw(frame, layout.sidebar)?;

        match self.page {
            Page::Members => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(layout.content);
                self.table.draw(frame, chunks[0])?;
                self.pagination.draw(frame, chunks[1])?;
            }
            Page::Badges => gallery::draw_badges_page(frame, layout.content, &self.theme),
            Page::Typography => gallery::draw_typography_page(frame, layout.content, &self.theme),
        }

        frame.render_widget(Paragraph::new(self.status_line()), layout.status);
        frame.render_widget(Paragraph::new(self.help_line()), layout.help);

        if self.show_help {
            self.help.draw(frame, area)?;
        }
        Ok(())
    }
}
