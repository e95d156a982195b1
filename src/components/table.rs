//! Table component
//!
//! Renders a [`TableModel`] with a sticky header, checkbox selection,
//! sort indicators, divider rows between data rows and an empty state.
//!
//! ```text
//! ╭──────────────────────────────────────────────╮
//! │[-]  Name ▲▼        Status ▲▼      Score ▲▼   │  ← sticky header
//! │[x]  Jane Smith     active         92         │
//! │     jane@acme.io                             │
//! │──────────────────────────────────────────────│  ← divider row
//! │[ ]  Bob Stone      invited        71         │
//! │1 of 2 row(s) selected.                       │  ← footer
//! ╰──────────────────────────────────────────────╯
//! ```

use crate::action::Action;
use crate::component::Component;
use crate::model::record::Record;
use crate::model::table_state::{CheckboxState, ColumnFilter, SortDirection, TableModel};
use crate::model::ColumnDef;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const DEFAULT_EMPTY_MESSAGE: &str = "No results.";

/// Called with the selected row ids, in data order, after every selection change
pub type SelectionCallback = Box<dyn FnMut(&[String])>;

const CHECKBOX_WIDTH: u16 = 3;
const COLUMN_GAP: u16 = 2;
const SORT_ICON_WIDTH: u16 = 3;
const MAX_NATURAL_WIDTH: u16 = 40;
const MIN_COLUMN_WIDTH: u16 = 3;

/// Where a data row landed in the body, in content lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowSpan {
    top: usize,
    height: usize,
    index: usize,
}

/// A header cell's horizontal extent; `None` is the checkbox column
#[derive(Debug, Clone)]
struct ColumnSpan {
    x: u16,
    width: u16,
    column_id: Option<String>,
}

pub struct TableComponent<T> {
    model: TableModel<T>,
    show_checkboxes: bool,
    empty_message: Option<String>,
    on_rows_selected: Option<SelectionCallback>,
    title: Option<String>,
    theme: Theme,
    /// Position within the current page
    cursor: usize,
    /// Position within the visible columns
    focused_column: usize,
    scroll: usize,
    /// Filter being typed for the focused column
    filter_input: Option<String>,
    filter_error: Option<String>,
    focused: bool,
    header_area: Rect,
    body_area: Rect,
    column_spans: Vec<ColumnSpan>,
    row_spans: Vec<RowSpan>,
}

impl<T: Record> TableComponent<T> {
    pub fn new(data: Vec<T>, columns: Vec<ColumnDef<T>>, theme: Theme) -> crate::Result<Self> {
        Ok(Self {
            model: TableModel::new(data, columns)?,
            show_checkboxes: true,
            empty_message: None,
            on_rows_selected: None,
            title: None,
            theme,
            cursor: 0,
            focused_column: 0,
            scroll: 0,
            filter_input: None,
            filter_error: None,
            focused: false,
            header_area: Rect::default(),
            body_area: Rect::default(),
            column_spans: Vec::new(),
            row_spans: Vec::new(),
        })
    }

    pub fn show_checkboxes(mut self, show: bool) -> Self {
        self.show_checkboxes = show;
        self
    }

    /// Message for the empty state; falls back to "No results."
    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = Some(message.into());
        self
    }

    pub fn on_rows_selected(mut self, callback: impl FnMut(&[String]) + 'static) -> Self {
        self.on_rows_selected = Some(Box::new(callback));
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.model.set_page_size(size);
        self
    }

    pub fn model(&self) -> &TableModel<T> {
        &self.model
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_filtering(&self) -> bool {
        self.filter_input.is_some()
    }

    /// 1-based page and page count, for a pagination bar
    pub fn page_info(&self) -> (usize, usize) {
        (self.model.page_index() + 1, self.model.page_count())
    }

    fn message(&self) -> &str {
        self.empty_message.as_deref().unwrap_or(DEFAULT_EMPTY_MESSAGE)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // State changes that report selection
    // ─────────────────────────────────────────────────────────────────────────

    fn notify_selection(&mut self) -> Option<Action> {
        let ids = self.model.selected_row_ids();
        tracing::debug!(selected = ids.len(), "row selection changed");
        if let Some(callback) = self.on_rows_selected.as_mut() {
            callback(&ids);
        }
        Some(Action::SelectionChanged(ids))
    }

    /// Replace the rows; selection is cleared and reported
    pub fn set_data(&mut self, data: Vec<T>) -> Option<Action> {
        self.model.set_data(data);
        self.cursor = 0;
        self.scroll = 0;
        self.notify_selection()
    }

    pub fn set_row_selected(&mut self, index: usize, selected: bool) -> Option<Action> {
        if self.model.set_row_selected(index, selected) {
            self.notify_selection()
        } else {
            None
        }
    }

    pub fn toggle_row_selected(&mut self, index: usize) -> Option<Action> {
        let selected = !self.model.is_row_selected(index);
        self.set_row_selected(index, selected)
    }

    pub fn toggle_all_page_rows_selected(&mut self, selected: bool) -> Option<Action> {
        if self.model.toggle_all_page_rows_selected(selected) {
            self.notify_selection()
        } else {
            None
        }
    }

    pub fn toggle_sorting(&mut self, column_id: &str, multi: bool) -> crate::Result<()> {
        self.model.toggle_sorting(column_id, multi)?;
        self.reset_view();
        Ok(())
    }

    pub fn set_column_filter(&mut self, column_id: &str, filter: ColumnFilter) -> crate::Result<()> {
        self.model.set_column_filter(column_id, filter)?;
        self.reset_view();
        Ok(())
    }

    pub fn set_global_filter(&mut self, filter: Option<String>) {
        self.model.set_global_filter(filter);
        self.reset_view();
    }

    pub fn clear_filters(&mut self) {
        self.model.clear_filters();
        self.filter_input = None;
        self.filter_error = None;
        self.reset_view();
    }

    /// 0-based page
    pub fn set_page_index(&mut self, index: usize) {
        self.model.set_page_index(index);
        self.reset_view();
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.model.set_page_size(size);
        self.reset_view();
    }

    fn reset_view(&mut self) {
        self.cursor = 0;
        self.scroll = 0;
    }

    fn focused_column_id(&self) -> Option<String> {
        self.model
            .visible_columns()
            .get(self.focused_column)
            .map(|c| c.id.clone())
    }

    fn cursor_row(&self) -> Option<usize> {
        self.model.page_rows().get(self.cursor).copied()
    }

    fn apply_filter_input(&mut self) {
        let (Some(column_id), Some(input)) = (self.focused_column_id(), self.filter_input.clone())
        else {
            return;
        };
        match ColumnFilter::parse(&input) {
            Ok(Some(filter)) => {
                self.filter_error = None;
                if let Err(err) = self.set_column_filter(&column_id, filter) {
                    tracing::warn!(column = %column_id, "cannot filter column: {}", err);
                }
            }
            Ok(None) => {
                self.filter_error = None;
                self.model.clear_column_filter(&column_id);
                self.reset_view();
            }
            // Half-typed patterns keep the last valid filter
            Err(err) => self.filter_error = Some(err.to_string()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Layout
    // ─────────────────────────────────────────────────────────────────────────

    fn column_widths(&self, available: u16) -> Vec<u16> {
        let columns = self.model.visible_columns();
        let page = self.model.page_rows();
        let mut widths: Vec<u16> = columns
            .iter()
            .map(|column| {
                if let Some(width) = column.width {
                    return width.clamp(1, available.max(MIN_COLUMN_WIDTH));
                }
                let icon = if column.can_sort() { SORT_ICON_WIDTH } else { 0 };
                let header = column.header.width() as u16 + icon;
                let cells = page
                    .iter()
                    .filter_map(|&i| self.model.row(i))
                    .map(|row| column.render(row, &self.theme).width() as u16)
                    .max()
                    .unwrap_or(0);
                header.max(cells).clamp(1, MAX_NATURAL_WIDTH)
            })
            .collect();

        let checkbox = if self.show_checkboxes {
            CHECKBOX_WIDTH + COLUMN_GAP
        } else {
            0
        };
        let fixed = checkbox as usize + COLUMN_GAP as usize * widths.len().saturating_sub(1);
        let mut total = fixed + widths.iter().map(|w| *w as usize).sum::<usize>();
        let available = available as usize;

        // Shrink the widest column one step at a time until everything fits
        while total > available {
            let Some((widest, _)) = widths
                .iter()
                .enumerate()
                .filter(|(_, w)| **w > MIN_COLUMN_WIDTH)
                .max_by_key(|(_, w)| **w)
            else {
                break;
            };
            widths[widest] -= 1;
            total -= 1;
        }
        widths
    }

    fn total_width(&self, widths: &[u16]) -> usize {
        let checkbox = if self.show_checkboxes {
            (CHECKBOX_WIDTH + COLUMN_GAP) as usize
        } else {
            0
        };
        checkbox
            + widths.iter().map(|w| *w as usize).sum::<usize>()
            + (COLUMN_GAP as usize) * widths.len().saturating_sub(1)
    }

    fn checkbox_symbol(state: CheckboxState) -> &'static str {
        match state {
            CheckboxState::Checked => "[x]",
            CheckboxState::Indeterminate => "[-]",
            CheckboxState::Unchecked => "[ ]",
        }
    }

    fn sort_icon(&self, direction: Option<SortDirection>) -> Vec<Span<'static>> {
        let bright = Style::default().fg(self.theme.table_header_text);
        let dim = Style::default().fg(self.theme.neutral_400);
        let (up, down) = match direction {
            None => (bright, bright),
            Some(SortDirection::Asc) => (bright.add_modifier(Modifier::BOLD), dim),
            Some(SortDirection::Desc) => (dim, bright.add_modifier(Modifier::BOLD)),
        };
        vec![Span::raw(" "), Span::styled("▲", up), Span::styled("▼", down)]
    }

    fn header_line(&self, widths: &[u16]) -> Line<'static> {
        let mut spans = Vec::new();
        if self.show_checkboxes {
            spans.push(Span::raw(Self::checkbox_symbol(
                self.model.header_checkbox_state(),
            )));
            spans.push(Span::raw(" ".repeat(COLUMN_GAP as usize)));
        }

        for (j, (column, width)) in self
            .model
            .visible_columns()
            .into_iter()
            .zip(widths)
            .enumerate()
        {
            if j > 0 {
                spans.push(Span::raw(" ".repeat(COLUMN_GAP as usize)));
            }
            let mut label_style = Style::default().add_modifier(Modifier::BOLD);
            if self.focused && j == self.focused_column {
                label_style = label_style.add_modifier(Modifier::UNDERLINED);
            }
            let mut label = column.header.clone();
            if self.model.column_filter(&column.id).is_some() {
                label.push('*');
            }

            let mut cell = vec![Span::styled(label, label_style)];
            if column.can_sort() {
                cell.extend(self.sort_icon(self.model.sort_direction(&column.id)));
            }
            spans.extend(fit_line(&Line::from(cell), *width as usize));
        }
        Line::from(spans)
    }

    /// Body lines plus where each data row landed
    fn body_lines(&self, widths: &[u16]) -> (Vec<Line<'static>>, Vec<RowSpan>) {
        let page = self.model.page_rows();
        let total_width = self.total_width(widths);

        if page.is_empty() {
            let message = fit_str(self.message(), total_width);
            let pad = total_width.saturating_sub(message.width()) / 2;
            let line = Line::from(vec![
                Span::raw(" ".repeat(pad)),
                Span::styled(message, self.theme.muted()),
            ]);
            return (vec![line], Vec::new());
        }

        let columns = self.model.visible_columns();
        let divider = Line::from(Span::styled(
            "─".repeat(total_width),
            Style::default().fg(self.theme.table_divider),
        ));
        let mut lines = Vec::new();
        let mut spans = Vec::with_capacity(page.len());

        for (position, &index) in page.iter().enumerate() {
            let Some(row) = self.model.row(index) else {
                continue;
            };
            if position > 0 {
                lines.push(divider.clone());
            }

            let cells: Vec<Text<'static>> = columns
                .iter()
                .map(|column| column.render(row, &self.theme))
                .collect();
            let height = cells.iter().map(|c| c.lines.len()).max().unwrap_or(1).max(1);

            let selected = self.model.is_row_selected(index);
            let mut row_style = Style::default();
            if selected {
                row_style = row_style.patch(self.theme.selected_row());
            }
            if self.focused && position == self.cursor {
                row_style = row_style.patch(self.theme.focused_row());
            }

            spans.push(RowSpan {
                top: lines.len(),
                height,
                index,
            });
            for line_no in 0..height {
                let mut line_spans = Vec::new();
                if self.show_checkboxes {
                    let checkbox = if line_no == 0 {
                        Self::checkbox_symbol(if selected {
                            CheckboxState::Checked
                        } else {
                            CheckboxState::Unchecked
                        })
                    } else {
                        "   "
                    };
                    line_spans.push(Span::raw(checkbox));
                    line_spans.push(Span::raw(" ".repeat(COLUMN_GAP as usize)));
                }
                for (j, (cell, width)) in cells.iter().zip(widths).enumerate() {
                    if j > 0 {
                        line_spans.push(Span::raw(" ".repeat(COLUMN_GAP as usize)));
                    }
                    match cell.lines.get(line_no) {
                        Some(line) => line_spans.extend(fit_line(line, *width as usize)),
                        None => line_spans.push(Span::raw(" ".repeat(*width as usize))),
                    }
                }
                lines.push(Line::from(line_spans).style(row_style));
            }
        }
        (lines, spans)
    }

    fn footer_line(&self) -> Line<'static> {
        let filtered = self.model.filtered_rows();
        let selected = filtered
            .iter()
            .filter(|i| self.model.is_row_selected(**i))
            .count();
        let filtered = filtered.len();
        let mut spans = vec![Span::styled(
            format!("{} of {} row(s) selected.", selected, filtered),
            self.theme.muted(),
        )];

        if let Some(input) = &self.filter_input {
            let header = self
                .model
                .visible_columns()
                .get(self.focused_column)
                .map(|c| c.header.clone())
                .unwrap_or_default();
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("Filter {}: {}█", header, input),
                Style::default().fg(self.theme.accent),
            ));
            if let Some(err) = &self.filter_error {
                spans.push(Span::styled(
                    format!("  {}", err.lines().next().unwrap_or_default()),
                    Style::default().fg(self.theme.badge_danger_fg),
                ));
            }
        } else if self.model.has_filters() {
            spans.push(Span::styled("  filtered (x to clear)", self.theme.muted()));
        }
        Line::from(spans)
    }

    fn keep_cursor_visible(&mut self, rows: &[RowSpan], visible_height: usize) {
        let Some(span) = rows.get(self.cursor) else {
            return;
        };
        if span.top < self.scroll {
            self.scroll = span.top;
        } else if span.top + span.height > self.scroll + visible_height {
            self.scroll = (span.top + span.height).saturating_sub(visible_height);
        }
    }
}

impl<T: Record> Component for TableComponent<T> {
    /// Reports the initial selection, like a mount
    fn init(&mut self) -> Result<()> {
        self.notify_selection();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.filter_input.is_some() {
            let action = match key.code {
                KeyCode::Esc | KeyCode::Enter => Some(Action::ExitFilterMode),
                KeyCode::Backspace => Some(Action::FilterBackspace),
                KeyCode::Char(c) => Some(Action::FilterInput(c)),
                _ => None,
            };
            return Ok(action);
        }

        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextColumn),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevColumn),
            KeyCode::Char(' ') if self.show_checkboxes => Some(Action::ToggleRowSelection),
            KeyCode::Char('a') if self.show_checkboxes => Some(Action::ToggleAllRows),
            KeyCode::Char('s') | KeyCode::Enter => Some(Action::ToggleSort),
            KeyCode::Char('S') => Some(Action::ToggleSortMulti),
            KeyCode::Char('/') => Some(Action::EnterFilterMode),
            KeyCode::Char('x') => Some(Action::ClearFilters),
            KeyCode::Char(']') if self.model.can_next_page() => {
                Some(Action::GoToPage(self.model.page_index() + 2))
            }
            KeyCode::Char('[') if self.model.can_previous_page() => {
                Some(Action::GoToPage(self.model.page_index()))
            }
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let position = Position::new(mouse.column, mouse.row);
        let column = self
            .column_spans
            .iter()
            .find(|span| mouse.column >= span.x && mouse.column < span.x + span.width)
            .map(|span| span.column_id.clone());

        if self.header_area.contains(position) {
            return Ok(match column {
                Some(None) => self.toggle_all_page_rows_selected(
                    self.model.header_checkbox_state() != CheckboxState::Checked,
                ),
                Some(Some(id)) => {
                    if self.model.can_sort(&id) {
                        self.toggle_sorting(&id, false)?;
                    }
                    None
                }
                None => None,
            });
        }

        if self.body_area.contains(position) {
            let line = (mouse.row - self.body_area.y) as usize + self.scroll;
            let hit = self
                .row_spans
                .iter()
                .enumerate()
                .find(|(_, span)| line >= span.top && line < span.top + span.height)
                .map(|(position, span)| (position, span.index));
            if let Some((position, index)) = hit {
                self.cursor = position;
                if matches!(column, Some(None)) {
                    return Ok(self.toggle_row_selected(index));
                }
            }
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextRow => {
                let rows = self.model.page_rows().len();
                if self.cursor + 1 < rows {
                    self.cursor += 1;
                }
            }
            Action::PrevRow => self.cursor = self.cursor.saturating_sub(1),
            Action::NextColumn => {
                let columns = self.model.visible_columns().len();
                if self.focused_column + 1 < columns {
                    self.focused_column += 1;
                }
            }
            Action::PrevColumn => self.focused_column = self.focused_column.saturating_sub(1),
            Action::ToggleRowSelection => {
                if let Some(index) = self.cursor_row() {
                    return Ok(self.toggle_row_selected(index));
                }
            }
            Action::ToggleAllRows => {
                let select = self.model.header_checkbox_state() != CheckboxState::Checked;
                return Ok(self.toggle_all_page_rows_selected(select));
            }
            Action::ToggleSort | Action::ToggleSortMulti => {
                if let Some(id) = self.focused_column_id() {
                    if self.model.can_sort(&id) {
                        self.toggle_sorting(&id, action == Action::ToggleSortMulti)?;
                    }
                }
            }
            Action::EnterFilterMode => {
                let current = self
                    .focused_column_id()
                    .and_then(|id| self.model.column_filter(&id).map(filter_text))
                    .unwrap_or_default();
                self.filter_input = Some(current);
                self.filter_error = None;
            }
            Action::ExitFilterMode => {
                self.filter_input = None;
                self.filter_error = None;
            }
            Action::FilterInput(c) => {
                if let Some(input) = self.filter_input.as_mut() {
                    input.push(c);
                }
                self.apply_filter_input();
            }
            Action::FilterBackspace => {
                if let Some(input) = self.filter_input.as_mut() {
                    input.pop();
                }
                self.apply_filter_input();
            }
            Action::ClearFilters => self.clear_filters(),
            Action::GoToPage(page) => self.set_page_index(page.saturating_sub(1)),
            Action::SetItemsPerPage(size) => self.set_page_size(size),
            _ => {}
        }
        Ok(None)
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let border = if self.focused {
            self.theme.accent
        } else {
            self.theme.neutral_200
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));
        if let Some(title) = &self.title {
            block = block.title(format!(" {} ", title));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 3 || inner.width == 0 {
            // Too small for any clickable part
            self.header_area = Rect::default();
            self.body_area = Rect::default();
            self.row_spans.clear();
            self.column_spans.clear();
            return Ok(());
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);
        let (header_area, body_area, footer_area) = (chunks[0], chunks[1], chunks[2]);

        // One column is kept free for the scrollbar
        let widths = self.column_widths(inner.width.saturating_sub(1));
        let header = self.header_line(&widths);
        frame.render_widget(
            Paragraph::new(header).style(self.theme.table_header()),
            header_area,
        );

        let (lines, rows) = self.body_lines(&widths);
        let visible_height = body_area.height as usize;
        let total = lines.len();
        self.scroll = self.scroll.min(total.saturating_sub(visible_height));
        self.keep_cursor_visible(&rows, visible_height);

        frame.render_widget(
            Paragraph::new(lines).scroll((self.scroll as u16, 0)),
            body_area,
        );

        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                body_area,
                &mut scrollbar_state,
            );
        }

        frame.render_widget(Paragraph::new(self.footer_line()), footer_area);

        // Geometry for mouse hit-testing
        self.header_area = header_area;
        self.body_area = body_area;
        self.row_spans = rows;
        self.column_spans.clear();
        let mut x = inner.x;
        if self.show_checkboxes {
            self.column_spans.push(ColumnSpan {
                x,
                width: CHECKBOX_WIDTH,
                column_id: None,
            });
            x += CHECKBOX_WIDTH + COLUMN_GAP;
        }
        for (column, width) in self.model.visible_columns().iter().zip(&widths) {
            self.column_spans.push(ColumnSpan {
                x,
                width: *width,
                column_id: Some(column.id.clone()),
            });
            x = x.saturating_add(width + COLUMN_GAP);
        }
        Ok(())
    }
}

/// Text to pre-fill the filter input with
fn filter_text(filter: &ColumnFilter) -> String {
    match filter {
        ColumnFilter::Contains(text) => text.clone(),
        ColumnFilter::Pattern(re) => format!("/{}/", re.as_str()),
        ColumnFilter::Range { min, max } => match (min, max) {
            (Some(min), None) => format!(">={}", min),
            (None, Some(max)) => format!("<={}", max),
            (min, max) => format!(
                "{}..{}",
                min.map(|m| m.to_string()).unwrap_or_default(),
                max.map(|m| m.to_string()).unwrap_or_default()
            ),
        },
    }
}

/// Clip a plain string to `width` columns, ending in … when cut
fn fit_str(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    if width > 0 {
        out.push('…');
    }
    out
}

/// Clip a styled line to exactly `width` columns, keeping span styles
fn fit_line(line: &Line<'_>, width: usize) -> Vec<Span<'static>> {
    let truncate = line.width() > width;
    let budget = if truncate { width.saturating_sub(1) } else { width };
    let mut out = Vec::new();
    let mut used = 0;

    'spans: for span in &line.spans {
        let style = line.style.patch(span.style);
        let mut text = String::new();
        for ch in span.content.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > budget {
                if !text.is_empty() {
                    out.push(Span::styled(text, style));
                }
                break 'spans;
            }
            used += w;
            text.push(ch);
        }
        if !text.is_empty() {
            out.push(Span::styled(text, style));
        }
    }

    if truncate && width > 0 {
        out.push(Span::raw("…"));
        used += 1;
    }
    if used < width {
        out.push(Span::raw(" ".repeat(width - used)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::table_row_text::TableRowText;
    use crate::model::record::DataRow;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn rows(n: usize) -> Vec<DataRow> {
        (0..n)
            .map(|i| {
                DataRow::new(format!("r{}", i))
                    .with("name", format!("Person {}", i))
                    .with("score", (i * 10) as f64)
            })
            .collect()
    }

    fn columns() -> Vec<ColumnDef<DataRow>> {
        vec![
            ColumnDef::field("name", "Name"),
            ColumnDef::field("score", "Score"),
        ]
    }

    fn table(n: usize) -> TableComponent<DataRow> {
        TableComponent::new(rows(n), columns(), Theme::default()).unwrap()
    }

    fn render(table: &mut TableComponent<DataRow>, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| table.draw(frame, frame.area()).unwrap())
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_dividers_between_rows_only() {
        let t = table(3);
        let widths = t.column_widths(60);
        let (lines, spans) = t.body_lines(&widths);
        assert_eq!(lines.len(), 5);
        assert_eq!(spans.iter().map(|s| s.top).collect::<Vec<_>>(), vec![0, 2, 4]);
        assert!(!lines[4].to_string().contains('─'));
    }

    #[test]
    fn test_empty_state_single_row() {
        let t = table(0);
        let (lines, spans) = t.body_lines(&t.column_widths(60));
        assert_eq!(lines.len(), 1);
        assert!(spans.is_empty());
        assert!(lines[0].to_string().contains(DEFAULT_EMPTY_MESSAGE));

        let custom = table(0).empty_message("Nothing here");
        let (lines, _) = custom.body_lines(&custom.column_widths(60));
        assert!(lines[0].to_string().contains("Nothing here"));
    }

    #[test]
    fn test_toggle_all_reports_page_ids_in_data_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut t = table(3).on_rows_selected(move |ids| *sink.borrow_mut() = ids.to_vec());
        t.toggle_sorting("score", false).unwrap();
        t.toggle_sorting("score", false).unwrap();

        let action = t.update(Action::ToggleAllRows).unwrap();
        let expected = vec!["r0".to_string(), "r1".to_string(), "r2".to_string()];
        assert_eq!(action, Some(Action::SelectionChanged(expected.clone())));
        assert_eq!(*seen.borrow(), expected);

        t.set_row_selected(1, false);
        assert_eq!(*seen.borrow(), vec!["r0".to_string(), "r2".to_string()]);
    }

    #[test]
    fn test_space_toggles_cursor_row() {
        let mut t = table(3);
        assert_eq!(t.handle_key_event(key(KeyCode::Char('j'))).unwrap(), Some(Action::NextRow));
        t.update(Action::NextRow).unwrap();
        let action = t.update(Action::ToggleRowSelection).unwrap();
        assert_eq!(action, Some(Action::SelectionChanged(vec!["r1".to_string()])));
        assert_eq!(t.model().header_checkbox_state(), CheckboxState::Indeterminate);
    }

    #[test]
    fn test_hidden_checkboxes() {
        let mut t = table(2).show_checkboxes(false);
        assert_eq!(t.handle_key_event(key(KeyCode::Char(' '))).unwrap(), None);
        let screen = render(&mut t, 50, 8).join("\n");
        assert!(!screen.contains("[ ]"));
        assert!(screen.contains("Person 0"));
    }

    #[test]
    fn test_set_data_clears_and_reports() {
        let mut t = table(3);
        t.toggle_row_selected(0);
        assert_eq!(t.set_data(rows(2)), Some(Action::SelectionChanged(Vec::new())));
        assert!(t.model().selected_row_ids().is_empty());
    }

    #[test]
    fn test_sort_cycle_from_keys() {
        let mut t = table(3);
        // Name is text: ascending first
        t.update(Action::ToggleSort).unwrap();
        assert_eq!(t.model().sort_direction("name"), Some(SortDirection::Asc));
        t.update(Action::ToggleSort).unwrap();
        assert_eq!(t.model().sort_direction("name"), Some(SortDirection::Desc));
        t.update(Action::ToggleSort).unwrap();
        assert_eq!(t.model().sort_direction("name"), None);
    }

    #[test]
    fn test_filter_input_narrows_rows() {
        let mut t = table(12);
        t.update(Action::EnterFilterMode).unwrap();
        assert!(t.is_filtering());
        for c in "son 1".chars() {
            t.update(Action::FilterInput(c)).unwrap();
        }
        // Person 1, Person 10, Person 11
        assert_eq!(t.model().filtered_rows(), vec![1, 10, 11]);

        assert_eq!(
            t.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::ExitFilterMode)
        );
        t.update(Action::ExitFilterMode).unwrap();
        t.update(Action::ClearFilters).unwrap();
        assert_eq!(t.model().filtered_rows().len(), 12);
    }

    #[test]
    fn test_invalid_pattern_keeps_previous_filter() {
        let mut t = table(5);
        t.update(Action::EnterFilterMode).unwrap();
        for c in "/[".chars() {
            t.update(Action::FilterInput(c)).unwrap();
        }
        assert!(t.filter_error.is_none());
        t.update(Action::FilterInput('/')).unwrap();
        assert!(t.filter_error.is_some());
        assert_eq!(
            t.model().column_filter("name"),
            Some(&ColumnFilter::Contains("/[".to_string()))
        );
    }

    #[test]
    fn test_footer_counts_selection_within_filter() {
        let mut t = table(10);
        t.update(Action::ToggleAllRows).unwrap();
        assert_eq!(t.model().selected_row_ids().len(), 10);
        t.set_column_filter("name", ColumnFilter::Contains("Person 1".to_string()))
            .unwrap();
        assert_eq!(t.model().filtered_rows(), vec![1]);
        assert!(t
            .footer_line()
            .to_string()
            .starts_with("1 of 1 row(s) selected."));

        t.clear_filters();
        assert!(t
            .footer_line()
            .to_string()
            .starts_with("10 of 10 row(s) selected."));
    }

    #[test]
    fn test_huge_explicit_widths_fit() {
        let columns = vec![
            ColumnDef::field("name", "Name").width(40000),
            ColumnDef::field("score", "Score").width(40000),
        ];
        let t = TableComponent::new(rows(2), columns, Theme::default()).unwrap();
        let widths = t.column_widths(60);
        assert!(t.total_width(&widths) <= 60);
        assert!(widths.iter().all(|w| *w >= MIN_COLUMN_WIDTH));
    }

    #[test]
    fn test_tiny_area_clears_hit_areas() {
        let mut t = table(3);
        render(&mut t, 60, 12);
        assert!(!t.row_spans.is_empty());

        render(&mut t, 60, 4);
        assert!(t.row_spans.is_empty());
        assert!(t.column_spans.is_empty());
        assert_eq!(t.handle_mouse_event(click(2, 1)).unwrap(), None);
        assert!(t.model().selected_row_ids().is_empty());
    }

    #[test]
    fn test_page_actions() {
        let mut t = table(25);
        assert_eq!(t.page_info(), (1, 3));
        assert_eq!(
            t.handle_key_event(key(KeyCode::Char(']'))).unwrap(),
            Some(Action::GoToPage(2))
        );
        t.update(Action::GoToPage(3)).unwrap();
        assert_eq!(t.model().page_rows().len(), 5);
        t.update(Action::SetItemsPerPage(50)).unwrap();
        assert_eq!(t.page_info(), (1, 1));
    }

    #[test]
    fn test_draw_header_and_sort_icons() {
        let mut t = table(2);
        let screen = render(&mut t, 60, 10);
        assert!(screen[1].contains("[ ]"));
        assert!(screen[1].contains("Name ▲▼"));
        assert!(screen[2].contains("Person 0"));
        assert!(screen[3].contains('─'));
        assert!(screen[8].contains("0 of 2 row(s) selected."));
    }

    #[test]
    fn test_click_header_checkbox_and_column() {
        let mut t = table(3);
        render(&mut t, 60, 12);
        // header row is just inside the border
        let action = t.handle_mouse_event(click(2, 1)).unwrap();
        assert_eq!(
            action,
            Some(Action::SelectionChanged(vec![
                "r0".to_string(),
                "r1".to_string(),
                "r2".to_string()
            ]))
        );

        let name_x = t.column_spans[1].x;
        t.handle_mouse_event(click(name_x, 1)).unwrap();
        assert_eq!(t.model().sort_direction("name"), Some(SortDirection::Asc));
    }

    #[test]
    fn test_click_row_checkbox() {
        let mut t = table(3);
        render(&mut t, 60, 12);
        // second data row starts after a divider: body line 2
        let action = t.handle_mouse_event(click(2, 4)).unwrap();
        assert_eq!(action, Some(Action::SelectionChanged(vec!["r1".to_string()])));
        assert_eq!(t.cursor(), 1);
    }

    #[test]
    fn test_multi_line_cells() {
        let columns = vec![ColumnDef::new("member", "Member")
            .accessor_key("name")
            .cell(|row: &DataRow, theme| {
                TableRowText::new(row.field("name").to_string())
                    .sub_text(format!("{}@acme.io", row.id()))
                    .into_text(theme)
            })];
        let t = TableComponent::new(rows(2), columns, Theme::default()).unwrap();
        let (lines, spans) = t.body_lines(&t.column_widths(40));
        // two lines per row plus one divider
        assert_eq!(lines.len(), 5);
        assert_eq!(spans[1].top, 3);
        assert!(lines[1].to_string().contains("r0@acme.io"));
    }

    #[test]
    fn test_fit_line_truncates_and_pads() {
        let line = Line::from(vec![Span::raw("Hello"), Span::raw(" world")]);
        let fitted: String = fit_line(&line, 8).iter().map(|s| s.content.to_string()).collect();
        assert_eq!(fitted, "Hello w…");
        let padded: String = fit_line(&Line::from("ab"), 4)
            .iter()
            .map(|s| s.content.to_string())
            .collect();
        assert_eq!(padded, "ab  ");
        assert_eq!(fit_str("abcdef", 4), "abc…");
    }
}
