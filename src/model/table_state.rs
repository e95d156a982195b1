//! Table-state engine
//!
//! Owns rows, columns and the sorting/filtering/pagination/selection state
//! of a table, and derives the row model from them:
//! core rows → filtered → sorted → paginated.
//!
//! Rows are addressed by their index into the data. Selection is kept as a
//! set of those indices so reported ids always come out in data order.

use super::cell::{CellKind, CellValue};
use super::column::{validate_columns, ColumnDef};
use super::record::Record;
use crate::error::{BricksError, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::BTreeSet;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSort {
    pub column_id: String,
    pub direction: SortDirection,
}

/// A filter applied to one column's values
#[derive(Debug, Clone)]
pub enum ColumnFilter {
    /// Case-insensitive substring of the displayed value
    Contains(String),
    /// Regular expression over the displayed value
    Pattern(Regex),
    /// Inclusive numeric bounds; non-numeric values never match
    Range { min: Option<f64>, max: Option<f64> },
}

impl PartialEq for ColumnFilter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ColumnFilter::Contains(a), ColumnFilter::Contains(b)) => a == b,
            (ColumnFilter::Pattern(a), ColumnFilter::Pattern(b)) => a.as_str() == b.as_str(),
            (
                ColumnFilter::Range { min: a, max: b },
                ColumnFilter::Range { min: c, max: d },
            ) => a == c && b == d,
            _ => false,
        }
    }
}

impl ColumnFilter {
    /// Parse user input: `/re/` is a pattern, `a..b`, `>=a`, `<=b` are ranges,
    /// anything else is a substring. Blank input means no filter.
    pub fn parse(input: &str) -> Result<Option<ColumnFilter>> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        if input.len() >= 2 && input.starts_with('/') && input.ends_with('/') {
            let pattern = &input[1..input.len() - 1];
            return Ok(Some(ColumnFilter::Pattern(Regex::new(pattern)?)));
        }

        if let Some(rest) = input.strip_prefix(">=") {
            if let Ok(min) = rest.trim().parse::<f64>() {
                return Ok(Some(ColumnFilter::Range { min: Some(min), max: None }));
            }
        }
        if let Some(rest) = input.strip_prefix("<=") {
            if let Ok(max) = rest.trim().parse::<f64>() {
                return Ok(Some(ColumnFilter::Range { min: None, max: Some(max) }));
            }
        }
        if let Some((lo, hi)) = input.split_once("..") {
            let min = lo.trim().parse::<f64>().ok();
            let max = hi.trim().parse::<f64>().ok();
            let lo_ok = lo.trim().is_empty() || min.is_some();
            let hi_ok = hi.trim().is_empty() || max.is_some();
            if lo_ok && hi_ok && (min.is_some() || max.is_some()) {
                return Ok(Some(ColumnFilter::Range { min, max }));
            }
        }

        Ok(Some(ColumnFilter::Contains(input.to_string())))
    }

    pub fn matches(&self, value: &CellValue) -> bool {
        match self {
            ColumnFilter::Contains(needle) => value.contains_text(needle),
            ColumnFilter::Pattern(re) => !value.is_empty() && re.is_match(&value.to_string()),
            ColumnFilter::Range { min, max } => match value.as_number() {
                Some(n) => min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m),
                None => false,
            },
        }
    }
}

/// Header checkbox state derived from the current page's selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxState {
    Checked,
    Indeterminate,
    Unchecked,
}

/// Rows, columns and their derived row model
pub struct TableModel<T> {
    data: Vec<T>,
    columns: Vec<ColumnDef<T>>,
    sorting: Vec<ColumnSort>,
    column_filters: Vec<(String, ColumnFilter)>,
    global_filter: Option<String>,
    hidden_columns: BTreeSet<String>,
    selection: BTreeSet<usize>,
    page_index: usize,
    page_size: usize,
}

impl<T: Record> TableModel<T> {
    pub fn new(data: Vec<T>, columns: Vec<ColumnDef<T>>) -> Result<Self> {
        validate_columns(&columns)?;
        Ok(Self {
            data,
            columns,
            sorting: Vec::new(),
            column_filters: Vec::new(),
            global_filter: None,
            hidden_columns: BTreeSet::new(),
            selection: BTreeSet::new(),
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Data & columns
    // ─────────────────────────────────────────────────────────────────────────

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn row(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Replace the rows. Selection refers to row positions, so it is cleared.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
        self.selection.clear();
        self.page_index = 0;
    }

    pub fn columns(&self) -> &[ColumnDef<T>] {
        &self.columns
    }

    pub fn column(&self, id: &str) -> Option<&ColumnDef<T>> {
        self.columns.iter().find(|c| c.id == id)
    }

    fn require_column(&self, id: &str) -> Result<&ColumnDef<T>> {
        self.column(id)
            .ok_or_else(|| BricksError::UnknownColumn(id.to_string()))
    }

    pub fn visible_columns(&self) -> Vec<&ColumnDef<T>> {
        self.columns
            .iter()
            .filter(|c| !self.hidden_columns.contains(&c.id))
            .collect()
    }

    pub fn set_column_visible(&mut self, id: &str, visible: bool) -> Result<()> {
        self.require_column(id)?;
        if visible {
            self.hidden_columns.remove(id);
        } else {
            self.hidden_columns.insert(id.to_string());
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sorting
    // ─────────────────────────────────────────────────────────────────────────

    pub fn sorting(&self) -> &[ColumnSort] {
        &self.sorting
    }

    pub fn can_sort(&self, id: &str) -> bool {
        self.column(id).is_some_and(|c| c.can_sort())
    }

    pub fn sort_direction(&self, id: &str) -> Option<SortDirection> {
        self.sorting
            .iter()
            .find(|s| s.column_id == id)
            .map(|s| s.direction)
    }

    /// Position of the column in a multi-column sort
    pub fn sort_index(&self, id: &str) -> Option<usize> {
        self.sorting.iter().position(|s| s.column_id == id)
    }

    /// Text columns sort ascending first, everything else descending first.
    /// Decided by the first non-empty value in the data.
    pub fn auto_sort_direction(&self, id: &str) -> SortDirection {
        let Some(column) = self.column(id) else {
            return SortDirection::Asc;
        };
        let first_kind = self
            .data
            .iter()
            .map(|row| column.value(row))
            .find_map(|value| value.kind());
        match first_kind {
            Some(CellKind::Text) | None => SortDirection::Asc,
            Some(_) => SortDirection::Desc,
        }
    }

    /// Direction the next toggle would apply; `None` means it would unsort
    fn next_sorting_order(&self, id: &str) -> Option<SortDirection> {
        let first = self.auto_sort_direction(id);
        match self.sort_direction(id) {
            None => Some(first),
            Some(current) if current != first => None,
            Some(current) => Some(current.flip()),
        }
    }

    /// Cycle a column through first direction → opposite → unsorted.
    ///
    /// Without `multi` the column replaces any other sorted columns, unless it
    /// is already the last one in the sort, in which case it is toggled in place.
    pub fn toggle_sorting(&mut self, id: &str, multi: bool) -> Result<()> {
        if !self.require_column(id)?.can_sort() {
            return Ok(());
        }

        let existing = self.sort_index(id);
        let next = self.next_sorting_order(id);

        let toggle_in_place = if multi {
            existing.is_some()
        } else {
            existing.is_some_and(|i| i + 1 == self.sorting.len())
        };

        if toggle_in_place {
            match next {
                Some(direction) => {
                    if let Some(entry) = self.sorting.iter_mut().find(|s| s.column_id == id) {
                        entry.direction = direction;
                    }
                }
                None => self.sorting.retain(|s| s.column_id != id),
            }
        } else if multi {
            self.sorting.push(ColumnSort {
                column_id: id.to_string(),
                direction: next.unwrap_or(SortDirection::Asc),
            });
        } else {
            self.sorting = vec![ColumnSort {
                column_id: id.to_string(),
                direction: next.unwrap_or(SortDirection::Asc),
            }];
        }

        tracing::debug!(column = id, multi, sorting = ?self.sorting, "sorting changed");
        Ok(())
    }

    pub fn clear_sorting(&mut self) {
        self.sorting.clear();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Filtering
    // ─────────────────────────────────────────────────────────────────────────

    pub fn column_filter(&self, id: &str) -> Option<&ColumnFilter> {
        self.column_filters
            .iter()
            .find(|(c, _)| c == id)
            .map(|(_, f)| f)
    }

    pub fn has_filters(&self) -> bool {
        !self.column_filters.is_empty() || self.global_filter.is_some()
    }

    pub fn set_column_filter(&mut self, id: &str, filter: ColumnFilter) -> Result<()> {
        self.require_column(id)?;
        match self.column_filters.iter_mut().find(|(c, _)| c == id) {
            Some(entry) => entry.1 = filter,
            None => self.column_filters.push((id.to_string(), filter)),
        }
        self.page_index = 0;
        Ok(())
    }

    pub fn clear_column_filter(&mut self, id: &str) {
        let before = self.column_filters.len();
        self.column_filters.retain(|(c, _)| c != id);
        if self.column_filters.len() != before {
            self.page_index = 0;
        }
    }

    /// Substring match against any visible column
    pub fn set_global_filter(&mut self, filter: Option<String>) {
        self.global_filter = filter.filter(|f| !f.trim().is_empty());
        self.page_index = 0;
    }

    pub fn global_filter(&self) -> Option<&str> {
        self.global_filter.as_deref()
    }

    pub fn clear_filters(&mut self) {
        self.column_filters.clear();
        self.global_filter = None;
        self.page_index = 0;
    }

    fn passes_filters(&self, row: &T) -> bool {
        let columns_pass = self.column_filters.iter().all(|(id, filter)| {
            self.column(id)
                .map_or(true, |column| filter.matches(&column.value(row)))
        });
        if !columns_pass {
            return false;
        }

        match &self.global_filter {
            Some(needle) => self
                .visible_columns()
                .iter()
                .any(|column| column.value(row).contains_text(needle)),
            None => true,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Row model
    // ─────────────────────────────────────────────────────────────────────────

    pub fn filtered_rows(&self) -> Vec<usize> {
        (0..self.data.len())
            .filter(|&i| self.passes_filters(&self.data[i]))
            .collect()
    }

    /// Filtered and sorted row indices, before pagination
    pub fn row_model(&self) -> Vec<usize> {
        let mut rows = self.filtered_rows();
        if self.sorting.is_empty() {
            return rows;
        }

        let sorters: Vec<(&ColumnDef<T>, SortDirection)> = self
            .sorting
            .iter()
            .filter_map(|s| self.column(&s.column_id).map(|c| (c, s.direction)))
            .collect();

        rows.sort_by(|&a, &b| {
            for (column, direction) in &sorters {
                let va = column.value(&self.data[a]);
                let vb = column.value(&self.data[b]);
                let ord = match (va.is_empty(), vb.is_empty()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => match direction {
                        SortDirection::Asc => va.compare(&vb),
                        SortDirection::Desc => vb.compare(&va),
                    },
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            a.cmp(&b)
        });
        rows
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────────────

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages, never less than one
    pub fn page_count(&self) -> usize {
        self.filtered_rows().len().div_ceil(self.page_size).max(1)
    }

    pub fn set_page_index(&mut self, index: usize) {
        self.page_index = index.min(self.page_count() - 1);
    }

    /// Keeps the first row of the current page on the new page
    pub fn set_page_size(&mut self, size: usize) {
        let size = size.max(1);
        let top_row = self.page_size * self.page_index;
        self.page_size = size;
        self.page_index = top_row / size;
        self.set_page_index(self.page_index);
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    pub fn next_page(&mut self) {
        self.set_page_index(self.page_index + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_page_index(self.page_index.saturating_sub(1));
    }

    /// Row indices on the current page, in display order
    pub fn page_rows(&self) -> Vec<usize> {
        let start = self.page_index * self.page_size;
        self.row_model()
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_row_selected(&self, index: usize) -> bool {
        self.selection.contains(&index)
    }

    /// Returns whether the selection changed
    pub fn set_row_selected(&mut self, index: usize, selected: bool) -> bool {
        if index >= self.data.len() {
            return false;
        }
        if selected {
            self.selection.insert(index)
        } else {
            self.selection.remove(&index)
        }
    }

    pub fn toggle_row_selected(&mut self, index: usize) -> bool {
        let selected = self.is_row_selected(index);
        self.set_row_selected(index, !selected)
    }

    pub fn is_all_page_rows_selected(&self) -> bool {
        let rows = self.page_rows();
        !rows.is_empty() && rows.iter().all(|i| self.selection.contains(i))
    }

    pub fn is_some_page_rows_selected(&self) -> bool {
        !self.is_all_page_rows_selected()
            && self.page_rows().iter().any(|i| self.selection.contains(i))
    }

    /// Select or deselect every row on the current page
    pub fn toggle_all_page_rows_selected(&mut self, selected: bool) -> bool {
        let mut changed = false;
        for index in self.page_rows() {
            changed |= self.set_row_selected(index, selected);
        }
        changed
    }

    pub fn header_checkbox_state(&self) -> CheckboxState {
        if self.is_all_page_rows_selected() {
            CheckboxState::Checked
        } else if self.is_some_page_rows_selected() {
            CheckboxState::Indeterminate
        } else {
            CheckboxState::Unchecked
        }
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = !self.selection.is_empty();
        self.selection.clear();
        changed
    }

    /// Ids of the selected rows, in data order
    pub fn selected_row_ids(&self) -> Vec<String> {
        self.selection
            .iter()
            .filter_map(|&i| self.data.get(i))
            .map(|row| row.id().to_string())
            .collect()
    }
}
