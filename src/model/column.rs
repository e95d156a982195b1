//! Column definitions

use super::cell::CellValue;
use super::record::Record;
use crate::error::{BricksError, Result};
use crate::theme::Theme;
use ratatui::text::Text;
use std::collections::HashSet;
use std::fmt;

/// Computes a column's value from a row
pub type Accessor<T> = Box<dyn Fn(&T) -> CellValue>;

/// Renders a column's cell for a row; may span several lines
pub type CellRenderer<T> = Box<dyn Fn(&T, &Theme) -> Text<'static>>;

enum Access<T> {
    None,
    Key(String),
    Fn(Accessor<T>),
}

/// One column of a table. Columns render in the order they are given.
pub struct ColumnDef<T> {
    pub id: String,
    pub header: String,
    access: Access<T>,
    cell: Option<CellRenderer<T>>,
    enable_sorting: Option<bool>,
    pub width: Option<u16>,
}

impl<T: Record> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("has_accessor", &self.has_accessor())
            .field("has_cell", &self.cell.is_some())
            .field("enable_sorting", &self.enable_sorting)
            .field("width", &self.width)
            .finish()
    }
}

impl<T: Record> ColumnDef<T> {
    /// A display-only column. Give it an accessor to make it sortable and filterable.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            access: Access::None,
            cell: None,
            enable_sorting: None,
            width: None,
        }
    }

    /// Column whose value is the row field named like the column id
    pub fn field(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(id.clone(), header).accessor_key(id)
    }

    pub fn accessor_key(mut self, key: impl Into<String>) -> Self {
        self.access = Access::Key(key.into());
        self
    }

    pub fn accessor(mut self, f: impl Fn(&T) -> CellValue + 'static) -> Self {
        self.access = Access::Fn(Box::new(f));
        self
    }

    pub fn cell(mut self, f: impl Fn(&T, &Theme) -> Text<'static> + 'static) -> Self {
        self.cell = Some(Box::new(f));
        self
    }

    pub fn sortable(mut self, enable: bool) -> Self {
        self.enable_sorting = Some(enable);
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn has_accessor(&self) -> bool {
        !matches!(self.access, Access::None)
    }

    /// Sortable unless disabled, and only when there is a value to sort by
    pub fn can_sort(&self) -> bool {
        self.enable_sorting.unwrap_or(true) && self.has_accessor()
    }

    pub fn value(&self, row: &T) -> CellValue {
        match &self.access {
            Access::None => CellValue::Empty,
            Access::Key(key) => row.field(key),
            Access::Fn(f) => f(row),
        }
    }

    pub fn render(&self, row: &T, theme: &Theme) -> Text<'static> {
        match &self.cell {
            Some(render) => render(row, theme),
            None => Text::raw(self.value(row).to_string()),
        }
    }
}

/// Column ids must be unique
pub fn validate_columns<T>(columns: &[ColumnDef<T>]) -> Result<()> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.id.as_str()) {
            return Err(BricksError::DuplicateColumn(column.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::DataRow;

    fn row() -> DataRow {
        DataRow::new("1").with("name", "John Doe").with("age", 30)
    }

    #[test]
    fn test_field_column() {
        let column: ColumnDef<DataRow> = ColumnDef::field("name", "Name");
        assert!(column.can_sort());
        assert_eq!(column.value(&row()), CellValue::from("John Doe"));
        assert_eq!(column.render(&row(), &Theme::default()).to_string(), "John Doe");
    }

    #[test]
    fn test_display_only_column_cannot_sort() {
        let column: ColumnDef<DataRow> = ColumnDef::new("actions", "Actions").sortable(true);
        assert!(!column.can_sort());
        assert_eq!(column.value(&row()), CellValue::Empty);
    }

    #[test]
    fn test_sorting_disabled() {
        let column: ColumnDef<DataRow> = ColumnDef::field("name", "Name").sortable(false);
        assert!(!column.can_sort());
    }

    #[test]
    fn test_custom_accessor_and_cell() {
        let column: ColumnDef<DataRow> = ColumnDef::new("actions", "Actions")
            .accessor(|r: &DataRow| CellValue::from(r.id.clone()))
            .cell(|r, _| Text::raw(format!("Edit {}", r.id)));
        assert_eq!(column.value(&row()), CellValue::from("1"));
        assert_eq!(column.render(&row(), &Theme::default()).to_string(), "Edit 1");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let columns: Vec<ColumnDef<DataRow>> =
            vec![ColumnDef::field("name", "Name"), ColumnDef::field("name", "Again")];
        assert!(matches!(
            validate_columns(&columns),
            Err(BricksError::DuplicateColumn(id)) if id == "name"
        ));
    }
}
