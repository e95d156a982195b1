//! Model layer - state owned by the bricks
//!
//! - `cell` / `record` - values, rows and datasets
//! - `column` - declarative column definitions
//! - `table_state` - sorting, filtering, pagination and selection engine
//! - `pages` - page-number window for pagination controls
//! - `sample_data` - built-in demo rows

pub mod cell;
pub mod column;
pub mod pages;
pub mod record;
pub mod sample_data;
pub mod table_state;

pub use cell::CellValue;
pub use column::ColumnDef;
pub use pages::{page_numbers, PageItem};
pub use record::{DataRow, Dataset, Record};
pub use table_state::{CheckboxState, ColumnFilter, ColumnSort, SortDirection, TableModel};
