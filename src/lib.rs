//! bricks - presentational building blocks for ratatui applications
//!
//! Each brick wraps a ratatui primitive, applies design tokens from a
//! [`Theme`](theme::Theme) and forwards its props. The [`Table`](components::TableComponent)
//! brick composes a small table-state engine (sorting, filtering, pagination,
//! row selection) with checkbox selection reporting, divider rows, a sticky
//! header and an empty state.

pub mod action;
pub mod component;
pub mod components;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod theme;

pub use action::Action;
pub use component::Component;
pub use error::{BricksError, Result};
pub use theme::Theme;
