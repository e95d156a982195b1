//! Bricks
//!
//! Presentational bricks (`Badge`, `Text`, `Separator`, `TitleWithSubText`)
//! are ratatui widgets. Interactive bricks own their state and implement
//! [`Component`](crate::component::Component), communicating through Actions.

pub mod badge;
pub mod help_dialog;
pub mod items_per_page;
pub mod layout;
pub mod pagination;
pub mod pagination_group;
pub mod separator;
pub mod sidebar;
pub mod table;
pub mod table_row_text;
pub mod text;
pub mod title_with_sub_text;

pub use badge::{Badge, BadgeVariant};
pub use help_dialog::{HelpDialog, HelpSection};
pub use items_per_page::ItemsPerPageSelector;
pub use layout::{calculate_gallery_layout, centered_popup, GalleryLayout};
pub use pagination::{Pagination, PaginationButton};
pub use pagination_group::PaginationGroup;
pub use separator::{Orientation, Separator};
pub use sidebar::{NavItem, Sidebar, SidebarHeader, SidebarUser};
pub use table::TableComponent;
pub use table_row_text::TableRowText;
pub use text::{Text, TextColor, TextSize, TextWeight};
pub use title_with_sub_text::TitleWithSubText;
