//! Action enum - All possible component actions
//!
//! Bricks emit Actions in response to events, and whoever owns them
//! (usually the application root) routes them back through `update`.

use std::fmt;

/// All possible actions emitted or consumed by the bricks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for timers
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit the application
    Quit,
    /// Move keyboard focus to the next brick
    FocusNext,
    /// Move keyboard focus to the previous brick
    FocusPrev,
    /// Show or hide the key help overlay
    ToggleHelp,

    // ─────────────────────────────────────────────────────────────────────────
    // Table
    // ─────────────────────────────────────────────────────────────────────────
    /// Move the row cursor down
    NextRow,
    /// Move the row cursor up
    PrevRow,
    /// Move the column cursor right
    NextColumn,
    /// Move the column cursor left
    PrevColumn,
    /// Toggle selection of the row under the cursor
    ToggleRowSelection,
    /// Toggle selection of every row on the current page
    ToggleAllRows,
    /// Cycle sorting of the focused column
    ToggleSort,
    /// Cycle sorting of the focused column, keeping other sorted columns
    ToggleSortMulti,
    /// Start typing a filter for the focused column
    EnterFilterMode,
    /// Leave filter input, keeping the filter
    ExitFilterMode,
    /// Add character to the filter input
    FilterInput(char),
    /// Remove last character from the filter input
    FilterBackspace,
    /// Drop every column and global filter
    ClearFilters,
    /// Selected row ids after a selection change
    SelectionChanged(Vec<String>),

    // ─────────────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────────────
    /// Jump to a page (1-based)
    GoToPage(usize),
    /// Change the page size
    SetItemsPerPage(usize),
    /// Open the items-per-page options
    OpenItemsPerPage,
    /// Close the items-per-page options without choosing
    CloseItemsPerPage,
    /// Move up in an open option list
    OptionUp,
    /// Move down in an open option list
    OptionDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Sidebar
    // ─────────────────────────────────────────────────────────────────────────
    /// Pointer entered the sidebar
    SidebarEnter,
    /// Pointer left the sidebar
    SidebarLeave,
    /// Pin or unpin the sidebar open
    ToggleSidebarPin,
    /// Sidebar open state changed
    SidebarOpenChanged(bool),
    /// Navigate to a nav item's href
    Navigate(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::Quit => write!(f, "Quit"),
            Action::FocusNext => write!(f, "FocusNext"),
            Action::FocusPrev => write!(f, "FocusPrev"),
            Action::ToggleHelp => write!(f, "ToggleHelp"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::NextColumn => write!(f, "NextColumn"),
            Action::PrevColumn => write!(f, "PrevColumn"),
            Action::ToggleRowSelection => write!(f, "ToggleRowSelection"),
            Action::ToggleAllRows => write!(f, "ToggleAllRows"),
            Action::ToggleSort => write!(f, "ToggleSort"),
            Action::ToggleSortMulti => write!(f, "ToggleSortMulti"),
            Action::EnterFilterMode => write!(f, "EnterFilterMode"),
            Action::ExitFilterMode => write!(f, "ExitFilterMode"),
            Action::FilterInput(c) => write!(f, "FilterInput('{}')", c),
            Action::FilterBackspace => write!(f, "FilterBackspace"),
            Action::ClearFilters => write!(f, "ClearFilters"),
            Action::SelectionChanged(ids) => write!(f, "SelectionChanged({})", ids.join(",")),
            Action::GoToPage(page) => write!(f, "GoToPage({})", page),
            Action::SetItemsPerPage(n) => write!(f, "SetItemsPerPage({})", n),
            Action::OpenItemsPerPage => write!(f, "OpenItemsPerPage"),
            Action::CloseItemsPerPage => write!(f, "CloseItemsPerPage"),
            Action::OptionUp => write!(f, "OptionUp"),
            Action::OptionDown => write!(f, "OptionDown"),
            Action::SidebarEnter => write!(f, "SidebarEnter"),
            Action::SidebarLeave => write!(f, "SidebarLeave"),
            Action::ToggleSidebarPin => write!(f, "ToggleSidebarPin"),
            Action::SidebarOpenChanged(open) => write!(f, "SidebarOpenChanged({})", open),
            Action::Navigate(href) => write!(f, "Navigate({})", href),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Action::GoToPage(3).to_string(), "GoToPage(3)");
        assert_eq!(
            Action::SelectionChanged(vec!["1".into(), "3".into()]).to_string(),
            "SelectionChanged(1,3)"
        );
        assert_eq!(Action::FilterInput('x').to_string(), "FilterInput('x')");
    }
}
