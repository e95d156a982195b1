//! Page-number window for pagination controls

/// Pages shown around the current one, not counting the first and last
pub const WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    /// Gap between page 1 and the window
    EllipsisStart,
    /// Gap between the window and the last page
    EllipsisEnd,
}

impl PageItem {
    pub fn page(&self) -> Option<usize> {
        match self {
            PageItem::Page(n) => Some(*n),
            _ => None,
        }
    }
}

/// Page buttons for `current` of `total` (both 1-based).
///
/// Page 1 always comes first and `total` last (when there is more than one
/// page). Between them sits a window of up to five pages around `current`,
/// shifted right when it touches page 2 and left when it touches `total - 1`.
/// Ellipses mark skipped pages on either side.
pub fn page_numbers(current: usize, total: usize) -> Vec<PageItem> {
    let mut items = vec![PageItem::Page(1)];
    if total <= 1 {
        return items;
    }

    let span = WINDOW as isize - 1;
    let current = current as isize;
    let last_inner = total as isize - 1;

    let mut start = (current - 2).max(2);
    let mut end = (current + 2).min(last_inner);

    if end - start < span {
        if start == 2 {
            end = (start + span).min(last_inner);
        } else if end == last_inner {
            start = (end - span).max(2);
        }
    }

    if start > 2 {
        items.push(PageItem::EllipsisStart);
    }
    for page in start..=end {
        items.push(PageItem::Page(page as usize));
    }
    if end < last_inner {
        items.push(PageItem::EllipsisEnd);
    }

    items.push(PageItem::Page(total));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::*;

    #[test]
    fn test_single_and_empty() {
        assert_eq!(page_numbers(1, 1), vec![Page(1)]);
        assert_eq!(page_numbers(1, 0), vec![Page(1)]);
    }

    #[test]
    fn test_few_pages_no_ellipsis() {
        assert_eq!(page_numbers(2, 3), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(page_numbers(1, 2), vec![Page(1), Page(2)]);
        assert_eq!(
            page_numbers(4, 7),
            (1..=7).map(Page).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_start_of_range() {
        assert_eq!(
            page_numbers(1, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), EllipsisEnd, Page(10)]
        );
    }

    #[test]
    fn test_middle_of_range() {
        assert_eq!(
            page_numbers(10, 50),
            vec![
                Page(1),
                EllipsisStart,
                Page(8),
                Page(9),
                Page(10),
                Page(11),
                Page(12),
                EllipsisEnd,
                Page(50)
            ]
        );
    }

    #[test]
    fn test_end_of_range() {
        assert_eq!(
            page_numbers(10, 10),
            vec![Page(1), EllipsisStart, Page(5), Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_window_properties_hold_for_all_inputs() {
        for total in 0..=30 {
            for current in 1..=total.max(1) {
                let items = page_numbers(current, total);
                let pages: Vec<usize> = items.iter().filter_map(PageItem::page).collect();

                assert_eq!(pages.first(), Some(&1));
                if total > 1 {
                    assert_eq!(pages.last(), Some(&total));
                }
                assert!(pages.windows(2).all(|w| w[0] < w[1]), "{current}/{total}");
                assert!(pages.contains(&current.min(total.max(1))));

                for (i, item) in items.iter().enumerate() {
                    if !matches!(item, EllipsisStart | EllipsisEnd) {
                        continue;
                    }
                    let before = items[i - 1].page().unwrap();
                    let after = items[i + 1].page().unwrap();
                    assert!(after > before + 1, "ellipsis without a gap at {current}/{total}");
                }
                let gaps = pages.windows(2).filter(|w| w[1] > w[0] + 1).count();
                let ellipses = items.len() - pages.len();
                assert_eq!(gaps, ellipses, "{current}/{total}");
            }
        }
    }
}
