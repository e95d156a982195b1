//! Gallery pages and demo column sets

use bricks::components::{
    Badge, BadgeVariant, Separator, TableRowText, Text, TextColor, TextSize, TextWeight,
    TitleWithSubText,
};
use bricks::model::{ColumnDef, DataRow, Record};
use bricks::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders},
    Frame,
};

const BADGE_VARIANTS: [(BadgeVariant, &str); 6] = [
    (BadgeVariant::Default, "default"),
    (BadgeVariant::Secondary, "secondary"),
    (BadgeVariant::Destructive, "destructive"),
    (BadgeVariant::Outline, "outline"),
    (BadgeVariant::Success, "success"),
    (BadgeVariant::Danger, "danger"),
];

/// Sidebar destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Members,
    Badges,
    Typography,
}

impl Page {
    pub fn href(&self) -> &'static str {
        match self {
            Page::Members => "/members",
            Page::Badges => "/badges",
            Page::Typography => "/typography",
        }
    }

    pub fn from_href(href: &str) -> Option<Page> {
        [Page::Members, Page::Badges, Page::Typography]
            .into_iter()
            .find(|page| page.href() == href)
    }
}

fn title_case(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Columns for a dataset's fields. `name` + `email` fold into one two-line
/// member cell and `status` renders as a badge.
pub fn columns_for(fields: &[String]) -> Vec<ColumnDef<DataRow>> {
    let has = |name: &str| fields.iter().any(|f| f == name);
    let folds_email = has("name") && has("email");

    let mut columns = Vec::new();
    for field in fields.iter().filter(|f| f.as_str() != "id") {
        match field.as_str() {
            "name" if folds_email => columns.push(
                ColumnDef::new("member", "Member")
                    .accessor_key("name")
                    .cell(|row: &DataRow, theme: &Theme| {
                        TableRowText::new(row.field("name").to_string())
                            .sub_text(row.field("email").to_string())
                            .into_text(theme)
                    }),
            ),
            "email" if folds_email => {}
            "status" => columns.push(ColumnDef::field("status", "Status").cell(
                |row: &DataRow, theme: &Theme| {
                    let status = row.field("status").to_string();
                    let badge = Badge::new(status.as_str(), theme)
                        .variant(BadgeVariant::for_status(&status));
                    ratatui::text::Text::from(Line::from(badge.span()))
                },
            )),
            _ => columns.push(ColumnDef::field(field.clone(), title_case(field))),
        }
    }
    columns
}

fn page_block(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.neutral_200))
        .title(format!(" {} ", title))
}

pub fn draw_badges_page(frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = page_block("Badges", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut y = inner.y + 1;
    for (variant, name) in BADGE_VARIANTS {
        if y >= inner.bottom() {
            break;
        }
        let badge = Badge::new(name, theme).variant(variant);
        let width = badge.width();
        frame.render_widget(badge, Rect::new(inner.x + 2, y, width.min(inner.width), 1));
        let note = if variant.is_custom() {
            "brick variant"
        } else {
            "base variant"
        };
        let x = inner.x + 18;
        if x < inner.right() {
            frame.render_widget(
                Text::new(note, theme).color(TextColor::Gray),
                Rect::new(x, y, inner.right() - x, 1),
            );
        }
        y += 2;
    }
}

pub fn draw_typography_page(frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = page_block("Typography", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let samples = [
        Text::new("Extra small", theme).size(TextSize::Xs),
        Text::new("Small (default)", theme),
        Text::new("Medium", theme).size(TextSize::Md),
        Text::new("Large", theme).size(TextSize::Lg),
        Text::new("Semibold", theme).weight(TextWeight::Semibold),
        Text::new("Gray", theme).color(TextColor::Gray),
        Text::new("With sub text", theme).sub_text("Sub text is xs and gray"),
    ];
    let mut y = columns[0].y + 1;
    for sample in samples {
        let height = sample.height();
        if y + height > columns[0].bottom() {
            break;
        }
        frame.render_widget(
            sample,
            Rect::new(columns[0].x + 2, y, columns[0].width.saturating_sub(2), height),
        );
        y += height + 1;
    }

    frame.render_widget(Separator::new(theme).horizontal(false), columns[1]);

    let right = columns[2];
    let title = TitleWithSubText::new(
        "TitleWithSubText",
        "Centred vertically, wrapping when the area is narrow",
        theme,
    );
    let height = title.height(right.width.saturating_sub(2)).min(right.height);
    frame.render_widget(title, Rect::new(right.x + 2, right.y + 1, right.width.saturating_sub(2), height));

    let separator_y = right.y + height + 2;
    if separator_y < right.bottom() {
        frame.render_widget(
            Separator::new(theme),
            Rect::new(right.x + 2, separator_y, right.width.saturating_sub(4), 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bricks::model::sample_data::sample_dataset;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_member_columns_fold_email() {
        let dataset = sample_dataset();
        let columns = columns_for(&dataset.fields);
        let ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["member", "role", "status", "joined", "score"]);

        let text = columns[0].render(&dataset.rows[0], &Theme::default());
        assert_eq!(text.lines.len(), 2);
    }

    #[test]
    fn test_plain_fields() {
        let fields = vec!["id".to_string(), "city".to_string()];
        let columns = columns_for(&fields);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].header, "City");
        assert!(columns[0].can_sort());
    }

    #[test]
    fn test_page_hrefs_round_trip() {
        for page in [Page::Members, Page::Badges, Page::Typography] {
            assert_eq!(Page::from_href(page.href()), Some(page));
        }
        assert_eq!(Page::from_href("/nowhere"), None);
    }

    #[test]
    fn test_badges_page_draws_every_variant() {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(50, 16)).unwrap();
        terminal
            .draw(|frame| draw_badges_page(frame, frame.area(), &theme))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let screen: String = (0..16)
            .flat_map(|y| (0..50).map(move |x| (x, y)))
            .map(|(x, y)| buffer[(x, y)].symbol().to_string())
            .collect();
        for (_, name) in BADGE_VARIANTS {
            assert!(screen.contains(name), "{}", name);
        }
    }
}
