//! Design tokens
//!
//! Every brick reads its colours from a [`Theme`]. The defaults follow the
//! neutral/green/red/teal palette of the design system; a YAML file in the
//! config directory can override individual tokens:
//!
//! ```yaml
//! tokens:
//!   table-header-bg: "#F2F5F8"
//!   badge-success-bg: "#84EBB4"
//! ```

use crate::config::Config;
use crate::error::{BricksError, Result};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const fn hex(rgb: u32) -> Color {
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Named colours used by the bricks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub neutral_0: Color,
    pub neutral_50: Color,
    pub neutral_200: Color,
    pub neutral_400: Color,
    pub neutral_600: Color,
    pub neutral_950: Color,

    pub title: Color,
    pub subtitle: Color,
    pub separator: Color,
    pub accent: Color,
    pub avatar: Color,

    pub table_header_bg: Color,
    pub table_header_text: Color,
    pub table_divider: Color,
    pub table_row_title: Color,
    pub table_row_subtitle: Color,
    pub table_selected_bg: Color,

    pub badge_default_bg: Color,
    pub badge_default_fg: Color,
    pub badge_secondary_bg: Color,
    pub badge_secondary_fg: Color,
    pub badge_destructive_bg: Color,
    pub badge_destructive_fg: Color,
    pub badge_success_bg: Color,
    pub badge_success_fg: Color,
    pub badge_danger_bg: Color,
    pub badge_danger_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            neutral_0: hex(0xFFFFFF),
            neutral_50: hex(0xF5F7FA),
            neutral_200: hex(0xE1E4EA),
            neutral_400: hex(0x99A0AE),
            neutral_600: hex(0x525866),
            neutral_950: hex(0x0E121B),

            title: hex(0x0E121B),
            subtitle: hex(0x525866),
            separator: hex(0xE1E4EA),
            accent: hex(0x4158C3),
            avatar: hex(0x006E6E),

            table_header_bg: hex(0xF5F7FA),
            table_header_text: hex(0x525866),
            table_divider: hex(0xE1E4EA),
            table_row_title: hex(0x0E121B),
            table_row_subtitle: hex(0x525866),
            table_selected_bg: hex(0xD9DEF3),

            badge_default_bg: hex(0x0E121B),
            badge_default_fg: hex(0xFFFFFF),
            badge_secondary_bg: hex(0xF2F5F8),
            badge_secondary_fg: hex(0x0E121B),
            badge_destructive_bg: hex(0xFB3748),
            badge_destructive_fg: hex(0xFFFFFF),
            badge_success_bg: hex(0xC2F5DA),
            badge_success_fg: hex(0x0B4627),
            badge_danger_bg: hex(0xFFC0C5),
            badge_danger_fg: hex(0x681219),
        }
    }
}

/// On-disk form of a theme: token name to colour string
#[derive(Debug, Default, Deserialize)]
pub struct ThemeFile {
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
}

impl Theme {
    fn theme_path() -> Option<PathBuf> {
        Config::config_dir().map(|dir| dir.join("theme.yaml"))
    }

    /// Load the user's theme, falling back to the defaults when no file exists
    pub fn load() -> Result<Theme> {
        match Self::theme_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Theme::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Theme> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Theme> {
        let file: ThemeFile = serde_yaml::from_str(contents)?;
        let mut theme = Theme::default();
        for (token, value) in &file.tokens {
            theme.set_token(token, value)?;
        }
        Ok(theme)
    }

    /// Override a single token. Unknown token names are ignored with a warning.
    pub fn set_token(&mut self, token: &str, value: &str) -> Result<()> {
        let color = Color::from_str(value).map_err(|_| BricksError::InvalidColor {
            token: token.to_string(),
            value: value.to_string(),
        })?;

        let slot = match token {
            "neutral-0" => &mut self.neutral_0,
            "neutral-50" => &mut self.neutral_50,
            "neutral-200" => &mut self.neutral_200,
            "neutral-400" => &mut self.neutral_400,
            "neutral-600" => &mut self.neutral_600,
            "neutral-950" => &mut self.neutral_950,
            "title" => &mut self.title,
            "subtitle" => &mut self.subtitle,
            "separator" => &mut self.separator,
            "accent" => &mut self.accent,
            "avatar" => &mut self.avatar,
            "table-header-bg" => &mut self.table_header_bg,
            "table-header-text" => &mut self.table_header_text,
            "table-divider" => &mut self.table_divider,
            "table-row-title" => &mut self.table_row_title,
            "table-row-subtitle" => &mut self.table_row_subtitle,
            "table-selected-bg" => &mut self.table_selected_bg,
            "badge-default-bg" => &mut self.badge_default_bg,
            "badge-default-fg" => &mut self.badge_default_fg,
            "badge-secondary-bg" => &mut self.badge_secondary_bg,
            "badge-secondary-fg" => &mut self.badge_secondary_fg,
            "badge-destructive-bg" => &mut self.badge_destructive_bg,
            "badge-destructive-fg" => &mut self.badge_destructive_fg,
            "badge-success-bg" => &mut self.badge_success_bg,
            "badge-success-fg" => &mut self.badge_success_fg,
            "badge-danger-bg" => &mut self.badge_danger_bg,
            "badge-danger-fg" => &mut self.badge_danger_fg,
            _ => {
                tracing::warn!(token, "ignoring unknown theme token");
                return Ok(());
            }
        };
        *slot = color;
        Ok(())
    }

    /// Header row text
    pub fn table_header(&self) -> Style {
        Style::default()
            .fg(self.table_header_text)
            .bg(self.table_header_bg)
    }

    /// Row under the cursor
    pub fn focused_row(&self) -> Style {
        Style::default()
            .bg(self.neutral_50)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_row(&self) -> Style {
        Style::default().bg(self.table_selected_bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.neutral_600)
    }

    pub fn disabled(&self) -> Style {
        Style::default()
            .fg(self.neutral_400)
            .add_modifier(Modifier::DIM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tokens() {
        let theme = Theme::default();
        assert_eq!(theme.separator, Color::Rgb(0xE1, 0xE4, 0xEA));
        assert_eq!(theme.avatar, Color::Rgb(0x00, 0x6E, 0x6E));
        assert_eq!(theme.badge_success_fg, Color::Rgb(0x0B, 0x46, 0x27));
    }

    #[test]
    fn test_yaml_overrides() {
        let theme = Theme::from_yaml(
            "tokens:\n  table-divider: \"#000000\"\n  accent: red\n",
        )
        .unwrap();
        assert_eq!(theme.table_divider, Color::Rgb(0, 0, 0));
        assert_eq!(theme.accent, Color::Red);
        assert_eq!(theme.title, Theme::default().title);
    }

    #[test]
    fn test_unknown_token_is_ignored() {
        let theme = Theme::from_yaml("tokens:\n  not-a-token: \"#000000\"\n").unwrap();
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn test_invalid_colour_is_rejected() {
        let err = Theme::from_yaml("tokens:\n  accent: \"not a colour\"\n").unwrap_err();
        assert!(matches!(err, BricksError::InvalidColor { .. }));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let theme = Theme::from_yaml("{}").unwrap();
        assert_eq!(theme, Theme::default());
    }
}
