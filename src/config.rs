use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// CSV or JSON dataset shown in the table page. Built-in members when unset.
    pub data_path: Option<String>,
    pub items_per_page: usize,
    pub items_per_page_options: Vec<usize>,
    /// Message shown when the table has no rows
    pub empty_message: Option<String>,
    pub show_checkboxes: bool,
    /// Delay before a hovered, unpinned sidebar collapses after the pointer leaves
    pub sidebar_close_delay_ms: u64,
    /// Keep the sidebar expanded regardless of hover
    pub sidebar_pinned: bool,
    /// Log filter directive, e.g. "info" or "bricks=debug"
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            items_per_page: 10,
            items_per_page_options: vec![10, 20, 50],
            empty_message: None,
            show_checkboxes: true,
            sidebar_close_delay_ms: 300,
            sidebar_pinned: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".bricks-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Option<Config> {
        let mut config: Config = serde_json::from_str(contents).ok()?;
        config.normalize();
        Some(config)
    }

    /// Keep the selected page size among the offered options
    fn normalize(&mut self) {
        self.items_per_page_options.retain(|n| *n > 0);
        self.items_per_page_options.sort_unstable();
        self.items_per_page_options.dedup();
        if self.items_per_page == 0 {
            self.items_per_page = Config::default().items_per_page;
        }
        if !self.items_per_page_options.contains(&self.items_per_page) {
            self.items_per_page_options.push(self.items_per_page);
            self.items_per_page_options.sort_unstable();
        }
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_json(r#"{ "show_checkboxes": false }"#).unwrap();
        assert!(!config.show_checkboxes);
        assert_eq!(config.items_per_page, 10);
        assert_eq!(config.items_per_page_options, vec![10, 20, 50]);
        assert_eq!(config.sidebar_close_delay_ms, 300);
    }

    #[test]
    fn test_page_size_added_to_options() {
        let config =
            Config::from_json(r#"{ "items_per_page": 25, "items_per_page_options": [50, 10, 10, 0] }"#)
                .unwrap();
        assert_eq!(config.items_per_page_options, vec![10, 25, 50]);
    }

    #[test]
    fn test_zero_page_size_falls_back() {
        let config = Config::from_json(r#"{ "items_per_page": 0 }"#).unwrap();
        assert_eq!(config.items_per_page, 10);
    }

    #[test]
    fn test_invalid_json_is_none() {
        assert!(Config::from_json("not json").is_none());
    }

    #[test]
    fn test_round_trip() {
        let config = Config {
            data_path: Some("members.csv".to_string()),
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(Config::from_json(&json), Some(config));
    }
}
