use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::data::freeze_state::UnfreezePlacement;
use crate::i18n::DEFAULT_LOCALE;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub menu: MenuConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of columns frozen when the grid is created
    pub fixed_columns_left: usize,

    /// Column headers; their count is the grid's column count
    pub column_headers: Vec<String>,

    /// Where unfrozen columns land: "boundary" or "origin"
    pub unfreeze_placement: UnfreezePlacement,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Locale for menu labels, e.g. "en-US", "de-DE"
    pub locale: String,

    /// Register the freeze/unfreeze entries in the context menu
    pub show_freeze_items: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            fixed_columns_left: 0,
            column_headers: ["A", "B", "C", "D", "E"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            unfreeze_placement: UnfreezePlacement::Boundary,
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            show_freeze_items: true,
        }
    }
}

impl Config {
    /// Load config from the default location, writing the defaults there
    /// on first use
    pub fn load() -> Result<Self> {
        Self::load_or_create(&Self::get_config_path()?)
    }

    /// Load config from `path`, creating it with default values if missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        Self::load_from(path)
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        debug!(target: "config", "Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        info!(target: "config", "Saved config to {:?}", path);

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("column-freeze").join("config.toml"))
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# Column Freeze Configuration File
# Location: ~/.config/column-freeze/config.toml (Linux/macOS)
#           %APPDATA%\column-freeze\config.toml (Windows)

[grid]
# Columns frozen to the left edge when the grid is created
fixed_columns_left = 0

# Column headers (their count is the number of columns)
column_headers = ["A", "B", "C", "D", "E"]

# Where an unfrozen column lands:
#   "boundary" - first scrollable column
#   "origin"   - the position it was frozen from, when known
unfreeze_placement = "boundary"

[menu]
# Locale for menu labels: "en-US", "de-DE"
locale = "en-US"

# Show "Freeze column" / "Unfreeze column" in the context menu
show_freeze_items = true
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.grid.fixed_columns_left, 0);
        assert_eq!(config.grid.column_headers.len(), 5);
        assert_eq!(config.menu.locale, "en-US");
        assert!(config.menu.show_freeze_items);
    }

    #[test]
    fn test_commented_default_parses() {
        let config: Config = toml::from_str(&Config::create_default_with_comments()).unwrap();
        assert_eq!(config.grid.unfreeze_placement, UnfreezePlacement::Boundary);
        assert_eq!(config.grid.column_headers, Config::default().grid.column_headers);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
[grid]
fixed_columns_left = 2
unfreeze_placement = "origin"
"#,
        )
        .unwrap();
        assert_eq!(config.grid.fixed_columns_left, 2);
        assert_eq!(config.grid.unfreeze_placement, UnfreezePlacement::Origin);
        assert_eq!(config.menu.locale, "en-US");
    }

    #[test]
    fn test_load_or_create_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("column-freeze").join("config.toml");

        let created = Config::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created.grid.fixed_columns_left, 0);

        // An existing file is read, not overwritten
        fs::write(&path, "[grid]\nfixed_columns_left = 2\n").unwrap();
        let loaded = Config::load_or_create(&path).unwrap();
        assert_eq!(loaded.grid.fixed_columns_left, 2);
        assert_eq!(loaded.grid.column_headers.len(), 5);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.grid.fixed_columns_left = 3;
        config.menu.locale = "de-DE".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.grid.fixed_columns_left, 3);
        assert_eq!(loaded.menu.locale, "de-DE");
    }
}
