use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime configuration
///
/// Every field defaults to the stock extension's behavior, so a config
/// file only needs the fields it wants to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Storage key the settings cache lives under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// The browser's JavaScript settings page, opened by the shortcut.
    #[serde(default = "default_settings_page")]
    pub settings_page: String,

    #[serde(default)]
    pub menu: MenuConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            settings_page: default_settings_page(),
            menu: MenuConfig::default(),
        }
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults if
    /// there is no file yet.
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to disk
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get the config file path
    /// Uses XDG on Linux/macOS, AppData on Windows
    fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("scriptswitch");

        Ok(config_dir.join("config.toml"))
    }
}

/// The single context-menu entry the extension registers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    #[serde(default = "default_menu_id")]
    pub id: String,

    #[serde(default = "default_menu_title")]
    pub title: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            id: default_menu_id(),
            title: default_menu_title(),
        }
    }
}

fn default_storage_key() -> String {
    "javascriptContentSettings".to_string()
}

fn default_settings_page() -> String {
    "chrome://settings/content/javascript".to_string()
}

fn default_menu_id() -> String {
    "goto-js-settings".to_string()
}

fn default_menu_title() -> String {
    "Chrome JavaScript Settings".to_string()
}
