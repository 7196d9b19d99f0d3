// Extension logic lives here - everything the background page used to do
pub mod cache;
pub mod classifier;
pub mod config;
pub mod error;
pub mod extension;
pub mod host;
pub mod menu;
pub mod models;
pub mod toggler;

pub use cache::SettingsCache;
pub use config::Config;
pub use error::Error;
pub use extension::Extension;
pub use host::HostApis;
pub use models::{ContentSetting, MenuContext, MenuItem, SettingRecord, Tab, TabId};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
