// Host API seams - the four browser services the extension consumes.
// These used to be ambient globals; as traits they can be swapped for
// fakes in tests and for the simulated host in the CLI.
use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    models::{ContentSetting, MenuItem, SettingRecord, TabId},
    Result,
};

/// The host's per-site JavaScript settings store.
///
/// Reads answer "what does the browser currently do at this exact URL";
/// writes are scoped to a wildcard pattern. The store cannot be enumerated
/// wholesale, which is the whole reason SettingsCache exists.
#[async_trait]
pub trait ContentSettingsStore: Send + Sync {
    /// Effective setting the host applies at `url`, considering every
    /// registered pattern. `None` means the store has no opinion.
    async fn effective_setting(&self, url: &str) -> Result<Option<ContentSetting>>;

    /// Apply `record.setting` to every URL matching `record.primary_pattern`.
    async fn apply_rule(&self, record: &SettingRecord) -> Result<()>;
}

/// Durable key-value storage for JSON values.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;
}

/// Tab control surface: reload an existing tab, open a new one.
#[async_trait]
pub trait TabControl: Send + Sync {
    async fn reload(&self, tab: TabId) -> Result<()>;
    async fn create(&self, url: &str) -> Result<()>;
}

/// Context-menu registration, and nothing else.
#[async_trait]
pub trait ContextMenuHost: Send + Sync {
    /// Drop every menu entry belonging to this extension.
    async fn remove_all(&self) -> Result<()>;
    async fn create_item(&self, item: &MenuItem) -> Result<()>;
}

/// The full set of host services, bundled so wiring stays one argument.
#[derive(Clone)]
pub struct HostApis {
    pub settings: Arc<dyn ContentSettingsStore>,
    pub storage: Arc<dyn KeyValueStore>,
    pub tabs: Arc<dyn TabControl>,
    pub menus: Arc<dyn ContextMenuHost>,
}
