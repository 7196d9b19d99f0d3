// In-memory browser host with JSON snapshot persistence
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use scriptswitch_core::{
    host::{ContentSettingsStore, ContextMenuHost, HostApis, KeyValueStore, TabControl},
    models::{ContentSetting, MenuItem, SettingRecord, Tab, TabId},
    Error, Result,
};

use crate::patterns::pattern_matches;

/// Everything the simulated browser remembers.
///
/// Snapshots are tolerant of missing fields so old state files keep
/// loading as the shape grows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct HostState {
    /// Content-settings rules in application order; the newest matching
    /// rule wins, like the real store.
    rules: Vec<SettingRecord>,
    /// Browser-wide default applied when no rule matches.
    default_setting: Option<ContentSetting>,
    storage: HashMap<String, serde_json::Value>,
    tabs: HashMap<TabId, TabState>,
    next_tab_id: TabId,
    menu_items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct TabState {
    url: String,
    reload_count: u32,
}

/// In-memory implementation of all four host seams.
///
/// One `MemoryHost` clones into as many `Arc<dyn ...>` handles as needed;
/// they all share the same state behind one lock. The real browser applies
/// each API call atomically, and so does this.
#[derive(Clone)]
pub struct MemoryHost {
    state: Arc<RwLock<HostState>>,
}

impl MemoryHost {
    /// A fresh host with JavaScript allowed by default, like a stock
    /// browser profile.
    pub fn new() -> Self {
        Self::with_default_setting(Some(ContentSetting::Allow))
    }

    /// A host with an explicit browser-wide default. `None` exercises the
    /// unset path.
    pub fn with_default_setting(default: Option<ContentSetting>) -> Self {
        let state = HostState {
            default_setting: default,
            next_tab_id: 1,
            ..HostState::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Bundle this host into the core wiring struct.
    pub fn apis(&self) -> HostApis {
        HostApis {
            settings: Arc::new(self.clone()),
            storage: Arc::new(self.clone()),
            tabs: Arc::new(self.clone()),
            menus: Arc::new(self.clone()),
        }
    }

    /// Open a tab at `url` and return its descriptor, as the browser does
    /// on navigation.
    pub fn open_tab(&self, url: &str) -> Tab {
        let mut state = self.state.write().unwrap();
        let id = state.next_tab_id;
        state.next_tab_id += 1;
        state.tabs.insert(
            id,
            TabState {
                url: url.to_string(),
                reload_count: 0,
            },
        );
        Tab {
            id,
            url: url.to_string(),
        }
    }

    pub fn reload_count(&self, tab: TabId) -> u32 {
        self.state
            .read()
            .unwrap()
            .tabs
            .get(&tab)
            .map(|t| t.reload_count)
            .unwrap_or(0)
    }

    /// Registered content-settings rules in application order.
    pub fn rules(&self) -> Vec<SettingRecord> {
        self.state.read().unwrap().rules.clone()
    }

    pub fn menu_items(&self) -> Vec<MenuItem> {
        self.state.read().unwrap().menu_items.clone()
    }

    /// URLs of all open tabs, in tab-id order.
    pub fn tab_urls(&self) -> Vec<String> {
        let state = self.state.read().unwrap();
        let mut tabs: Vec<_> = state.tabs.iter().collect();
        tabs.sort_by_key(|(id, _)| **id);
        tabs.into_iter().map(|(_, t)| t.url.clone()).collect()
    }

    /// Load a host snapshot from `path`, or start a fresh host if there is
    /// no snapshot yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No host snapshot at {}, starting fresh", path.display());
            return Ok(Self::new());
        }

        let contents = std::fs::read_to_string(path)?;
        let state: HostState = serde_json::from_str(&contents)?;
        Ok(Self {
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Save the whole host state to `path` as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&*self.state.read().unwrap())?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentSettingsStore for MemoryHost {
    async fn effective_setting(&self, url: &str) -> Result<Option<ContentSetting>> {
        let state = self.state.read().unwrap();
        let matched = state
            .rules
            .iter()
            .rev()
            .find(|r| pattern_matches(&r.primary_pattern, url))
            .map(|r| r.setting);
        Ok(matched.or(state.default_setting))
    }

    async fn apply_rule(&self, record: &SettingRecord) -> Result<()> {
        let mut state = self.state.write().unwrap();
        // Re-applying a pattern replaces its previous rule.
        state
            .rules
            .retain(|r| r.primary_pattern != record.primary_pattern);
        state.rules.push(record.clone());
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryHost {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.state.read().unwrap().storage.get(key).cloned())
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        self.state
            .write()
            .unwrap()
            .storage
            .insert(key.to_string(), value);
        Ok(())
    }
}

#[async_trait]
impl TabControl for MemoryHost {
    async fn reload(&self, tab: TabId) -> Result<()> {
        let mut state = self.state.write().unwrap();
        match state.tabs.get_mut(&tab) {
            Some(t) => {
                t.reload_count += 1;
                Ok(())
            }
            None => Err(Error::TabError(format!("No tab with id {}", tab))),
        }
    }

    async fn create(&self, url: &str) -> Result<()> {
        self.open_tab(url);
        Ok(())
    }
}

#[async_trait]
impl ContextMenuHost for MemoryHost {
    async fn remove_all(&self) -> Result<()> {
        self.state.write().unwrap().menu_items.clear();
        Ok(())
    }

    async fn create_item(&self, item: &MenuItem) -> Result<()> {
        self.state.write().unwrap().menu_items.push(item.clone());
        Ok(())
    }
}
