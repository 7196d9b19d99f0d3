// The icon-click handler: classify, flip, apply, then reload + cache
use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    cache::SettingsCache,
    classifier,
    host::{ContentSettingsStore, TabControl},
    models::{ContentSetting, SettingRecord, Tab},
    Result,
};

/// Flips the JavaScript permission for whatever site the active tab is on.
pub struct PermissionToggler {
    settings: Arc<dyn ContentSettingsStore>,
    tabs: Arc<dyn TabControl>,
    cache: SettingsCache,
}

impl PermissionToggler {
    pub fn new(
        settings: Arc<dyn ContentSettingsStore>,
        tabs: Arc<dyn TabControl>,
        cache: SettingsCache,
    ) -> Self {
        Self {
            settings,
            tabs,
            cache,
        }
    }

    /// Handle one action click.
    ///
    /// Returns the rule that was applied, or `None` when the URL classifies
    /// to nothing (browser pages and the like), in which case nothing is
    /// touched at all, the tab included.
    pub async fn on_action_clicked(&self, tab: &Tab) -> Result<Option<SettingRecord>> {
        let Some(pattern) = classifier::classify(&tab.url) else {
            debug!("No pattern for {}, leaving it alone", tab.url);
            return Ok(None);
        };

        // Current state is read at the exact URL; the write goes to the
        // wildcard pattern, so the flip covers the whole site.
        let current = self.settings.effective_setting(&tab.url).await?;
        let record = SettingRecord {
            primary_pattern: pattern,
            setting: ContentSetting::toggled_from(current),
        };
        self.settings.apply_rule(&record).await?;

        info!("JavaScript {} for {}", record.setting, record.primary_pattern);

        // Reload and cache update run concurrently; neither waits on the
        // other, and both must finish before the toggle counts as done.
        let (reloaded, cached) = tokio::join!(
            self.tabs.reload(tab.id),
            self.cache.upsert(record.clone()),
        );
        reloaded?;
        cached?;

        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::KeyValueStore;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Records every call so tests can assert on side effects.
    #[derive(Default)]
    struct FakeHost {
        effective: Mutex<Option<ContentSetting>>,
        applied: Mutex<Vec<SettingRecord>>,
        reloads: Mutex<Vec<crate::models::TabId>>,
        storage: Mutex<HashMap<String, serde_json::Value>>,
    }

    #[async_trait]
    impl ContentSettingsStore for FakeHost {
        async fn effective_setting(&self, _url: &str) -> crate::Result<Option<ContentSetting>> {
            Ok(*self.effective.lock().unwrap())
        }

        async fn apply_rule(&self, record: &SettingRecord) -> crate::Result<()> {
            self.applied.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    #[async_trait]
    impl TabControl for FakeHost {
        async fn reload(&self, tab: crate::models::TabId) -> crate::Result<()> {
            self.reloads.lock().unwrap().push(tab);
            Ok(())
        }

        async fn create(&self, _url: &str) -> crate::Result<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl KeyValueStore for FakeHost {
        async fn get(&self, key: &str) -> crate::Result<Option<serde_json::Value>> {
            Ok(self.storage.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: serde_json::Value) -> crate::Result<()> {
            self.storage.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }
    }

    fn toggler_over(host: Arc<FakeHost>) -> PermissionToggler {
        let cache = SettingsCache::new(host.clone(), "javascriptContentSettings");
        PermissionToggler::new(host.clone(), host, cache)
    }

    fn tab(id: crate::models::TabId, url: &str) -> Tab {
        Tab {
            id,
            url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_allowed_site_toggles_to_block() {
        let host = Arc::new(FakeHost::default());
        *host.effective.lock().unwrap() = Some(ContentSetting::Allow);
        let toggler = toggler_over(host.clone());

        let applied = toggler
            .on_action_clicked(&tab(7, "https://example.com/path?x=1"))
            .await
            .unwrap()
            .expect("a classifiable URL should produce a rule");

        assert_eq!(applied.primary_pattern, "*://*.example.com/*");
        assert_eq!(applied.setting, ContentSetting::Block);
        assert_eq!(host.applied.lock().unwrap().clone(), vec![applied]);
        assert_eq!(host.reloads.lock().unwrap().clone(), vec![7]);
    }

    #[tokio::test]
    async fn test_blocked_or_unset_site_toggles_to_allow() {
        for current in [Some(ContentSetting::Block), None] {
            let host = Arc::new(FakeHost::default());
            *host.effective.lock().unwrap() = current;
            let toggler = toggler_over(host.clone());

            let applied = toggler
                .on_action_clicked(&tab(1, "http://192.168.1.1/page"))
                .await
                .unwrap()
                .unwrap();

            assert_eq!(applied.primary_pattern, "*://192.168.1.1/*");
            assert_eq!(applied.setting, ContentSetting::Allow);
        }
    }

    #[tokio::test]
    async fn test_chrome_pages_produce_no_side_effects() {
        let host = Arc::new(FakeHost::default());
        let toggler = toggler_over(host.clone());

        let applied = toggler
            .on_action_clicked(&tab(3, "chrome://settings/content/javascript"))
            .await
            .unwrap();

        assert_eq!(applied, None);
        assert!(host.applied.lock().unwrap().is_empty());
        assert!(host.reloads.lock().unwrap().is_empty());
        assert!(host.storage.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_mirrors_the_rule_into_the_cache() {
        let host = Arc::new(FakeHost::default());
        *host.effective.lock().unwrap() = Some(ContentSetting::Allow);
        let toggler = toggler_over(host.clone());

        toggler
            .on_action_clicked(&tab(1, "http://10.0.0.5/"))
            .await
            .unwrap();

        let cached = host
            .storage
            .lock()
            .unwrap()
            .get("javascriptContentSettings")
            .cloned()
            .expect("toggle should write the cache key");
        let records: Vec<SettingRecord> = serde_json::from_value(cached).unwrap();
        assert_eq!(
            records,
            vec![SettingRecord {
                primary_pattern: "*://10.0.0.5/*".to_string(),
                setting: ContentSetting::Block,
            }]
        );
    }
}
