// One context-menu entry that jumps to the browser's JavaScript settings
use std::sync::Arc;

use tracing::debug;

use crate::{
    host::{ContextMenuHost, TabControl},
    models::MenuItem,
    Result,
};

/// Registers the shortcut entry and opens the settings page when clicked.
///
/// Stateless apart from its wiring: registration is idempotent (everything
/// ours is removed first), and a click either matches our entry id or is
/// ignored.
pub struct ContextMenuShortcut {
    menus: Arc<dyn ContextMenuHost>,
    tabs: Arc<dyn TabControl>,
    item: MenuItem,
    settings_page: String,
}

impl ContextMenuShortcut {
    pub fn new(
        menus: Arc<dyn ContextMenuHost>,
        tabs: Arc<dyn TabControl>,
        item: MenuItem,
        settings_page: impl Into<String>,
    ) -> Self {
        Self {
            menus,
            tabs,
            item,
            settings_page: settings_page.into(),
        }
    }

    /// (Re-)register the single menu entry. Run on every startup.
    pub async fn register(&self) -> Result<()> {
        self.menus.remove_all().await?;
        self.menus.create_item(&self.item).await
    }

    /// Handle a context-menu click event.
    pub async fn on_clicked(&self, menu_item_id: &str) -> Result<()> {
        if menu_item_id != self.item.id {
            debug!("Ignoring click on foreign menu item {}", menu_item_id);
            return Ok(());
        }

        self.tabs.create(&self.settings_page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MenuContext;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeMenus {
        items: Mutex<Vec<MenuItem>>,
    }

    #[async_trait]
    impl ContextMenuHost for FakeMenus {
        async fn remove_all(&self) -> crate::Result<()> {
            self.items.lock().unwrap().clear();
            Ok(())
        }

        async fn create_item(&self, item: &MenuItem) -> crate::Result<()> {
            self.items.lock().unwrap().push(item.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeTabs {
        created: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TabControl for FakeTabs {
        async fn reload(&self, _tab: crate::models::TabId) -> crate::Result<()> {
            Ok(())
        }

        async fn create(&self, url: &str) -> crate::Result<()> {
            self.created.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn shortcut_over(menus: Arc<FakeMenus>, tabs: Arc<FakeTabs>) -> ContextMenuShortcut {
        ContextMenuShortcut::new(
            menus,
            tabs,
            MenuItem {
                id: "goto-js-settings".to_string(),
                title: "Chrome JavaScript Settings".to_string(),
                contexts: vec![MenuContext::Action],
            },
            "chrome://settings/content/javascript",
        )
    }

    #[tokio::test]
    async fn test_register_is_idempotent() {
        let menus = Arc::new(FakeMenus::default());
        let tabs = Arc::new(FakeTabs::default());
        let shortcut = shortcut_over(menus.clone(), tabs);

        shortcut.register().await.unwrap();
        shortcut.register().await.unwrap();

        let items = menus.items.lock().unwrap().clone();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "goto-js-settings");
        assert_eq!(items[0].title, "Chrome JavaScript Settings");
        assert_eq!(items[0].contexts, vec![MenuContext::Action]);
    }

    #[tokio::test]
    async fn test_matching_click_opens_the_settings_page() {
        let menus = Arc::new(FakeMenus::default());
        let tabs = Arc::new(FakeTabs::default());
        let shortcut = shortcut_over(menus, tabs.clone());

        shortcut.on_clicked("goto-js-settings").await.unwrap();

        assert_eq!(
            tabs.created.lock().unwrap().clone(),
            vec!["chrome://settings/content/javascript".to_string()]
        );
    }

    #[tokio::test]
    async fn test_foreign_menu_ids_are_ignored() {
        let menus = Arc::new(FakeMenus::default());
        let tabs = Arc::new(FakeTabs::default());
        let shortcut = shortcut_over(menus, tabs.clone());

        shortcut.on_clicked("someone-elses-item").await.unwrap();

        assert!(tabs.created.lock().unwrap().is_empty());
    }
}
