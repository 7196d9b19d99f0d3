// Top-level wiring - one struct standing in for the background page
use crate::{
    cache::SettingsCache,
    config::Config,
    host::HostApis,
    menu::ContextMenuShortcut,
    models::{MenuContext, MenuItem, SettingRecord, Tab},
    toggler::PermissionToggler,
    Result,
};

/// The assembled extension: permission toggler plus context-menu shortcut
/// over one set of host services.
///
/// Each `on_*` method is one host event handler. Handlers are independent;
/// nothing stops several from being in flight at once, exactly as the host
/// runtime would interleave rapid clicks.
pub struct Extension {
    toggler: PermissionToggler,
    shortcut: ContextMenuShortcut,
    cache: SettingsCache,
}

impl Extension {
    pub fn new(host: HostApis, config: Config) -> Self {
        let cache = SettingsCache::new(host.storage.clone(), config.storage_key);
        let toggler =
            PermissionToggler::new(host.settings.clone(), host.tabs.clone(), cache.clone());
        let shortcut = ContextMenuShortcut::new(
            host.menus,
            host.tabs,
            MenuItem {
                id: config.menu.id,
                title: config.menu.title,
                contexts: vec![MenuContext::Action],
            },
            config.settings_page,
        );

        Self {
            toggler,
            shortcut,
            cache,
        }
    }

    /// One-time startup work: (re-)register the context-menu entry.
    pub async fn startup(&self) -> Result<()> {
        self.shortcut.register().await
    }

    /// The toolbar icon was clicked on `tab`.
    pub async fn on_action_clicked(&self, tab: &Tab) -> Result<Option<SettingRecord>> {
        self.toggler.on_action_clicked(tab).await
    }

    /// A context-menu entry was clicked.
    pub async fn on_menu_clicked(&self, menu_item_id: &str) -> Result<()> {
        self.shortcut.on_clicked(menu_item_id).await
    }

    /// Everything the cache knows about, for display surfaces.
    pub async fn cached_rules(&self) -> Result<Vec<SettingRecord>> {
        self.cache.records().await
    }
}
