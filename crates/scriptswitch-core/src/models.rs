use serde::{Deserialize, Serialize};

/// Tab identifier handed over by the host's events.
pub type TabId = i32;

/// JavaScript permission value understood by the host content-settings store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentSetting {
    Allow,
    Block,
}

impl ContentSetting {
    /// The permission a toggle flips to, given the current effective one.
    /// Anything other than an explicit ALLOW toggles to ALLOW.
    pub fn toggled_from(current: Option<ContentSetting>) -> ContentSetting {
        match current {
            Some(ContentSetting::Allow) => ContentSetting::Block,
            _ => ContentSetting::Allow,
        }
    }
}

impl std::fmt::Display for ContentSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentSetting::Allow => write!(f, "allow"),
            ContentSetting::Block => write!(f, "block"),
        }
    }
}

/// One content-settings rule: a URL pattern plus the setting applied to it.
///
/// Serialized camelCase (`primaryPattern`) so the cached JSON stays
/// byte-compatible with what the host store itself speaks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SettingRecord {
    pub primary_pattern: String,
    pub setting: ContentSetting,
}

/// The active tab descriptor carried by the host's action-click event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tab {
    pub id: TabId,
    pub url: String,
}

/// A context-menu entry this extension registers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub contexts: Vec<MenuContext>,
}

/// Where a menu entry shows up.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MenuContext {
    /// The extension's own toolbar button.
    Action,
}
