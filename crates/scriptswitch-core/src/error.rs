use thiserror::Error;

/// All the ways things can go wrong in scriptswitch
///
/// We use thiserror here because it generates the boilerplate for us.
/// Life's too short to manually implement Display and Error traits.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Content settings operation failed: {0}")]
    SettingsError(String),

    #[error("Storage operation failed: {0}")]
    StorageError(String),

    #[error("Tab operation failed: {0}")]
    TabError(String),

    #[error("Context menu operation failed: {0}")]
    MenuError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
