//! Error type shared by the resolver and its capabilities.

/// Errors surfaced by theme parsing, storage, and configuration.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// A mode string outside `light`/`dark`/`system`.
    #[error("invalid theme mode: {value:?}")]
    InvalidArgument { value: String },
    /// The environment denied access to persistent storage.
    #[error("preference storage unavailable: {0}")]
    StorageUnavailable(String),
    /// Configuration JSON could not be parsed.
    #[error("invalid resolver config: {0}")]
    Config(#[from] serde_json::Error),
}
