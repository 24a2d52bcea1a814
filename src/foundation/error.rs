use std::collections::BTreeMap;

/// Crate-wide result alias.
pub type CollectResult<T> = Result<T, CollectError>;

/// Machine-readable key for "nothing on disk matches the write node output".
pub const NO_RENDER_FILES: &str = "no_render_files";

#[derive(thiserror::Error, Debug)]
pub enum CollectError {
    /// User-actionable problem; `key` and `context` let a UI render a dedicated message.
    #[error("validation error [{key}]: {message}")]
    Validation {
        key: String,
        message: String,
        context: BTreeMap<String, String>,
    },

    /// The media probe itself could not run or read the file.
    #[error("probe error: {0}")]
    Probe(String),

    #[error("version error: {0}")]
    Version(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CollectError {
    pub fn validation(
        key: impl Into<String>,
        message: impl Into<String>,
        context: impl IntoIterator<Item = (&'static str, String)>,
    ) -> Self {
        Self::Validation {
            key: key.into(),
            message: message.into(),
            context: context
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe(msg.into())
    }

    pub fn version(msg: impl Into<String>) -> Self {
        Self::Version(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Validation key, when this is a validation error.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Validation { key, .. } => Some(key.as_str()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CollectError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
