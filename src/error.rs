use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KaraokeError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse TextGrid '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error(
        "tier \"{requested}\" not found. Available tiers: {}",
        quoted_list(available)
    )]
    TierNotFound {
        requested: String,
        available: Vec<String>,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl KaraokeError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn parse(path: &Path, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub(crate) fn tier_not_found(requested: &str, available: Vec<String>) -> Self {
        Self::TierNotFound {
            requested: requested.to_string(),
            available,
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

fn quoted_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
