use std::{io, path::PathBuf};

use thiserror::Error;

/// Everything that can go wrong while tagging a single file.
///
/// None of these abort a run; the caller reports them and moves on.
#[derive(Debug, Error)]
pub enum TagError {
    #[error("file not found: {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("bad filename: {0}")]
    InvalidFilename(String),

    #[error("request to {url} failed")]
    FetchTransport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed with status {status}")]
    FetchStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("unexpected response from {url}, probably BotB is unavailable or misbehaving")]
    FetchDecode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no metadata found for `{0}`")]
    NoMetadata(String),

    #[error("ambiguous result for `{phrase}`: {count} entries match")]
    Ambiguous { phrase: String, count: usize },

    #[error("couldn't open tags of {}", path.display())]
    TagOpen {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    #[error("couldn't save tags of {}", path.display())]
    TagSave {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },
}

impl TagError {
    /// True for the failures of the HTTP layer itself, as opposed to a
    /// response that arrived but made no sense.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            TagError::FetchTransport { .. } | TagError::FetchStatus { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TagError>;
