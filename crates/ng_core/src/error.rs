use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid page request: page {selected} of an empty result set")]
    InvalidPageRequest { selected: u64 },

    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid time zone offset: {0}")]
    InvalidTimeZone(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Upstream error ({status}): {code}: {message}")]
    Upstream {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// True for failures that came from the news service rather than from
    /// local input.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Network(_) | Error::Upstream { .. } | Error::RateLimited(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
