//! Error types for the stats client, catalog, shot retrieval and charts

use polars::prelude::PolarsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("player not found: {0}")]
    PlayerNotFound(String),

    #[error("team not found: {0}")]
    TeamNotFound(String),

    #[error("invalid {param}: {value:?}")]
    InvalidParam { param: &'static str, value: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("failed to read response from {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("dataframe error: {0}")]
    Frame(#[from] PolarsError),

    #[error("chart rendering failed: {0}")]
    Render(String),
}

impl Error {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::Malformed(msg.into())
    }

    /// True for failures that came from talking to the provider, as opposed to
    /// lookups or local processing.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Request { .. } | Error::Io { .. } | Error::Malformed(_)
        )
    }
}
