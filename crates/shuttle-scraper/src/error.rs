use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("could not parse schedule page: {reason}")]
    Parse { reason: String },
}

impl ScraperError {
    /// `true` for failures that happened before any markup was received.
    #[must_use]
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Http(_) | Self::UnexpectedStatus { .. })
    }
}
