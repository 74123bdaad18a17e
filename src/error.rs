use thiserror::Error;

/// Failures that abort a single request.
///
/// Malformed listing entries and duplicate ids are filtered during a merge and
/// never surface here.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("decode error: {0}")]
    Decode(String),
}

impl FeedError {
    pub fn is_transport(&self) -> bool {
        matches!(self, FeedError::Transport(_) | FeedError::Status { .. })
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FeedError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => FeedError::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Decode(err.to_string())
    }
}

impl From<image::ImageError> for FeedError {
    fn from(err: image::ImageError) -> Self {
        FeedError::Decode(err.to_string())
    }
}
