use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("no element matches `{anchor}`")]
    Parse { anchor: String },

    #[error("price text {text:?} is not a number")]
    Format { text: String },

    #[error("webhook delivery failed: {0}")]
    Delivery(String),

    #[error("invalid settings: {0}")]
    Config(String),

    #[error(transparent)]
    Settings(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
