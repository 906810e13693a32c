use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpdsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Feed is missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for OpdsError {
    fn from(err: quick_xml::Error) -> Self {
        OpdsError::FeedParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OpdsError>;
