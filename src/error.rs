use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rating payload missing or malformed field: {field}")]
    MissingField { field: &'static str },

    #[error("selector error: {0}")]
    Selector(String),
}

pub type Result<T> = std::result::Result<T, BotError>;
