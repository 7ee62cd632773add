use thiserror::Error;

#[derive(Error, Debug)]
pub enum PagemindError {
    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Content could not be extracted")]
    EmptyExtraction,

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM returned a body that is not valid JSON")]
    LlmMalformed { body: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, PagemindError>;
