//! Wire types for the scrape and query operations.
//!
//! Both operations reply with a structured body and HTTP 200 in every case;
//! failures never surface at the transport layer. Success and error bodies
//! serialize flat (no envelope), which is why [`Reply`] is untagged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeRequest {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: Option<String>,
}

/// Success body for `POST /scrape`: a bounded preview of the extracted text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapePreview {
    pub success: bool,
    pub data: String,
}

/// Success body for `POST /query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnswer {
    pub response: String,
}

/// Structured failure body shared by both operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// Success-or-error reply for one operation.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Reply<T: Serialize> {
    Ok(T),
    Err(ErrorBody),
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
