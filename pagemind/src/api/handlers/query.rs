use axum::extract::State;

use crate::api::dto::{ErrorBody, QueryAnswer, QueryRequest, Reply};
use crate::api::AppState;
use crate::error::PagemindError;

/// `POST /query`
///
/// Selects the grounding context, forwards the fixed prompt to the model,
/// logs the question/answer pair, and returns the answer. A model reply
/// that is not JSON is reported verbatim in `details`.
pub async fn query(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<QueryRequest>,
) -> Reply<QueryAnswer> {
    let question = req.query.as_deref().map(str::trim).unwrap_or_default();
    if question.is_empty() {
        return Reply::Err(ErrorBody::new("Missing query"));
    }

    match state.answer.answer(question).await {
        Ok(response) => Reply::Ok(QueryAnswer { response }),
        Err(PagemindError::LlmMalformed { body }) => {
            Reply::Err(ErrorBody::with_details("Invalid response from Ollama", body))
        }
        Err(e) => {
            tracing::error!(error = %e, "Query failed");
            Reply::Err(ErrorBody::with_details(
                "Failed to process query",
                e.to_string(),
            ))
        }
    }
}
