use axum::extract::State;

use crate::api::dto::{ErrorBody, Reply, ScrapePreview, ScrapeRequest};
use crate::api::AppState;
use crate::error::PagemindError;

/// `POST /scrape`
///
/// Fetches the URL, extracts its text, and on success records it in the
/// recency state, the similarity index, and the append-only scrape log.
pub async fn scrape(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<ScrapeRequest>,
) -> Reply<ScrapePreview> {
    let Some(url) = req.url.filter(|u| !u.is_empty()) else {
        return Reply::Err(ErrorBody::new("Missing URL"));
    };

    match state.scrape.ingest(&url).await {
        Ok(preview) => Reply::Ok(ScrapePreview {
            success: true,
            data: preview,
        }),
        Err(PagemindError::EmptyExtraction) => {
            Reply::Err(ErrorBody::new("Content could not be extracted"))
        }
        Err(e) => {
            tracing::error!(error = %e, %url, "Scrape failed");
            Reply::Err(ErrorBody::with_details("Failed to fetch data", e.to_string()))
        }
    }
}
