use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::AppState;

/// Health payload: service status plus the backing components.
#[derive(Debug, Clone, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub database: DatabaseStatus,
    pub embeddings: EmbeddingsStatus,
    pub llm: LlmStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed_pages: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingsStatus {
    pub status: String,
    pub model: String,
    pub dimensions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LlmStatus {
    pub model: String,
    pub base_url: String,
}

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthData> {
    let database = match state.db.count_snapshots().await {
        Ok(count) => DatabaseStatus {
            status: "ok".to_string(),
            indexed_pages: Some(count),
        },
        Err(_) => DatabaseStatus {
            status: "error".to_string(),
            indexed_pages: None,
        },
    };

    let embeddings = EmbeddingsStatus {
        status: "ok".to_string(),
        model: state.config.embeddings.model.clone(),
        dimensions: state.embeddings.dimensions(),
    };

    let llm = LlmStatus {
        model: state.llm.model().to_string(),
        base_url: state.llm.base_url().to_string(),
    };

    Json(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        embeddings,
        llm,
    })
}
