use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::sync::{Arc, Mutex};

use crate::config::EmbeddingsConfig;
use crate::error::{PagemindError, Result};

/// Local embedding model shared across requests. The underlying fastembed
/// model is not `Sync`, so calls are serialized through a mutex and run on
/// the blocking pool.
#[derive(Clone)]
pub struct EmbeddingProvider {
    model: Arc<Mutex<TextEmbedding>>,
    batch_size: usize,
    dimensions: usize,
}

impl EmbeddingProvider {
    pub fn new(config: &EmbeddingsConfig) -> Result<Self> {
        let embedding_model = resolve_embedding_model(&config.model);

        let model = TextEmbedding::try_new(
            InitOptions::new(embedding_model).with_show_download_progress(true),
        )
        .map_err(|e| PagemindError::Embedding(e.to_string()))?;

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
            batch_size: config.batch_size,
            dimensions: config.dimensions,
        })
    }

    async fn embed_batch(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = Arc::clone(&self.model);
        let batch_size = self.batch_size;
        tokio::task::spawn_blocking(move || {
            let mut model = model.lock().map_err(|e| {
                PagemindError::Embedding(format!("Embedding model lock poisoned: {e}"))
            })?;
            model
                .embed(texts, Some(batch_size))
                .map_err(|e| PagemindError::Embedding(e.to_string()))
        })
        .await
        .map_err(|e| PagemindError::Embedding(format!("Embedding worker failed: {e}")))?
    }

    async fn embed_single(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.embed_batch(vec![text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| PagemindError::Embedding("No embedding generated".to_string()))
    }

    /// Embed a search query. BGE-style models expect the `query:` prefix.
    pub async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        let prefixed = format!("query: {query}");
        self.embed_single(&prefixed).await
    }

    /// Embed page text for indexing, with the matching `passage:` prefix.
    pub async fn embed_passage(&self, passage: &str) -> Result<Vec<f32>> {
        let prefixed = format!("passage: {passage}");
        self.embed_single(&prefixed).await
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn resolve_embedding_model(model_name: &str) -> EmbeddingModel {
    match model_name {
        "BAAI/bge-small-en-v1.5" | "bge-small-en-v1.5" => EmbeddingModel::BGESmallENV15,
        "BAAI/bge-base-en-v1.5" | "bge-base-en-v1.5" => EmbeddingModel::BGEBaseENV15,
        "BAAI/bge-large-en-v1.5" | "bge-large-en-v1.5" => EmbeddingModel::BGELargeENV15,
        "all-MiniLM-L6-v2" | "sentence-transformers/all-MiniLM-L6-v2" => {
            EmbeddingModel::AllMiniLML6V2
        }
        "all-MiniLM-L12-v2" | "sentence-transformers/all-MiniLM-L12-v2" => {
            EmbeddingModel::AllMiniLML12V2
        }
        _ => EmbeddingModel::BGESmallENV15,
    }
}
