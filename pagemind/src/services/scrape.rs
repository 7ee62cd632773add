use std::sync::Arc;

use chrono::Utc;

use crate::db::DatabaseBackend;
use crate::embeddings::EmbeddingProvider;
use crate::error::{PagemindError, Result};
use crate::models::{ScrapeRecord, Snapshot};
use crate::processing::PageExtractor;
use crate::services::context::{truncate_chars, RecentContent};

/// Characters of extracted text returned to the caller as a preview.
const PREVIEW_CHARS: usize = 500;

/// Ingestion: fetch a page, extract its text, and record it everywhere the
/// query path looks (recency state, similarity index, durable log).
#[derive(Clone)]
pub struct ScrapeService {
    db: Arc<dyn DatabaseBackend>,
    embeddings: EmbeddingProvider,
    extractor: PageExtractor,
    recent: RecentContent,
}

impl ScrapeService {
    pub fn new(
        db: Arc<dyn DatabaseBackend>,
        embeddings: EmbeddingProvider,
        extractor: PageExtractor,
        recent: RecentContent,
    ) -> Self {
        Self {
            db,
            embeddings,
            extractor,
            recent,
        }
    }

    /// Scrape one URL. On success every store is updated and the first 500
    /// characters of the text come back as a preview. A page that extracts
    /// to nothing fails with [`PagemindError::EmptyExtraction`] and mutates
    /// no state at all.
    pub async fn ingest(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "Fetching content");
        let page = self.extractor.fetch(url).await?;

        if page.text.is_empty() {
            return Err(PagemindError::EmptyExtraction);
        }

        self.recent.set(page.text.clone());

        let embedding = self.embeddings.embed_passage(&page.text).await?;
        let snapshot = Snapshot {
            url: url.to_string(),
            content: page.text.clone(),
            embedding,
            updated_at: Utc::now(),
        };
        self.db.upsert_snapshot(&snapshot).await?;

        let record = ScrapeRecord::new(url, page.title, page.text.clone());
        self.db.append_scrape(&record).await?;

        tracing::info!(url, chars = page.text.chars().count(), "Scrape indexed");
        Ok(truncate_chars(&page.text, PREVIEW_CHARS))
    }
}
