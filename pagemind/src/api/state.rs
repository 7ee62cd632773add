use std::sync::Arc;

use crate::config::Config;
use crate::db::DatabaseBackend;
use crate::embeddings::EmbeddingProvider;
use crate::llm::LlmClient;
use crate::processing::PageExtractor;
use crate::services::{AnswerService, RecentContent, ScrapeService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn DatabaseBackend>,
    pub embeddings: EmbeddingProvider,
    pub llm: LlmClient,
    pub recent: RecentContent,
    pub scrape: ScrapeService,
    pub answer: AnswerService,
}

impl AppState {
    pub fn new(
        config: Config,
        db: Arc<dyn DatabaseBackend>,
        embeddings: EmbeddingProvider,
        llm: LlmClient,
    ) -> Self {
        let config = Arc::new(config);
        let recent = RecentContent::new();
        let extractor = PageExtractor::new(&config.scrape);
        let scrape = ScrapeService::new(
            db.clone(),
            embeddings.clone(),
            extractor,
            recent.clone(),
        );
        let answer = AnswerService::new(db.clone(), embeddings.clone(), llm.clone(), recent.clone());

        Self {
            config,
            db,
            embeddings,
            llm,
            recent,
            scrape,
            answer,
        }
    }
}
