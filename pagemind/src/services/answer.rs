use std::sync::Arc;

use crate::db::DatabaseBackend;
use crate::embeddings::EmbeddingProvider;
use crate::error::Result;
use crate::llm::{prompts, LlmClient};
use crate::models::QueryRecord;
use crate::services::context::{self, RecentContent, Selection, NO_CONTENT_MESSAGE};

/// Answers questions against whatever has been scraped so far.
#[derive(Clone)]
pub struct AnswerService {
    db: Arc<dyn DatabaseBackend>,
    embeddings: EmbeddingProvider,
    llm: LlmClient,
    recent: RecentContent,
}

impl AnswerService {
    pub fn new(
        db: Arc<dyn DatabaseBackend>,
        embeddings: EmbeddingProvider,
        llm: LlmClient,
        recent: RecentContent,
    ) -> Self {
        Self {
            db,
            embeddings,
            llm,
            recent,
        }
    }

    /// Answer one question. With no content anywhere, replies with the
    /// canned message and never touches the model. Otherwise the selected
    /// context and question go out as a fixed prompt, the trimmed answer is
    /// logged to the query audit trail, and an empty generation falls back
    /// to a fixed string.
    pub async fn answer(&self, question: &str) -> Result<String> {
        let context = match self.select_context(question).await? {
            Selection::Unavailable => return Ok(NO_CONTENT_MESSAGE.to_string()),
            Selection::Grounded(context) => context,
        };

        let prompt = prompts::answer_prompt(&context, question);
        tracing::debug!(prompt_chars = prompt.chars().count(), "Sending prompt to model");

        let answer = self.llm.generate(&prompt).await?;
        let answer = answer.trim().to_string();

        let record = QueryRecord::new(question, &answer);
        self.db.append_query(&record).await?;

        if answer.is_empty() {
            Ok("No answer generated.".to_string())
        } else {
            Ok(answer)
        }
    }

    /// Resolve the top-1 index hit (only when the index is non-empty) and
    /// run the selection policy over it and the recency snapshot.
    async fn select_context(&self, question: &str) -> Result<Selection> {
        let recent = self.recent.get();
        let indexed = self.db.count_snapshots().await?;

        let best_match = if indexed > 0 {
            let embedding = self.embeddings.embed_query(question).await?;
            self.db
                .nearest_snapshot(&embedding)
                .await?
                .map(|hit| hit.content)
        } else {
            None
        };

        Ok(context::select(&recent, indexed, best_match.as_deref()))
    }
}
