use chrono::{DateTime, Utc};
use nanoid::nanoid;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row in the append-only scrape log. Every successful scrape appends a
/// new record, including re-scrapes of a URL already seen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRecord {
    pub id: String,
    pub url: String,
    pub title: Option<String>,
    pub content: String,
    pub scraped_at: DateTime<Utc>,
}

impl ScrapeRecord {
    pub fn new(url: &str, title: Option<String>, content: String) -> Self {
        Self {
            id: nanoid!(),
            url: url.to_string(),
            title,
            content,
            scraped_at: Utc::now(),
        }
    }
}

/// The similarity-index entry for a URL. Keyed by the exact URL string, so
/// re-scraping overwrites the previous entry (last-write-wins).
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub url: String,
    pub content: String,
    pub embedding: Vec<f32>,
    pub updated_at: DateTime<Utc>,
}

/// A nearest-neighbor hit from the snapshot index.
#[derive(Debug, Clone)]
pub struct SnapshotHit {
    pub url: String,
    pub content: String,
    pub score: f32,
}

/// Audit row for an answered query. Written once, never read back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRecord {
    pub id: String,
    pub query: String,
    pub response: String,
    pub asked_at: DateTime<Utc>,
}

impl QueryRecord {
    pub fn new(query: &str, response: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            query: query.to_string(),
            response: response.to_string(),
            asked_at: Utc::now(),
        }
    }
}
