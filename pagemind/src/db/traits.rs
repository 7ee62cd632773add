use async_trait::async_trait;

use crate::error::Result;
use crate::models::{QueryRecord, ScrapeRecord, Snapshot, SnapshotHit};

/// Append-only access to the scrape log.
#[async_trait]
pub trait ScrapeStore: Send + Sync {
    async fn append_scrape(&self, record: &ScrapeRecord) -> Result<()>;
    async fn count_scrapes_for_url(&self, url: &str) -> Result<u64>;
}

/// The URL-keyed similarity index.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Insert or overwrite the entry for `snapshot.url`.
    async fn upsert_snapshot(&self, snapshot: &Snapshot) -> Result<()>;
    async fn count_snapshots(&self) -> Result<u64>;
    /// Top-1 nearest neighbor by cosine similarity, or `None` when the
    /// index holds no embedded rows.
    async fn nearest_snapshot(&self, embedding: &[f32]) -> Result<Option<SnapshotHit>>;
}

/// Write-only query audit log.
#[async_trait]
pub trait QueryLogStore: Send + Sync {
    async fn append_query(&self, record: &QueryRecord) -> Result<()>;
}

/// A complete storage backend combining all store traits.
pub trait DatabaseBackend: ScrapeStore + SnapshotStore + QueryLogStore {}
