use async_trait::async_trait;

use crate::db::connection::Database;
use crate::db::repository::{QueryLogRepository, ScrapeRepository, SnapshotRepository};
use crate::db::traits::{DatabaseBackend, QueryLogStore, ScrapeStore, SnapshotStore};
use crate::error::Result;
use crate::models::{QueryRecord, ScrapeRecord, Snapshot, SnapshotHit};

pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ScrapeStore for LibSqlBackend {
    async fn append_scrape(&self, record: &ScrapeRecord) -> Result<()> {
        let conn = self.db.connect()?;
        ScrapeRepository::append(&conn, record).await
    }
    async fn count_scrapes_for_url(&self, url: &str) -> Result<u64> {
        let conn = self.db.connect()?;
        ScrapeRepository::count_for_url(&conn, url).await
    }
}

#[async_trait]
impl SnapshotStore for LibSqlBackend {
    async fn upsert_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let conn = self.db.connect()?;
        SnapshotRepository::upsert(&conn, snapshot).await
    }
    async fn count_snapshots(&self) -> Result<u64> {
        let conn = self.db.connect()?;
        SnapshotRepository::count(&conn).await
    }
    async fn nearest_snapshot(&self, embedding: &[f32]) -> Result<Option<SnapshotHit>> {
        let conn = self.db.connect()?;
        let hits = SnapshotRepository::nearest(&conn, embedding, 1).await?;
        Ok(hits.into_iter().next())
    }
}

#[async_trait]
impl QueryLogStore for LibSqlBackend {
    async fn append_query(&self, record: &QueryRecord) -> Result<()> {
        let conn = self.db.connect()?;
        QueryLogRepository::append(&conn, record).await
    }
}

impl DatabaseBackend for LibSqlBackend {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::connection::Database;

    async fn setup_test_db() -> LibSqlBackend {
        use std::time::{SystemTime, UNIX_EPOCH};

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let thread_id = std::thread::current().id();

        let config = DatabaseConfig {
            url: format!(
                "file:/tmp/pagemind_test_db_{thread_id:?}_{timestamp}?mode=memory&cache=shared"
            ),
            auth_token: None,
        };
        let db = Database::new(&config)
            .await
            .expect("Failed to create database");

        LibSqlBackend::new(db)
    }

    fn axis_embedding(axis: usize) -> Vec<f32> {
        let mut v = vec![0.0_f32; 384];
        v[axis] = 1.0;
        v
    }

    fn snapshot(url: &str, content: &str, embedding: Vec<f32>) -> Snapshot {
        Snapshot {
            url: url.to_string(),
            content: content.to_string(),
            embedding,
            updated_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_scrape_log_is_append_only() {
        let backend = setup_test_db().await;

        let first = ScrapeRecord::new("http://example.com", None, "version one".into());
        let second = ScrapeRecord::new("http://example.com", None, "version two".into());
        backend.append_scrape(&first).await.unwrap();
        backend.append_scrape(&second).await.unwrap();

        assert_eq!(
            backend
                .count_scrapes_for_url("http://example.com")
                .await
                .unwrap(),
            2
        );
        assert_eq!(
            backend.count_scrapes_for_url("http://other.com").await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_snapshot_upsert_is_last_write_wins() {
        let backend = setup_test_db().await;

        backend
            .upsert_snapshot(&snapshot("http://example.com", "old text", axis_embedding(0)))
            .await
            .unwrap();
        backend
            .upsert_snapshot(&snapshot("http://example.com", "new text", axis_embedding(0)))
            .await
            .unwrap();

        assert_eq!(backend.count_snapshots().await.unwrap(), 1);

        let hit = backend
            .nearest_snapshot(&axis_embedding(0))
            .await
            .unwrap()
            .expect("index should have one entry");
        assert_eq!(hit.url, "http://example.com");
        assert_eq!(hit.content, "new text");
    }

    #[tokio::test]
    async fn test_nearest_snapshot_ranks_by_cosine_similarity() {
        let backend = setup_test_db().await;

        backend
            .upsert_snapshot(&snapshot("http://a.com", "about cats", axis_embedding(0)))
            .await
            .unwrap();
        backend
            .upsert_snapshot(&snapshot("http://b.com", "about dogs", axis_embedding(1)))
            .await
            .unwrap();

        // A query vector close to axis 1 should surface the dogs page.
        let mut query = vec![0.0_f32; 384];
        query[1] = 0.9;
        query[2] = 0.1;

        let hit = backend
            .nearest_snapshot(&query)
            .await
            .unwrap()
            .expect("two entries indexed");
        assert_eq!(hit.url, "http://b.com");
        assert!(hit.score > 0.5, "expected a close match, got {}", hit.score);
    }

    #[tokio::test]
    async fn test_nearest_snapshot_empty_index_returns_none() {
        let backend = setup_test_db().await;

        assert_eq!(backend.count_snapshots().await.unwrap(), 0);
        let hit = backend.nearest_snapshot(&axis_embedding(0)).await.unwrap();
        assert!(hit.is_none());
    }

    #[tokio::test]
    async fn test_query_log_append() {
        let backend = setup_test_db().await;

        let record = QueryRecord::new("what is this page about?", "cats");
        backend.append_query(&record).await.unwrap();

        // Write-only contract: nothing reads the table back, so verify at
        // the SQL level that the row landed.
        let conn = backend.db.connect().unwrap();
        let row = conn
            .query(
                "SELECT query, response FROM queries WHERE id = ?1",
                libsql::params![record.id.clone()],
            )
            .await
            .unwrap()
            .next()
            .await
            .unwrap()
            .expect("query row should exist");
        let query: String = row.get(0).unwrap();
        let response: String = row.get(1).unwrap();
        assert_eq!(query, "what is this page about?");
        assert_eq!(response, "cats");
    }
}
