use libsql::{params, Connection};

use crate::error::{PagemindError, Result};
use crate::models::{Snapshot, SnapshotHit};

pub struct SnapshotRepository;

impl SnapshotRepository {
    pub async fn upsert(conn: &Connection, snapshot: &Snapshot) -> Result<()> {
        let embedding_json = serde_json::to_string(&snapshot.embedding)?;

        conn.execute(
            r#"
            INSERT INTO snapshots (url, content, embedding, updated_at)
            VALUES (?1, ?2, vector32(?3), ?4)
            ON CONFLICT(url) DO UPDATE SET
                content = excluded.content,
                embedding = excluded.embedding,
                updated_at = excluded.updated_at
            "#,
            params![
                snapshot.url.clone(),
                snapshot.content.clone(),
                embedding_json,
                snapshot.updated_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn count(conn: &Connection) -> Result<u64> {
        let row = conn
            .query("SELECT COUNT(*) FROM snapshots", ())
            .await?
            .next()
            .await?
            .ok_or_else(|| PagemindError::Internal("COUNT returned no row".to_string()))?;

        let count: i64 = row.get(0)?;
        Ok(count as u64)
    }

    /// Rank every embedded snapshot by cosine similarity to `embedding` and
    /// return the top `limit` rows. No similarity threshold: the best match
    /// wins however distant it is.
    pub async fn nearest(
        conn: &Connection,
        embedding: &[f32],
        limit: u32,
    ) -> Result<Vec<SnapshotHit>> {
        let embedding_json = serde_json::to_string(embedding)?;

        let mut rows = conn
            .query(
                r#"
                SELECT
                    url,
                    content,
                    1 - vector_distance_cos(embedding, vector32(?1)) as score
                FROM snapshots
                WHERE embedding IS NOT NULL
                ORDER BY score DESC
                LIMIT ?2
                "#,
                params![embedding_json, limit],
            )
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            let score = row.get::<f64>(2)? as f32;

            results.push(SnapshotHit {
                url: row.get(0)?,
                content: row.get(1)?,
                score,
            });
        }

        Ok(results)
    }
}
