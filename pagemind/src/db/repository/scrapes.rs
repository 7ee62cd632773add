use libsql::{params, Connection};

use crate::error::{PagemindError, Result};
use crate::models::ScrapeRecord;

pub struct ScrapeRepository;

impl ScrapeRepository {
    pub async fn append(conn: &Connection, record: &ScrapeRecord) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO scrapes (id, url, title, content, scraped_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                record.id.clone(),
                record.url.clone(),
                record.title.clone(),
                record.content.clone(),
                record.scraped_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn count_for_url(conn: &Connection, url: &str) -> Result<u64> {
        let row = conn
            .query("SELECT COUNT(*) FROM scrapes WHERE url = ?1", params![url])
            .await?
            .next()
            .await?
            .ok_or_else(|| PagemindError::Internal("COUNT returned no row".to_string()))?;

        let count: i64 = row.get(0)?;
        Ok(count as u64)
    }
}
