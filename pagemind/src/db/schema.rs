use libsql::Connection;

use crate::error::Result;

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Append-only log of every successful scrape. Re-scraping a URL
        -- appends a new row; rows are never updated or deleted.
        CREATE TABLE IF NOT EXISTS scrapes (
            id TEXT PRIMARY KEY,
            url TEXT NOT NULL,
            title TEXT,
            content TEXT NOT NULL,
            scraped_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_scrapes_url ON scrapes(url);
        CREATE INDEX IF NOT EXISTS idx_scrapes_scraped_at ON scrapes(scraped_at);

        -- Similarity index: one searchable row per URL, last write wins.
        CREATE TABLE IF NOT EXISTS snapshots (
            url TEXT PRIMARY KEY,
            content TEXT NOT NULL,
            embedding F32_BLOB(384),
            updated_at TEXT NOT NULL
        );

        -- Write-only audit trail of answered queries.
        CREATE TABLE IF NOT EXISTS queries (
            id TEXT PRIMARY KEY,
            query TEXT NOT NULL,
            response TEXT NOT NULL,
            asked_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_queries_asked_at ON queries(asked_at);
        "#,
    )
    .await?;

    Ok(())
}
