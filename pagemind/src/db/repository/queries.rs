use libsql::{params, Connection};

use crate::error::Result;
use crate::models::QueryRecord;

pub struct QueryLogRepository;

impl QueryLogRepository {
    pub async fn append(conn: &Connection, record: &QueryRecord) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO queries (id, query, response, asked_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                record.id.clone(),
                record.query.clone(),
                record.response.clone(),
                record.asked_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }
}
