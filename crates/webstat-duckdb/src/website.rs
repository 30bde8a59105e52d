use anyhow::Result;

use webstat_core::event::WebsiteRecord;

use crate::DuckDbBackend;

const WEBSITE_COLUMNS: &str =
    "id, website_name, user_id, CAST(created_at AS VARCHAR) AS created_at";

fn map_website(row: &duckdb::Row<'_>) -> duckdb::Result<WebsiteRecord> {
    Ok(WebsiteRecord {
        id: row.get(0)?,
        website_name: row.get(1)?,
        user_id: row.get(2)?,
        created_at: row.get(3)?,
    })
}

impl DuckDbBackend {
    /// Register `website_name` as owned by `user_id` and return the new row.
    pub async fn create_website(&self, website_name: &str, user_id: &str) -> Result<WebsiteRecord> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO websites (website_name, user_id) VALUES (?1, ?2)",
            duckdb::params![website_name, user_id],
        )?;

        // Read back the created row to get the id and timestamp.
        let website = conn
            .prepare(&format!(
                "SELECT {WEBSITE_COLUMNS} FROM websites \
                 WHERE website_name = ?1 AND user_id = ?2 \
                 ORDER BY id DESC LIMIT 1"
            ))?
            .query_row(duckdb::params![website_name, user_id], map_website)?;
        Ok(website)
    }

    /// Ownership rows for `(website_name, user_id)`. Usually zero or one.
    pub async fn find_websites(&self, website_name: &str, user_id: &str) -> Result<Vec<WebsiteRecord>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {WEBSITE_COLUMNS} FROM websites \
             WHERE website_name = ?1 AND user_id = ?2 \
             ORDER BY id"
        ))?;
        let rows = stmt.query_map(duckdb::params![website_name, user_id], map_website)?;

        let mut websites = Vec::new();
        for row in rows {
            websites.push(row?);
        }
        Ok(websites)
    }
}
