use anyhow::Result;

use webstat_core::event::{PageViewEvent, VisitEvent};

use crate::DuckDbBackend;

impl DuckDbBackend {
    /// Store one page view. `created_at` defaults to the current timestamp.
    pub async fn record_page_view(&self, domain: Option<&str>, page: Option<&str>) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO page_views (domain, page) VALUES (?1, ?2)",
            duckdb::params![domain, page],
        )?;
        Ok(())
    }

    /// Store one visit. `source` is the `?utm=` value, if any.
    pub async fn record_visit(&self, website_id: Option<&str>, source: Option<&str>) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO visits (website_id, source) VALUES (?1, ?2)",
            duckdb::params![website_id, source],
        )?;
        Ok(())
    }

    pub async fn page_views_by_domain(&self, domain: &str) -> Result<Vec<PageViewEvent>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, CAST(created_at AS VARCHAR), domain, page \
             FROM page_views WHERE domain = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(duckdb::params![domain], |row| {
            Ok(PageViewEvent {
                id: row.get(0)?,
                created_at: row.get(1)?,
                domain: row.get(2)?,
                page: row.get(3)?,
            })
        })?;

        let mut events = Vec::new();
        for row in rows {
            events.push(row?);
        }
        Ok(events)
    }

    pub async fn visits_by_website(&self, website_id: &str) -> Result<Vec<VisitEvent>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, CAST(created_at AS VARCHAR), website_id, source \
             FROM visits WHERE website_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(duckdb::params![website_id], |row| {
            Ok(VisitEvent {
                id: row.get(0)?,
                created_at: row.get(1)?,
                website_id: row.get(2)?,
                source: row.get(3)?,
            })
        })?;

        let mut events = Vec::new();
        for row in rows {
            events.push(row?);
        }
        Ok(events)
    }
}
