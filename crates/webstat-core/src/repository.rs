//! Query contract the analytics pipeline needs from storage.

use async_trait::async_trait;

use crate::event::{PageViewEvent, VisitEvent, WebsiteRecord};

/// Read-only, equality-filtered selects over the three tables the pipeline
/// touches.
///
/// The DuckDB backend implements this for production; tests substitute an
/// in-memory fake.
#[async_trait]
pub trait AnalyticsRepository: Send + Sync + 'static {
    /// `websites` rows with `website_name = website_name AND user_id = user_id`.
    async fn websites_owned_by(
        &self,
        website_name: &str,
        user_id: &str,
    ) -> anyhow::Result<Vec<WebsiteRecord>>;

    /// `page_views` rows with `domain = domain`.
    async fn page_views_for_domain(&self, domain: &str) -> anyhow::Result<Vec<PageViewEvent>>;

    /// `visits` rows with `website_id = website_id`.
    async fn visits_for_website(&self, website_id: &str) -> anyhow::Result<Vec<VisitEvent>>;
}
