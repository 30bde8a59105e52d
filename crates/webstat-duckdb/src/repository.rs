use async_trait::async_trait;

use webstat_core::event::{PageViewEvent, VisitEvent, WebsiteRecord};
use webstat_core::repository::AnalyticsRepository;

use crate::DuckDbBackend;

#[async_trait]
impl AnalyticsRepository for DuckDbBackend {
    async fn websites_owned_by(
        &self,
        website_name: &str,
        user_id: &str,
    ) -> anyhow::Result<Vec<WebsiteRecord>> {
        DuckDbBackend::find_websites(self, website_name, user_id).await
    }

    async fn page_views_for_domain(&self, domain: &str) -> anyhow::Result<Vec<PageViewEvent>> {
        DuckDbBackend::page_views_by_domain(self, domain).await
    }

    async fn visits_for_website(&self, website_id: &str) -> anyhow::Result<Vec<VisitEvent>> {
        DuckDbBackend::visits_by_website(self, website_id).await
    }
}
