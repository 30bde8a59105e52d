use std::sync::Arc;

use tracing::{debug, error};

use crate::aggregate::AggregatedSnapshot;
use crate::error::FetchError;
use crate::inflight::InFlight;
use crate::repository::AnalyticsRepository;

/// Loads both event streams for a website and reduces them to a snapshot.
///
/// Cheap to clone; clones share the repository and the in-flight guard.
#[derive(Clone)]
pub struct AnalyticsFetcher {
    repo: Arc<dyn AnalyticsRepository>,
    inflight: Arc<InFlight<AggregatedSnapshot>>,
}

impl AnalyticsFetcher {
    pub fn new(repo: Arc<dyn AnalyticsRepository>) -> Self {
        Self {
            repo,
            inflight: Arc::new(InFlight::new()),
        }
    }

    /// Query page views and visits concurrently, then aggregate.
    ///
    /// Never fails: a stream whose query errors is logged and counted as empty.
    pub async fn fetch_analytics(&self, website_name: &str) -> AggregatedSnapshot {
        let (page_views, visits) = tokio::join!(
            self.repo.page_views_for_domain(website_name),
            self.repo.visits_for_website(website_name),
        );

        let page_views = page_views.map_err(FetchError::PageViews).unwrap_or_else(|e| {
            error!(website = website_name, error = %e, "Analytics stream degraded to empty");
            Vec::new()
        });
        let visits = visits.map_err(FetchError::Visits).unwrap_or_else(|e| {
            error!(website = website_name, error = %e, "Analytics stream degraded to empty");
            Vec::new()
        });

        let snapshot = AggregatedSnapshot::from_events(&page_views, &visits);
        debug!(
            website = website_name,
            page_views = snapshot.total_page_views,
            visits = snapshot.total_visits,
            paths = snapshot.grouped_pages.len(),
            "Analytics fetched"
        );
        snapshot
    }

    /// [`Self::fetch_analytics`], shared with any fetch for the same website
    /// that is already running.
    pub async fn fetch_shared(&self, website_name: &str) -> Arc<AggregatedSnapshot> {
        self.inflight
            .run(website_name, || self.fetch_analytics(website_name))
            .await
    }
}
