use std::sync::Arc;

use webstat_core::{
    config::Config,
    fetcher::AnalyticsFetcher,
    gate::{OwnershipGate, Redirect},
    repository::AnalyticsRepository,
    session::SessionController,
};
use webstat_duckdb::DuckDbBackend;

/// Shared application state injected into every Axum handler via
/// [`axum::extract::State`].
pub struct AppState {
    /// The DuckDB backend. Also serves as the analytics repository.
    pub db: Arc<DuckDbBackend>,

    /// Parsed configuration, loaded once at startup from environment variables.
    pub config: Arc<Config>,

    gate: OwnershipGate,

    /// Shared by every request so concurrent fetches for one website coalesce.
    fetcher: AnalyticsFetcher,
}

impl AppState {
    pub fn new(db: DuckDbBackend, config: Config) -> Self {
        let db = Arc::new(db);
        let repo: Arc<dyn AnalyticsRepository> = db.clone();
        Self {
            db,
            config: Arc::new(config),
            gate: OwnershipGate::new(Arc::clone(&repo)),
            fetcher: AnalyticsFetcher::new(repo),
        }
    }

    /// A fresh controller for one visit to `website`'s analytics view.
    pub fn session_for(&self, website: &str) -> SessionController {
        SessionController::new(
            self.gate.clone(),
            self.fetcher.clone(),
            website,
            self.config.grace_delay(),
        )
    }

    /// Configured route for a redirect decision.
    pub fn redirect_location(&self, target: Redirect) -> String {
        match target {
            Redirect::AuthEntry => self.config.auth_redirect.clone(),
            Redirect::Dashboard => self.config.dashboard_redirect.clone(),
        }
    }
}
