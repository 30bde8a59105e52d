//! Presentation state for one visit to a website's analytics view.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::aggregate::AggregatedSnapshot;
use crate::fetcher::AnalyticsFetcher;
use crate::gate::{Decision, OwnershipGate, Redirect};
use crate::identity::Identity;

/// Where the view is in its fetch cycle.
///
/// `Loading` moves to exactly one of the other three and stays there until
/// [`SessionController::reload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Empty,
    Populated(Arc<AggregatedSnapshot>),
    Redirect(Redirect),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Empty => "empty",
            ViewState::Populated(_) => "populated",
            ViewState::Redirect(_) => "redirect",
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, ViewState::Loading)
    }
}

/// Sequences gate → grace delay → fetch for a single website.
pub struct SessionController {
    gate: OwnershipGate,
    fetcher: AnalyticsFetcher,
    website_name: String,
    grace_delay: Duration,
    state: ViewState,
}

impl SessionController {
    pub fn new(
        gate: OwnershipGate,
        fetcher: AnalyticsFetcher,
        website_name: impl Into<String>,
        grace_delay: Duration,
    ) -> Self {
        Self {
            gate,
            fetcher,
            website_name: website_name.into(),
            grace_delay,
            state: ViewState::Loading,
        }
    }

    pub fn website_name(&self) -> &str {
        &self.website_name
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Drive one fetch cycle to completion.
    ///
    /// The ownership check settles before any analytics query is issued. A
    /// settled controller returns its state without querying again.
    pub async fn run(&mut self, identity: Option<&Identity>) -> &ViewState {
        if self.state.is_settled() {
            return &self.state;
        }

        if let Decision::Denied(target) = self
            .gate
            .verify_ownership(identity, &self.website_name)
            .await
        {
            self.state = ViewState::Redirect(target);
            return &self.state;
        }

        tokio::time::sleep(self.grace_delay).await;

        let snapshot = self.fetcher.fetch_shared(&self.website_name).await;
        self.state = if snapshot.is_empty() {
            info!(website = %self.website_name, "No page views recorded yet");
            ViewState::Empty
        } else {
            ViewState::Populated(snapshot)
        };
        &self.state
    }

    /// Manual refresh: drop the current result and start over on the next
    /// [`Self::run`].
    pub fn reload(&mut self) {
        self.state = ViewState::Loading;
    }
}
