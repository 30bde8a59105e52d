use thiserror::Error;

use crate::gate::Redirect;

/// Reasons the ownership gate refuses a request.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("no authenticated identity")]
    Unauthenticated,

    #[error("role {0:?} may not view website analytics")]
    RoleNotPermitted(String),

    #[error("website {website:?} is not owned by user {user_id:?}")]
    NotOwner { website: String, user_id: String },

    #[error("ownership query failed: {0}")]
    OwnershipQuery(#[source] anyhow::Error),
}

impl AccessError {
    /// Where the caller should send the user instead of the website view.
    ///
    /// Identity problems go back to the auth entry; everything else lands on
    /// the dashboard. Query failures deny like a missing row does.
    pub fn redirect(&self) -> Redirect {
        match self {
            AccessError::Unauthenticated | AccessError::RoleNotPermitted(_) => Redirect::AuthEntry,
            AccessError::NotOwner { .. } | AccessError::OwnershipQuery(_) => Redirect::Dashboard,
        }
    }
}

/// A failed analytics stream. Logged by the fetcher, never returned.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("page view query failed: {0}")]
    PageViews(#[source] anyhow::Error),

    #[error("visit query failed: {0}")]
    Visits(#[source] anyhow::Error),
}
