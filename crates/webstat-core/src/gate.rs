use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::error::AccessError;
use crate::identity::Identity;
use crate::repository::AnalyticsRepository;

/// Landing view for a denied request. The concrete routes are configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Redirect {
    AuthEntry,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied(Redirect),
}

/// Decides whether an identity may see a website's analytics.
#[derive(Clone)]
pub struct OwnershipGate {
    repo: Arc<dyn AnalyticsRepository>,
}

impl OwnershipGate {
    pub fn new(repo: Arc<dyn AnalyticsRepository>) -> Self {
        Self { repo }
    }

    /// Run the ownership check and collapse the outcome into a decision.
    ///
    /// Denials are logged; query failures deny.
    pub async fn verify_ownership(
        &self,
        identity: Option<&Identity>,
        website_name: &str,
    ) -> Decision {
        match self.check(identity, website_name).await {
            Ok(()) => Decision::Allowed,
            Err(e @ AccessError::OwnershipQuery(_)) => {
                error!(website = website_name, error = %e, "Ownership check failed");
                Decision::Denied(e.redirect())
            }
            Err(e) => {
                info!(website = website_name, reason = %e, "Website access denied");
                Decision::Denied(e.redirect())
            }
        }
    }

    /// Same check, with the reason for a denial.
    pub async fn check(
        &self,
        identity: Option<&Identity>,
        website_name: &str,
    ) -> Result<(), AccessError> {
        let identity = identity.ok_or(AccessError::Unauthenticated)?;
        if !identity.is_authenticated() {
            return Err(AccessError::RoleNotPermitted(identity.role.clone()));
        }

        let rows = self
            .repo
            .websites_owned_by(website_name, &identity.id)
            .await
            .map_err(AccessError::OwnershipQuery)?;

        if rows.is_empty() {
            return Err(AccessError::NotOwner {
                website: website_name.to_string(),
                user_id: identity.id.clone(),
            });
        }
        Ok(())
    }
}
