use serde::{Deserialize, Serialize};

/// One row of the `page_views` table.
///
/// `page` is the full URL the tracker reported, or `None` when it sent none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageViewEvent {
    pub id: i64,
    pub created_at: String,
    pub domain: Option<String>,
    pub page: Option<String>,
}

/// One row of the `visits` table. `source` is `None` when the visit carried
/// no attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitEvent {
    pub id: i64,
    pub created_at: String,
    pub website_id: Option<String>,
    pub source: Option<String>,
}

/// A `websites` row returned by the ownership query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteRecord {
    pub id: i64,
    pub website_name: String,
    pub user_id: String,
    pub created_at: String,
}
