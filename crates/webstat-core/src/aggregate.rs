use std::collections::HashMap;

use serde::Serialize;

use crate::event::{PageViewEvent, VisitEvent};
use crate::path::normalize_path;

/// Visit count for one normalized path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedPageMetric {
    pub path: String,
    pub visits: u64,
}

/// Everything one fetch cycle produced for a website.
///
/// Built fresh per cycle and replaced wholesale by the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregatedSnapshot {
    pub total_visits: u64,
    pub total_page_views: u64,
    pub grouped_pages: Vec<GroupedPageMetric>,
}

impl AggregatedSnapshot {
    pub fn from_events(page_views: &[PageViewEvent], visits: &[VisitEvent]) -> Self {
        Self {
            total_visits: visits.len() as u64,
            total_page_views: page_views.len() as u64,
            grouped_pages: group_by_path(page_views),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_page_views == 0
    }
}

/// Count page views per normalized path.
///
/// Events without a page are skipped. The result is sorted by visits
/// descending, then path ascending.
pub fn group_by_path(events: &[PageViewEvent]) -> Vec<GroupedPageMetric> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for event in events {
        if let Some(path) = normalize_path(event.page.as_deref()) {
            *counts.entry(path).or_insert(0) += 1;
        }
    }

    let mut grouped: Vec<GroupedPageMetric> = counts
        .into_iter()
        .map(|(path, visits)| GroupedPageMetric {
            path: path.to_string(),
            visits,
        })
        .collect();
    grouped.sort_by(|a, b| b.visits.cmp(&a.visits).then_with(|| a.path.cmp(&b.path)));
    grouped
}
