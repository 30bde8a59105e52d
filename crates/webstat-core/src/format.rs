//! Display strings for counts.

use serde::Serialize;

use crate::aggregate::AggregatedSnapshot;

const MILLION: u64 = 1_000_000;
const THOUSAND: u64 = 1_000;

/// Abbreviate a count for display.
///
/// * `n >= 1_000_000` → millions with one decimal and a `" M"` suffix.
/// * `1_000 <= n < 1_000_000` → `" K"` suffix, but the value is still divided
///   by one million, so `1_500` renders as `"0.0 K"`. Kept as shipped until
///   product decides on the intended scale.
/// * anything smaller → the plain number.
pub fn abbreviate(n: u64) -> String {
    if n >= MILLION {
        format!("{} M", to_fixed_1(n as f64 / MILLION as f64))
    } else if n >= THOUSAND {
        format!("{} K", to_fixed_1(n as f64 / MILLION as f64))
    } else {
        n.to_string()
    }
}

/// One decimal place, nearest to the exact value of `x`, ties rounding up.
///
/// Only odd multiples of 0.25 are exact ties at one decimal; everything else
/// is handled by the standard formatter.
fn to_fixed_1(x: f64) -> String {
    let quarters = x * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        let quarters = quarters as u64;
        let tenth = if quarters % 4 == 1 { 3 } else { 8 };
        return format!("{}.{}", quarters / 4, tenth);
    }
    format!("{x:.1}")
}

/// One row of the top pages list as the page renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDisplay {
    pub path: String,
    pub visits: String,
}

/// The snapshot with every number already abbreviated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotDisplay {
    pub total_visits: String,
    pub total_page_views: String,
    pub top_pages: Vec<PageDisplay>,
}

impl From<&AggregatedSnapshot> for SnapshotDisplay {
    fn from(snapshot: &AggregatedSnapshot) -> Self {
        Self {
            total_visits: abbreviate(snapshot.total_visits),
            total_page_views: abbreviate(snapshot.total_page_views),
            top_pages: snapshot
                .grouped_pages
                .iter()
                .map(|page| PageDisplay {
                    path: format!("/{}", page.path),
                    visits: abbreviate(page.visits),
                })
                .collect(),
        }
    }
}
