//! Filter / group / sort stages shared by the scenes.
//!
//! These functions know nothing about drawing, so every scene's data can be
//! checked without a rendering surface.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::config::StoryConfig;
use crate::model::Dataset;

/// A category (year or region) with its summed sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPoint<C> {
    pub category: C,
    pub total: f64,
}

pub type YearTotal = AggregatedPoint<i32>;
pub type RegionTotal = AggregatedPoint<String>;

/// Sum the world total per year, ascending by year.
pub fn global_trend(dataset: &Dataset, world_region: &str) -> Vec<YearTotal> {
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
    for record in dataset.iter().filter(|r| r.region == world_region) {
        *by_year.entry(record.year).or_default() += record.value;
    }
    by_year
        .into_iter()
        .map(|(category, total)| AggregatedPoint { category, total })
        .collect()
}

/// Sum sales per country for `year`, descending by total.
///
/// Aggregate regions listed in the config are left out. Equal totals are
/// ordered by region name so repeated renders agree.
pub fn country_totals(dataset: &Dataset, year: i32, config: &StoryConfig) -> Vec<RegionTotal> {
    let mut by_region: HashMap<&str, f64> = HashMap::new();
    for record in dataset
        .iter()
        .filter(|r| r.year == year && !config.is_excluded(&r.region))
    {
        *by_region.entry(record.region.as_str()).or_default() += record.value;
    }

    let mut entries: Vec<RegionTotal> = by_region
        .into_iter()
        .map(|(region, total)| AggregatedPoint {
            category: region.to_string(),
            total,
        })
        .collect();
    entries.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });
    entries
}

/// The `config.top_n` best-selling countries for `year`.
pub fn top_countries(dataset: &Dataset, year: i32, config: &StoryConfig) -> Vec<RegionTotal> {
    let mut entries = country_totals(dataset, year, config);
    entries.truncate(config.top_n);
    entries
}

/// Largest total among `points`, or `None` when empty.
pub fn max_total<C>(points: &[AggregatedPoint<C>]) -> Option<f64> {
    points.iter().map(|p| p.total).reduce(f64::max)
}
