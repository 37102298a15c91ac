use std::cmp::Ordering;

use serde::Serialize;

use crate::model::record::{Bounds, Record, Table};

/// How many emitters the top-k view shows.
pub const TOP_K: usize = 5;

/// The largest emitters for one year, value descending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopKResult {
    pub year: i32,
    pub records: Vec<Record>,
}

impl TopKResult {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Every record of one entity, in table order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendResult {
    pub entity: String,
    pub records: Vec<Record>,
}

impl TrendResult {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn year_bounds(&self) -> Option<Bounds<i32>> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some(Bounds { min, max })
    }

    pub fn value_bounds(&self) -> Option<Bounds<f64>> {
        let mut values = self.records.iter().map(|r| r.value);
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Bounds { min, max })
    }
}

/// Up to `k` records of `year`, largest value first.
///
/// The sort is stable, so values that compare equal (including `-0.0` and
/// `0.0`) keep their table order. A year with no rows gives an empty result.
pub fn top_k_by_year(table: &Table, year: i32, k: usize) -> TopKResult {
    let mut records: Vec<Record> = table.iter().filter(|r| r.year == year).cloned().collect();
    records.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    records.truncate(k);
    TopKResult { year, records }
}

/// All records whose entity equals `entity` exactly (case-sensitive).
pub fn trend_for_entity(table: &Table, entity: &str) -> TrendResult {
    let records = table.iter().filter(|r| r.entity == entity).cloned().collect();
    TrendResult { entity: entity.to_string(), records }
}
