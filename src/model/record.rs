use serde::{Deserialize, Serialize};

/// One (entity, year, value) observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub entity: String,
    pub year: i32,
    pub value: f64,
}

impl Record {
    pub fn new(entity: impl Into<String>, year: i32, value: f64) -> Self {
        Self { entity: entity.into(), year, value }
    }
}

/// Ordered, read-only collection of records.
///
/// Built once by the loader and shared behind an `Arc`. There is no
/// mutating API; duplicates of (entity, year) are kept as loaded.
#[derive(Debug, Clone, Default)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Inclusive `[min, max]` range over a result set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}
