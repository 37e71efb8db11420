use crate::catalog::filter::Filter;
use crate::catalog::record::{CatalogRecord, RecordKey};
use crate::prelude::{ArsenalError, ArsenalResult};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

const EMBEDDED_DATASET: &str = include_str!("../../data/missiles.json");

/// Immutable record table, loaded once at startup.
///
/// Records live behind an `Arc` so the view can clone the catalog into its
/// boot closure without copying the table.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Arc<[CatalogRecord]>,
}

impl Catalog {
    /// Loads the dataset compiled into the binary.
    pub fn embedded() -> ArsenalResult<Self> {
        Self::from_json(EMBEDDED_DATASET)
    }

    pub fn from_json(json: &str) -> ArsenalResult<Self> {
        let records: Vec<CatalogRecord> =
            serde_json::from_str(json).map_err(|e| ArsenalError::CatalogParse(e.to_string()))?;
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<CatalogRecord>) -> ArsenalResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if record.name.trim().is_empty() {
                return Err(ArsenalError::InvalidRecord("record with empty name".into()));
            }
            if record.category.trim().is_empty() {
                return Err(ArsenalError::InvalidRecord(format!(
                    "{} has no category",
                    record.name
                )));
            }
            if !record.range.is_finite() || record.range < 0.0 {
                return Err(ArsenalError::InvalidRecord(format!(
                    "{} has range {}",
                    record.name, record.range
                )));
            }
            if !seen.insert(record.key()) {
                return Err(ArsenalError::DuplicateRecord {
                    category: record.category.clone(),
                    name: record.name.clone(),
                });
            }
        }

        Ok(Self {
            records: records.into(),
        })
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogRecord> {
        self.records.get(index)
    }

    pub fn position(&self, key: &RecordKey) -> Option<usize> {
        self.records.iter().position(|record| record.matches_key(key))
    }

    /// Sorted, de-duplicated category tags present in the table.
    pub fn categories(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|record| record.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Pick-list options: the sentinel sorted together with the categories.
    pub fn filter_options(&self) -> Vec<Filter> {
        let mut labels = self.categories();
        labels.push(Filter::ALL_LABEL.to_string());
        labels.sort();
        labels.iter().map(|label| Filter::from_label(label)).collect()
    }

    /// Indices of records shown under `filter`, in table order.
    pub fn visible_indices(&self, filter: &Filter) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| filter.matches(record))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn visible(&self, filter: &Filter) -> Vec<&CatalogRecord> {
        self.records
            .iter()
            .filter(|record| filter.matches(record))
            .collect()
    }
}
