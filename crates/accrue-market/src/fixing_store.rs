//! Index fixing store for historical rate lookups.
//!
//! Holds the rates that have actually been published for each index, so that
//! fixings dated before the valuation date are never forecast.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use accrue_core::{Date, IndexId};

/// A single published fixing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexFixing {
    /// The rate index
    pub index: IndexId,
    /// The fixing date
    pub date: Date,
    /// The fixing rate (as decimal, e.g., 0.0530 for 5.30%)
    pub rate: f64,
}

impl IndexFixing {
    /// Creates a new index fixing.
    #[must_use]
    pub fn new(index: IndexId, date: Date, rate: f64) -> Self {
        Self { index, date, rate }
    }
}

/// Storage for historical rate fixings, by index then date.
///
/// # Example
///
/// ```rust
/// use accrue_core::{Date, IndexId};
/// use accrue_market::IndexFixingStore;
///
/// let sofr = IndexId::new("USD-SOFR");
/// let jan2 = Date::from_ymd(2024, 1, 2).unwrap();
///
/// let mut store = IndexFixingStore::new();
/// store.add_fixing(&sofr, jan2, 0.0531);
/// assert_eq!(store.get_fixing(&sofr, jan2), Some(0.0531));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndexFixingStore {
    fixings: BTreeMap<IndexId, BTreeMap<Date, f64>>,
}

impl IndexFixingStore {
    /// Creates a new empty fixing store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single fixing, replacing any earlier value for the same date.
    pub fn add_fixing(&mut self, index: &IndexId, date: Date, rate: f64) {
        self.fixings
            .entry(index.clone())
            .or_default()
            .insert(date, rate);
    }

    /// Adds a fixing using an [`IndexFixing`].
    pub fn add(&mut self, fixing: IndexFixing) {
        self.fixings
            .entry(fixing.index)
            .or_default()
            .insert(fixing.date, fixing.rate);
    }

    /// Adds multiple fixings at once.
    pub fn add_fixings(&mut self, fixings: impl IntoIterator<Item = IndexFixing>) {
        for fixing in fixings {
            self.add(fixing);
        }
    }

    /// Retrieves the fixing for an index and date.
    #[must_use]
    pub fn get_fixing(&self, index: &IndexId, date: Date) -> Option<f64> {
        self.fixings.get(index).and_then(|dates| dates.get(&date).copied())
    }

    /// Retrieves all fixings for an index between start and end (inclusive),
    /// in chronological order.
    #[must_use]
    pub fn get_range(&self, index: &IndexId, start: Date, end: Date) -> Vec<(Date, f64)> {
        if end < start {
            return Vec::new();
        }
        self.fixings
            .get(index)
            .map(|dates| dates.range(start..=end).map(|(d, r)| (*d, *r)).collect())
            .unwrap_or_default()
    }

    /// Returns the most recent fixing on or before the given date.
    #[must_use]
    pub fn last_fixing_before(&self, index: &IndexId, date: Date) -> Option<(Date, f64)> {
        self.fixings
            .get(index)
            .and_then(|dates| dates.range(..=date).next_back().map(|(d, r)| (*d, *r)))
    }

    /// Returns the count of fixings for an index.
    #[must_use]
    pub fn count(&self, index: &IndexId) -> usize {
        self.fixings.get(index).map_or(0, BTreeMap::len)
    }

    /// Returns true if the store has any fixings for the given index.
    #[must_use]
    pub fn has_index(&self, index: &IndexId) -> bool {
        self.fixings.contains_key(index)
    }

    /// Returns all indices in the store.
    #[must_use]
    pub fn indices(&self) -> Vec<IndexId> {
        self.fixings.keys().cloned().collect()
    }

    /// Creates a store from date-rate pairs for a single index.
    #[must_use]
    pub fn from_rates(index: &IndexId, rates: impl IntoIterator<Item = (Date, f64)>) -> Self {
        let mut store = Self::new();
        for (date, rate) in rates {
            store.add_fixing(index, date, rate);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn sofr() -> IndexId {
        IndexId::new("USD-SOFR")
    }

    #[test]
    fn test_add_and_get_fixing() {
        let mut store = IndexFixingStore::new();
        store.add_fixing(&sofr(), date(2024, 1, 2), 0.0530);

        assert_eq!(store.get_fixing(&sofr(), date(2024, 1, 2)), Some(0.0530));
        assert_eq!(store.get_fixing(&sofr(), date(2024, 1, 3)), None);
        assert_eq!(store.get_fixing(&IndexId::new("GBP-SONIA"), date(2024, 1, 2)), None);
    }

    #[test]
    fn test_get_range() {
        let store = IndexFixingStore::from_rates(
            &sofr(),
            [
                (date(2024, 1, 2), 0.0530),
                (date(2024, 1, 3), 0.0532),
                (date(2024, 1, 4), 0.0531),
                (date(2024, 1, 5), 0.0533),
            ],
        );

        let range = store.get_range(&sofr(), date(2024, 1, 2), date(2024, 1, 4));
        assert_eq!(
            range,
            vec![
                (date(2024, 1, 2), 0.0530),
                (date(2024, 1, 3), 0.0532),
                (date(2024, 1, 4), 0.0531),
            ]
        );
        assert!(store.get_range(&sofr(), date(2024, 1, 4), date(2024, 1, 2)).is_empty());
    }

    #[test]
    fn test_last_fixing_before() {
        let store = IndexFixingStore::from_rates(
            &sofr(),
            [(date(2024, 1, 2), 0.0530), (date(2024, 1, 3), 0.0532), (date(2024, 1, 5), 0.0531)],
        );

        assert_eq!(
            store.last_fixing_before(&sofr(), date(2024, 1, 3)),
            Some((date(2024, 1, 3), 0.0532))
        );
        assert_eq!(
            store.last_fixing_before(&sofr(), date(2024, 1, 4)),
            Some((date(2024, 1, 3), 0.0532))
        );
        assert_eq!(store.last_fixing_before(&sofr(), date(2024, 1, 1)), None);
    }

    #[test]
    fn test_count_and_indices() {
        let mut store = IndexFixingStore::new();
        assert!(!store.has_index(&sofr()));
        assert_eq!(store.count(&sofr()), 0);

        store.add_fixings([
            IndexFixing::new(sofr(), date(2024, 1, 2), 0.0530),
            IndexFixing::new(sofr(), date(2024, 1, 3), 0.0532),
            IndexFixing::new(IndexId::new("EUR-ESTR"), date(2024, 1, 2), 0.0390),
        ]);

        assert!(store.has_index(&sofr()));
        assert_eq!(store.count(&sofr()), 2);
        assert_eq!(store.indices(), vec![IndexId::new("EUR-ESTR"), sofr()]);
    }
}
