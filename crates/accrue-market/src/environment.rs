//! Market data environment for a valuation date.

use std::collections::HashMap;

use tracing::trace;

use accrue_core::{AccrueError, AccrueResult, Date, IndexId, RateEnvironment};

use crate::fixing_store::IndexFixingStore;
use crate::forward_curve::ForwardCurve;

/// Published fixings and forward curves as of a valuation date.
///
/// Lookup rules for `forward_rate(index, date)`:
/// - **before** the valuation date: the published fixing is required
/// - **on** the valuation date: the published fixing if there is one,
///   otherwise the forward curve
/// - **after** the valuation date: the forward curve
///
/// Anything not covered fails with `AccrueError::MissingMarketData`.
///
/// # Example
///
/// ```rust
/// use accrue_core::prelude::*;
/// use accrue_market::{ForwardCurve, MarketEnvironment};
///
/// let libor = IndexId::new("USD-LIBOR-3M");
/// let today = Date::from_ymd(2024, 1, 15).unwrap();
/// let feb1 = Date::from_ymd(2024, 2, 1).unwrap();
///
/// let env = MarketEnvironment::builder(today)
///     .fixing(&libor, Date::from_ymd(2024, 1, 2).unwrap(), 0.0530)
///     .curve(&libor, ForwardCurve::single(feb1, 0.0545).unwrap())
///     .build();
///
/// assert_eq!(env.forward_rate(&libor, feb1), Ok(0.0545));
/// assert!(env.forward_rate(&libor, Date::from_ymd(2024, 1, 3).unwrap()).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MarketEnvironment {
    valuation_date: Date,
    fixings: IndexFixingStore,
    curves: HashMap<IndexId, ForwardCurve>,
}

impl MarketEnvironment {
    /// Creates a builder for a valuation date.
    #[must_use]
    pub fn builder(valuation_date: Date) -> MarketEnvironmentBuilder {
        MarketEnvironmentBuilder::new(valuation_date)
    }

    /// Returns the valuation date.
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns the published fixings.
    pub fn fixings(&self) -> &IndexFixingStore {
        &self.fixings
    }

    /// Returns the forward curve of an index.
    pub fn curve(&self, index: &IndexId) -> Option<&ForwardCurve> {
        self.curves.get(index)
    }

    /// Returns true if a forward curve exists for the index.
    pub fn has_curve(&self, index: &IndexId) -> bool {
        self.curves.contains_key(index)
    }

    /// Returns all indices with a forward curve, sorted.
    pub fn curve_indices(&self) -> Vec<IndexId> {
        let mut indices: Vec<IndexId> = self.curves.keys().cloned().collect();
        indices.sort();
        indices
    }

    fn forecast(&self, index: &IndexId, fixing_date: Date) -> AccrueResult<f64> {
        let curve = self.curves.get(index).ok_or_else(|| {
            AccrueError::missing_market_data(index, fixing_date, "no forward curve for index")
        })?;
        curve.rate_at(fixing_date).ok_or_else(|| {
            AccrueError::missing_market_data(
                index,
                fixing_date,
                format!(
                    "date outside forward curve range {} to {}",
                    curve.first_date(),
                    curve.last_date()
                ),
            )
        })
    }
}

impl RateEnvironment for MarketEnvironment {
    fn forward_rate(&self, index: &IndexId, fixing_date: Date) -> AccrueResult<f64> {
        let published = self.fixings.get_fixing(index, fixing_date);
        if fixing_date < self.valuation_date {
            trace!(index = %index, date = %fixing_date, "historical fixing lookup");
            return published.ok_or_else(|| {
                AccrueError::missing_market_data(index, fixing_date, "no published fixing for past date")
            });
        }
        if let Some(rate) = published {
            trace!(index = %index, date = %fixing_date, rate, "using today's published fixing");
            return Ok(rate);
        }
        trace!(index = %index, date = %fixing_date, "forecasting from curve");
        self.forecast(index, fixing_date)
    }
}

/// Builder for a [`MarketEnvironment`].
#[derive(Debug, Clone)]
pub struct MarketEnvironmentBuilder {
    valuation_date: Date,
    fixings: IndexFixingStore,
    curves: HashMap<IndexId, ForwardCurve>,
}

impl MarketEnvironmentBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(valuation_date: Date) -> Self {
        Self {
            valuation_date,
            fixings: IndexFixingStore::new(),
            curves: HashMap::new(),
        }
    }

    /// Adds a published fixing.
    #[must_use]
    pub fn fixing(mut self, index: &IndexId, date: Date, rate: f64) -> Self {
        self.fixings.add_fixing(index, date, rate);
        self
    }

    /// Replaces the fixing store.
    #[must_use]
    pub fn fixings(mut self, fixings: IndexFixingStore) -> Self {
        self.fixings = fixings;
        self
    }

    /// Sets the forward curve of an index, replacing any earlier one.
    #[must_use]
    pub fn curve(mut self, index: &IndexId, curve: ForwardCurve) -> Self {
        self.curves.insert(index.clone(), curve);
        self
    }

    /// Freezes the environment.
    #[must_use]
    pub fn build(self) -> MarketEnvironment {
        MarketEnvironment {
            valuation_date: self.valuation_date,
            fixings: self.fixings,
            curves: self.curves,
        }
    }
}
