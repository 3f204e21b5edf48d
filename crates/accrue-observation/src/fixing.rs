//! A single observation date within an averaging or compounding period.

use serde::{Deserialize, Serialize};

use accrue_core::{AccrueError, AccrueResult, Date, IndexId, RateEnvironment};

/// One fixing of an index inside an observation period.
///
/// Carries the realized rate once the fixing has been published, and the
/// weight with which it contributes to the period rate (typically the number
/// of calendar days the fixing applies to).
///
/// # Example
///
/// ```rust
/// use accrue_core::Date;
/// use accrue_observation::FixingRecord;
///
/// let date = Date::from_ymd(2024, 1, 2).unwrap();
/// let published = FixingRecord::realized(date, 0.0530, 31.0);
/// assert_eq!(published.realized_rate(), Some(0.0530));
///
/// let forecast = FixingRecord::new(date, 31.0);
/// assert!(!forecast.is_realized());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixingRecord {
    fixing_date: Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    realized_rate: Option<f64>,
    #[serde(default = "default_weight")]
    weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl FixingRecord {
    /// Creates a fixing that has not been published yet.
    #[must_use]
    pub fn new(fixing_date: Date, weight: f64) -> Self {
        Self {
            fixing_date,
            realized_rate: None,
            weight,
        }
    }

    /// Creates a fixing whose rate has already been published.
    #[must_use]
    pub fn realized(fixing_date: Date, rate: f64, weight: f64) -> Self {
        Self {
            fixing_date,
            realized_rate: Some(rate),
            weight,
        }
    }

    /// Creates an unpublished fixing with the default weight of one.
    #[must_use]
    pub fn of(fixing_date: Date) -> Self {
        Self::new(fixing_date, default_weight())
    }

    /// Returns the date the index is observed.
    pub fn fixing_date(&self) -> Date {
        self.fixing_date
    }

    /// Returns the published rate, if any.
    pub fn realized_rate(&self) -> Option<f64> {
        self.realized_rate
    }

    /// Returns the weight of this fixing.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns true if the rate has been published.
    pub fn is_realized(&self) -> bool {
        self.realized_rate.is_some()
    }

    /// Checks the record's own invariants.
    ///
    /// The weight must be finite and strictly positive; a realized rate must
    /// be finite.
    pub fn validate(&self) -> AccrueResult<()> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(AccrueError::invalid_observation(format!(
                "fixing on {} has non-positive weight {}",
                self.fixing_date, self.weight
            )));
        }
        if let Some(rate) = self.realized_rate {
            if !rate.is_finite() {
                return Err(AccrueError::invalid_observation(format!(
                    "fixing on {} has non-finite realized rate",
                    self.fixing_date
                )));
            }
        }
        Ok(())
    }

    /// Returns the rate this fixing contributes.
    ///
    /// The realized rate when published, otherwise the environment's rate for
    /// `index` on the fixing date. The environment is not queried for a
    /// realized fixing.
    pub fn effective_rate<E>(&self, env: &E, index: &IndexId) -> AccrueResult<f64>
    where
        E: RateEnvironment + ?Sized,
    {
        match self.realized_rate {
            Some(rate) => Ok(rate),
            None => env.forward_rate(index, self.fixing_date),
        }
    }
}
