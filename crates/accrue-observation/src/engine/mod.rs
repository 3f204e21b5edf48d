//! Rate observation engine.
//!
//! Stateless and reentrant: the engine holds no data, never caches, and never
//! recovers from a market data failure. Caching belongs in a wrapper around
//! the environment.

mod averaged;
mod compounded;

use tracing::{trace, warn};

use accrue_core::{AccrueResult, Date, IndexId, RateEnvironment};

use crate::fixing::FixingRecord;
use crate::observation::RateObservation;

/// Computes the effective rate of an accrual period.
///
/// # Example
///
/// ```rust
/// use accrue_core::prelude::*;
/// use accrue_observation::{RateObservation, RateObservationEngine};
///
/// struct Unpopulated;
///
/// impl RateEnvironment for Unpopulated {
///     fn forward_rate(&self, index: &IndexId, date: Date) -> AccrueResult<f64> {
///         Err(AccrueError::missing_market_data(index, date, "empty environment"))
///     }
/// }
///
/// let start = Date::from_ymd(2024, 1, 2).unwrap();
/// let end = Date::from_ymd(2024, 4, 2).unwrap();
/// let engine = RateObservationEngine::new();
///
/// let rate = engine.rate(&Unpopulated, &RateObservation::fixed(0.0425), start, end);
/// assert_eq!(rate, Ok(0.0425));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RateObservationEngine;

impl RateObservationEngine {
    /// Creates an engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns the rate of `observation` over the accrual period.
    ///
    /// # Errors
    ///
    /// - `AccrueError::MissingMarketData` if the environment cannot supply an
    ///   unpublished fixing; no partial result is returned.
    /// - `AccrueError::InvalidAccrualPeriod` if a compounded observation is
    ///   given a period ending before it starts.
    pub fn rate<E>(
        &self,
        env: &E,
        observation: &RateObservation,
        accrual_start: Date,
        accrual_end: Date,
    ) -> AccrueResult<f64>
    where
        E: RateEnvironment + ?Sized,
    {
        trace!(
            kind = observation.kind(),
            start = %accrual_start,
            end = %accrual_end,
            "observing rate"
        );
        match observation {
            RateObservation::FixedRate { rate } => Ok(*rate),
            RateObservation::SingleFixing { index, fixing_date } => {
                single_fixing_rate(env, index, *fixing_date)
            }
            RateObservation::AveragedFixings(obs) => averaged::rate(env, obs),
            RateObservation::CompoundedFixings(obs) => {
                compounded::rate(env, obs, accrual_start, accrual_end)
            }
        }
    }

    /// Computes one rate per item, isolating failures.
    ///
    /// A failure on one item does not affect the others; each result is
    /// returned in input order.
    pub fn rate_batch<'a, E, I>(&self, env: &E, items: I) -> Vec<AccrueResult<f64>>
    where
        E: RateEnvironment + ?Sized,
        I: IntoIterator<Item = (&'a RateObservation, Date, Date)>,
    {
        items
            .into_iter()
            .enumerate()
            .map(|(position, (observation, start, end))| {
                let result = self.rate(env, observation, start, end);
                if let Err(e) = &result {
                    warn!(position, kind = observation.kind(), error = %e, "rate observation failed");
                }
                result
            })
            .collect()
    }
}

/// A single fixing is a one-entry fixing list with no published rate.
fn single_fixing_rate<E>(env: &E, index: &IndexId, fixing_date: Date) -> AccrueResult<f64>
where
    E: RateEnvironment + ?Sized,
{
    FixingRecord::of(fixing_date).effective_rate(env, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrue_core::AccrueError;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    struct OneDate {
        date: Date,
        rate: f64,
    }

    impl RateEnvironment for OneDate {
        fn forward_rate(&self, index: &IndexId, fixing_date: Date) -> AccrueResult<f64> {
            if fixing_date == self.date {
                Ok(self.rate)
            } else {
                Err(AccrueError::missing_market_data(index, fixing_date, "no curve entry"))
            }
        }
    }

    #[test]
    fn test_fixed_rate_ignores_environment() {
        let env = OneDate {
            date: date(2030, 1, 1),
            rate: 0.99,
        };
        let engine = RateObservationEngine::new();
        let rate = engine
            .rate(&env, &RateObservation::fixed(0.031), date(2024, 1, 2), date(2024, 4, 2))
            .unwrap();
        assert_eq!(rate, 0.031);
    }

    #[test]
    fn test_single_fixing_queries_environment() {
        let env = OneDate {
            date: date(2024, 2, 1),
            rate: 0.0545,
        };
        let obs = RateObservation::single(IndexId::new("USD-LIBOR-3M"), date(2024, 2, 1));
        let rate = RateObservationEngine::new()
            .rate(&env, &obs, date(2024, 2, 3), date(2024, 5, 3))
            .unwrap();
        assert_relative_eq!(rate, 0.0545, epsilon = 1e-15);

        let missing = RateObservation::single(IndexId::new("USD-LIBOR-3M"), date(2024, 2, 2));
        let err = RateObservationEngine::new()
            .rate(&env, &missing, date(2024, 2, 3), date(2024, 5, 3))
            .unwrap_err();
        assert!(err.is_missing_market_data());
    }

    #[test]
    fn test_rate_batch_isolates_failures() {
        let env = OneDate {
            date: date(2024, 2, 1),
            rate: 0.0545,
        };
        let index = IndexId::new("USD-LIBOR-3M");
        let good = RateObservation::single(index.clone(), date(2024, 2, 1));
        let bad = RateObservation::single(index, date(2024, 3, 1));
        let fixed = RateObservation::fixed(0.02);
        let start = date(2024, 1, 2);
        let end = date(2024, 4, 2);

        let results = RateObservationEngine::new().rate_batch(
            &env,
            [(&good, start, end), (&bad, start, end), (&fixed, start, end)],
        );

        assert_eq!(results.len(), 3);
        assert_eq!(results[0], Ok(0.0545));
        assert!(results[1].as_ref().unwrap_err().is_missing_market_data());
        assert_eq!(results[2], Ok(0.02));
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync + Copy>() {}
        assert_send_sync::<RateObservationEngine>();
    }
}
