//! The market data contract consumed by the rate observation engine.
//!
//! A single-method trait keeps test doubles trivial: a closure-sized struct
//! implementing [`RateEnvironment`] is enough to drive the engine.

use std::sync::Arc;

use crate::error::AccrueResult;
use crate::types::{Date, IndexId};

/// Supplies the rate of an index for a fixing date.
///
/// Implementations return the published fixing when one exists for the date
/// and a forecast from the projection curve otherwise. Anything not covered
/// must fail with [`AccrueError::MissingMarketData`](crate::AccrueError::MissingMarketData);
/// returning a default value is never acceptable.
///
/// Implementations are read-only during a valuation pass and must be safe to
/// query from several threads at once.
pub trait RateEnvironment: Send + Sync {
    /// Returns the rate of `index` observed on `fixing_date`.
    fn forward_rate(&self, index: &IndexId, fixing_date: Date) -> AccrueResult<f64>;
}

impl<T: RateEnvironment + ?Sized> RateEnvironment for &T {
    fn forward_rate(&self, index: &IndexId, fixing_date: Date) -> AccrueResult<f64> {
        (**self).forward_rate(index, fixing_date)
    }
}

impl<T: RateEnvironment + ?Sized> RateEnvironment for Arc<T> {
    fn forward_rate(&self, index: &IndexId, fixing_date: Date) -> AccrueResult<f64> {
        (**self).forward_rate(index, fixing_date)
    }
}

impl<T: RateEnvironment + ?Sized> RateEnvironment for Box<T> {
    fn forward_rate(&self, index: &IndexId, fixing_date: Date) -> AccrueResult<f64> {
        (**self).forward_rate(index, fixing_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccrueError;

    struct Empty;

    impl RateEnvironment for Empty {
        fn forward_rate(&self, index: &IndexId, fixing_date: Date) -> AccrueResult<f64> {
            Err(AccrueError::missing_market_data(index, fixing_date, "empty"))
        }
    }

    struct Flat(f64);

    impl RateEnvironment for Flat {
        fn forward_rate(&self, _index: &IndexId, _fixing_date: Date) -> AccrueResult<f64> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_wrappers_delegate() {
        let date = Date::from_ymd(2024, 1, 2).unwrap();
        let index = IndexId::new("EUR-EURIBOR-6M");

        let boxed: Box<dyn RateEnvironment> = Box::new(Flat(0.031));
        assert_eq!(boxed.forward_rate(&index, date).unwrap(), 0.031);

        let shared: Arc<dyn RateEnvironment> = Arc::new(Empty);
        assert!(shared.forward_rate(&index, date).unwrap_err().is_missing_market_data());

        let flat = Flat(0.02);
        let by_ref = &flat;
        assert_eq!(by_ref.forward_rate(&index, date).unwrap(), 0.02);
    }
}
