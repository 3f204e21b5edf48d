//! # Accrue Observation
//!
//! Derives the effective floating rate of an accrual period.
//!
//! A [`RateObservation`] describes *how* a period's rate is obtained:
//!
//! - [`RateObservation::SingleFixing`]: one fixing of an index
//! - [`RateObservation::AveragedFixings`]: weighted arithmetic mean of several fixings
//! - [`RateObservation::CompoundedFixings`]: fixings compounded in order, then annualized
//! - [`RateObservation::FixedRate`]: a fixed override
//!
//! The [`RateObservationEngine`] turns an observation plus a
//! [`RateEnvironment`](accrue_core::RateEnvironment) into a single rate. Fixings
//! that have already been published carry their realized rate and never hit
//! the environment; all others are forecast from it.
//!
//! ## Example
//!
//! ```rust
//! use accrue_core::prelude::*;
//! use accrue_observation::{FixingRecord, RateObservation, RateObservationEngine};
//!
//! struct Curve;
//!
//! impl RateEnvironment for Curve {
//!     fn forward_rate(&self, index: &IndexId, date: Date) -> AccrueResult<f64> {
//!         if date == Date::from_ymd(2024, 2, 1)? {
//!             Ok(0.0545)
//!         } else {
//!             Err(AccrueError::missing_market_data(index, date, "not on curve"))
//!         }
//!     }
//! }
//!
//! # fn main() -> AccrueResult<()> {
//! let observation = RateObservation::averaged(
//!     IndexId::new("USD-LIBOR-3M"),
//!     vec![
//!         FixingRecord::realized(Date::from_ymd(2024, 1, 2)?, 0.0530, 31.0),
//!         FixingRecord::new(Date::from_ymd(2024, 2, 1)?, 29.0),
//!     ],
//! )?;
//!
//! let rate = RateObservationEngine::new().rate(
//!     &Curve,
//!     &observation,
//!     Date::from_ymd(2024, 1, 2)?,
//!     Date::from_ymd(2024, 3, 1)?,
//! )?;
//! assert!((rate - 0.053725).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod engine;
mod fixing;
mod observation;

pub use engine::RateObservationEngine;
pub use fixing::FixingRecord;
pub use observation::{AveragedFixings, CompoundedFixings, RateObservation};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::RateObservationEngine;
    pub use crate::fixing::FixingRecord;
    pub use crate::observation::{AveragedFixings, CompoundedFixings, RateObservation};
}
