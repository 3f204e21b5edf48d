//! # Accrue Market
//!
//! An in-memory [`RateEnvironment`](accrue_core::RateEnvironment):
//!
//! - [`IndexFixingStore`]: published historical fixings
//! - [`ForwardCurve`]: forward rates by fixing date, interpolated between pillars
//! - [`MarketEnvironment`]: answers `forward_rate` from fixings or curves
//!   depending on the valuation date
//! - [`CachedEnvironment`]: memoizing wrapper around any environment
//!
//! Environments are assembled once, then frozen and shared read-only across
//! a valuation pass.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

mod cached;
mod environment;
mod fixing_store;
mod forward_curve;

pub use cached::CachedEnvironment;
pub use environment::{MarketEnvironment, MarketEnvironmentBuilder};
pub use fixing_store::{IndexFixing, IndexFixingStore};
pub use forward_curve::{CurvePillar, ForwardCurve};
