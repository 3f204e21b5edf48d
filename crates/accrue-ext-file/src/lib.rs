//! # Accrue Ext File
//!
//! Populates a [`MarketEnvironment`](accrue_market::MarketEnvironment) from a
//! directory of market data files, ahead of any rate computation:
//!
//! ```text
//! <root>/
//!   fixings/*.csv   index,date,rate
//!   curves/*.json   {"index": "...", "pillars": [{"date": "...", "rate": ...}]}
//! ```
//!
//! The rate engine never touches this crate; it only sees the environment
//! built here.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod config;
mod loader;
mod resources;

pub use config::MarketDataConfig;
pub use loader::MarketDataLoader;
pub use resources::{DirectoryResources, MarketDataResources, ResourceLocator};
