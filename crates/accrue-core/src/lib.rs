//! # Accrue Core
//!
//! Core types and abstractions shared by the Accrue rate observation crates.
//!
//! - **Types**: [`Date`] and [`IndexId`]
//! - **Errors**: [`AccrueError`], the single error taxonomy for the workspace
//! - **Environment**: [`RateEnvironment`], the one capability the rate engine
//!   needs from market data
//!
//! ## Example
//!
//! ```rust
//! use accrue_core::prelude::*;
//!
//! struct Flat(f64);
//!
//! impl RateEnvironment for Flat {
//!     fn forward_rate(&self, _index: &IndexId, _fixing_date: Date) -> AccrueResult<f64> {
//!         Ok(self.0)
//!     }
//! }
//!
//! let env = Flat(0.05);
//! let date = Date::from_ymd(2024, 2, 1).unwrap();
//! assert_eq!(env.forward_rate(&IndexId::new("USD-LIBOR-3M"), date).unwrap(), 0.05);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod environment;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::environment::RateEnvironment;
    pub use crate::error::{AccrueError, AccrueResult};
    pub use crate::types::{Date, IndexId};
}

pub use environment::RateEnvironment;
pub use error::{AccrueError, AccrueResult};
pub use types::{Date, IndexId};
