//! Error types for the Accrue workspace.
//!
//! Every crate reports failures through [`AccrueError`]. The variants mirror
//! the failure classes of a rate computation: missing market data, a
//! structurally invalid observation, or a failure at the resource loading
//! boundary.

use thiserror::Error;

use crate::types::{Date, IndexId};

/// A specialized Result type for Accrue operations.
pub type AccrueResult<T> = Result<T, AccrueError>;

/// The main error type for Accrue operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccrueError {
    /// No curve or fixing covers the requested index and date.
    ///
    /// Never retried: forward curves do not appear mid-computation.
    #[error("Missing market data for {index} on {date}: {reason}")]
    MissingMarketData {
        /// Index that was queried.
        index: IndexId,
        /// Fixing date that was queried.
        date: Date,
        /// What was missing.
        reason: String,
    },

    /// A rate observation violates a structural invariant.
    #[error("Invalid observation: {reason}")]
    InvalidObservation {
        /// Description of the violated invariant.
        reason: String,
    },

    /// The accrual period ends before it starts.
    #[error("Invalid accrual period: {start} to {end}")]
    InvalidAccrualPeriod {
        /// Accrual start date.
        start: Date,
        /// Accrual end date.
        end: Date,
    },

    /// A forward curve was assembled from inconsistent pillars.
    #[error("Invalid curve: {reason}")]
    InvalidCurve {
        /// Description of the inconsistency.
        reason: String,
    },

    /// A market data resource could not be read.
    #[error("Resource access failed for {location}: {reason}")]
    ResourceAccess {
        /// Location of the resource.
        location: String,
        /// Underlying failure.
        reason: String,
    },

    /// Malformed market data content.
    #[error("Parse error: {reason}")]
    Parse {
        /// Description of the malformed content.
        reason: String,
    },

    /// Error in date construction or parsing.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the configuration error.
        reason: String,
    },
}

impl AccrueError {
    /// Creates a missing market data error.
    #[must_use]
    pub fn missing_market_data(index: &IndexId, date: Date, reason: impl Into<String>) -> Self {
        Self::MissingMarketData {
            index: index.clone(),
            date,
            reason: reason.into(),
        }
    }

    /// Creates an invalid observation error.
    #[must_use]
    pub fn invalid_observation(reason: impl Into<String>) -> Self {
        Self::InvalidObservation {
            reason: reason.into(),
        }
    }

    /// Creates an invalid accrual period error.
    #[must_use]
    pub fn invalid_accrual_period(start: Date, end: Date) -> Self {
        Self::InvalidAccrualPeriod { start, end }
    }

    /// Creates an invalid curve error.
    #[must_use]
    pub fn invalid_curve(reason: impl Into<String>) -> Self {
        Self::InvalidCurve {
            reason: reason.into(),
        }
    }

    /// Creates a resource access error.
    #[must_use]
    pub fn resource_access(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ResourceAccess {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Returns true if this is a missing market data error.
    #[must_use]
    pub fn is_missing_market_data(&self) -> bool {
        matches!(self, Self::MissingMarketData { .. })
    }

    /// Returns true if this is an invalid observation error.
    #[must_use]
    pub fn is_invalid_observation(&self) -> bool {
        matches!(self, Self::InvalidObservation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_market_data_display() {
        let date = Date::from_ymd(2024, 2, 1).unwrap();
        let err = AccrueError::missing_market_data(&IndexId::new("USD-LIBOR-3M"), date, "no curve");
        assert_eq!(
            err.to_string(),
            "Missing market data for USD-LIBOR-3M on 2024-02-01: no curve"
        );
        assert!(err.is_missing_market_data());
        assert!(!err.is_invalid_observation());
    }

    #[test]
    fn test_invalid_observation_display() {
        let err = AccrueError::invalid_observation("empty fixings");
        assert_eq!(err.to_string(), "Invalid observation: empty fixings");
        assert!(err.is_invalid_observation());
    }

    #[test]
    fn test_resource_access_display() {
        let err = AccrueError::resource_access("/data/fixings", "permission denied");
        assert!(err.to_string().contains("/data/fixings"));
        assert!(err.to_string().contains("permission denied"));
    }
}
