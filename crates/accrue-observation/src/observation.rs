//! Rate observation variants.
//!
//! Observations are built once per cash flow at trade setup and are immutable
//! afterwards. Every constructor validates eagerly, and deserialization runs
//! through the same constructors, so an invalid observation cannot exist.

use serde::{Deserialize, Serialize};

use accrue_core::{AccrueError, AccrueResult, Date, IndexId};

use crate::fixing::FixingRecord;

/// Relative tolerance when checking a supplied total weight against the sum
/// of the fixing weights.
const TOTAL_WEIGHT_TOLERANCE: f64 = 1e-10;

/// Day-count basis used for compounding when none is given (ACT/360).
const DEFAULT_COMPOUNDING_BASIS: f64 = 360.0;

/// How the rate of an accrual period is derived.
///
/// A closed set of conventions: the engine matches exhaustively, so adding a
/// variant forces every consumer to handle it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RateObservation {
    /// A single fixing of an index.
    SingleFixing {
        /// The observed index.
        index: IndexId,
        /// The date the index is observed.
        fixing_date: Date,
    },
    /// Weighted arithmetic mean of several fixings of one index.
    AveragedFixings(AveragedFixings),
    /// Fixings of one index compounded in date order.
    CompoundedFixings(CompoundedFixings),
    /// A fixed rate overriding any index.
    FixedRate {
        /// The rate, as a decimal (0.05 for 5%).
        rate: f64,
    },
}

impl RateObservation {
    /// Creates a single-fixing observation.
    #[must_use]
    pub fn single(index: IndexId, fixing_date: Date) -> Self {
        Self::SingleFixing { index, fixing_date }
    }

    /// Creates a fixed-rate observation.
    #[must_use]
    pub fn fixed(rate: f64) -> Self {
        Self::FixedRate { rate }
    }

    /// Creates an averaged observation, deriving the total weight.
    pub fn averaged(index: IndexId, fixings: Vec<FixingRecord>) -> AccrueResult<Self> {
        AveragedFixings::new(index, fixings).map(Self::AveragedFixings)
    }

    /// Creates a compounded observation with the default ACT/360 basis.
    pub fn compounded(index: IndexId, fixings: Vec<FixingRecord>) -> AccrueResult<Self> {
        CompoundedFixings::new(index, fixings).map(Self::CompoundedFixings)
    }

    /// Returns the short name of the convention.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SingleFixing { .. } => "single_fixing",
            Self::AveragedFixings(_) => "averaged_fixings",
            Self::CompoundedFixings(_) => "compounded_fixings",
            Self::FixedRate { .. } => "fixed_rate",
        }
    }

    /// Returns the observed index, or `None` for a fixed rate.
    pub fn index(&self) -> Option<&IndexId> {
        match self {
            Self::SingleFixing { index, .. } => Some(index),
            Self::AveragedFixings(obs) => Some(obs.index()),
            Self::CompoundedFixings(obs) => Some(obs.index()),
            Self::FixedRate { .. } => None,
        }
    }

    /// Returns every fixing date of the observation, in observation order.
    pub fn fixing_dates(&self) -> Vec<Date> {
        match self {
            Self::SingleFixing { fixing_date, .. } => vec![*fixing_date],
            Self::AveragedFixings(obs) => obs.fixings().iter().map(FixingRecord::fixing_date).collect(),
            Self::CompoundedFixings(obs) => obs.fixings().iter().map(FixingRecord::fixing_date).collect(),
            Self::FixedRate { .. } => Vec::new(),
        }
    }

    /// Returns the fixing dates the engine will look up in the environment.
    ///
    /// Useful for checking market data coverage before a valuation pass.
    pub fn unrealized_fixing_dates(&self) -> Vec<Date> {
        let unrealized = |fixings: &[FixingRecord]| -> Vec<Date> {
            fixings
                .iter()
                .filter(|f| !f.is_realized())
                .map(FixingRecord::fixing_date)
                .collect()
        };
        match self {
            Self::SingleFixing { fixing_date, .. } => vec![*fixing_date],
            Self::AveragedFixings(obs) => unrealized(obs.fixings()),
            Self::CompoundedFixings(obs) => unrealized(obs.fixings()),
            Self::FixedRate { .. } => Vec::new(),
        }
    }
}

fn validate_fixings(fixings: &[FixingRecord]) -> AccrueResult<f64> {
    if fixings.is_empty() {
        return Err(AccrueError::invalid_observation(
            "observation requires at least one fixing",
        ));
    }
    fixings.iter().try_fold(0.0, |total, fixing| {
        fixing.validate()?;
        Ok(total + fixing.weight())
    })
}

// =============================================================================
// AVERAGED FIXINGS
// =============================================================================

/// Fixings of one index combined as a weighted arithmetic mean.
///
/// Invariants, checked on construction:
/// - at least one fixing
/// - every weight strictly positive
/// - `total_weight` equals the sum of the fixing weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AveragedFixingsData")]
pub struct AveragedFixings {
    index: IndexId,
    fixings: Vec<FixingRecord>,
    total_weight: f64,
}

#[derive(Deserialize)]
struct AveragedFixingsData {
    index: IndexId,
    fixings: Vec<FixingRecord>,
    total_weight: Option<f64>,
}

impl TryFrom<AveragedFixingsData> for AveragedFixings {
    type Error = AccrueError;

    fn try_from(data: AveragedFixingsData) -> Result<Self, Self::Error> {
        match data.total_weight {
            Some(total) => Self::with_total_weight(data.index, data.fixings, total),
            None => Self::new(data.index, data.fixings),
        }
    }
}

impl AveragedFixings {
    /// Creates an averaged observation whose total weight is the sum of the
    /// fixing weights.
    pub fn new(index: IndexId, fixings: Vec<FixingRecord>) -> AccrueResult<Self> {
        let total_weight = validate_fixings(&fixings)?;
        Ok(Self {
            index,
            fixings,
            total_weight,
        })
    }

    /// Creates an averaged observation with a caller-supplied total weight.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidObservation` if the total does not match
    /// the sum of the fixing weights. Mismatches are rejected, never corrected.
    pub fn with_total_weight(
        index: IndexId,
        fixings: Vec<FixingRecord>,
        total_weight: f64,
    ) -> AccrueResult<Self> {
        let derived = validate_fixings(&fixings)?;
        let tolerance = TOTAL_WEIGHT_TOLERANCE * derived.abs().max(1.0);
        if !total_weight.is_finite() || (total_weight - derived).abs() > tolerance {
            return Err(AccrueError::invalid_observation(format!(
                "total weight {total_weight} does not match sum of fixing weights {derived}"
            )));
        }
        Ok(Self {
            index,
            fixings,
            total_weight,
        })
    }

    /// Returns the observed index.
    pub fn index(&self) -> &IndexId {
        &self.index
    }

    /// Returns the fixings in the order they were supplied.
    pub fn fixings(&self) -> &[FixingRecord] {
        &self.fixings
    }

    /// Returns the total weight.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }
}

// =============================================================================
// COMPOUNDED FIXINGS
// =============================================================================

/// Fixings of one index compounded in ascending date order.
///
/// Each fixing accrues over `weight / basis` of a year, so with day weights
/// and a 360 basis this is the ACT/360 compounded-in-arrears formula:
///
/// ```text
/// rate = [∏(1 + rᵢ × wᵢ / basis) - 1] × basis / Σwᵢ
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CompoundedFixingsData")]
pub struct CompoundedFixings {
    index: IndexId,
    fixings: Vec<FixingRecord>,
    basis: f64,
}

#[derive(Deserialize)]
struct CompoundedFixingsData {
    index: IndexId,
    fixings: Vec<FixingRecord>,
    #[serde(default = "default_basis")]
    basis: f64,
}

fn default_basis() -> f64 {
    DEFAULT_COMPOUNDING_BASIS
}

impl TryFrom<CompoundedFixingsData> for CompoundedFixings {
    type Error = AccrueError;

    fn try_from(data: CompoundedFixingsData) -> Result<Self, Self::Error> {
        Self::new(data.index, data.fixings)?.with_basis(data.basis)
    }
}

impl CompoundedFixings {
    /// Creates a compounded observation with the ACT/360 basis.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidObservation` if there are no fixings, a
    /// fixing is invalid, or the fixing dates are not strictly ascending.
    pub fn new(index: IndexId, fixings: Vec<FixingRecord>) -> AccrueResult<Self> {
        validate_fixings(&fixings)?;
        if let Some(pair) = fixings
            .windows(2)
            .find(|pair| pair[0].fixing_date() >= pair[1].fixing_date())
        {
            return Err(AccrueError::invalid_observation(format!(
                "compounded fixings out of order: {} is not before {}",
                pair[0].fixing_date(),
                pair[1].fixing_date()
            )));
        }
        Ok(Self {
            index,
            fixings,
            basis: DEFAULT_COMPOUNDING_BASIS,
        })
    }

    /// Replaces the day-count basis (e.g. 365 for ACT/365F indices).
    pub fn with_basis(mut self, basis: f64) -> AccrueResult<Self> {
        if !basis.is_finite() || basis <= 0.0 {
            return Err(AccrueError::invalid_observation(format!(
                "compounding basis must be positive, got {basis}"
            )));
        }
        self.basis = basis;
        Ok(self)
    }

    /// Returns the observed index.
    pub fn index(&self) -> &IndexId {
        &self.index
    }

    /// Returns the fixings in ascending date order.
    pub fn fixings(&self) -> &[FixingRecord] {
        &self.fixings
    }

    /// Returns the day-count basis.
    pub fn basis(&self) -> f64 {
        self.basis
    }

    /// Returns the sum of the fixing weights.
    pub fn total_weight(&self) -> f64 {
        self.fixings.iter().map(FixingRecord::weight).sum()
    }
}
