//! Forward rate curve keyed by fixing date.

use serde::{Deserialize, Serialize};

use accrue_core::{AccrueError, AccrueResult, Date};

/// A forward rate for one fixing date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePillar {
    /// Fixing date
    pub date: Date,
    /// Forward rate of the index fixing on `date`
    pub rate: f64,
}

impl CurvePillar {
    /// Creates a pillar.
    #[must_use]
    pub fn new(date: Date, rate: f64) -> Self {
        Self { date, rate }
    }
}

/// Already-built forward curve of one index.
///
/// Returns the pillar rate on a pillar date and interpolates linearly in
/// calendar days between pillars. Dates outside the pillar range are not
/// covered: there is no extrapolation.
///
/// # Example
///
/// ```rust
/// use accrue_core::Date;
/// use accrue_market::{CurvePillar, ForwardCurve};
///
/// let curve = ForwardCurve::new(vec![
///     CurvePillar::new(Date::from_ymd(2024, 2, 1).unwrap(), 0.0540),
///     CurvePillar::new(Date::from_ymd(2024, 2, 11).unwrap(), 0.0550),
/// ])
/// .unwrap();
///
/// let mid = curve.rate_at(Date::from_ymd(2024, 2, 6).unwrap()).unwrap();
/// assert!((mid - 0.0545).abs() < 1e-12);
/// assert!(curve.rate_at(Date::from_ymd(2024, 3, 1).unwrap()).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CurvePillar>", into = "Vec<CurvePillar>")]
pub struct ForwardCurve {
    pillars: Vec<CurvePillar>,
}

impl ForwardCurve {
    /// Creates a curve from pillars.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidCurve` if there are no pillars, a rate is
    /// not finite, or dates are not strictly increasing.
    pub fn new(pillars: Vec<CurvePillar>) -> AccrueResult<Self> {
        if pillars.is_empty() {
            return Err(AccrueError::invalid_curve("curve requires at least one pillar"));
        }
        if let Some(pillar) = pillars.iter().find(|p| !p.rate.is_finite()) {
            return Err(AccrueError::invalid_curve(format!(
                "non-finite rate on {}",
                pillar.date
            )));
        }
        for pair in pillars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(AccrueError::invalid_curve(format!(
                    "pillar dates must be strictly increasing: {} then {}",
                    pair[0].date, pair[1].date
                )));
            }
        }
        Ok(Self { pillars })
    }

    /// Creates a curve returning one rate on a single date.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::InvalidCurve` if the rate is not finite.
    pub fn single(date: Date, rate: f64) -> AccrueResult<Self> {
        Self::new(vec![CurvePillar::new(date, rate)])
    }

    /// Returns the pillars in date order.
    pub fn pillars(&self) -> &[CurvePillar] {
        &self.pillars
    }

    /// Returns the first covered date.
    pub fn first_date(&self) -> Date {
        self.pillars[0].date
    }

    /// Returns the last covered date.
    pub fn last_date(&self) -> Date {
        self.pillars[self.pillars.len() - 1].date
    }

    /// Returns true if `date` lies within the pillar range.
    pub fn covers(&self, date: Date) -> bool {
        date >= self.first_date() && date <= self.last_date()
    }

    /// Returns the forward rate for a fixing date, or `None` outside the
    /// pillar range.
    pub fn rate_at(&self, date: Date) -> Option<f64> {
        if !self.covers(date) {
            return None;
        }
        match self.pillars.binary_search_by(|p| p.date.cmp(&date)) {
            Ok(i) => Some(self.pillars[i].rate),
            Err(i) => {
                // covers() guarantees 0 < i < len
                let left = self.pillars[i - 1];
                let right = self.pillars[i];
                let t = left.date.days_between(&date) as f64 / left.date.days_between(&right.date) as f64;
                Some(left.rate + t * (right.rate - left.rate))
            }
        }
    }
}

impl TryFrom<Vec<CurvePillar>> for ForwardCurve {
    type Error = AccrueError;

    fn try_from(pillars: Vec<CurvePillar>) -> Result<Self, Self::Error> {
        Self::new(pillars)
    }
}

impl From<ForwardCurve> for Vec<CurvePillar> {
    fn from(curve: ForwardCurve) -> Self {
        curve.pillars
    }
}
