//! Compounding of fixings in date order.

use tracing::trace;

use accrue_core::{AccrueError, AccrueResult, Date, RateEnvironment};

use crate::observation::CompoundedFixings;

/// `[∏(1 + rᵢ × wᵢ / basis) - 1] × basis / Σwᵢ`, multiplied in ascending
/// fixing date order.
pub(super) fn rate<E>(
    env: &E,
    observation: &CompoundedFixings,
    accrual_start: Date,
    accrual_end: Date,
) -> AccrueResult<f64>
where
    E: RateEnvironment + ?Sized,
{
    if accrual_end < accrual_start {
        return Err(AccrueError::invalid_accrual_period(accrual_start, accrual_end));
    }

    let index = observation.index();
    let basis = observation.basis();
    let (growth, total_weight) = observation.fixings().iter().try_fold(
        (1.0_f64, 0.0_f64),
        |(growth, total_weight), fixing| {
            let rate = fixing.effective_rate(env, index)?;
            let fraction = fixing.weight() / basis;
            trace!(
                index = %index,
                date = %fixing.fixing_date(),
                rate,
                fraction,
                realized = fixing.is_realized(),
                "compounding fixing"
            );
            Ok::<_, AccrueError>((growth * (1.0 + rate * fraction), total_weight + fixing.weight()))
        },
    )?;

    // Annualize over the full observed weight
    Ok((growth - 1.0) * basis / total_weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrue_core::IndexId;
    use approx::assert_relative_eq;

    use crate::fixing::FixingRecord;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    struct Flat(f64);

    impl RateEnvironment for Flat {
        fn forward_rate(&self, _index: &IndexId, _fixing_date: Date) -> AccrueResult<f64> {
            Ok(self.0)
        }
    }

    fn sofr_week(rates: [Option<f64>; 5]) -> CompoundedFixings {
        // Mon..Fri, Friday's rate applies over the weekend
        let weights = [1.0, 1.0, 1.0, 1.0, 3.0];
        let fixings = rates
            .iter()
            .zip(weights)
            .enumerate()
            .map(|(i, (rate, weight))| {
                let day = date(2024, 1, 8).add_days(i as i64);
                match rate {
                    Some(r) => FixingRecord::realized(day, *r, weight),
                    None => FixingRecord::new(day, weight),
                }
            })
            .collect();
        CompoundedFixings::new(IndexId::new("USD-SOFR"), fixings).unwrap()
    }

    #[test]
    fn test_single_fixing_is_simple_rate() {
        let obs = CompoundedFixings::new(
            IndexId::new("USD-SOFR"),
            vec![FixingRecord::realized(date(2024, 1, 2), 0.0531, 30.0)],
        )
        .unwrap();
        let r = rate(&Flat(0.0), &obs, date(2024, 1, 2), date(2024, 2, 1)).unwrap();
        assert_relative_eq!(r, 0.0531, epsilon = 1e-14);
    }

    #[test]
    fn test_flat_rate_compounds_above_simple() {
        let obs = sofr_week([None; 5]);
        let r = rate(&Flat(0.05), &obs, date(2024, 1, 8), date(2024, 1, 15)).unwrap();

        let expected = ((1.0_f64 + 0.05 / 360.0).powi(4) * (1.0 + 0.05 * 3.0 / 360.0) - 1.0) * 360.0 / 7.0;
        assert_relative_eq!(r, expected, epsilon = 1e-14);
        assert!(r > 0.05);
        assert!(r - 0.05 < 0.0001);
    }

    #[test]
    fn test_realized_and_forecast_mix() {
        let obs = sofr_week([Some(0.0531), Some(0.0532), None, None, None]);
        let r = rate(&Flat(0.0530), &obs, date(2024, 1, 8), date(2024, 1, 15)).unwrap();

        let expected = ((1.0 + 0.0531 / 360.0)
            * (1.0 + 0.0532 / 360.0)
            * (1.0 + 0.0530 / 360.0)
            * (1.0 + 0.0530 / 360.0)
            * (1.0 + 0.0530 * 3.0 / 360.0)
            - 1.0)
            * 360.0
            / 7.0;
        assert_relative_eq!(r, expected, epsilon = 1e-14);
    }

    #[test]
    fn test_basis_changes_annualization() {
        let obs = sofr_week([None; 5]).with_basis(365.0).unwrap();
        let r = rate(&Flat(0.05), &obs, date(2024, 1, 8), date(2024, 1, 15)).unwrap();
        let expected = ((1.0_f64 + 0.05 / 365.0).powi(4) * (1.0 + 0.05 * 3.0 / 365.0) - 1.0) * 365.0 / 7.0;
        assert_relative_eq!(r, expected, epsilon = 1e-14);
    }

    #[test]
    fn test_rejects_inverted_period() {
        let obs = sofr_week([None; 5]);
        let err = rate(&Flat(0.05), &obs, date(2024, 1, 15), date(2024, 1, 8)).unwrap_err();
        assert!(matches!(err, AccrueError::InvalidAccrualPeriod { .. }));
    }
}
