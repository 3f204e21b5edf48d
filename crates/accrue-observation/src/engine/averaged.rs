//! Weighted arithmetic mean of fixings.

use tracing::trace;

use accrue_core::{AccrueError, AccrueResult, RateEnvironment};

use crate::observation::AveragedFixings;

/// `Σ(rᵢ × wᵢ) / total_weight`, summed in the order the fixings were given.
///
/// Weights already encode day-count effects; no compounding and no day-count
/// conversion happens here. The first unavailable fixing aborts the sum.
pub(super) fn rate<E>(env: &E, observation: &AveragedFixings) -> AccrueResult<f64>
where
    E: RateEnvironment + ?Sized,
{
    let index = observation.index();
    let weighted = observation
        .fixings()
        .iter()
        .try_fold(0.0_f64, |sum, fixing| {
            let rate = fixing.effective_rate(env, index)?;
            trace!(
                index = %index,
                date = %fixing.fixing_date(),
                rate,
                weight = fixing.weight(),
                realized = fixing.is_realized(),
                "averaging fixing"
            );
            Ok::<_, AccrueError>(sum + rate * fixing.weight())
        })?;
    Ok(weighted / observation.total_weight())
}
