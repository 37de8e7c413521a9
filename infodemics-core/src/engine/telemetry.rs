//! Optional metrics emitted after each simulation step.

use crate::state::SirCounts;

#[cfg(feature = "metrics")]
#[expect(
    clippy::cast_precision_loss,
    reason = "gauges are f64 and node counts stay far below 2^52"
)]
pub(super) fn record_step(counts: SirCounts, infections: usize, recoveries: usize) {
    metrics::counter!("infodemics_steps_total").increment(1);
    metrics::counter!("infodemics_infections_total").increment(infections as u64);
    metrics::counter!("infodemics_recoveries_total").increment(recoveries as u64);
    metrics::gauge!("infodemics_susceptible").set(counts.susceptible as f64);
    metrics::gauge!("infodemics_infected").set(counts.infected as f64);
    metrics::gauge!("infodemics_recovered").set(counts.recovered as f64);
}

#[cfg(not(feature = "metrics"))]
pub(super) const fn record_step(_counts: SirCounts, _infections: usize, _recoveries: usize) {}
