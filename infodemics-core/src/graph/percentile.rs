//! Linear-interpolation percentile over integer samples.
//!
//! Matches the common statistical convention: the rank of percentile `q` in
//! `n` sorted samples is `(n - 1) * q / 100`, and fractional ranks are
//! interpolated between the two neighbouring samples.

/// Computes the `percentile`-th percentile of `sorted`.
///
/// `sorted` must be in non-decreasing order and `percentile` in `[0, 100]`.
/// Returns `None` for an empty slice.
#[expect(
    clippy::float_arithmetic,
    reason = "percentile interpolation is defined over real-valued ranks"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "degrees and sample counts stay far below 2^52"
)]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "ranks are clamped to the non-negative sample range before casting"
)]
pub(super) fn linear_percentile(sorted: &[u64], percentile: f64) -> Option<f64> {
    let last_index = sorted.len().checked_sub(1)?;
    let rank = (last_index as f64 * percentile / 100.0).clamp(0.0, last_index as f64);
    let lower_rank = rank.floor();
    let lower = *sorted.get(lower_rank as usize)? as f64;
    let upper = *sorted.get(rank.ceil() as usize)? as f64;
    Some(lower + (upper - lower) * (rank - lower_rank))
}
