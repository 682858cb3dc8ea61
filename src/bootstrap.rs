use crate::bounds::{compute_bounds, BoundsResult};
use crate::data::Data;
use crate::table::ConcordanceTable;

/// Bound statistic in the (data, indices) form expected by resampling
/// drivers: evaluates the bounds on the resample of `data` designated by
/// `indices`, with repeats allowed as produced by sampling with
/// replacement.
///
/// The resample is tabulated with both outcome levels fixed, so a resample
/// missing one test or reference outcome still yields a full 2x2 table with
/// a zero row/column. The driver owns the resampling scheme and the
/// aggregation of replicate results; this function only evaluates one
/// replicate.
pub fn bootstrap_statistic(
    data: &Data,
    indices: &[usize],
    alpha_r: f64,
    beta_r: f64,
) -> BoundsResult {
    let resample = data.subset(indices.to_vec());
    let table = ConcordanceTable::from_data(&resample);
    compute_bounds(&table, alpha_r, beta_r)
}
