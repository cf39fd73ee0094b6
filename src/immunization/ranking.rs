//! Top-k ranking baseline.

use crate::error::{ImmunizationError, Result};
use crate::metrics::{MetricKind, NetworkModel};

use super::ImmunizationSet;

/// The `size` packages with the highest `metric` value.
///
/// Ties follow [`MetricTable::top`](crate::metrics::MetricTable::top).
/// Asking for more packages than the network holds is an error, not a
/// truncated result.
pub fn naive_ranking(
    model: &NetworkModel,
    size: usize,
    metric: MetricKind,
) -> Result<ImmunizationSet> {
    let available = model.len();
    if size > available {
        return Err(ImmunizationError::InvalidSize {
            requested: size,
            available,
        });
    }

    Ok(model
        .metric(metric)
        .top(size)
        .into_iter()
        .map(|(id, _)| id)
        .collect())
}
