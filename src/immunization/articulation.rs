//! Strong articulation points of large strongly connected components.
//!
//! Package networks tend to have one giant SCC and many small ones, much
//! like the giant component of an Erdős–Rényi graph. Breaking the strong
//! connectivity of that component through its articulation points is the
//! structural lever this selector pulls.

use crate::error::{ImmunizationError, Result};
use crate::metrics::NetworkModel;
use crate::network::{strong_articulation_points, Cluster};

use super::{ensure_known, ImmunizationSet};

/// Union of the strong articulation points of each cluster.
///
/// With `clusters = None` only the largest SCC of the network is analyzed.
/// Each cluster is examined on its own induced subgraph; a package that is
/// an articulation point in several clusters appears once.
pub fn strong_articulation_set(
    model: &NetworkModel,
    clusters: Option<&[Cluster]>,
) -> Result<ImmunizationSet> {
    let network = model.network();

    let largest: Vec<Cluster>;
    let clusters = match clusters {
        Some(clusters) => clusters,
        None => {
            let giant = network
                .sorted_clusters()
                .into_iter()
                .next()
                .ok_or(ImmunizationError::EmptyCluster)?;
            tracing::debug!(size = giant.len(), "Using largest strongly connected component");
            largest = vec![giant];
            largest.as_slice()
        }
    };

    let mut points = ImmunizationSet::new();
    for cluster in clusters {
        ensure_known(network, cluster)?;
        points.extend(strong_articulation_points(&network.subgraph(cluster)));
    }

    tracing::debug!(
        clusters = clusters.len(),
        articulation_points = points.len(),
        "Strong articulation set computed"
    );

    Ok(points)
}
