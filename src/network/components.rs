//! Strongly connected components and strong articulation points.
//!
//! Component detection is delegated to `petgraph::algo::tarjan_scc` over a
//! borrowed view of the network; results are converted back to ordered
//! package sets.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::types::PackageId;

use super::{Cluster, DependencyNetwork};

/// Borrowed petgraph view of a network, with edges dependency -> dependent.
fn to_digraph(network: &DependencyNetwork) -> DiGraph<&PackageId, ()> {
    let mut graph = DiGraph::with_capacity(network.len(), network.num_edges());

    let index: BTreeMap<&PackageId, NodeIndex> = network
        .nodes()
        .map(|id| (id, graph.add_node(id)))
        .collect();

    for (id, &from) in &index {
        for dependent in network.dependents(id) {
            if let Some(&to) = index.get(dependent) {
                graph.add_edge(from, to, ());
            }
        }
    }

    graph
}

/// All strongly connected components of `network`, in no particular order.
pub fn strongly_connected_components(network: &DependencyNetwork) -> Vec<Cluster> {
    let graph = to_digraph(network);
    tarjan_scc(&graph)
        .into_iter()
        .map(|component| component.into_iter().map(|ix| graph[ix].clone()).collect())
        .collect()
}

/// Number of strongly connected components of `network`.
pub fn scc_count(network: &DependencyNetwork) -> usize {
    tarjan_scc(&to_digraph(network)).len()
}

/// Strong articulation points of `network`.
///
/// A package is a strong articulation point when removing it strictly
/// increases the number of strongly connected components. The check removes
/// each package in turn, so cost is O(V·(V+E)); run it on a single cluster's
/// induced subgraph, not on a whole ecosystem.
pub fn strong_articulation_points(network: &DependencyNetwork) -> BTreeSet<PackageId> {
    let baseline = scc_count(network);

    let points: BTreeSet<PackageId> = network
        .nodes()
        .filter(|id| {
            let removed: BTreeSet<PackageId> = [(*id).clone()].into_iter().collect();
            scc_count(&network.without(&removed)) > baseline
        })
        .cloned()
        .collect();

    tracing::debug!(
        packages = network.len(),
        baseline_components = baseline,
        articulation_points = points.len(),
        "Computed strong articulation points"
    );

    points
}
