//! Network model: a topology snapshot plus one table per metric kind.
//!
//! ## Metric definitions
//!
//! With edges oriented dependency → dependent:
//!
//! | Metric | Value for package `p` |
//! |--------|-----------------------|
//! | Reach | packages reachable from `p`, including `p` |
//! | Surface | packages that reach `p`, including `p` |
//! | Impact | edges inside the subgraph induced by Reach(`p`) |
//! | DependentsCount | direct dependents of `p` |
//!
//! Reach sets are closed under "dependent of", so Impact is the sum of
//! dependent counts over the reach set and never drops below DependentsCount.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::error::{ImmunizationError, Result};
use crate::network::{DependencyNetwork, NetworkFingerprint};
use crate::types::PackageId;

use super::{MetricError, MetricKind, MetricTable};

/// A dependency network with every metric computed.
#[derive(Debug, Clone)]
pub struct NetworkModel {
    network: DependencyNetwork,
    fingerprint: NetworkFingerprint,
    reach: MetricTable,
    surface: MetricTable,
    impact: MetricTable,
    dependents_count: MetricTable,
    /// Tables came from the caller rather than the topology.
    supplied: bool,
}

impl NetworkModel {
    /// Build a model, computing every metric from the topology.
    ///
    /// Cost is O(V·(V+E)): one traversal per package and direction.
    pub fn build(network: DependencyNetwork) -> Self {
        let mut reach = BTreeMap::new();
        let mut surface = BTreeMap::new();
        let mut impact = BTreeMap::new();
        let mut dependents_count = BTreeMap::new();

        for id in network.nodes() {
            let downstream = closure(&network, id, Direction::Dependents);
            let upstream = closure(&network, id, Direction::Dependencies);
            let edges_in_reach: usize = downstream
                .iter()
                .map(|member| network.dependents(member).len())
                .sum();

            reach.insert(id.clone(), downstream.len() as f64);
            surface.insert(id.clone(), upstream.len() as f64);
            impact.insert(id.clone(), edges_in_reach as f64);
            dependents_count.insert(id.clone(), network.dependents(id).len() as f64);
        }

        tracing::debug!(
            packages = network.len(),
            edges = network.num_edges(),
            "Built network model"
        );

        Self {
            fingerprint: network.fingerprint(),
            network,
            reach: MetricTable::for_kind(MetricKind::Reach, reach),
            surface: MetricTable::for_kind(MetricKind::Surface, surface),
            impact: MetricTable::for_kind(MetricKind::Impact, impact),
            dependents_count: MetricTable::for_kind(MetricKind::DependentsCount, dependents_count),
            supplied: false,
        }
    }

    /// Assemble a model from caller-supplied metric values.
    ///
    /// Every kind must be present and cover exactly the network's packages.
    /// Selectors read these tables as given. The delta evaluator does not: it
    /// compares topology against topology, see [`metrics_supplied`](Self::metrics_supplied).
    pub fn with_metrics<I>(network: DependencyNetwork, metrics: I) -> Result<Self>
    where
        I: IntoIterator<Item = (MetricKind, BTreeMap<PackageId, f64>)>,
    {
        let fingerprint = network.fingerprint();
        let mut tables: BTreeMap<MetricKind, MetricTable> = metrics
            .into_iter()
            .map(|(kind, values)| (kind, MetricTable::for_kind(kind, values)))
            .collect();

        let mut take = |kind: MetricKind| -> Result<MetricTable> {
            let table = tables
                .remove(&kind)
                .ok_or(ImmunizationError::MissingMetric(kind))?;
            if table.universe() != fingerprint.package_hash {
                return Err(MetricError::UniverseMismatch {
                    left: format!("{} ({})", table.label(), table.universe()),
                    right: format!("network ({})", fingerprint.package_hash),
                }
                .into());
            }
            Ok(table)
        };

        let reach = take(MetricKind::Reach)?;
        let surface = take(MetricKind::Surface)?;
        let impact = take(MetricKind::Impact)?;
        let dependents_count = take(MetricKind::DependentsCount)?;

        Ok(Self {
            network,
            fingerprint,
            reach,
            surface,
            impact,
            dependents_count,
            supplied: true,
        })
    }

    /// Table for a metric kind.
    pub fn metric(&self, kind: MetricKind) -> &MetricTable {
        match kind {
            MetricKind::Reach => &self.reach,
            MetricKind::Surface => &self.surface,
            MetricKind::Impact => &self.impact,
            MetricKind::DependentsCount => &self.dependents_count,
        }
    }

    /// Whether the tables were supplied through [`with_metrics`](Self::with_metrics).
    ///
    /// Supplied tables need not agree with the topology, so anything that
    /// rebuilds a model from `network()` must not compare against them.
    pub fn metrics_supplied(&self) -> bool {
        self.supplied
    }

    /// The underlying network.
    pub fn network(&self) -> &DependencyNetwork {
        &self.network
    }

    /// Fingerprint of the underlying network.
    pub fn fingerprint(&self) -> &NetworkFingerprint {
        &self.fingerprint
    }

    /// All packages in canonical order.
    pub fn packages(&self) -> impl Iterator<Item = &PackageId> + '_ {
        self.network.nodes()
    }

    /// Number of packages.
    pub fn len(&self) -> usize {
        self.network.len()
    }

    /// Whether the model has no packages.
    pub fn is_empty(&self) -> bool {
        self.network.is_empty()
    }
}

impl<'a> IntoIterator for &'a NetworkModel {
    type Item = &'a PackageId;
    type IntoIter = std::collections::btree_set::Iter<'a, PackageId>;

    fn into_iter(self) -> Self::IntoIter {
        self.network.packages().iter()
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Dependents,
    Dependencies,
}

/// Packages reachable from `start` in `direction`, including `start`.
fn closure<'a>(
    network: &'a DependencyNetwork,
    start: &'a PackageId,
    direction: Direction,
) -> BTreeSet<&'a PackageId> {
    let mut seen: BTreeSet<&PackageId> = BTreeSet::new();
    let mut queue: VecDeque<&PackageId> = VecDeque::new();

    seen.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let next = match direction {
            Direction::Dependents => network.dependents(current),
            Direction::Dependencies => network.direct_dependencies(current),
        };
        for neighbour in next {
            if seen.insert(neighbour) {
                queue.push_back(neighbour);
            }
        }
    }

    seen
}
