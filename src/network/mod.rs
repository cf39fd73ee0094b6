//! Dependency network model.
//!
//! A [`DependencyNetwork`] is an immutable-by-convention directed graph of
//! packages. Edges point **dependency → dependent**, the direction in which a
//! failure cascades. Selectors only read it; the delta evaluator derives a
//! reduced copy with [`DependencyNetwork::without`] instead of mutating it.

pub mod components;
pub mod fingerprint;

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{DependencyEdge, PackageId};

pub use components::{scc_count, strong_articulation_points, strongly_connected_components};
pub use fingerprint::{universe_hash, NetworkFingerprint};

/// A group of packages, normally one strongly connected component.
pub type Cluster = BTreeSet<PackageId>;

static NO_NEIGHBOURS: BTreeSet<PackageId> = BTreeSet::new();

/// In-memory dependency network.
///
/// Uses BTreeMap/BTreeSet for deterministic iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyNetwork {
    /// All packages.
    packages: BTreeSet<PackageId>,
    /// Dependency -> dependents mapping.
    dependents: BTreeMap<PackageId, BTreeSet<PackageId>>,
    /// Dependent -> dependencies mapping.
    dependencies: BTreeMap<PackageId, BTreeSet<PackageId>>,
}

impl DependencyNetwork {
    /// Create a new empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a network from `(dependency, dependent)` pairs.
    pub fn from_edges<I, A, B>(edges: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<PackageId>,
        B: Into<PackageId>,
    {
        let mut network = Self::new();
        for (dependency, dependent) in edges {
            network.add_dependency(dependency, dependent);
        }
        network
    }

    /// Add a package. Returns false if it was already present.
    pub fn add_package(&mut self, id: impl Into<PackageId>) -> bool {
        self.packages.insert(id.into())
    }

    /// Record that `dependent` depends on `dependency`.
    ///
    /// Missing endpoints are added. Self-loops only register the package and
    /// duplicate edges collapse. Returns true if a new edge was stored.
    pub fn add_dependency(
        &mut self,
        dependency: impl Into<PackageId>,
        dependent: impl Into<PackageId>,
    ) -> bool {
        self.add_edge(DependencyEdge::new(dependency, dependent))
    }

    /// Add an edge value. Same rules as [`add_dependency`](Self::add_dependency).
    pub fn add_edge(&mut self, edge: DependencyEdge) -> bool {
        self.packages.insert(edge.dependency.clone());
        self.packages.insert(edge.dependent.clone());

        if edge.is_self_loop() {
            tracing::trace!(package = %edge.dependency, "Ignoring self-dependency");
            return false;
        }

        let DependencyEdge {
            dependency,
            dependent,
        } = edge;

        self.dependencies
            .entry(dependent.clone())
            .or_default()
            .insert(dependency.clone());

        self.dependents
            .entry(dependency)
            .or_default()
            .insert(dependent)
    }

    /// All packages in canonical order.
    pub fn nodes(&self) -> impl Iterator<Item = &PackageId> + '_ {
        self.packages.iter()
    }

    /// The package set.
    pub fn packages(&self) -> &BTreeSet<PackageId> {
        &self.packages
    }

    /// Number of packages.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the network has no packages.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Number of dependency edges.
    pub fn num_edges(&self) -> usize {
        self.dependents.values().map(BTreeSet::len).sum()
    }

    /// Whether `id` is a package of this network.
    pub fn contains(&self, id: &PackageId) -> bool {
        self.packages.contains(id)
    }

    /// Direct dependencies of `id` (packages it depends on).
    pub fn direct_dependencies(&self, id: &PackageId) -> &BTreeSet<PackageId> {
        self.dependencies.get(id).unwrap_or(&NO_NEIGHBOURS)
    }

    /// Direct dependents of `id` (packages that depend on it).
    pub fn dependents(&self, id: &PackageId) -> &BTreeSet<PackageId> {
        self.dependents.get(id).unwrap_or(&NO_NEIGHBOURS)
    }

    /// All edges in canonical (dependency, dependent) order.
    pub fn edges(&self) -> impl Iterator<Item = DependencyEdge> + '_ {
        self.dependents.iter().flat_map(|(dependency, dependents)| {
            dependents
                .iter()
                .map(move |dependent| DependencyEdge::new(dependency, dependent))
        })
    }

    /// Subgraph induced by `keep`. Ids that are not in the network are ignored.
    pub fn subgraph(&self, keep: &BTreeSet<PackageId>) -> Self {
        self.induced(|id| keep.contains(id))
    }

    /// Subgraph induced by every package except `removed`.
    ///
    /// This is the reduced topology snapshot used to measure immunization;
    /// `self` is left untouched.
    pub fn without(&self, removed: &BTreeSet<PackageId>) -> Self {
        self.induced(|id| !removed.contains(id))
    }

    /// Strongly connected components sorted by descending size.
    ///
    /// Components of equal size are ordered by their smallest package id.
    pub fn sorted_clusters(&self) -> Vec<Cluster> {
        let mut clusters = strongly_connected_components(self);
        clusters.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.first().cmp(&b.first())));
        clusters
    }

    /// Compute the content fingerprint of this network.
    pub fn fingerprint(&self) -> NetworkFingerprint {
        NetworkFingerprint::compute(self)
    }

    fn induced(&self, keep: impl Fn(&PackageId) -> bool) -> Self {
        let mut network = Self::new();

        for id in self.packages.iter().filter(|id| keep(id)) {
            network.add_package(id.clone());
        }

        for (dependency, dependents) in &self.dependents {
            if !keep(dependency) {
                continue;
            }
            for dependent in dependents.iter().filter(|id| keep(id)) {
                network.add_dependency(dependency.clone(), dependent.clone());
            }
        }

        network
    }
}

impl<'a> IntoIterator for &'a DependencyNetwork {
    type Item = &'a PackageId;
    type IntoIter = std::collections::btree_set::Iter<'a, PackageId>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.iter()
    }
}
