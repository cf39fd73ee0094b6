//! Dependency edges.

use serde::{Deserialize, Serialize};
use super::package::PackageId;

/// Directed edge in a dependency network.
///
/// Orientation is **dependency → dependent**: the edge points in the direction
/// a failure propagates. Ordering is canonical: (dependency, dependent).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Package being depended upon (source).
    pub dependency: PackageId,
    /// Package that declares the dependency (target).
    pub dependent: PackageId,
}

impl DependencyEdge {
    /// Create a new edge from `dependency` to `dependent`.
    pub fn new(dependency: impl Into<PackageId>, dependent: impl Into<PackageId>) -> Self {
        Self {
            dependency: dependency.into(),
            dependent: dependent.into(),
        }
    }

    /// Whether both endpoints are the same package.
    pub fn is_self_loop(&self) -> bool {
        self.dependency == self.dependent
    }
}
