//! Error types for immunization operations.

use crate::metrics::{MetricError, MetricKind};
use crate::types::PackageId;

/// Error type for selectors and the delta evaluator.
///
/// Every variant is a caller-visible failure: selectors never return a
/// partial set and nothing in this crate retries on its own.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImmunizationError {
    /// Requested set size exceeds the number of available packages.
    #[error("Requested {requested} packages but only {available} are available")]
    InvalidSize {
        /// Requested set size.
        requested: usize,
        /// Packages available to choose from.
        available: usize,
    },

    /// Indirect sampling cannot produce the requested number of distinct dependencies.
    #[error("Degenerate network: {requested} distinct dependencies requested, {reachable} reachable")]
    DegenerateNetwork {
        /// Requested set size.
        requested: usize,
        /// Distinct packages that are a direct dependency of some package.
        reachable: usize,
    },

    /// No strongly connected component is available to analyze.
    #[error("No strongly connected component available")]
    EmptyCluster,

    /// Metric tables were combined across different package universes.
    #[error("Metric mismatch: {0}")]
    MetricMismatch(#[from] MetricError),

    /// A model was assembled without a table for this metric kind.
    #[error("Missing metric table: {0}")]
    MissingMetric(MetricKind),

    /// A supplied set or cluster names a package that is not in the network.
    #[error("Package not in network: {0}")]
    UnknownPackage(PackageId),

    /// The operation is undefined on a network without packages.
    #[error("Network has no packages")]
    EmptyNetwork,
}

/// Result alias for immunization operations.
pub type Result<T> = std::result::Result<T, ImmunizationError>;
