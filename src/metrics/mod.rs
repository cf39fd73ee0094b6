//! Per-package metrics and the network model that provides them.

pub mod kind;
pub mod table;
pub mod model;

pub use kind::MetricKind;
pub use table::MetricTable;
pub use model::NetworkModel;

/// Error type for metric operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricError {
    /// Tables cover different package universes.
    #[error("tables cover different package universes: {left} vs {right}")]
    UniverseMismatch {
        /// Left operand (label and universe hash).
        left: String,
        /// Right operand (label and universe hash).
        right: String,
    },
    /// Metric name not recognized.
    #[error("Unknown metric kind: {0}")]
    UnknownKind(String),
}
