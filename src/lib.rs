//! # immunization-kernel
//!
//! Choosing which packages of a dependency network to protect.
//!
//! The kernel answers one question:
//!
//! > Given a package network, which packages should be **immunized** so that a
//! > failure spreads as little as possible?
//!
//! ## Core Contract
//!
//! 1. Build a [`NetworkModel`] once: topology plus per-package metrics
//! 2. Run a selector to propose an [`ImmunizationSet`]
//! 3. Measure the proposal with [`immunization_delta`]
//!
//! ## Architecture
//!
//! ```text
//! edges → DependencyNetwork → NetworkModel → Selector → ImmunizationSet
//!                                  ↓                           ↓
//!                           VulnerabilityScorer ← immunization_delta
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same network + same strategy (+ same seed) → identical set
//! - Metric ties are broken by ascending [`PackageId`]
//! - Network fingerprints ignore insertion order

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod canonical;
pub mod error;
pub mod network;
pub mod metrics;
pub mod vulnerability;
pub mod immunization;
pub mod strategy;

// Re-exports
pub use types::{DependencyEdge, PackageId};
pub use canonical::{canonical_hash, canonical_hash_hex, to_canonical_bytes};
pub use error::{ImmunizationError, Result};
pub use network::{
    scc_count, strong_articulation_points, strongly_connected_components, Cluster,
    DependencyNetwork, NetworkFingerprint,
};
pub use metrics::{MetricError, MetricKind, MetricTable, NetworkModel};
pub use vulnerability::{
    attack_vulnerability, failure_vulnerability, AttackVulnerability, FailureVulnerability,
    VulnerabilityScorer,
};
pub use immunization::{
    delta_frame, delta_frame_impact, delta_frame_reach, immunization_delta,
    immunization_delta_with, naive_ranking, random_set, random_set_with_rng, scale_factor,
    strong_articulation_set, DeltaFrame, ImmunizationDelta, ImmunizationSet, SamplingMode,
};
pub use strategy::{Evaluation, ImmunizationReport, ImmunizationStrategy};

/// Schema version for fingerprints and reports.
/// Increment on breaking changes to any serialized type.
pub const IMMUNIZATION_SCHEMA_VERSION: &str = "1.0.0";
