//! Network fingerprints for reproducible selections.
//!
//! A `NetworkFingerprint` identifies the exact topology a selection or a
//! delta was computed against. Metric tables carry the `package_hash` part
//! so tables from different snapshots can be told apart before combining.

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use crate::types::PackageId;
use crate::IMMUNIZATION_SCHEMA_VERSION;

use super::DependencyNetwork;

/// A deterministic fingerprint of a dependency network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkFingerprint {
    /// Identifier derived from every other field (xxh64).
    pub fingerprint_id: String,
    /// Number of packages.
    pub package_count: u64,
    /// Number of dependency edges.
    pub edge_count: u64,
    /// Schema version used for types.
    pub schema_version: String,
    /// Hash of the sorted package ids.
    pub package_hash: String,
    /// Hash of the sorted (dependency, dependent) pairs.
    pub edge_hash: String,
}

/// Internal struct for computing the fingerprint id.
#[derive(Serialize)]
struct FingerprintIdInput<'a> {
    package_count: u64,
    edge_count: u64,
    schema_version: &'a str,
    package_hash: &'a str,
    edge_hash: &'a str,
}

impl NetworkFingerprint {
    /// Compute the fingerprint of `network`.
    ///
    /// Insertion order never matters: packages and edges are hashed in
    /// canonical order.
    pub fn compute(network: &DependencyNetwork) -> Self {
        let package_hash = universe_hash(network.nodes());

        // DependencyEdge serializes as {dependency, dependent}; edges() is already sorted
        let edges: Vec<_> = network.edges().collect();
        let edge_hash = canonical_hash_hex(&edges);

        let package_count = network.len() as u64;
        let edge_count = edges.len() as u64;

        let fingerprint_id = canonical_hash_hex(&FingerprintIdInput {
            package_count,
            edge_count,
            schema_version: IMMUNIZATION_SCHEMA_VERSION,
            package_hash: &package_hash,
            edge_hash: &edge_hash,
        });

        Self {
            fingerprint_id,
            package_count,
            edge_count,
            schema_version: IMMUNIZATION_SCHEMA_VERSION.to_string(),
            package_hash,
            edge_hash,
        }
    }

    /// Verify that this fingerprint matches `network`.
    pub fn verify(&self, network: &DependencyNetwork) -> bool {
        self.fingerprint_id == Self::compute(network).fingerprint_id
    }
}

/// Hash of a package universe.
///
/// Callers must pass ids in ascending order (any BTreeSet/BTreeMap key
/// iterator qualifies).
pub fn universe_hash<'a>(ids: impl Iterator<Item = &'a PackageId>) -> String {
    let ids: Vec<&str> = ids.map(PackageId::as_str).collect();
    canonical_hash_hex(&ids)
}
