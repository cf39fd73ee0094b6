//! Immunization: choosing packages to protect and measuring the effect.
//!
//! Selectors propose an [`ImmunizationSet`]; the delta evaluator measures how
//! much protecting a set actually lowers network vulnerability. The two sides
//! never call each other.
//!
//! | Selector | Set size | Cost |
//! |----------|----------|------|
//! | [`naive_ranking`] | caller-chosen | one sort |
//! | [`delta_frame_reach`] / [`delta_frame_impact`] | data-dependent | one pass over metric tables |
//! | [`strong_articulation_set`] | data-dependent | O(C·(C+E)) per cluster |
//! | [`random_set`] | caller-chosen | O(k) draws (expected) |
//!
//! [`immunization_delta`] rebuilds the model on the reduced topology and is
//! the expensive ground truth: budget one call per candidate set, not one per
//! package.

pub mod articulation;
pub mod delta;
pub mod delta_frame;
pub mod random;
pub mod ranking;

use std::collections::BTreeSet;

use crate::error::{ImmunizationError, Result};
use crate::network::DependencyNetwork;
use crate::types::PackageId;

pub use articulation::strong_articulation_set;
pub use delta::{immunization_delta, immunization_delta_with, scale_factor, ImmunizationDelta};
pub use delta_frame::{delta_frame, delta_frame_impact, delta_frame_reach, DeltaFrame};
pub use random::{random_set, random_set_with_rng, SamplingMode};
pub use ranking::naive_ranking;

/// Packages proposed for immunization.
pub type ImmunizationSet = BTreeSet<PackageId>;

/// Fail with `UnknownPackage` on the first id that is not in `network`.
pub(crate) fn ensure_known<'a>(
    network: &DependencyNetwork,
    ids: impl IntoIterator<Item = &'a PackageId>,
) -> Result<()> {
    match ids.into_iter().find(|id| !network.contains(id)) {
        Some(unknown) => Err(ImmunizationError::UnknownPackage(unknown.clone())),
        None => Ok(()),
    }
}
