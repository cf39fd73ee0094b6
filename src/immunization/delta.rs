//! Brute-force vulnerability delta of an immunization set.
//!
//! ## Algorithm
//!
//! 1. `f1` = vulnerability of the current model (of a model rebuilt from the
//!    same topology when its tables were caller-supplied)
//! 2. `scale` = (|V| - |n|) / |V|
//! 3. Build a fresh model on `network.without(n)`, recomputing every metric
//! 4. `f2` = scale × vulnerability of the rebuilt model
//! 5. Return (f1, f2, f1 - f2)
//!
//! The scale factor removes the credit a set would otherwise get just for
//! shrinking the network. The caller's model is never mutated: the reduced
//! topology is a separate snapshot, so concurrent evaluations over a shared
//! `&NetworkModel` are safe.

use serde::{Deserialize, Serialize};

use crate::error::{ImmunizationError, Result};
use crate::metrics::{MetricKind, NetworkModel};
use crate::vulnerability::{FailureVulnerability, VulnerabilityScorer};

use super::{ensure_known, ImmunizationSet};

/// Vulnerability before and after immunizing a set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImmunizationDelta {
    /// Vulnerability of the network as given (`f1`).
    pub initial: f64,
    /// Size-corrected vulnerability with the set removed (`f2`).
    pub immunized: f64,
    /// `initial - immunized`.
    pub delta: f64,
    /// Size correction applied to the rebuilt score.
    pub scale: f64,
}

/// Fraction of packages left after immunizing `immunized` of `total`.
///
/// In `[0, 1]`: 1 when nothing is immunized, 0 when everything is. Returns 0
/// for an empty network.
pub fn scale_factor(total: usize, immunized: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    total.saturating_sub(immunized) as f64 / total as f64
}

/// Delta of immunizing `immunized`, scored with [`FailureVulnerability`].
pub fn immunization_delta(
    model: &NetworkModel,
    immunized: &ImmunizationSet,
    metric: MetricKind,
) -> Result<ImmunizationDelta> {
    immunization_delta_with(model, immunized, metric, &FailureVulnerability)
}

/// Delta of immunizing `immunized` under any scorer.
///
/// Blocking; cost is one full model rebuild on the reduced topology.
pub fn immunization_delta_with<S>(
    model: &NetworkModel,
    immunized: &ImmunizationSet,
    metric: MetricKind,
    scorer: &S,
) -> Result<ImmunizationDelta>
where
    S: VulnerabilityScorer + ?Sized,
{
    let network = model.network();
    if network.is_empty() {
        return Err(ImmunizationError::EmptyNetwork);
    }
    ensure_known(network, immunized)?;

    // f2 always comes from recomputed tables, so f1 must too
    let initial = if model.metrics_supplied() {
        tracing::debug!("Rescoring caller-supplied metrics from topology");
        scorer.score(&NetworkModel::build(network.clone()), metric)
    } else {
        scorer.score(model, metric)
    };
    let scale = scale_factor(network.len(), immunized.len());

    tracing::debug!(
        scorer = scorer.name(),
        metric = %metric,
        immunized = immunized.len(),
        total = network.len(),
        scale,
        "Rebuilding model without immunized packages"
    );

    // Nothing left to score when the whole network is immunized
    let immunized_score = if immunized.len() == network.len() {
        0.0
    } else {
        let rebuilt = NetworkModel::build(network.without(immunized));
        scale * scorer.score(&rebuilt, metric)
    };

    let result = ImmunizationDelta {
        initial,
        immunized: immunized_score,
        delta: initial - immunized_score,
        scale,
    };

    tracing::info!(
        scorer = scorer.name(),
        metric = %metric,
        initial = result.initial,
        immunized = result.immunized,
        delta = result.delta,
        "Immunization delta computed"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::DependencyNetwork;
    use crate::types::PackageId;
    use crate::vulnerability::AttackVulnerability;
    use std::collections::BTreeMap;

    fn set(names: &[&str]) -> ImmunizationSet {
        names.iter().map(|n| PackageId::from(*n)).collect()
    }

    fn chain() -> NetworkModel {
        NetworkModel::build(DependencyNetwork::from_edges([("a", "b"), ("b", "c")]))
    }

    #[test]
    fn test_scale_factor_bounds() {
        assert_eq!(scale_factor(4, 0), 1.0);
        assert_eq!(scale_factor(4, 1), 0.75);
        assert_eq!(scale_factor(4, 4), 0.0);
        assert_eq!(scale_factor(0, 0), 0.0);
    }

    #[test]
    fn test_middle_of_chain() {
        // Reach a=3, b=2, c=1 -> mean 2. Without b: a=1, c=1 -> mean 1, scaled by 2/3
        let result = immunization_delta(&chain(), &set(&["b"]), MetricKind::Reach).unwrap();

        assert_eq!(result.initial, 2.0);
        assert!((result.scale - 2.0 / 3.0).abs() < 1e-12);
        assert!((result.immunized - 2.0 / 3.0).abs() < 1e-12);
        assert!((result.delta - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_set_is_neutral() {
        let result = immunization_delta(&chain(), &set(&[]), MetricKind::Reach).unwrap();

        assert_eq!(result.scale, 1.0);
        assert_eq!(result.initial, result.immunized);
        assert_eq!(result.delta, 0.0);
    }

    #[test]
    fn test_full_set_removes_everything() {
        let model = chain();
        let result = immunization_delta(&model, &set(&["a", "b", "c"]), MetricKind::Surface).unwrap();

        assert_eq!(result.scale, 0.0);
        assert_eq!(result.immunized, 0.0);
        assert_eq!(result.delta, result.initial);
    }

    #[test]
    fn test_supplied_metrics_are_rescored() {
        // Tables pinned to 9 disagree with the topology (reach b=2, a=1)
        let network = DependencyNetwork::from_edges([("b", "a")]);
        let pinned: BTreeMap<PackageId, f64> =
            network.nodes().map(|id| (id.clone(), 9.0)).collect();
        let model = NetworkModel::with_metrics(
            network,
            MetricKind::ALL.map(|kind| (kind, pinned.clone())),
        )
        .unwrap();

        let result = immunization_delta(&model, &set(&[]), MetricKind::Reach).unwrap();
        assert_eq!(result.initial, 1.5);
        assert_eq!(result.immunized, 1.5);
        assert_eq!(result.delta, 0.0);

        let result = immunization_delta(&model, &set(&["b"]), MetricKind::Reach).unwrap();
        assert_eq!(result.initial, 1.5);
        assert_eq!(result.immunized, 0.5);
    }

    #[test]
    fn test_unknown_package_rejected() {
        let err = immunization_delta(&chain(), &set(&["a", "zzz"]), MetricKind::Reach).unwrap_err();
        assert_eq!(err, ImmunizationError::UnknownPackage(PackageId::from("zzz")));
    }

    #[test]
    fn test_empty_network_rejected() {
        let model = NetworkModel::build(DependencyNetwork::new());
        let err = immunization_delta(&model, &set(&[]), MetricKind::Reach).unwrap_err();
        assert_eq!(err, ImmunizationError::EmptyNetwork);
    }

    #[test]
    fn test_input_model_unchanged() {
        let model = chain();
        let before = model.fingerprint().clone();

        immunization_delta(&model, &set(&["a"]), MetricKind::Impact).unwrap();

        assert_eq!(model.fingerprint(), &before);
        assert!(before.verify(model.network()));
    }

    #[test]
    fn test_custom_scorer() {
        // Attack: max reach 3. Without a: b=2, c=1 -> max 2, scaled by 2/3
        let result = immunization_delta_with(
            &chain(),
            &set(&["a"]),
            MetricKind::Reach,
            &AttackVulnerability,
        )
        .unwrap();

        assert_eq!(result.initial, 3.0);
        assert!((result.immunized - 4.0 / 3.0).abs() < 1e-12);
    }
}
