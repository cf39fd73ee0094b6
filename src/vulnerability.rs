//! Network-wide vulnerability scores (Phi).
//!
//! A score condenses one metric table into a single number describing how
//! badly the network suffers from a single package failure. Scores are only
//! comparable when computed with the same scorer and metric kind.

use crate::metrics::{MetricKind, NetworkModel};

/// Scores a whole network under a metric kind.
pub trait VulnerabilityScorer {
    /// Short scorer name, recorded in reports.
    fn name(&self) -> &'static str;

    /// Vulnerability of `model` under `metric`.
    fn score(&self, model: &NetworkModel, metric: MetricKind) -> f64;
}

/// Expected damage of a failure in a uniformly random package.
///
/// Mean of the metric over all packages; 0.0 for an empty network.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailureVulnerability;

impl VulnerabilityScorer for FailureVulnerability {
    fn name(&self) -> &'static str {
        "failure"
    }

    fn score(&self, model: &NetworkModel, metric: MetricKind) -> f64 {
        let table = model.metric(metric);
        if table.is_empty() {
            return 0.0;
        }
        table.sum() / table.len() as f64
    }
}

/// Damage of a failure in the worst possible package (targeted attack).
///
/// Maximum of the metric; 0.0 for an empty network.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttackVulnerability;

impl VulnerabilityScorer for AttackVulnerability {
    fn name(&self) -> &'static str {
        "attack"
    }

    fn score(&self, model: &NetworkModel, metric: MetricKind) -> f64 {
        model
            .metric(metric)
            .max()
            .map(|(_, value)| value)
            .unwrap_or(0.0)
    }
}

/// [`FailureVulnerability`] score of `model`.
pub fn failure_vulnerability(model: &NetworkModel, metric: MetricKind) -> f64 {
    FailureVulnerability.score(model, metric)
}

/// [`AttackVulnerability`] score of `model`.
pub fn attack_vulnerability(model: &NetworkModel, metric: MetricKind) -> f64 {
    AttackVulnerability.score(model, metric)
}
