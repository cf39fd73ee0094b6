//! Immunization strategies and reports.
//!
//! An [`ImmunizationStrategy`] names one selector together with its
//! parameters. It is plain serde data, so callers can keep strategies in
//! config files or pass them on the command line as JSON:
//!
//! ```json
//! {"strategy": "naive_ranking", "size": 10, "metric": "reach"}
//! {"strategy": "random", "size": 10, "indirect": true, "seed": 7}
//! {"strategy": "delta_frame_impact"}
//! ```
//!
//! [`ImmunizationReport`] runs a strategy and, optionally, the delta
//! evaluator on its output. The report is the only place where selection and
//! evaluation meet.

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use crate::error::Result;
use crate::immunization::{
    delta_frame_impact, delta_frame_reach, immunization_delta_with, naive_ranking, random_set,
    strong_articulation_set, ImmunizationDelta, ImmunizationSet, SamplingMode,
};
use crate::metrics::{MetricKind, NetworkModel};
use crate::network::{Cluster, NetworkFingerprint};
use crate::vulnerability::{FailureVulnerability, VulnerabilityScorer};
use crate::IMMUNIZATION_SCHEMA_VERSION;

/// A selector and its parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ImmunizationStrategy {
    /// Top `size` packages by `metric`.
    NaiveRanking {
        /// Number of packages.
        size: usize,
        /// Ranking metric.
        #[serde(default)]
        metric: MetricKind,
    },
    /// DELTA FRAME with Reach bounds.
    #[default]
    DeltaFrameReach,
    /// DELTA FRAME with Impact bounds.
    DeltaFrameImpact,
    /// Strong articulation points of the given clusters (largest SCC if absent).
    StrongArticulation {
        /// Clusters to analyze.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        clusters: Option<Vec<Cluster>>,
    },
    /// Random baseline.
    Random {
        /// Number of packages.
        size: usize,
        /// Sample dependencies of random packages instead of packages.
        #[serde(default)]
        indirect: bool,
        /// Seed for a reproducible draw.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
}

impl ImmunizationStrategy {
    /// Stable strategy name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NaiveRanking { .. } => "naive_ranking",
            Self::DeltaFrameReach => "delta_frame_reach",
            Self::DeltaFrameImpact => "delta_frame_impact",
            Self::StrongArticulation { .. } => "strong_articulation",
            Self::Random { .. } => "random",
        }
    }

    /// Hash of the strategy parameters.
    ///
    /// Identical parameters give identical hashes across runs and machines.
    pub fn params_hash(&self) -> String {
        canonical_hash_hex(self)
    }

    /// Whether repeated runs on the same network give the same set.
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, Self::Random { seed: None, .. })
    }

    /// Run the selector.
    pub fn select(&self, model: &NetworkModel) -> Result<ImmunizationSet> {
        match self {
            Self::NaiveRanking { size, metric } => naive_ranking(model, *size, *metric),
            Self::DeltaFrameReach => delta_frame_reach(model).map(|frame| frame.into_set()),
            Self::DeltaFrameImpact => delta_frame_impact(model).map(|frame| frame.into_set()),
            Self::StrongArticulation { clusters } => {
                strong_articulation_set(model, clusters.as_deref())
            }
            Self::Random {
                size,
                indirect,
                seed,
            } => random_set(model, *size, SamplingMode::from_indirect(*indirect), *seed),
        }
    }
}

/// Measured effect of an immunization set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Metric the vulnerability was scored under.
    pub metric: MetricKind,
    /// Scorer name.
    pub scorer: String,
    /// Scores before and after immunization.
    pub delta: ImmunizationDelta,
}

/// Result of running a strategy against a network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImmunizationReport {
    /// Schema version of the report.
    pub schema_version: String,
    /// Strategy that produced the set.
    pub strategy: ImmunizationStrategy,
    /// Hash of the strategy parameters.
    pub params_hash: String,
    /// Network the set was selected from.
    pub network: NetworkFingerprint,
    /// Selected packages.
    pub set: ImmunizationSet,
    /// Measured effect, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,
}

impl ImmunizationReport {
    /// Select with `strategy` and, if `evaluate` names a metric, measure the set
    /// with [`FailureVulnerability`].
    pub fn run(
        model: &NetworkModel,
        strategy: &ImmunizationStrategy,
        evaluate: Option<MetricKind>,
    ) -> Result<Self> {
        Self::run_with(model, strategy, evaluate, &FailureVulnerability)
    }

    /// Like [`run`](Self::run) with any vulnerability scorer.
    pub fn run_with<S>(
        model: &NetworkModel,
        strategy: &ImmunizationStrategy,
        evaluate: Option<MetricKind>,
        scorer: &S,
    ) -> Result<Self>
    where
        S: VulnerabilityScorer + ?Sized,
    {
        let set = strategy.select(model)?;

        tracing::info!(
            strategy = strategy.name(),
            params_hash = %strategy.params_hash(),
            network = %model.fingerprint().fingerprint_id,
            selected = set.len(),
            "Immunization set selected"
        );

        if !strategy.is_deterministic() {
            tracing::warn!(
                strategy = strategy.name(),
                "Strategy is unseeded; the selected set is not reproducible"
            );
        }

        let evaluation = match evaluate {
            Some(metric) => Some(Evaluation {
                metric,
                scorer: scorer.name().to_string(),
                delta: immunization_delta_with(model, &set, metric, scorer)?,
            }),
            None => None,
        };

        Ok(Self {
            schema_version: IMMUNIZATION_SCHEMA_VERSION.to_string(),
            params_hash: strategy.params_hash(),
            strategy: strategy.clone(),
            network: model.fingerprint().clone(),
            set,
            evaluation,
        })
    }
}
