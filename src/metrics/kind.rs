//! Supported per-package metric kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::MetricError;

/// Closed set of per-package metrics.
///
/// Edges point dependency → dependent, so "downstream" means towards the
/// packages that would break.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Packages reachable downstream, including the package itself.
    #[default]
    Reach,
    /// Packages that reach this one upstream, including itself.
    Surface,
    /// Dependency edges inside the package's reach set.
    Impact,
    /// Direct dependents.
    DependentsCount,
}

impl MetricKind {
    /// Every metric kind, in declaration order.
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Reach,
        MetricKind::Surface,
        MetricKind::Impact,
        MetricKind::DependentsCount,
    ];

    /// Stable snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reach => "reach",
            Self::Surface => "surface",
            Self::Impact => "impact",
            Self::DependentsCount => "dependents_count",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reach" => Ok(Self::Reach),
            "surface" => Ok(Self::Surface),
            "impact" => Ok(Self::Impact),
            "dependents_count" | "dependentscount" | "dependents" => Ok(Self::DependentsCount),
            other => Err(MetricError::UnknownKind(other.to_string())),
        }
    }
}
