//! DELTA FRAME: bound-based candidate sets without model rebuilds.
//!
//! For every package `p` a cheap upper bound `U(p)` and lower bound `L(p)`
//! on its true vulnerability reduction are derived from metrics the model
//! already holds:
//!
//! | Variant | `U` | `L` |
//! |---------|-----|-----|
//! | Reach | Reach × Surface | Reach + Surface − 1 |
//! | Impact | Impact × Surface | DependentsCount × Surface |
//!
//! Let `max_lower` be the largest `L`. A package with `U(p) <= max_lower`
//! cannot beat the package achieving `max_lower`, so the frame is
//! `{p : U(p) > max_lower}`. It contains the single best package but is not
//! minimal and says nothing about ranking inside the set.
//!
//! When the strict filter leaves nothing, every `U` is at most
//! `max_lower <= U(anchor)`, so the anchor itself is an optimum and the frame
//! collapses to `{anchor}`.

use serde::Serialize;

use crate::error::{ImmunizationError, Result};
use crate::metrics::{MetricKind, MetricTable, NetworkModel};
use crate::types::PackageId;

use super::ImmunizationSet;

/// Outcome of a DELTA FRAME run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeltaFrame {
    /// Packages whose upper bound exceeds `max_lower`.
    pub set: ImmunizationSet,
    /// Package achieving `max_lower` (first under the `top` tie-break).
    pub anchor: PackageId,
    /// Largest lower bound over all packages.
    pub max_lower: f64,
    /// Packages pruned by the bound.
    pub excluded: usize,
    /// Whether the strict filter was empty and the frame fell back to `{anchor}`.
    pub collapsed: bool,
}

impl DeltaFrame {
    /// Discard diagnostics and keep the set.
    pub fn into_set(self) -> ImmunizationSet {
        self.set
    }
}

/// DELTA FRAME with Reach bounds.
pub fn delta_frame_reach(model: &NetworkModel) -> Result<DeltaFrame> {
    let reach = model.metric(MetricKind::Reach);
    let surface = model.metric(MetricKind::Surface);

    let upper = reach.try_mul(surface)?;
    let lower = reach.try_add(surface)? - 1.0;

    delta_frame(&upper, &lower)
}

/// DELTA FRAME with Impact bounds.
pub fn delta_frame_impact(model: &NetworkModel) -> Result<DeltaFrame> {
    let surface = model.metric(MetricKind::Surface);

    let upper = model.metric(MetricKind::Impact).try_mul(surface)?;
    let lower = model.metric(MetricKind::DependentsCount).try_mul(surface)?;

    delta_frame(&upper, &lower)
}

/// Frame packages given precomputed bound tables.
pub fn delta_frame(upper: &MetricTable, lower: &MetricTable) -> Result<DeltaFrame> {
    upper.ensure_same_universe(lower)?;

    let (anchor, max_lower) = lower.max().ok_or(ImmunizationError::EmptyNetwork)?;

    let mut set: ImmunizationSet = upper
        .iter()
        .filter(|(_, bound)| *bound > max_lower)
        .map(|(id, _)| id.clone())
        .collect();

    let collapsed = set.is_empty();
    if collapsed {
        set.insert(anchor.clone());
    }

    let frame = DeltaFrame {
        excluded: upper.len() - set.len(),
        set,
        anchor,
        max_lower,
        collapsed,
    };

    tracing::debug!(
        upper = upper.label(),
        lower = lower.label(),
        max_lower = frame.max_lower,
        anchor = %frame.anchor,
        selected = frame.set.len(),
        excluded = frame.excluded,
        collapsed = frame.collapsed,
        "DELTA FRAME computed"
    );

    Ok(frame)
}
