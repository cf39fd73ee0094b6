//! Per-package metric tables.
//!
//! A [`MetricTable`] maps every package of one network snapshot to a value.
//! Tables remember which package universe they were computed over; combining
//! two tables from different universes is a [`MetricError::UniverseMismatch`].
//!
//! ## Top-k tie-break
//!
//! [`MetricTable::top`] orders by value descending (`f64::total_cmp`), then by
//! package id ascending. Selections that depend on `top` inherit this policy.

use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Index;

use crate::network::universe_hash;
use crate::types::PackageId;

use super::{MetricError, MetricKind};

/// Values of one metric for every package of a network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTable {
    /// Metric name, or an expression such as `reach*surface` for derived tables.
    label: String,
    /// Hash of the package universe the values cover.
    universe: String,
    /// Values by package.
    values: BTreeMap<PackageId, f64>,
}

impl MetricTable {
    /// Create a table with an arbitrary label.
    pub fn new(label: impl Into<String>, values: BTreeMap<PackageId, f64>) -> Self {
        let universe = universe_hash(values.keys());
        Self {
            label: label.into(),
            universe,
            values,
        }
    }

    /// Create a table for a metric kind.
    pub fn for_kind(kind: MetricKind, values: BTreeMap<PackageId, f64>) -> Self {
        Self::new(kind.as_str(), values)
    }

    /// Metric label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Hash of the package universe.
    pub fn universe(&self) -> &str {
        &self.universe
    }

    /// Value for `id`, if the package is in the table.
    pub fn get(&self, id: &PackageId) -> Option<f64> {
        self.values.get(id).copied()
    }

    /// Number of packages.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(package, value)` in package order.
    pub fn iter(&self) -> impl Iterator<Item = (&PackageId, f64)> + '_ {
        self.values.iter().map(|(id, v)| (id, *v))
    }

    /// Sum of all values.
    pub fn sum(&self) -> f64 {
        self.values.values().sum()
    }

    /// The `k` highest values (all of them when `k >= len`).
    pub fn top(&self, k: usize) -> Vec<(PackageId, f64)> {
        let mut ranked: Vec<(&PackageId, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
            .into_iter()
            .take(k)
            .map(|(id, v)| (id.clone(), v))
            .collect()
    }

    /// Highest entry under the `top` ordering.
    pub fn max(&self) -> Option<(PackageId, f64)> {
        self.top(1).into_iter().next()
    }

    /// Fail unless `other` covers the same package universe.
    pub fn ensure_same_universe(&self, other: &MetricTable) -> Result<(), MetricError> {
        if self.universe == other.universe {
            Ok(())
        } else {
            Err(MetricError::UniverseMismatch {
                left: format!("{} ({})", self.label, self.universe),
                right: format!("{} ({})", other.label, other.universe),
            })
        }
    }

    /// Elementwise sum.
    pub fn try_add(&self, other: &MetricTable) -> Result<MetricTable, MetricError> {
        self.zip_with(other, '+', |a, b| a + b)
    }

    /// Elementwise difference.
    pub fn try_sub(&self, other: &MetricTable) -> Result<MetricTable, MetricError> {
        self.zip_with(other, '-', |a, b| a - b)
    }

    /// Elementwise product.
    pub fn try_mul(&self, other: &MetricTable) -> Result<MetricTable, MetricError> {
        self.zip_with(other, '*', |a, b| a * b)
    }

    fn zip_with(
        &self,
        other: &MetricTable,
        op: char,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<MetricTable, MetricError> {
        self.ensure_same_universe(other)?;

        // Same universe hash means same sorted keys, so the zip lines up
        let values = self
            .values
            .iter()
            .zip(other.values.values())
            .map(|((id, a), b)| (id.clone(), f(*a, *b)))
            .collect();

        Ok(Self {
            label: format!("{}{}{}", self.label, op, other.label),
            universe: self.universe.clone(),
            values,
        })
    }

    fn map_values(&self, op: char, scalar: f64, f: impl Fn(f64) -> f64) -> MetricTable {
        Self {
            label: format!("{}{}{}", self.label, op, scalar),
            universe: self.universe.clone(),
            values: self.values.iter().map(|(id, v)| (id.clone(), f(*v))).collect(),
        }
    }
}

impl Index<&PackageId> for MetricTable {
    type Output = f64;

    /// Panics if `id` is not in the table, like `BTreeMap` indexing.
    fn index(&self, id: &PackageId) -> &f64 {
        &self.values[id]
    }
}

macro_rules! scalar_op {
    ($trait:ident, $method:ident, $symbol:literal, $op:tt) => {
        impl std::ops::$trait<f64> for &MetricTable {
            type Output = MetricTable;

            fn $method(self, scalar: f64) -> MetricTable {
                self.map_values($symbol, scalar, |v| v $op scalar)
            }
        }

        impl std::ops::$trait<f64> for MetricTable {
            type Output = MetricTable;

            fn $method(self, scalar: f64) -> MetricTable {
                std::ops::$trait::$method(&self, scalar)
            }
        }
    };
}

scalar_op!(Add, add, '+', +);
scalar_op!(Sub, sub, '-', -);
scalar_op!(Mul, mul, '*', *);
