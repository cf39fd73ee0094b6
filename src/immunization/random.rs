//! Random baseline sets.
//!
//! Random sets are the statistical control the structural selectors are
//! judged against. Two sampling modes exist:
//!
//! - **Direct**: `k` distinct packages drawn uniformly without replacement.
//! - **Indirect**: draw a random package that has dependencies, then protect
//!   one of its direct dependencies at random; repeat until `k` distinct
//!   packages are collected. This models "protect something an active package
//!   relies on" rather than protecting the active package itself.
//!
//! Every call owns its generator. A seed reproduces the draw sequence for the
//! same network, size, mode and `rand` release.

use rand::rngs::StdRng;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{ImmunizationError, Result};
use crate::metrics::NetworkModel;
use crate::network::DependencyNetwork;
use crate::types::PackageId;

use super::ImmunizationSet;

/// How random packages are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// Uniform sample of packages.
    #[default]
    Direct,
    /// Uniform dependency of a uniform package with dependencies.
    Indirect,
}

impl SamplingMode {
    /// Mode for an `indirect` flag.
    pub fn from_indirect(indirect: bool) -> Self {
        if indirect {
            Self::Indirect
        } else {
            Self::Direct
        }
    }
}

/// Random set of `size` packages using a freshly seeded generator.
///
/// `None` seeds from OS entropy and is not reproducible.
pub fn random_set(
    model: &NetworkModel,
    size: usize,
    mode: SamplingMode,
    seed: Option<u64>,
) -> Result<ImmunizationSet> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    random_set_with_rng(model, size, mode, &mut rng)
}

/// Random set of `size` packages drawn from a caller-owned generator.
pub fn random_set_with_rng<R: Rng + ?Sized>(
    model: &NetworkModel,
    size: usize,
    mode: SamplingMode,
    rng: &mut R,
) -> Result<ImmunizationSet> {
    let packages: Vec<&PackageId> = model.packages().collect();

    let set = match mode {
        SamplingMode::Direct => sample_direct(&packages, size, rng)?,
        SamplingMode::Indirect => sample_indirect(model.network(), &packages, size, rng)?,
    };

    tracing::debug!(
        mode = ?mode,
        requested = size,
        packages = packages.len(),
        "Random immunization set drawn"
    );

    Ok(set)
}

fn sample_direct<R: Rng + ?Sized>(
    packages: &[&PackageId],
    size: usize,
    rng: &mut R,
) -> Result<ImmunizationSet> {
    if size > packages.len() {
        return Err(ImmunizationError::InvalidSize {
            requested: size,
            available: packages.len(),
        });
    }

    Ok(packages
        .choose_multiple(rng, size)
        .map(|id| (*id).clone())
        .collect())
}

fn sample_indirect<R: Rng + ?Sized>(
    network: &DependencyNetwork,
    packages: &[&PackageId],
    size: usize,
    rng: &mut R,
) -> Result<ImmunizationSet> {
    // Decide up front whether `size` distinct dependencies exist at all,
    // so the draw loop below always terminates.
    let reachable: BTreeSet<&PackageId> = packages
        .iter()
        .flat_map(|id| network.direct_dependencies(id))
        .collect();

    if reachable.len() < size {
        return Err(ImmunizationError::DegenerateNetwork {
            requested: size,
            reachable: reachable.len(),
        });
    }

    let mut result = ImmunizationSet::new();
    let mut draws: u64 = 0;

    while result.len() < size {
        let Some(current) = packages.choose(rng) else {
            break;
        };
        draws += 1;

        let dependencies = network.direct_dependencies(current);
        if let Some(dependency) = dependencies.iter().choose(rng) {
            result.insert(dependency.clone());
        }
    }

    tracing::trace!(draws, collected = result.len(), "Indirect sampling finished");

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star_model() -> NetworkModel {
        // hub is depended on by everything; lib is depended on by app
        NetworkModel::build(DependencyNetwork::from_edges([
            ("hub", "app"),
            ("hub", "cli"),
            ("hub", "lib"),
            ("lib", "app"),
            ("core", "lib"),
        ]))
    }

    #[test]
    fn test_direct_seed_is_reproducible() {
        let model = star_model();
        let first = random_set(&model, 3, SamplingMode::Direct, Some(42)).unwrap();
        let second = random_set(&model, 3, SamplingMode::Direct, Some(42)).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert!(first.iter().all(|id| model.network().contains(id)));
    }

    #[test]
    fn test_direct_full_and_empty() {
        let model = star_model();
        assert_eq!(random_set(&model, 5, SamplingMode::Direct, Some(1)).unwrap().len(), 5);
        assert!(random_set(&model, 0, SamplingMode::Direct, None).unwrap().is_empty());
    }

    #[test]
    fn test_direct_oversized_request() {
        let err = random_set(&star_model(), 6, SamplingMode::Direct, Some(7)).unwrap_err();
        assert_eq!(
            err,
            ImmunizationError::InvalidSize {
                requested: 6,
                available: 5
            }
        );
    }

    #[test]
    fn test_indirect_returns_dependencies() {
        let model = star_model();
        let network = model.network();

        for seed in 0..20 {
            let set = random_set(&model, 2, SamplingMode::Indirect, Some(seed)).unwrap();
            assert_eq!(set.len(), 2);
            for id in &set {
                assert!(!network.dependents(id).is_empty(), "{id} is nobody's dependency");
            }
        }
    }

    #[test]
    fn test_indirect_seed_is_reproducible() {
        let model = star_model();
        let first = random_set(&model, 3, SamplingMode::Indirect, Some(9)).unwrap();
        let second = random_set(&model, 3, SamplingMode::Indirect, Some(9)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_indirect_fails_without_dependencies() {
        let mut network = DependencyNetwork::new();
        network.add_package("a");
        network.add_package("b");
        let model = NetworkModel::build(network);

        let err = random_set(&model, 1, SamplingMode::Indirect, Some(3)).unwrap_err();
        assert_eq!(
            err,
            ImmunizationError::DegenerateNetwork {
                requested: 1,
                reachable: 0
            }
        );
    }

    #[test]
    fn test_indirect_fails_when_pool_too_small() {
        // Only hub, lib and core are anyone's dependency
        let err = random_set(&star_model(), 4, SamplingMode::Indirect, Some(3)).unwrap_err();
        assert_eq!(
            err,
            ImmunizationError::DegenerateNetwork {
                requested: 4,
                reachable: 3
            }
        );
    }

    #[test]
    fn test_caller_owned_rng() {
        let model = star_model();
        let mut a = StdRng::seed_from_u64(5);
        let mut b = StdRng::seed_from_u64(5);

        let first = random_set_with_rng(&model, 2, SamplingMode::Direct, &mut a).unwrap();
        let second = random_set_with_rng(&model, 2, SamplingMode::Direct, &mut b).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(SamplingMode::from_indirect(true), SamplingMode::Indirect);
        assert_eq!(SamplingMode::from_indirect(false), SamplingMode::Direct);
    }
}
