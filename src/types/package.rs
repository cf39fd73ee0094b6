//! Package identifiers for the dependency network.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for a package (node) in a dependency network.
///
/// Wraps the registry name and implements `Ord` so that every set and map
/// keyed by packages iterates in a deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    /// Create a new PackageId from any string-like name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the package name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier and return the inner name.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for PackageId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&PackageId> for PackageId {
    fn from(id: &PackageId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for PackageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PackageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
