//! Core types for the immunization kernel.
//!
//! All types implement deterministic ordering for reproducible selections.

pub mod package;
pub mod edge;

pub use package::PackageId;
pub use edge::DependencyEdge;
