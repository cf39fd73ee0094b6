//! Canonical hashing for network fingerprints and strategy parameters.
//!
//! Everything that ends up in a hash is serialized to JSON first. Callers
//! must only hash values whose serialized form is order-stable:
//!
//! - BTreeMap/BTreeSet for maps and sets, never HashMap
//! - Vec contents already sorted when order carries no meaning

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Serialize a value to canonical JSON bytes.
///
/// Only used on crate types with string keys, which cannot fail to serialize.
pub fn to_canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("crate types always serialize to JSON")
}

/// xxh64 of the canonical bytes of `value`.
pub fn canonical_hash<T: Serialize + ?Sized>(value: &T) -> u64 {
    xxh64(&to_canonical_bytes(value), 0)
}

/// [`canonical_hash`] rendered as 16 lowercase hex digits.
pub fn canonical_hash_hex<T: Serialize + ?Sized>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}
