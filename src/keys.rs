//! Shared key normalization for the route table.
//!
//! The compiler lowercases hosts and path keys when it emits mapping
//! entries, and the runtime must apply the same folding when it looks a
//! path up, or routes silently become unreachable. Both halves go through
//! this module so the casing contract lives in exactly one place.

/// Suffix appended to a path key for the call-thunk mapping entry.
pub const KEY_METHOD: &str = "_METHOD";

/// Suffix appended to a path key for the serialized arg-name entry.
pub const KEY_ARGS: &str = "_ARGS";

/// Fold a raw host or path key into its canonical table form.
#[inline]
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    raw.to_ascii_lowercase()
}

/// Build a mapping key from a normalized path key and a suffix.
#[inline]
#[must_use]
pub fn join_key(key: &str, suffix: &str) -> String {
    format!("{key}{suffix}")
}

/// Name of the generated dispatcher struct for a (scheme, host) pair.
///
/// The scheme is taken verbatim (up to the caller to pass the primary or
/// an alias); the host must already be normalized.
#[must_use]
pub fn mirror_class_name(scheme: &str, host: &str) -> String {
    format!("Mirror_{scheme}_{host}")
}

/// File-level module name for a generated dispatcher.
#[must_use]
pub fn mirror_module_name(scheme: &str, host: &str) -> String {
    mirror_class_name(scheme, host).to_ascii_lowercase()
}
