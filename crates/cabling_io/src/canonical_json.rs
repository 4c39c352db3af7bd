//! Canonical JSON byte serialization (spec §9): recursively sort object
//! keys lexicographically, preserve array order, compact output, no
//! incidental whitespace, newline-terminated. Used to compute `input_hash`
//! and the per-entity canonical strings that feed `cabling_io::hasher`.
//!
//! This module intentionally does not touch the filesystem — the allocator
//! performs no I/O (spec §5); the teacher's atomic-file-write helpers
//! (`write_canonical_file`, `make_unique_tmp_path`, `fsync_dir`) have no
//! counterpart here and were dropped (see DESIGN.md).

use serde::Serialize;
use serde_json::Value;

/// Recursively sort every object's keys; arrays keep their original order.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> =
                map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = serde_json::Map::new();
            for (k, v) in entries {
                sorted.insert(k, v);
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serialize `value` to canonical compact bytes: sorted keys, no incidental
/// whitespace, UTF-8, newline-terminated (spec §9) so hashes computed from
/// this output are reproducible against a cross-language reference.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let raw = serde_json::to_value(value)?;
    let canon = canonicalize(raw);
    let mut bytes = serde_json::to_vec(&canon)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Same as [`to_canonical_bytes`] but returns a `String`.
pub fn to_canonical_string<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let bytes = to_canonical_bytes(value)?;
    Ok(String::from_utf8(bytes).expect("serde_json always emits valid UTF-8"))
}
