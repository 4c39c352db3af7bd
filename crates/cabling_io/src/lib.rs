//! Canonical JSON serialization, SHA-256 hashing, and input validation —
//! the boundary-facing concerns of the cabling allocator. No file or
//! network access happens here; the allocator core performs none (spec §5).

pub mod canonical_json;
pub mod hasher;
pub mod validator;

pub mod prelude {
    pub use crate::canonical_json::{to_canonical_bytes, to_canonical_string};
    pub use crate::hasher::{cable_id, input_hash, module_id, panel_id, session_id, sha256_hex};
    pub use crate::validator::{
        parse_document, validate, IoError, Severity, ValidationIssue, ValidationReport,
    };
}
