//! Canonical output identifiers and raw input identifiers.
//!
//! Output IDs (`PanelId`, `ModuleId`, `CableId`, `SessionId`) are always
//! constructed from a prefix plus the first 16 hex characters of a SHA-256
//! digest (see `cabling_io::hasher`); this module only validates their
//! *shape*, it never hashes anything itself — hashing lives at the io
//! boundary, not in core.
//!
//! Input IDs (`RackId`, `DemandId`) are caller-supplied tokens; this module
//! validates only that they are non-empty and free of control characters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

const HASH_LEN: usize = 16;

fn validate_hash_shape(prefix: &'static str, s: &str) -> Result<(), CoreError> {
    let rest = s.strip_prefix(prefix).ok_or_else(|| CoreError::WrongPrefix {
        expected_prefix: prefix,
        actual: s.to_string(),
    })?;
    let ok = rest.len() == HASH_LEN && rest.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase());
    if !ok {
        return Err(CoreError::WrongHashShape {
            expected: HASH_LEN,
            actual: rest.to_string(),
        });
    }
    Ok(())
}

macro_rules! define_hash_id {
    ($name:ident, $prefix:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Build from an already-computed 16-hex digest (no `0x` prefix, no type prefix).
            pub fn from_digest(hex16: &str) -> Result<Self, CoreError> {
                let full = format!("{}{}", $prefix, hex16);
                Self::parse(full)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            fn parse(s: String) -> Result<Self, CoreError> {
                validate_hash_shape($prefix, &s)?;
                Ok(Self(s))
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;
            fn try_from(s: String) -> Result<Self, CoreError> {
                Self::parse(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

define_hash_id!(PanelId, "pan_", "Content-derived identifier for a `Panel`.");
define_hash_id!(ModuleId, "mod_", "Content-derived identifier for a `Module`.");
define_hash_id!(CableId, "cab_", "Content-derived identifier for a `Cable`.");
define_hash_id!(SessionId, "ses_", "Content-derived identifier for a `Session`.");

fn validate_token_shape(s: &str) -> Result<(), CoreError> {
    if s.is_empty() {
        return Err(CoreError::EmptyIdentifier);
    }
    if s.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(CoreError::InvalidIdentifierChars(s.to_string()));
    }
    Ok(())
}

macro_rules! define_token_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Result<Self, CoreError> {
                let s = s.into();
                validate_token_shape(&s)?;
                Ok(Self(s))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;
            fn try_from(s: String) -> Result<Self, CoreError> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

define_token_id!(RackId, "Caller-supplied unique rack identifier.");
define_token_id!(DemandId, "Caller-supplied unique demand identifier.");
