//! Input Validator (spec §4.1).
//!
//! Shape rejection (unknown fields, out-of-domain enum values, wrong field
//! types) is handled by `serde` at parse time via `deny_unknown_fields` and
//! the closed enums in `cabling_core::model` — see
//! [`parse_document`]. This module covers what `serde` cannot: the
//! semantic, cross-field checks — duplicate ids, self-loop demands,
//! undefined rack references, non-positive counts.
//!
//! All issues are collected in one pass, mirroring the rest of this
//! allocator's "continue so every offending site is reported together"
//! philosophy (spec §7); the caller decides to abort when
//! [`ValidationReport::pass`] is `false`.

use std::collections::HashSet;

use cabling_core::model::InputDocument;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IoError {
    #[error("malformed input document: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub kind: &'static str,
    pub message: String,
    pub entity_refs: Vec<String>,
}

impl ValidationIssue {
    fn error(kind: &'static str, message: impl Into<String>, entity_refs: Vec<String>) -> Self {
        ValidationIssue {
            severity: Severity::Error,
            kind,
            message: message.into(),
            entity_refs,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn pass(&self) -> bool {
        !self.issues.iter().any(|i| i.severity == Severity::Error)
    }
}

/// Parse raw JSON bytes into an [`InputDocument`]. Unknown fields and
/// out-of-domain enum values are rejected here by `serde` itself.
pub fn parse_document(bytes: &[u8]) -> Result<InputDocument, IoError> {
    serde_json::from_slice(bytes).map_err(|e| IoError::Parse(e.to_string()))
}

/// Semantic validation of an already-parsed, already-shape-valid document.
pub fn validate(doc: &InputDocument) -> ValidationReport {
    let mut issues = Vec::new();

    let mut seen_racks: HashSet<&str> = HashSet::new();
    for rack in &doc.racks {
        if !seen_racks.insert(rack.id.as_str()) {
            issues.push(ValidationIssue::error(
                "duplicate_rack_id",
                format!("rack id {:?} is defined more than once", rack.id.as_str()),
                vec![rack.id.as_str().to_string()],
            ));
        }
    }
    let known_racks: HashSet<&str> = doc.racks.iter().map(|r| r.id.as_str()).collect();

    let mut seen_demands: HashSet<&str> = HashSet::new();
    for demand in &doc.demands {
        if !seen_demands.insert(demand.id.as_str()) {
            issues.push(ValidationIssue::error(
                "duplicate_demand_id",
                format!(
                    "demand id {:?} is defined more than once",
                    demand.id.as_str()
                ),
                vec![demand.id.as_str().to_string()],
            ));
        }

        if demand.src == demand.dst {
            issues.push(ValidationIssue::error(
                "self_loop_demand",
                format!(
                    "demand {:?} has identical src and dst rack {:?}",
                    demand.id.as_str(),
                    demand.src.as_str()
                ),
                vec![demand.id.as_str().to_string()],
            ));
        }

        if !known_racks.contains(demand.src.as_str()) {
            issues.push(ValidationIssue::error(
                "undefined_rack_reference",
                format!(
                    "demand {:?} references undefined src rack {:?}",
                    demand.id.as_str(),
                    demand.src.as_str()
                ),
                vec![demand.id.as_str().to_string(), demand.src.as_str().to_string()],
            ));
        }
        if !known_racks.contains(demand.dst.as_str()) {
            issues.push(ValidationIssue::error(
                "undefined_rack_reference",
                format!(
                    "demand {:?} references undefined dst rack {:?}",
                    demand.id.as_str(),
                    demand.dst.as_str()
                ),
                vec![demand.id.as_str().to_string(), demand.dst.as_str().to_string()],
            ));
        }

        if demand.count == 0 {
            issues.push(ValidationIssue::error(
                "non_positive_count",
                format!("demand {:?} has non-positive count", demand.id.as_str()),
                vec![demand.id.as_str().to_string()],
            ));
        }
    }

    ValidationReport { issues }
}
