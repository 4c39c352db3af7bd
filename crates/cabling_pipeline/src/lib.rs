//! Deterministic orchestration of the cabling allocator pipeline:
//! Input Validator → Demand Normalizer → Rack Slot Allocator → Category
//! Placement Engines → Canonical ID & Ordering → Diff Engine.
//!
//! [`allocate`](build_result::allocate) is the one operation spec §6 names
//! (`allocate(project) → result`); it assumes its input already passed
//! [`cabling_io::validator::validate`] — "the validator is the only
//! component that may reject input; downstream components assume a
//! well-formed project" (spec §4.1). [`run`] is the convenience entry
//! point that does parse → validate → allocate in one call for callers
//! that have not validated their input yet.

pub mod build_result;
pub mod diff;
pub mod normalize;

use thiserror::Error;

use cabling_core::model::InputDocument;
use cabling_io::validator::{self, IoError, ValidationReport};

pub use build_result::{AllocError, Metrics, PairDetail, ResultDocument, Warning};
pub use diff::{LogicalDiff, PhysicalCollision, PhysicalDiff, PhysicalTuple};

/// The single fatal path through the pipeline: `allocate()` itself never
/// fails (spec §7: RackOverflow and UTP side-mismatches are recorded into
/// the result's `errors`/`warnings`, not raised). Only malformed or
/// semantically invalid *input* aborts before allocation starts.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input could not be parsed: {0}")]
    Parse(#[from] IoError),
    #[error("input failed validation")]
    Validation(ValidationReport),
}

/// Parse, validate, and allocate in one call (spec §4.1: "errors are
/// raised synchronously and describe the offending path" — this is that
/// synchronous boundary). Returns `Err` before any allocation work begins
/// when the input is malformed or fails semantic validation.
pub fn run(bytes: &[u8]) -> Result<ResultDocument, PipelineError> {
    let doc: InputDocument = validator::parse_document(bytes)?;
    let report = validator::validate(&doc);
    if !report.pass() {
        return Err(PipelineError::Validation(report));
    }
    Ok(build_result::allocate(&doc))
}
