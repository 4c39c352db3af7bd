//! Workspace root crate.
//!
//! Carries no logic of its own — the allocator lives in `crates/`
//! (`cabling_core`, `cabling_io`, `cabling_algo`, `cabling_pipeline`). This
//! crate exists only so the `tests/` directory has a package to attach to
//! for end-to-end scenario coverage.
