//! Rack slot allocation and category placement engines.
//!
//! This crate depends only on `cabling_core`: it is pure algorithm, no
//! hashing, no serialization, no I/O. Identifiers are assigned later, by
//! `cabling_pipeline`, once a provisional ("NoId") entity's canonical
//! content is fully known.

pub mod placement;
pub mod slots;

#[cfg(test)]
mod properties;

pub mod prelude {
    pub use crate::placement::{
        CableNoId, ModuleNoId, PanelNoId, PlacementOutput, PlacementWarning, PlacementWarningKind,
        SessionNoId,
    };
    pub use crate::placement::{lc_breakout, mpo_e2e, utp};
    pub use crate::slots::{RackOverflow, RackSlotAllocator, SlotCoord};
}
