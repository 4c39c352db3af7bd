//! Category Placement Engines (spec §4.4).
//!
//! Each engine is pure over its inputs and the shared per-rack
//! [`RackSlotAllocator`](crate::slots::RackSlotAllocator): it consumes a
//! rack pair's demand count and emits provisional ("NoId") panels,
//! modules, cables and sessions. Identifiers are not assigned here — that
//! is `cabling_pipeline::build_result`'s job, following the teacher's
//! NoId → WithId builder pattern, since hashing lives at the io boundary
//! (`cabling_io::hasher`), not in the algorithm layer.

pub mod lc_breakout;
pub mod mpo_e2e;
pub mod utp;

use cabling_core::entities::{Face, ModuleKind, Termination};
use cabling_core::ids::RackId;
use cabling_core::model::EndpointType;

/// A panel before its content hash id is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelNoId {
    pub rack_id: RackId,
    pub u: u32,
}

/// A module before its content hash id is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNoId {
    pub rack_id: RackId,
    pub u: u32,
    pub slot: u32,
    pub kind: ModuleKind,
    pub polarity_variant: Option<String>,
    pub dedicated: bool,
}

/// A cable before its content hash id is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CableNoId {
    pub media: EndpointType,
    pub polarity: Option<String>,
    pub chunk_index: u32,
    pub trunk_index: u32,
    pub endpoint_a: Termination,
    pub endpoint_b: Termination,
}

/// A session before its content hash id (and its cable's id) is known.
/// `cable_index` refers into the `cables` vector of the same
/// [`PlacementOutput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionNoId {
    pub media: EndpointType,
    pub adapter_type: &'static str,
    pub cable_index: usize,
    pub src: Termination,
    pub dst: Termination,
    pub fiber_a: Option<u32>,
    pub fiber_b: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementWarningKind {
    UtpSideCountMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementWarning {
    pub kind: PlacementWarningKind,
    pub message: String,
    pub entity_refs: Vec<String>,
}

/// Accumulated output of running one category engine over one rack pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementOutput {
    pub panels: Vec<PanelNoId>,
    pub modules: Vec<ModuleNoId>,
    pub cables: Vec<CableNoId>,
    pub sessions: Vec<SessionNoId>,
    pub warnings: Vec<PlacementWarning>,
}

impl PlacementOutput {
    pub fn merge(&mut self, other: PlacementOutput) {
        let cable_offset = self.cables.len();
        self.panels.extend(other.panels);
        self.modules.extend(other.modules);
        self.cables.extend(other.cables);
        self.sessions.extend(other.sessions.into_iter().map(|mut s| {
            s.cable_index += cable_offset;
            s
        }));
        self.warnings.extend(other.warnings);
    }
}

pub(crate) fn termination(rack_id: &RackId, u: u32, slot: u32, port: u32) -> Termination {
    Termination {
        rack_id: rack_id.clone(),
        face: Face::Front,
        u,
        slot,
        port,
    }
}

/// Reserve one slot on `rack`, recording a new [`PanelNoId`] into `out` the
/// first time that `u` is seen on this rack. Returns `None` on overflow
/// (already recorded into the allocator's own `overflows`).
pub(crate) fn reserve_slot_with_panel(
    allocator: &mut crate::slots::RackSlotAllocator,
    rack_id: &RackId,
    out: &mut PlacementOutput,
) -> Option<crate::slots::SlotCoord> {
    let coord = allocator.reserve_one()?;
    if allocator.note_panel_u(coord.u) {
        out.panels.push(PanelNoId {
            rack_id: rack_id.clone(),
            u: coord.u,
        });
    }
    Some(coord)
}
