//! Core data model, canonical identifiers, and deterministic ordering
//! primitives for the cabling allocator.
//!
//! This crate holds no algorithm and performs no I/O; it is the vocabulary
//! every other crate in the workspace shares.

pub mod determinism;
pub mod entities;
pub mod errors;
pub mod ids;
pub mod model;

pub mod prelude {
    pub use crate::determinism::{canonical_pair, peer_cmp, sort_by_peer};
    pub use crate::entities::{Cable, Face, Module, ModuleKind, Panel, Session, Termination};
    pub use crate::errors::CoreError;
    pub use crate::ids::{CableId, DemandId, ModuleId, PanelId, RackId, SessionId};
    pub use crate::model::{
        AllocationDirection, Demand, EndpointType, FixedProfiles, InputDocument,
        LcDemandProfile, MpoE2eProfile, OrderingSettings, PanelSettings, PeerSort, Project,
        Rack, Settings, SlotCategory,
    };
}
