//! Derived entities: created once per allocation, never mutated afterward,
//! owned exclusively by the result document (spec §3).

use serde::{Deserialize, Serialize};

use crate::ids::{CableId, ModuleId, PanelId, RackId, SessionId};
use crate::model::EndpointType;

/// Physical face of a patch field. This allocator never produces anything
/// but `Front` — there is no rear/blind-mate modeling anywhere upstream —
/// but the field is retained because it is part of the external CSV and
/// physical-diff-tuple contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    Front,
    Rear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    Mpo12PassThrough12Port,
    LcBreakout2xMpo12To12xLcDuplex,
    Utp6xRj45,
}

impl ModuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Mpo12PassThrough12Port => "mpo12_pass_through_12port",
            ModuleKind::LcBreakout2xMpo12To12xLcDuplex => "lc_breakout_2xmpo12_to_12xlcduplex",
            ModuleKind::Utp6xRj45 => "utp_6xrj45",
        }
    }

    /// Physical port count exposed by a module of this kind.
    pub fn port_count(&self) -> u32 {
        match self {
            ModuleKind::Mpo12PassThrough12Port => 12,
            ModuleKind::LcBreakout2xMpo12To12xLcDuplex => 12,
            ModuleKind::Utp6xRj45 => 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub id: PanelId,
    pub rack_id: RackId,
    pub u: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub panel_id: PanelId,
    pub rack_id: RackId,
    pub u: u32,
    pub slot: u32,
    pub kind: ModuleKind,
    pub polarity_variant: Option<String>,
    pub dedicated: bool,
}

/// A `(rack, face, u, slot, port)` physical coordinate — half of a cable
/// endpoint or a session side.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Termination {
    pub rack_id: RackId,
    pub face: Face,
    pub u: u32,
    pub slot: u32,
    pub port: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cable {
    pub id: CableId,
    pub media: EndpointType,
    pub polarity: Option<String>,
    pub chunk_index: u32,
    pub trunk_index: u32,
    pub endpoint_a: Termination,
    pub endpoint_b: Termination,
    /// Assigned sequentially from 1 after final sort by `id` (spec §4.5).
    pub cable_seq: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub media: EndpointType,
    pub cable_id: CableId,
    pub adapter_type: String,
    pub src: Termination,
    pub dst: Termination,
    pub label_a: String,
    pub label_b: String,
    pub fiber_a: Option<u32>,
    pub fiber_b: Option<u32>,
}

impl Termination {
    /// `{rack}U{u}S{slot}P{port}` (spec §6 label format).
    pub fn label(&self) -> String {
        format!(
            "{}U{}S{}P{}",
            self.rack_id.as_str(),
            self.u,
            self.slot,
            self.port
        )
    }
}
