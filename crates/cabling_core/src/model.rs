//! Input data model: `Project`, `Rack`, `Demand`, `Settings`.
//!
//! Every struct here derives `Deserialize` with `deny_unknown_fields` so that
//! "reject unknown fields anywhere in the document" is enforced by `serde`
//! at parse time rather than by hand-rolled schema code.

use serde::{Deserialize, Serialize};

use crate::ids::{DemandId, RackId};

/// Endpoint/media type. A closed four-value enum — see GLOSSARY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointType {
    MmfLcDuplex,
    SmfLcDuplex,
    Mpo12,
    UtpRj45,
}

impl EndpointType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointType::MmfLcDuplex => "mmf_lc_duplex",
            EndpointType::SmfLcDuplex => "smf_lc_duplex",
            EndpointType::Mpo12 => "mpo12",
            EndpointType::UtpRj45 => "utp_rj45",
        }
    }
}

/// One entry of `ordering.slot_category_priority`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotCategory {
    MpoE2e,
    LcMmf,
    LcSmf,
    Utp,
}

impl SlotCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotCategory::MpoE2e => "mpo_e2e",
            SlotCategory::LcMmf => "lc_mmf",
            SlotCategory::LcSmf => "lc_smf",
            SlotCategory::Utp => "utp",
        }
    }

    pub const ALL: [SlotCategory; 4] = [
        SlotCategory::MpoE2e,
        SlotCategory::LcMmf,
        SlotCategory::LcSmf,
        SlotCategory::Utp,
    ];

    /// The demand endpoint type this category consumes, if any (UTP/MPO map 1:1;
    /// the two LC categories split on media).
    pub fn endpoint_type(&self) -> EndpointType {
        match self {
            SlotCategory::MpoE2e => EndpointType::Mpo12,
            SlotCategory::LcMmf => EndpointType::MmfLcDuplex,
            SlotCategory::LcSmf => EndpointType::SmfLcDuplex,
            SlotCategory::Utp => EndpointType::UtpRj45,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationDirection {
    TopDown,
    BottomUp,
}

impl Default for AllocationDirection {
    fn default() -> Self {
        AllocationDirection::TopDown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeerSort {
    NaturalTrailingDigits,
    Lexicographic,
}

impl Default for PeerSort {
    fn default() -> Self {
        PeerSort::NaturalTrailingDigits
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub note: Option<String>,
}

fn default_height() -> u32 {
    42
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rack {
    pub id: RackId,
    pub display_name: String,
    #[serde(default = "default_height")]
    pub height_u: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Demand {
    pub id: DemandId,
    pub src: RackId,
    pub dst: RackId,
    pub endpoint_type: EndpointType,
    pub count: u32,
}

fn default_slots_per_u() -> u32 {
    4
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelSettings {
    #[serde(default = "default_slots_per_u")]
    pub slots_per_u: u32,
    #[serde(default)]
    pub allocation_direction: AllocationDirection,
}

impl Default for PanelSettings {
    fn default() -> Self {
        PanelSettings {
            slots_per_u: default_slots_per_u(),
            allocation_direction: AllocationDirection::default(),
        }
    }
}

fn default_priority() -> Vec<SlotCategory> {
    SlotCategory::ALL.to_vec()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderingSettings {
    #[serde(default)]
    pub peer_sort: PeerSort,
    #[serde(default = "default_priority")]
    pub slot_category_priority: Vec<SlotCategory>,
}

impl Default for OrderingSettings {
    fn default() -> Self {
        OrderingSettings {
            peer_sort: PeerSort::default(),
            slot_category_priority: default_priority(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LcDemandProfile {
    #[serde(default)]
    pub trunk_polarity: Option<String>,
    #[serde(default)]
    pub breakout_module_variant: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MpoE2eProfile {
    #[serde(default)]
    pub trunk_polarity: Option<String>,
    #[serde(default)]
    pub pass_through_variant: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixedProfiles {
    #[serde(default)]
    pub lc_demands: LcDemandProfile,
    #[serde(default)]
    pub mpo_e2e: MpoE2eProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub panel: PanelSettings,
    #[serde(default)]
    pub ordering: OrderingSettings,
    #[serde(default)]
    pub fixed_profiles: FixedProfiles,
}

/// Top-level document shape accepted by the validator: `{version, project, racks, demands, settings?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputDocument {
    pub version: String,
    pub project: Project,
    pub racks: Vec<Rack>,
    pub demands: Vec<Demand>,
    #[serde(default)]
    pub settings: Settings,
}
