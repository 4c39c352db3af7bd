//! Diff Engine (spec §4.6): compare two result documents along two
//! independent axes — logical identity (`session_id`) and physical
//! termination tuple — so a caller can distinguish "this session's
//! identity changed" from "this physical location's assignment changed".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use cabling_core::entities::{Face, Session};
use cabling_core::ids::{RackId, SessionId};
use cabling_core::model::EndpointType;

use crate::build_result::ResultDocument;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalDiff {
    pub added: Vec<SessionId>,
    pub removed: Vec<SessionId>,
    pub modified: Vec<SessionId>,
}

/// The physical half of a session: `(media, src..., dst...)` (spec §4.6).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PhysicalTuple {
    pub media: EndpointType,
    pub src_rack: RackId,
    pub src_face: Face,
    pub src_u: u32,
    pub src_slot: u32,
    pub src_port: u32,
    pub dst_rack: RackId,
    pub dst_face: Face,
    pub dst_u: u32,
    pub dst_slot: u32,
    pub dst_port: u32,
}

impl PhysicalTuple {
    fn of(session: &Session) -> Self {
        PhysicalTuple {
            media: session.media,
            src_rack: session.src.rack_id.clone(),
            src_face: session.src.face,
            src_u: session.src.u,
            src_slot: session.src.slot,
            src_port: session.src.port,
            dst_rack: session.dst.rack_id.clone(),
            dst_face: session.dst.face,
            dst_u: session.dst.u,
            dst_slot: session.dst.slot,
            dst_port: session.dst.port,
        }
    }
}

/// A tuple present in both documents but mapped to different `session_id`s
/// — the physical location is stable but its logical identity drifted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalCollision {
    pub tuple: PhysicalTuple,
    pub old_session_id: SessionId,
    pub new_session_id: SessionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalDiff {
    pub added: Vec<PhysicalTuple>,
    pub removed: Vec<PhysicalTuple>,
    pub collisions: Vec<PhysicalCollision>,
}

/// Logical diff (spec §4.6): keyed on `session_id`. `modified` holds ids
/// shared by both documents whose full payload differs.
pub fn logical_diff(old: &ResultDocument, new: &ResultDocument) -> LogicalDiff {
    let old_by_id: HashMap<&SessionId, &Session> = old.sessions.iter().map(|s| (&s.id, s)).collect();
    let new_by_id: HashMap<&SessionId, &Session> = new.sessions.iter().map(|s| (&s.id, s)).collect();

    let mut added: Vec<SessionId> = new_by_id
        .keys()
        .filter(|id| !old_by_id.contains_key(*id))
        .map(|id| (*id).clone())
        .collect();
    let mut removed: Vec<SessionId> = old_by_id
        .keys()
        .filter(|id| !new_by_id.contains_key(*id))
        .map(|id| (*id).clone())
        .collect();
    let mut modified: Vec<SessionId> = old_by_id
        .iter()
        .filter_map(|(id, old_session)| {
            new_by_id
                .get(*id)
                .filter(|new_session| *new_session != old_session)
                .map(|_| (*id).clone())
        })
        .collect();

    added.sort();
    removed.sort();
    modified.sort();

    LogicalDiff { added, removed, modified }
}

/// Physical diff (spec §4.6): keyed on the termination tuple.
pub fn physical_diff(old: &ResultDocument, new: &ResultDocument) -> PhysicalDiff {
    let old_by_tuple: HashMap<PhysicalTuple, &SessionId> =
        old.sessions.iter().map(|s| (PhysicalTuple::of(s), &s.id)).collect();
    let new_by_tuple: HashMap<PhysicalTuple, &SessionId> =
        new.sessions.iter().map(|s| (PhysicalTuple::of(s), &s.id)).collect();

    let mut added: Vec<PhysicalTuple> = new_by_tuple
        .keys()
        .filter(|t| !old_by_tuple.contains_key(*t))
        .cloned()
        .collect();
    let mut removed: Vec<PhysicalTuple> = old_by_tuple
        .keys()
        .filter(|t| !new_by_tuple.contains_key(*t))
        .cloned()
        .collect();
    let mut collisions: Vec<PhysicalCollision> = old_by_tuple
        .iter()
        .filter_map(|(tuple, old_id)| {
            new_by_tuple.get(tuple).filter(|new_id| *new_id != old_id).map(|new_id| PhysicalCollision {
                tuple: tuple.clone(),
                old_session_id: (*old_id).clone(),
                new_session_id: (*new_id).clone(),
            })
        })
        .collect();

    added.sort();
    removed.sort();
    collisions.sort_by(|a, b| a.tuple.cmp(&b.tuple));

    PhysicalDiff { added, removed, collisions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_result::allocate;
    use cabling_core::ids::DemandId;
    use cabling_core::model::{AllocationDirection, Demand, InputDocument, PeerSort, Project, Rack, Settings};

    fn rack(id: &str) -> Rack {
        Rack {
            id: RackId::new(id).unwrap(),
            display_name: id.to_string(),
            height_u: 42,
        }
    }

    fn demand(id: &str, src: &str, dst: &str, et: EndpointType, count: u32) -> Demand {
        Demand {
            id: DemandId::new(id).unwrap(),
            src: RackId::new(src).unwrap(),
            dst: RackId::new(dst).unwrap(),
            endpoint_type: et,
            count,
        }
    }

    fn doc(racks: Vec<Rack>, demands: Vec<Demand>, settings: Settings) -> InputDocument {
        InputDocument {
            version: "1".to_string(),
            project: Project {
                name: "p".to_string(),
                note: None,
            },
            racks,
            demands,
            settings,
        }
    }

    #[test]
    fn diff_of_a_result_with_itself_is_empty() {
        let d = doc(
            vec![rack("R01"), rack("R02")],
            vec![demand("D001", "R01", "R02", EndpointType::Mpo12, 4)],
            Settings::default(),
        );
        let r = allocate(&d);
        let logical = logical_diff(&r, &r);
        assert!(logical.added.is_empty());
        assert!(logical.removed.is_empty());
        assert!(logical.modified.is_empty());

        let physical = physical_diff(&r, &r);
        assert!(physical.added.is_empty());
        assert!(physical.removed.is_empty());
        assert!(physical.collisions.is_empty());
    }

    #[test]
    fn swapping_arguments_swaps_added_and_removed() {
        let base = doc(
            vec![rack("R01"), rack("R02")],
            vec![demand("D001", "R01", "R02", EndpointType::Mpo12, 4)],
            Settings::default(),
        );
        let grown = doc(
            vec![rack("R01"), rack("R02")],
            vec![demand("D001", "R01", "R02", EndpointType::Mpo12, 6)],
            Settings::default(),
        );
        let old = allocate(&base);
        let new = allocate(&grown);

        let forward = logical_diff(&old, &new);
        let backward = logical_diff(&new, &old);
        assert_eq!(forward.added, backward.removed);
        assert_eq!(forward.removed, backward.added);
    }

    #[test]
    fn scenario_s4_peer_sort_change_is_wholly_added_and_removed() {
        let mut natural = Settings::default();
        natural.ordering.peer_sort = PeerSort::NaturalTrailingDigits;
        let mut lexi = Settings::default();
        lexi.ordering.peer_sort = PeerSort::Lexicographic;

        let racks = vec![rack("R2"), rack("R10")];
        let demands = vec![demand("D001", "R2", "R10", EndpointType::Mpo12, 3)];

        let old = allocate(&doc(racks.clone(), demands.clone(), natural));
        let new = allocate(&doc(racks, demands, lexi));

        let logical = logical_diff(&old, &new);
        assert!(logical.modified.is_empty());
        assert_eq!(logical.added.len(), 3);
        assert_eq!(logical.removed.len(), 3);
    }

    #[test]
    fn scenario_s6_direction_flip_is_wholly_added_and_removed_in_physical_diff() {
        let d = doc(
            vec![rack("R01"), rack("R02")],
            vec![demand("D001", "R01", "R02", EndpointType::Mpo12, 4)],
            Settings::default(),
        );
        let top_down = allocate(&d);

        let mut bottom_settings = Settings::default();
        bottom_settings.panel.allocation_direction = AllocationDirection::BottomUp;
        let bottom_up = allocate(&doc(d.racks.clone(), d.demands.clone(), bottom_settings));

        let physical = physical_diff(&top_down, &bottom_up);
        assert!(physical.collisions.is_empty());
        assert_eq!(physical.added.len(), 4);
        assert_eq!(physical.removed.len(), 4);
    }
}
