//! UTP placement engine (spec §4.4.3): `utp` ← `utp_rj45` demands.
//!
//! Unlike the optical engines, UTP allocates **rack first, peer second**:
//! each rack fills its own `utp_6xrj45` modules sequentially across all of
//! its peers (in peer-sort order), reusing a partially-filled module for
//! the next peer rather than starting a fresh one. Sessions are only
//! formed afterward, by pairing each rack-pair's two independently built
//! port lists position-by-position.

use std::collections::HashMap;

use cabling_core::determinism::sort_by_peer;
use cabling_core::entities::{ModuleKind, Termination};
use cabling_core::ids::RackId;
use cabling_core::model::{EndpointType, PeerSort};

use crate::placement::{
    reserve_slot_with_panel, termination, CableNoId, ModuleNoId, PlacementOutput, PlacementWarning,
    PlacementWarningKind, SessionNoId,
};
use crate::slots::{RackSlotAllocator, SlotCoord};

/// One normalized UTP rack-pair bucket: `(first, second, count, src_is_first)`.
pub type UtpPair = (RackId, RackId, u32, bool);

pub fn place(
    pairs: &[UtpPair],
    allocators: &mut HashMap<RackId, RackSlotAllocator>,
    peer_sort: PeerSort,
) -> PlacementOutput {
    let mut out = PlacementOutput::default();
    if pairs.is_empty() {
        return out;
    }

    let mut per_rack_peers: HashMap<RackId, Vec<(RackId, u32)>> = HashMap::new();
    for (a, b, n, _) in pairs {
        per_rack_peers.entry(a.clone()).or_default().push((b.clone(), *n));
        per_rack_peers.entry(b.clone()).or_default().push((a.clone(), *n));
    }
    for peers in per_rack_peers.values_mut() {
        sort_by_peer(peers, peer_sort, |(peer, _)| peer.as_str());
    }

    let mut rack_ids: Vec<RackId> = per_rack_peers.keys().cloned().collect();
    rack_ids.sort();

    let mut port_lists: HashMap<(RackId, RackId), Vec<Termination>> = HashMap::new();

    for rack_id in rack_ids {
        let peers = per_rack_peers.remove(&rack_id).unwrap_or_default();
        let allocator = allocators
            .get_mut(&rack_id)
            .expect("an allocator must exist for every rack referenced by a UTP demand");

        let mut port_count: u32 = 0;
        let mut current_module: Option<SlotCoord> = None;

        for (peer, n) in peers {
            let mut list = Vec::with_capacity(n as usize);
            for _ in 0..n {
                if port_count % 6 == 0 {
                    current_module = reserve_slot_with_panel(allocator, &rack_id, &mut out);
                    if let Some(coord) = current_module {
                        out.modules.push(ModuleNoId {
                            rack_id: rack_id.clone(),
                            u: coord.u,
                            slot: coord.slot,
                            kind: ModuleKind::Utp6xRj45,
                            polarity_variant: None,
                            dedicated: false,
                        });
                    }
                }
                port_count += 1;
                if let Some(coord) = current_module {
                    let port_in_module = ((port_count - 1) % 6) + 1;
                    list.push(termination(&rack_id, coord.u, coord.slot, port_in_module));
                }
            }
            port_lists.insert((rack_id.clone(), peer), list);
        }
    }

    for (a, b, _n, src_is_a) in pairs {
        let list_a = port_lists.remove(&(a.clone(), b.clone())).unwrap_or_default();
        let list_b = port_lists.remove(&(b.clone(), a.clone())).unwrap_or_default();

        if list_a.len() != list_b.len() {
            out.warnings.push(PlacementWarning {
                kind: PlacementWarningKind::UtpSideCountMismatch,
                message: format!(
                    "UTP side count mismatch between {} and {}: {} vs {}",
                    a.as_str(),
                    b.as_str(),
                    list_a.len(),
                    list_b.len()
                ),
                entity_refs: vec![a.as_str().to_string(), b.as_str().to_string()],
            });
        }

        let paired = list_a.len().min(list_b.len());
        for i in 0..paired {
            let term_a = list_a[i].clone();
            let term_b = list_b[i].clone();

            let cable_index = out.cables.len();
            out.cables.push(CableNoId {
                media: EndpointType::UtpRj45,
                polarity: None,
                chunk_index: 0,
                trunk_index: 0,
                endpoint_a: term_a.clone(),
                endpoint_b: term_b.clone(),
            });

            let (src, dst) = if *src_is_a { (term_a, term_b) } else { (term_b, term_a) };
            out.sessions.push(SessionNoId {
                media: EndpointType::UtpRj45,
                adapter_type: "RJ45",
                cable_index,
                src,
                dst,
                fiber_a: None,
                fiber_b: None,
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabling_core::model::AllocationDirection;

    fn allocator_for(rack: &str) -> RackSlotAllocator {
        RackSlotAllocator::new(RackId::new(rack).unwrap(), 42, 4, AllocationDirection::TopDown)
    }

    #[test]
    fn single_pair_fills_two_modules_of_six() {
        let r01 = RackId::new("R01").unwrap();
        let r03 = RackId::new("R03").unwrap();
        let mut allocators = HashMap::new();
        allocators.insert(r01.clone(), allocator_for("R01"));
        allocators.insert(r03.clone(), allocator_for("R03"));

        let pairs = vec![(r01.clone(), r03.clone(), 8u32, true)];
        let out = place(&pairs, &mut allocators, PeerSort::NaturalTrailingDigits);

        // ceil(8/6) = 2 modules per side -> 4 modules total
        assert_eq!(out.modules.len(), 4);
        assert_eq!(out.cables.len(), 8, "one cable per session");
        assert_eq!(out.sessions.len(), 8);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn partially_filled_module_is_reused_across_peers() {
        let r01 = RackId::new("R01").unwrap();
        let r02 = RackId::new("R02").unwrap();
        let r03 = RackId::new("R03").unwrap();
        let mut allocators = HashMap::new();
        allocators.insert(r01.clone(), allocator_for("R01"));
        allocators.insert(r02.clone(), allocator_for("R02"));
        allocators.insert(r03.clone(), allocator_for("R03"));

        // R01 has 4 ports to R02 and 2 to R03: should fit in a single 6-port module.
        let pairs = vec![
            (r01.clone(), r02.clone(), 4u32, true),
            (r01.clone(), r03.clone(), 2u32, true),
        ];
        let out = place(&pairs, &mut allocators, PeerSort::NaturalTrailingDigits);

        let r01_modules = out.modules.iter().filter(|m| m.rack_id == r01).count();
        assert_eq!(r01_modules, 1, "4+2 ports should fit in one 6-port module");
    }

    #[test]
    fn side_count_mismatch_emits_warning_and_uses_shorter_side() {
        let r01 = RackId::new("R01").unwrap();
        let r02 = RackId::new("R02").unwrap();
        let mut allocators = HashMap::new();
        allocators.insert(r01.clone(), allocator_for("R01"));
        allocators.insert(r02.clone(), allocator_for("R02"));

        // R01 can only ever host one module (max_u=1, slots_per_u=1), so its
        // second 6-port module (needed for the 7th/8th port) overflows while
        // R02's side has unlimited room.
        allocators.insert(
            r01.clone(),
            RackSlotAllocator::new(r01.clone(), 1, 1, AllocationDirection::TopDown),
        );

        let pairs = vec![(r01.clone(), r02.clone(), 8u32, true)];
        let out = place(&pairs, &mut allocators, PeerSort::NaturalTrailingDigits);

        assert!(!out.warnings.is_empty());
        assert_eq!(out.sessions.len(), 6, "R01's first 6-port module succeeds; its second overflows");
    }
}
