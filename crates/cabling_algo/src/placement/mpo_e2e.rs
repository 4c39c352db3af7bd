//! MPO end-to-end placement engine (spec §4.4.1): `mpo_e2e` ← `mpo12` demands.
//!
//! Cable granularity: **one Cable per used port** (DESIGN.md open-question
//! resolution #1), confirmed against scenario S1/S3's literal cable counts.

use cabling_core::entities::ModuleKind;
use cabling_core::ids::RackId;
use cabling_core::model::EndpointType;

use crate::placement::{reserve_slot_with_panel, termination, CableNoId, ModuleNoId, PlacementOutput, SessionNoId};
use crate::slots::RackSlotAllocator;

/// Place `n` `mpo12` demands between `rack_a` and `rack_b` (already the
/// canonical-sorted pair). `src_is_a` is the orientation flag from the
/// demand normalizer: `true` means the original demand's `src` sorted
/// first.
pub fn place(
    rack_a: &RackId,
    allocator_a: &mut RackSlotAllocator,
    rack_b: &RackId,
    allocator_b: &mut RackSlotAllocator,
    n: u32,
    trunk_polarity: Option<&str>,
    pass_through_variant: Option<&str>,
    src_is_a: bool,
) -> PlacementOutput {
    let mut out = PlacementOutput::default();
    if n == 0 {
        return out;
    }

    let chunks = n.div_ceil(12);
    for k in 0..chunks {
        let used_ports = (n - k * 12).min(12);

        let coord_a = reserve_slot_with_panel(allocator_a, rack_a, &mut out);
        let coord_b = reserve_slot_with_panel(allocator_b, rack_b, &mut out);
        let (coord_a, coord_b) = match (coord_a, coord_b) {
            (Some(a), Some(b)) => (a, b),
            _ => continue,
        };

        out.modules.push(ModuleNoId {
            rack_id: rack_a.clone(),
            u: coord_a.u,
            slot: coord_a.slot,
            kind: ModuleKind::Mpo12PassThrough12Port,
            polarity_variant: pass_through_variant.map(str::to_string),
            dedicated: true,
        });
        out.modules.push(ModuleNoId {
            rack_id: rack_b.clone(),
            u: coord_b.u,
            slot: coord_b.slot,
            kind: ModuleKind::Mpo12PassThrough12Port,
            polarity_variant: pass_through_variant.map(str::to_string),
            dedicated: true,
        });

        for p in 1..=used_ports {
            let term_a = termination(rack_a, coord_a.u, coord_a.slot, p);
            let term_b = termination(rack_b, coord_b.u, coord_b.slot, p);

            let cable_index = out.cables.len();
            out.cables.push(CableNoId {
                media: EndpointType::Mpo12,
                polarity: trunk_polarity.map(str::to_string),
                chunk_index: k + 1,
                trunk_index: 0,
                endpoint_a: term_a.clone(),
                endpoint_b: term_b.clone(),
            });

            let (src, dst) = if src_is_a {
                (term_a, term_b)
            } else {
                (term_b, term_a)
            };
            out.sessions.push(SessionNoId {
                media: EndpointType::Mpo12,
                adapter_type: "MPO12",
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
