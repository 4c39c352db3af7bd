//! LC MMF/SMF breakout placement engine (spec §4.4.2): `lc_mmf` ←
//! `mmf_lc_duplex`, `lc_smf` ← `smf_lc_duplex` demands. One engine,
//! parameterized by media, runs once per category entry present in
//! `slot_category_priority`.
//!
//! Cable granularity: **exactly two MPO trunk Cables per chunk**
//! (DESIGN.md open-question resolution #2). A breakout module's two rear
//! MPO jacks are modeled as `port = trunk_index` (1 or 2) on that module's
//! `(rack, u, slot)` coordinate — the module itself carries no separate
//! MPO-port field in the data model, so the trunk cable's own
//! `trunk_index` doubles as that coordinate's distinguishing port number.

use cabling_core::entities::ModuleKind;
use cabling_core::ids::RackId;
use cabling_core::model::EndpointType;

use crate::placement::{reserve_slot_with_panel, termination, CableNoId, ModuleNoId, PlacementOutput, SessionNoId};
use crate::slots::RackSlotAllocator;

fn adapter_type(_media: EndpointType) -> &'static str {
    "LC-Duplex"
}

/// Place `n` LC-duplex demands of `media` (`mmf_lc_duplex` or
/// `smf_lc_duplex`) between `rack_a` and `rack_b`.
pub fn place(
    rack_a: &RackId,
    allocator_a: &mut RackSlotAllocator,
    rack_b: &RackId,
    allocator_b: &mut RackSlotAllocator,
    media: EndpointType,
    n: u32,
    trunk_polarity: Option<&str>,
    breakout_module_variant: Option<&str>,
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
            kind: ModuleKind::LcBreakout2xMpo12To12xLcDuplex,
            polarity_variant: breakout_module_variant.map(str::to_string),
            dedicated: true,
        });
        out.modules.push(ModuleNoId {
            rack_id: rack_b.clone(),
            u: coord_b.u,
            slot: coord_b.slot,
            kind: ModuleKind::LcBreakout2xMpo12To12xLcDuplex,
            polarity_variant: breakout_module_variant.map(str::to_string),
            dedicated: true,
        });

        // Exactly two trunk cables per chunk, regardless of how many of the
        // chunk's LC ports actually end up riding MPO-2.
        let mpo1_index = out.cables.len();
        out.cables.push(CableNoId {
            media,
            polarity: trunk_polarity.map(str::to_string),
            chunk_index: k + 1,
            trunk_index: 1,
            endpoint_a: termination(rack_a, coord_a.u, coord_a.slot, 1),
            endpoint_b: termination(rack_b, coord_b.u, coord_b.slot, 1),
        });
        let mpo2_index = out.cables.len();
        out.cables.push(CableNoId {
            media,
            polarity: trunk_polarity.map(str::to_string),
            chunk_index: k + 1,
            trunk_index: 2,
            endpoint_a: termination(rack_a, coord_a.u, coord_a.slot, 2),
            endpoint_b: termination(rack_b, coord_b.u, coord_b.slot, 2),
        });

        for p in 1..=used_ports {
            let p_prime = ((p - 1) % 6) + 1;
            let fiber_a = 2 * p_prime - 1;
            let fiber_b = 2 * p_prime;
            let cable_index = if p <= 6 { mpo1_index } else { mpo2_index };

            let term_a = termination(rack_a, coord_a.u, coord_a.slot, p);
            let term_b = termination(rack_b, coord_b.u, coord_b.slot, p);
            let (src, dst) = if src_is_a {
                (term_a, term_b)
            } else {
                (term_b, term_a)
            };
            out.sessions.push(SessionNoId {
                media,
                adapter_type: adapter_type(media),
                cable_index,
                src,
                dst,
                fiber_a: Some(fiber_a),
                fiber_b: Some(fiber_b),
            });
        }
    }

    out
}
