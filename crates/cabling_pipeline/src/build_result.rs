//! `allocate()` orchestration entry point (spec §4.5, §6): wires the
//! Demand Normalizer, the per-rack Rack Slot Allocators, the four Category
//! Placement Engines, and the Canonical ID & Ordering assembly into one
//! pass over a validated [`InputDocument`].
//!
//! Follows the teacher's NoId → WithId builder pattern
//! (`vm_pipeline::build_artifacts`): placement engines emit provisional
//! entities with no identifier; this module computes every canonical
//! string and its content hash only once the entity's full content is
//! known, then imposes the fixed output sort orders of spec §4.5.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use cabling_algo::placement::{lc_breakout, mpo_e2e, utp, utp::UtpPair, PlacementOutput, PlacementWarningKind};
use cabling_algo::slots::RackSlotAllocator;
use cabling_core::determinism::peer_cmp;
use cabling_core::entities::{Cable, Module, Panel, Session};
use cabling_core::ids::{CableId, PanelId, RackId};
use cabling_core::model::{EndpointType, InputDocument, Project, SlotCategory};
use cabling_io::hasher;

use crate::normalize::normalize_demands;

/// A structured, non-fatal record (spec §7: "message, kind, and the
/// identifiers of the entities involved").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: String,
    pub message: String,
    pub entity_refs: Vec<String>,
}

/// A non-fatal error recorded into the result (spec §7): currently only
/// `RackOverflow`. Its presence means the allocation is incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocError {
    pub kind: String,
    pub message: String,
    pub entity_refs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub rack_count: u32,
    pub panel_count: u32,
    pub module_count: u32,
    pub cable_count: u32,
    pub session_count: u32,
}

/// Per rack-pair, per-category slot usage summary (spec §6 `pair_details`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairDetail {
    pub rack_a: RackId,
    pub rack_b: RackId,
    pub category: SlotCategory,
    pub demand_count: u32,
    pub session_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDocument {
    pub project: Project,
    pub input_hash: String,
    pub panels: Vec<Panel>,
    pub modules: Vec<Module>,
    pub cables: Vec<Cable>,
    pub sessions: Vec<Session>,
    pub warnings: Vec<Warning>,
    pub errors: Vec<AllocError>,
    pub metrics: Metrics,
    pub pair_details: Vec<PairDetail>,
}

fn category_for_endpoint(et: EndpointType) -> SlotCategory {
    match et {
        EndpointType::Mpo12 => SlotCategory::MpoE2e,
        EndpointType::MmfLcDuplex => SlotCategory::LcMmf,
        EndpointType::SmfLcDuplex => SlotCategory::LcSmf,
        EndpointType::UtpRj45 => SlotCategory::Utp,
    }
}

/// Unordered pairing key, independent of `peer_sort` — used only to tally
/// UTP session counts per rack pair, not to decide orientation.
fn unordered_key(a: &RackId, b: &RackId) -> (RackId, RackId) {
    if a.as_str() <= b.as_str() {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

/// Remove both racks' allocators from `map` so they can be borrowed
/// mutably at the same time by a two-sided placement call, without unsafe
/// code. The caller must put them back with [`return_pair`].
fn take_pair(
    map: &mut HashMap<RackId, RackSlotAllocator>,
    a: &RackId,
    b: &RackId,
) -> (RackSlotAllocator, RackSlotAllocator) {
    let alloc_a = map.remove(a).expect("an allocator exists for every rack in the input");
    let alloc_b = map.remove(b).expect("an allocator exists for every rack in the input");
    (alloc_a, alloc_b)
}

fn return_pair(
    map: &mut HashMap<RackId, RackSlotAllocator>,
    a: RackId,
    alloc_a: RackSlotAllocator,
    b: RackId,
    alloc_b: RackSlotAllocator,
) {
    map.insert(a, alloc_a);
    map.insert(b, alloc_b);
}

/// Run the full allocator over an already-validated document (spec §6:
/// `allocate(project) → result`). Callers that have not yet validated
/// their input should go through [`crate::run`] instead.
pub fn allocate(doc: &InputDocument) -> ResultDocument {
    let input_hash = hasher::input_hash(
        &cabling_io::canonical_json::to_canonical_bytes(doc).expect("InputDocument always serializes"),
    );

    let peer_sort = doc.settings.ordering.peer_sort;
    let mut allocators: HashMap<RackId, RackSlotAllocator> = doc
        .racks
        .iter()
        .map(|r| {
            (
                r.id.clone(),
                RackSlotAllocator::new(
                    r.id.clone(),
                    r.height_u,
                    doc.settings.panel.slots_per_u,
                    doc.settings.panel.allocation_direction,
                ),
            )
        })
        .collect();

    let buckets = normalize_demands(doc);
    let priority = &doc.settings.ordering.slot_category_priority;

    let mut accum = PlacementOutput::default();
    let mut pair_details: Vec<PairDetail> = Vec::new();

    for category in priority {
        let et = category.endpoint_type();
        match category {
            SlotCategory::MpoE2e | SlotCategory::LcMmf | SlotCategory::LcSmf => {
                for bucket in buckets.iter().filter(|b| b.endpoint_type == et) {
                    let (mut alloc_a, mut alloc_b) =
                        take_pair(&mut allocators, &bucket.pair.first, &bucket.pair.second);

                    let out = match category {
                        SlotCategory::MpoE2e => mpo_e2e::place(
                            &bucket.pair.first,
                            &mut alloc_a,
                            &bucket.pair.second,
                            &mut alloc_b,
                            bucket.count,
                            doc.settings.fixed_profiles.mpo_e2e.trunk_polarity.as_deref(),
                            doc.settings.fixed_profiles.mpo_e2e.pass_through_variant.as_deref(),
                            bucket.src_is_first,
                        ),
                        SlotCategory::LcMmf | SlotCategory::LcSmf => lc_breakout::place(
                            &bucket.pair.first,
                            &mut alloc_a,
                            &bucket.pair.second,
                            &mut alloc_b,
                            et,
                            bucket.count,
                            doc.settings.fixed_profiles.lc_demands.trunk_polarity.as_deref(),
                            doc.settings.fixed_profiles.lc_demands.breakout_module_variant.as_deref(),
                            bucket.src_is_first,
                        ),
                        SlotCategory::Utp => unreachable!("filtered to non-UTP categories above"),
                    };

                    return_pair(&mut allocators, bucket.pair.first.clone(), alloc_a, bucket.pair.second.clone(), alloc_b);

                    pair_details.push(PairDetail {
                        rack_a: bucket.pair.first.clone(),
                        rack_b: bucket.pair.second.clone(),
                        category: *category,
                        demand_count: bucket.count,
                        session_count: out.sessions.len() as u32,
                    });
                    accum.merge(out);
                }
            }
            SlotCategory::Utp => {
                let utp_pairs: Vec<UtpPair> = buckets
                    .iter()
                    .filter(|b| b.endpoint_type == et)
                    .map(|b| (b.pair.first.clone(), b.pair.second.clone(), b.count, b.src_is_first))
                    .collect();
                if utp_pairs.is_empty() {
                    continue;
                }

                let out = utp::place(&utp_pairs, &mut allocators, peer_sort);

                let mut session_counts: HashMap<(RackId, RackId), u32> = HashMap::new();
                for s in &out.sessions {
                    *session_counts.entry(unordered_key(&s.src.rack_id, &s.dst.rack_id)).or_insert(0) += 1;
                }
                for bucket in buckets.iter().filter(|b| b.endpoint_type == et) {
                    let key = unordered_key(&bucket.pair.first, &bucket.pair.second);
                    pair_details.push(PairDetail {
                        rack_a: bucket.pair.first.clone(),
                        rack_b: bucket.pair.second.clone(),
                        category: *category,
                        demand_count: bucket.count,
                        session_count: session_counts.get(&key).copied().unwrap_or(0),
                    });
                }
                accum.merge(out);
            }
        }
    }

    let mut warnings: Vec<Warning> = Vec::new();

    let priority_set: std::collections::HashSet<SlotCategory> = priority.iter().copied().collect();
    for cat in SlotCategory::ALL {
        if priority_set.contains(&cat) {
            continue;
        }
        let demand_count: u32 = buckets
            .iter()
            .filter(|b| category_for_endpoint(b.endpoint_type) == cat)
            .map(|b| b.count)
            .sum();
        if demand_count > 0 {
            let message = format!(
                "category {:?} has {} demand(s) but is absent from slot_category_priority; producing no output",
                cat.as_str(),
                demand_count
            );
            tracing::warn!(category = cat.as_str(), demand_count, "{}", message);
            warnings.push(Warning {
                kind: "skipped_category_with_demand".to_string(),
                message,
                entity_refs: vec![cat.as_str().to_string()],
            });
        }
    }

    for w in &accum.warnings {
        tracing::warn!("{}", w.message);
        let kind = match w.kind {
            PlacementWarningKind::UtpSideCountMismatch => "utp_side_count_mismatch",
        };
        warnings.push(Warning {
            kind: kind.to_string(),
            message: w.message.clone(),
            entity_refs: w.entity_refs.clone(),
        });
    }

    // Canonical ID assembly (spec §4.5): hash each entity's canonical
    // string, then impose the fixed sort orders.
    let mut panels: Vec<Panel> = accum
        .panels
        .iter()
        .map(|p| Panel {
            id: hasher::panel_id(p.rack_id.as_str(), p.u),
            rack_id: p.rack_id.clone(),
            u: p.u,
        })
        .collect();
    panels.sort_by(|a, b| peer_cmp(peer_sort, a.rack_id.as_str(), b.rack_id.as_str()).then_with(|| a.u.cmp(&b.u)));

    let panel_id_by_rack_u: HashMap<(RackId, u32), PanelId> =
        panels.iter().map(|p| ((p.rack_id.clone(), p.u), p.id.clone())).collect();

    let mut modules: Vec<Module> = accum
        .modules
        .iter()
        .map(|m| Module {
            id: hasher::module_id(m.rack_id.as_str(), m.u, m.slot, m.kind.as_str()),
            panel_id: panel_id_by_rack_u
                .get(&(m.rack_id.clone(), m.u))
                .expect("every module's (rack, u) has a panel")
                .clone(),
            rack_id: m.rack_id.clone(),
            u: m.u,
            slot: m.slot,
            kind: m.kind,
            polarity_variant: m.polarity_variant.clone(),
            dedicated: m.dedicated,
        })
        .collect();
    modules.sort_by(|a, b| {
        peer_cmp(peer_sort, a.rack_id.as_str(), b.rack_id.as_str())
            .then_with(|| a.u.cmp(&b.u))
            .then_with(|| a.slot.cmp(&b.slot))
    });

    // Cable ids are computed in the accumulator's original order so that
    // sessions (which reference cables by index into that same order) can
    // resolve their `cable_id` before cables are re-sorted by id.
    let cable_ids: Vec<CableId> = accum
        .cables
        .iter()
        .map(|c| {
            hasher::cable_id(
                &c.endpoint_a,
                &c.endpoint_b,
                c.media.as_str(),
                c.polarity.as_deref(),
                c.chunk_index,
                c.trunk_index,
            )
        })
        .collect();

    let mut cables: Vec<Cable> = accum
        .cables
        .iter()
        .zip(cable_ids.iter())
        .map(|(c, id)| Cable {
            id: id.clone(),
            media: c.media,
            polarity: c.polarity.clone(),
            chunk_index: c.chunk_index,
            trunk_index: c.trunk_index,
            endpoint_a: c.endpoint_a.clone(),
            endpoint_b: c.endpoint_b.clone(),
            cable_seq: 0,
        })
        .collect();
    cables.sort_by(|a, b| a.id.cmp(&b.id));
    for (i, c) in cables.iter_mut().enumerate() {
        c.cable_seq = (i + 1) as u32;
    }

    let mut sessions: Vec<Session> = accum
        .sessions
        .iter()
        .map(|s| Session {
            id: hasher::session_id(s.media.as_str(), &s.src, &s.dst),
            media: s.media,
            cable_id: cable_ids[s.cable_index].clone(),
            adapter_type: s.adapter_type.to_string(),
            label_a: s.src.label(),
            label_b: s.dst.label(),
            src: s.src.clone(),
            dst: s.dst.clone(),
            fiber_a: s.fiber_a,
            fiber_b: s.fiber_b,
        })
        .collect();
    sessions.sort_by(|a, b| a.id.cmp(&b.id));

    let mut rack_ids_sorted: Vec<RackId> = doc.racks.iter().map(|r| r.id.clone()).collect();
    rack_ids_sorted.sort_by(|a, b| peer_cmp(peer_sort, a.as_str(), b.as_str()));

    let mut errors: Vec<AllocError> = Vec::new();
    for rack_id in &rack_ids_sorted {
        if let Some(alloc) = allocators.get(rack_id) {
            for overflow in &alloc.overflows {
                let message = format!(
                    "rack {:?} overflowed at allocation index {}",
                    rack_id.as_str(),
                    overflow.failing_index
                );
                tracing::warn!(rack = rack_id.as_str(), index = overflow.failing_index, "{}", message);
                errors.push(AllocError {
                    kind: "rack_overflow".to_string(),
                    message,
                    entity_refs: vec![rack_id.as_str().to_string(), overflow.failing_index.to_string()],
                });
            }
        }
    }

    pair_details.sort_by(|a, b| {
        peer_cmp(peer_sort, a.rack_a.as_str(), b.rack_a.as_str())
            .then_with(|| peer_cmp(peer_sort, a.rack_b.as_str(), b.rack_b.as_str()))
            .then_with(|| a.category.cmp(&b.category))
    });

    let metrics = Metrics {
        rack_count: doc.racks.len() as u32,
        panel_count: panels.len() as u32,
        module_count: modules.len() as u32,
        cable_count: cables.len() as u32,
        session_count: sessions.len() as u32,
    };

    ResultDocument {
        project: doc.project.clone(),
        input_hash,
        panels,
        modules,
        cables,
        sessions,
        warnings,
        errors,
        metrics,
        pair_details,
    }
}
