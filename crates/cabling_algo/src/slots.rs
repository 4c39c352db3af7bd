//! Rack Slot Allocator (spec §4.3): a per-rack state machine that hands out
//! `(u, slot)` coordinates in the configured fill direction and records
//! overflow without aborting the allocation.

use std::collections::HashSet;

use cabling_core::ids::RackId;
use cabling_core::model::AllocationDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCoord {
    pub u: u32,
    pub slot: u32,
}

/// Non-fatal: the allocation at `failing_index` fell outside `1..=max_u`.
/// Recorded and the allocator keeps running so every overflow site in the
/// input is discovered in a single pass (spec §4.3, §7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackOverflow {
    pub rack_id: RackId,
    pub failing_index: u32,
}

/// One instance per rack (spec §4.3, §9: "a small, owned state object").
/// Shared across *all four* category placement engines for that rack — see
/// DESIGN.md for why a single monotonic index per rack, not per category,
/// is required to match the published scenario metrics.
pub struct RackSlotAllocator {
    rack_id: RackId,
    max_u: u32,
    slots_per_u: u32,
    direction: AllocationDirection,
    next_index: u32,
    seen_us: HashSet<u32>,
    pub overflows: Vec<RackOverflow>,
}

impl RackSlotAllocator {
    pub fn new(rack_id: RackId, max_u: u32, slots_per_u: u32, direction: AllocationDirection) -> Self {
        RackSlotAllocator {
            rack_id,
            max_u,
            slots_per_u: slots_per_u.max(1),
            direction,
            next_index: 0,
            seen_us: HashSet::new(),
            overflows: Vec::new(),
        }
    }

    fn coord_for_index(&self, index: u32) -> Option<SlotCoord> {
        let s = self.slots_per_u;
        let slot = (index % s) + 1;
        let q = index / s;
        let u = match self.direction {
            AllocationDirection::TopDown => q.checked_add(1)?,
            AllocationDirection::BottomUp => self.max_u.checked_sub(q)?,
        };
        if u < 1 || u > self.max_u {
            return None;
        }
        Some(SlotCoord { u, slot })
    }

    /// Advance the allocation index and return the next coordinate, or
    /// `None` if it overflows (the overflow is recorded in `self.overflows`).
    pub fn reserve_one(&mut self) -> Option<SlotCoord> {
        let index = self.next_index;
        self.next_index += 1;
        match self.coord_for_index(index) {
            Some(coord) => Some(coord),
            None => {
                self.overflows.push(RackOverflow {
                    rack_id: self.rack_id.clone(),
                    failing_index: index,
                });
                None
            }
        }
    }

    /// Reserve `n` slots in sequence. Each element is `None` where that
    /// particular reservation overflowed; the caller decides how to react.
    pub fn reserve_contiguous(&mut self, n: u32) -> Vec<Option<SlotCoord>> {
        (0..n).map(|_| self.reserve_one()).collect()
    }

    /// Record that `u` now hosts a module; returns `true` the first time a
    /// given `u` is seen so the caller knows whether to emit a new Panel.
    pub fn note_panel_u(&mut self, u: u32) -> bool {
        self.seen_us.insert(u)
    }
}
