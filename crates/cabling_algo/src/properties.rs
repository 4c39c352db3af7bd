//! Property tests for the universal invariants of spec §8 that are
//! observable at the placement-engine layer (before ids are assigned):
//! conservation, slot disjointness, MPO straight, LC fiber law.

use std::collections::HashSet;

use cabling_core::ids::RackId;
use cabling_core::model::{AllocationDirection, EndpointType};
use proptest::prelude::*;

use crate::placement::{lc_breakout, mpo_e2e};
use crate::slots::RackSlotAllocator;

fn racks() -> (RackId, RackId) {
    (RackId::new("R01").unwrap(), RackId::new("R02").unwrap())
}

proptest! {
    #[test]
    fn mpo_conservation_and_straight(n in 1u32..200, slots_per_u in 1u32..8) {
        let (rack_a, rack_b) = racks();
        let mut a = RackSlotAllocator::new(rack_a.clone(), 1000, slots_per_u, AllocationDirection::TopDown);
        let mut b = RackSlotAllocator::new(rack_b.clone(), 1000, slots_per_u, AllocationDirection::TopDown);

        let out = mpo_e2e::place(&rack_a, &mut a, &rack_b, &mut b, n, None, None, true);

        // Conservation: session_count == demand count (no overflow on a 1000U rack).
        prop_assert_eq!(out.sessions.len() as u32, n);

        // MPO straight.
        for s in &out.sessions {
            prop_assert_eq!(s.src.port, s.dst.port);
        }

        // Slot disjointness within each rack.
        let mut seen_a: HashSet<(u32, u32)> = HashSet::new();
        for m in out.modules.iter().filter(|m| m.rack_id == rack_a) {
            prop_assert!(seen_a.insert((m.u, m.slot)), "duplicate (u, slot) on rack_a");
        }
        let mut seen_b: HashSet<(u32, u32)> = HashSet::new();
        for m in out.modules.iter().filter(|m| m.rack_id == rack_b) {
            prop_assert!(seen_b.insert((m.u, m.slot)), "duplicate (u, slot) on rack_b");
        }
    }

    #[test]
    fn lc_fiber_law_holds_for_every_session(n in 1u32..200) {
        let (rack_a, rack_b) = racks();
        let mut a = RackSlotAllocator::new(rack_a.clone(), 1000, 4, AllocationDirection::TopDown);
        let mut b = RackSlotAllocator::new(rack_b.clone(), 1000, 4, AllocationDirection::TopDown);

        let out = lc_breakout::place(
            &rack_a, &mut a, &rack_b, &mut b, EndpointType::MmfLcDuplex, n, None, None, true,
        );

        prop_assert_eq!(out.sessions.len() as u32, n);

        for s in &out.sessions {
            let p = s.src.port; // LC port 1..=12
            let p_prime = ((p - 1) % 6) + 1;
            let expect_fiber_a = 2 * p_prime - 1;
            let expect_fiber_b = 2 * p_prime;
            prop_assert_eq!(s.fiber_a, Some(expect_fiber_a));
            prop_assert_eq!(s.fiber_b, Some(expect_fiber_b));

            let expect_trunk = if p <= 6 { 1 } else { 2 };
            prop_assert_eq!(out.cables[s.cable_index].trunk_index, expect_trunk);
        }
    }

    #[test]
    fn determinism_same_input_same_output(n in 1u32..100) {
        let (rack_a, rack_b) = racks();

        let run = |n: u32| {
            let mut a = RackSlotAllocator::new(rack_a.clone(), 1000, 4, AllocationDirection::TopDown);
            let mut b = RackSlotAllocator::new(rack_b.clone(), 1000, 4, AllocationDirection::TopDown);
            mpo_e2e::place(&rack_a, &mut a, &rack_b, &mut b, n, Some("A"), Some("std"), true)
        };

        let first = run(n);
        let second = run(n);
        prop_assert_eq!(first, second);
    }
}
