//! End-to-end coverage for the published scenarios (see `SPEC_FULL.md`
//! §8), driven through the same entry points an external caller uses:
//! `cabling_pipeline::run` (parse + validate + allocate from raw bytes)
//! and the diff engine. Per-module unit tests already cover the
//! allocator's internals in isolation; this suite only checks the
//! wiring between crates.

use cabling_core::ids::DemandId;
use cabling_core::model::{AllocationDirection, Demand, EndpointType, InputDocument, PeerSort, Project, Rack, Settings};
use cabling_pipeline::diff::{logical_diff, physical_diff};

fn rack(id: &str, height_u: u32) -> Rack {
    Rack {
        id: cabling_core::ids::RackId::new(id).unwrap(),
        display_name: id.to_string(),
        height_u,
    }
}

fn demand(id: &str, src: &str, dst: &str, et: EndpointType, count: u32) -> Demand {
    Demand {
        id: DemandId::new(id).unwrap(),
        src: cabling_core::ids::RackId::new(src).unwrap(),
        dst: cabling_core::ids::RackId::new(dst).unwrap(),
        endpoint_type: et,
        count,
    }
}

fn doc(racks: Vec<Rack>, demands: Vec<Demand>, settings: Settings) -> InputDocument {
    InputDocument {
        version: "1".to_string(),
        project: Project { name: "p".to_string(), note: None },
        racks,
        demands,
        settings,
    }
}

fn bytes_of(doc: &InputDocument) -> Vec<u8> {
    serde_json::to_vec(doc).expect("InputDocument always serializes")
}

#[test]
fn s1_two_racks_single_mpo_pair_via_run() {
    let d = doc(
        vec![rack("R01", 42), rack("R02", 42)],
        vec![demand("D001", "R01", "R02", EndpointType::Mpo12, 14)],
        Settings::default(),
    );
    let result = cabling_pipeline::run(&bytes_of(&d)).expect("well-formed input allocates");
    assert!(result.errors.is_empty());
    assert_eq!(result.metrics.panel_count, 2);
    assert_eq!(result.metrics.module_count, 4);
    assert_eq!(result.metrics.cable_count, 14);
    assert_eq!(result.metrics.session_count, 14);
}

#[test]
fn s2_two_racks_lc_mmf_breakout_via_run() {
    let d = doc(
        vec![rack("R01", 42), rack("R02", 42)],
        vec![demand("D001", "R01", "R02", EndpointType::MmfLcDuplex, 13)],
        Settings::default(),
    );
    let result = cabling_pipeline::run(&bytes_of(&d)).expect("well-formed input allocates");
    assert_eq!(result.metrics.module_count, 4);
    assert_eq!(result.metrics.cable_count, 4);
    assert_eq!(result.metrics.session_count, 13);
}

#[test]
fn s3_three_racks_mixed_media_matches_published_metrics() {
    let d = doc(
        vec![rack("R01", 42), rack("R02", 42), rack("R03", 42)],
        vec![
            demand("D001", "R01", "R02", EndpointType::MmfLcDuplex, 13),
            demand("D002", "R01", "R02", EndpointType::Mpo12, 14),
            demand("D003", "R01", "R03", EndpointType::UtpRj45, 8),
        ],
        Settings::default(),
    );
    let result = cabling_pipeline::run(&bytes_of(&d)).expect("well-formed input allocates");
    assert_eq!(result.metrics.rack_count, 3);
    assert_eq!(result.metrics.panel_count, 4);
    assert_eq!(result.metrics.module_count, 12);
    assert_eq!(result.metrics.cable_count, 26);
    assert_eq!(result.metrics.session_count, 35);
}

#[test]
fn s4_peer_sort_orthogonality_is_wholly_added_and_removed() {
    let racks = vec![rack("R2", 42), rack("R10", 42)];
    let demands = vec![demand("D001", "R2", "R10", EndpointType::Mpo12, 3)];

    let mut natural = Settings::default();
    natural.ordering.peer_sort = PeerSort::NaturalTrailingDigits;
    let mut lexi = Settings::default();
    lexi.ordering.peer_sort = PeerSort::Lexicographic;

    let under_natural = cabling_pipeline::run(&bytes_of(&doc(racks.clone(), demands.clone(), natural))).unwrap();
    let under_lexi = cabling_pipeline::run(&bytes_of(&doc(racks, demands, lexi))).unwrap();

    let diff = logical_diff(&under_natural, &under_lexi);
    assert!(diff.modified.is_empty());
    assert_eq!(diff.added.len(), 3);
    assert_eq!(diff.removed.len(), 3);
}

#[test]
fn s5_overflow_is_recorded_and_allocation_completes() {
    let mut settings = Settings::default();
    settings.panel.slots_per_u = 1;
    let d = doc(
        vec![rack("R01", 1), rack("R02", 42)],
        vec![demand("D001", "R01", "R02", EndpointType::Mpo12, 15)],
        settings,
    );
    let result = cabling_pipeline::run(&bytes_of(&d)).expect("overflow is non-fatal, allocation still completes");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind, "rack_overflow");
    assert!(result.metrics.session_count < 15);
}

#[test]
fn s6_direction_flip_reports_all_sessions_added_and_removed_physically() {
    let d = doc(
        vec![rack("R01", 42), rack("R02", 42)],
        vec![demand("D001", "R01", "R02", EndpointType::Mpo12, 4)],
        Settings::default(),
    );
    let top_down = cabling_pipeline::run(&bytes_of(&d)).unwrap();

    let mut bottom_settings = Settings::default();
    bottom_settings.panel.allocation_direction = AllocationDirection::BottomUp;
    let bottom_up =
        cabling_pipeline::run(&bytes_of(&doc(d.racks.clone(), d.demands.clone(), bottom_settings))).unwrap();

    assert_eq!(top_down.metrics, bottom_up.metrics);

    let diff = physical_diff(&top_down, &bottom_up);
    assert!(diff.collisions.is_empty());
    assert_eq!(diff.added.len(), 4);
    assert_eq!(diff.removed.len(), 4);
}

#[test]
fn malformed_input_is_rejected_before_allocation() {
    let bytes = br#"{"version":"1","project":{"name":"p"},"racks":[],"demands":[],"bogus":true}"#;
    let err = cabling_pipeline::run(bytes).unwrap_err();
    assert!(matches!(err, cabling_pipeline::PipelineError::Parse(_)));
}

#[test]
fn invalid_input_fails_validation_before_allocation() {
    let d = doc(
        vec![rack("R01", 42)],
        vec![demand("D001", "R01", "R01", EndpointType::Mpo12, 1)],
        Settings::default(),
    );
    let err = cabling_pipeline::run(&bytes_of(&d)).unwrap_err();
    assert!(matches!(err, cabling_pipeline::PipelineError::Validation(_)));
}
