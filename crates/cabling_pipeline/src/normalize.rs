//! Demand Normalizer (spec §4.2): fold demands into unordered rack-pair
//! buckets keyed by endpoint type, with an orientation flag that lets the
//! placement engines assign a session's "src side" consistently with the
//! original demand direction.
//!
//! Per-rack peer lists (also called for by spec §4.2, "needed by the UTP
//! engine") are not materialized as a separate structure here: the UTP
//! engine builds them itself from the bucket list it is handed (see
//! `cabling_algo::placement::utp::place`), which already groups by rack and
//! sorts peers under the same `peer_sort` comparator. Producing the same
//! list twice would only invite the two copies to drift.

use std::cmp::Ordering;
use std::collections::HashMap;

use cabling_core::determinism::peer_cmp;
use cabling_core::ids::RackId;
use cabling_core::model::{EndpointType, InputDocument, PeerSort};

/// The two racks of a demand, ordered by `peer_sort`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey {
    pub first: RackId,
    pub second: RackId,
}

/// One rack-pair/endpoint-type bucket: the sum of every demand that folds
/// into it, plus the orientation of the first demand encountered (in input
/// document order) — see module docs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBucket {
    pub pair: PairKey,
    pub endpoint_type: EndpointType,
    pub count: u32,
    pub src_is_first: bool,
}

/// Bucket every demand in `doc` by `(sorted rack pair, endpoint_type)`,
/// summing counts, then order the buckets by `peer_sort` on the pair and by
/// `endpoint_type` as a tie-break. Processing order downstream follows this
/// list (spec §4.2: "pairs are processed in the order emitted by §4.2").
pub fn normalize_demands(doc: &InputDocument) -> Vec<CategoryBucket> {
    let peer_sort = doc.settings.ordering.peer_sort;
    let mut buckets: HashMap<(RackId, RackId, EndpointType), CategoryBucket> = HashMap::new();

    for demand in &doc.demands {
        let swap = peer_cmp(peer_sort, demand.src.as_str(), demand.dst.as_str()) == Ordering::Greater;
        let (first, second, src_is_first) = if swap {
            (demand.dst.clone(), demand.src.clone(), false)
        } else {
            (demand.src.clone(), demand.dst.clone(), true)
        };

        let key = (first.clone(), second.clone(), demand.endpoint_type);
        buckets
            .entry(key)
            .and_modify(|b| b.count += demand.count)
            .or_insert(CategoryBucket {
                pair: PairKey { first, second },
                endpoint_type: demand.endpoint_type,
                count: demand.count,
                src_is_first,
            });
    }

    let mut list: Vec<CategoryBucket> = buckets.into_values().collect();
    list.sort_by(|a, b| {
        peer_cmp(peer_sort, a.pair.first.as_str(), b.pair.first.as_str())
            .then_with(|| peer_cmp(peer_sort, a.pair.second.as_str(), b.pair.second.as_str()))
            .then_with(|| a.endpoint_type.cmp(&b.endpoint_type))
    });
    list
}
