//! Deterministic ordering primitives: natural sort and the peer-sort
//! dispatch used throughout the pipeline (spec §4.2, §9).
//!
//! "Determinism requires that every iteration over unordered containers be
//! sorted with the established comparators before use" (spec §5) — every
//! comparator a caller needs lives here so nothing upstream invents its own.

use std::cmp::Ordering;

use crate::model::PeerSort;

/// Key for natural-order comparison by trailing decimal run: scan from the
/// tail, accumulate digits, compare numeric value first, then the full
/// string as a tie-break (spec §9). Strings with no trailing digit run sort
/// after every string that has one — `R2` precedes `Rack`.
fn natural_trailing_key(s: &str) -> (u8, u64, &str) {
    let bytes = s.as_bytes();
    let mut i = bytes.len();
    while i > 0 && bytes[i - 1].is_ascii_digit() {
        i -= 1;
    }
    if i == bytes.len() {
        (1, 0, s)
    } else {
        let digits = &s[i..];
        let val = digits.parse::<u64>().unwrap_or(u64::MAX);
        (0, val, s)
    }
}

fn natural_trailing_cmp(a: &str, b: &str) -> Ordering {
    natural_trailing_key(a).cmp(&natural_trailing_key(b))
}

/// Compare two rack-id-shaped strings under the given peer-sort strategy.
pub fn peer_cmp(peer_sort: PeerSort, a: &str, b: &str) -> Ordering {
    match peer_sort {
        PeerSort::NaturalTrailingDigits => natural_trailing_cmp(a, b),
        PeerSort::Lexicographic => a.cmp(b),
    }
}

/// Order a rack-id pair per §4.2: the canonical pair key is the two ids
/// sorted by `peer_sort`, plus an orientation flag recording whether `a`
/// (the demand's original `src`) ended up first.
///
/// Returns `(first, second, src_was_first)`.
pub fn canonical_pair<'a>(peer_sort: PeerSort, a: &'a str, b: &'a str) -> (&'a str, &'a str, bool) {
    match peer_cmp(peer_sort, a, b) {
        Ordering::Greater => (b, a, false),
        _ => (a, b, true),
    }
}

/// Sort a slice of `&str`-like keys by the active peer-sort strategy,
/// extracting the comparison key with `key_fn`.
pub fn sort_by_peer<T>(items: &mut [T], peer_sort: PeerSort, key_fn: impl Fn(&T) -> &str) {
    items.sort_by(|x, y| peer_cmp(peer_sort, key_fn(x), key_fn(y)));
}
