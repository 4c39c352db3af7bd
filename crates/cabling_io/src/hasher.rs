//! SHA-256 hashing of canonical strings and the entity-id builders that
//! consume them (spec §4.5). Same canonical bytes in ⇒ same lowercase hex
//! digest out, on every OS/arch.

use digest::Digest;
use sha2::Sha256;

use cabling_core::entities::Termination;
use cabling_core::ids::{CableId, ModuleId, PanelId, SessionId};

/// Full lowercase hex SHA-256 digest of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// First 16 hex characters of the digest — the shape every entity id uses.
fn short_digest(canonical: &str) -> String {
    let full = sha256_hex(canonical.as_bytes());
    full[..16].to_string()
}

fn termination_key(t: &Termination) -> String {
    format!("{}|U{}|S{}|P{}", t.rack_id.as_str(), t.u, t.slot, t.port)
}

/// `"panel|{rack}|U{u}"`
pub fn panel_id(rack: &str, u: u32) -> PanelId {
    let canon = format!("panel|{}|U{}", rack, u);
    PanelId::from_digest(&short_digest(&canon)).expect("digest is always well-shaped hex")
}

/// `"module|{rack}|U{u}|S{slot}|{kind}"`
pub fn module_id(rack: &str, u: u32, slot: u32, kind: &str) -> ModuleId {
    let canon = format!("module|{}|U{}|S{}|{}", rack, u, slot, kind);
    ModuleId::from_digest(&short_digest(&canon)).expect("digest is always well-shaped hex")
}

/// `"cable|{sorted_endpoint_a}|{sorted_endpoint_b}|{media}|{polarity}|{chunk_index}|{trunk_index}"`,
/// with endpoints lexically sorted so orientation never affects the id.
pub fn cable_id(
    endpoint_a: &Termination,
    endpoint_b: &Termination,
    media: &str,
    polarity: Option<&str>,
    chunk_index: u32,
    trunk_index: u32,
) -> CableId {
    let (lo, hi) = {
        let ka = termination_key(endpoint_a);
        let kb = termination_key(endpoint_b);
        if ka <= kb {
            (ka, kb)
        } else {
            (kb, ka)
        }
    };
    let canon = format!(
        "cable|{}|{}|{}|{}|{}|{}",
        lo,
        hi,
        media,
        polarity.unwrap_or(""),
        chunk_index,
        trunk_index
    );
    CableId::from_digest(&short_digest(&canon)).expect("digest is always well-shaped hex")
}

/// `"session|{media}|{src_rack}|{src_u}|{src_slot}|{src_port}|{dst_rack}|{dst_u}|{dst_slot}|{dst_port}"`
pub fn session_id(media: &str, src: &Termination, dst: &Termination) -> SessionId {
    let canon = format!(
        "session|{}|{}|{}|{}|{}|{}|{}|{}|{}",
        media,
        src.rack_id.as_str(),
        src.u,
        src.slot,
        src.port,
        dst.rack_id.as_str(),
        dst.u,
        dst.slot,
        dst.port
    );
    SessionId::from_digest(&short_digest(&canon)).expect("digest is always well-shaped hex")
}

/// SHA-256 of the canonical serialization of the validated input (spec §4.5).
pub fn input_hash(canonical_input_bytes: &[u8]) -> String {
    sha256_hex(canonical_input_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabling_core::entities::Face;
    use cabling_core::ids::RackId;

    fn t(rack: &str, u: u32, slot: u32, port: u32) -> Termination {
        Termination {
            rack_id: RackId::new(rack).unwrap(),
            face: Face::Front,
            u,
            slot,
            port,
        }
    }

    #[test]
    fn sha256_hex_is_deterministic_and_64_chars() {
        let a = sha256_hex(b"hello");
        let b = sha256_hex(b"hello");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.bytes().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn panel_id_is_stable_across_calls() {
        assert_eq!(panel_id("R01", 1), panel_id("R01", 1));
        assert_ne!(panel_id("R01", 1), panel_id("R01", 2));
    }

    #[test]
    fn cable_id_is_orientation_independent() {
        let a = t("R01", 1, 1, 1);
        let b = t("R02", 1, 1, 1);
        let id1 = cable_id(&a, &b, "mpo12", Some("A"), 1, 0);
        let id2 = cable_id(&b, &a, "mpo12", Some("A"), 1, 0);
        assert_eq!(id1, id2);
    }

    #[test]
    fn session_id_is_orientation_dependent() {
        let a = t("R01", 1, 1, 1);
        let b = t("R02", 1, 1, 1);
        let id1 = session_id("mpo12", &a, &b);
        let id2 = session_id("mpo12", &b, &a);
        assert_ne!(id1, id2, "swapping src/dst must change the session id");
    }
}
