//! Canonical request fingerprints for coordinate sets.
//!
//! Two requests carrying the same `x`/`y` lists (same values, same
//! order) must map to the same job; anything else must not. The
//! fingerprint is a SHA-256 digest over a canonical byte encoding of
//! both lists, so it never depends on container iteration order or
//! float formatting.

use sha2::{Digest, Sha256};

/// Opaque dedup key for one input coordinate set.
///
/// Cheap to clone and hash; used as the `JobStore` map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Hex rendering, used only for logging.
    pub fn short(&self) -> String {
        self.0[..6].iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// Compute the fingerprint of an input coordinate set.
///
/// Pure and total: malformed input (mismatched lengths, NaN) is
/// rejected by the handlers before this is ever called. Each list is
/// encoded as its length (u64 LE) followed by every value's raw IEEE
/// bits (LE), x block before y block.
pub fn fingerprint(x: &[f64], y: &[f64]) -> Fingerprint {
    let mut hasher = Sha256::new();
    for list in [x, y] {
        hasher.update((list.len() as u64).to_le_bytes());
        for value in list {
            hasher.update(value.to_bits().to_le_bytes());
        }
    }
    Fingerprint(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_input_produces_identical_key() {
        let a = fingerprint(&[0.0, 1.0, 1.0], &[0.0, 0.0, 1.0]);
        let b = fingerprint(&[0.0, 1.0, 1.0], &[0.0, 0.0, 1.0]);
        assert_eq!(a, b);
    }

    #[test]
    fn value_difference_changes_key() {
        let a = fingerprint(&[0.0, 1.0], &[0.0, 0.0]);
        let b = fingerprint(&[0.0, 1.5], &[0.0, 0.0]);
        assert_ne!(a, b);
    }

    #[test]
    fn order_difference_changes_key() {
        let a = fingerprint(&[0.0, 1.0], &[2.0, 3.0]);
        let b = fingerprint(&[1.0, 0.0], &[3.0, 2.0]);
        assert_ne!(a, b);
    }

    #[test]
    fn list_boundary_is_unambiguous() {
        // Moving a value across the x/y boundary must change the key.
        let a = fingerprint(&[1.0, 2.0], &[3.0]);
        let b = fingerprint(&[1.0], &[2.0, 3.0]);
        assert_ne!(a, b);
    }

    #[test]
    fn short_is_twelve_hex_chars() {
        let key = fingerprint(&[0.0], &[0.0]);
        let short = key.short();
        assert_eq!(short.len(), 12);
        assert!(short.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
