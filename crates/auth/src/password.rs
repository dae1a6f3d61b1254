//! Password digests.
//!
//! Stored format: `<salt hex>$<sha256(salt || password) hex>`. Verification
//! recomputes the digest and compares without early exit.

use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

/// Digest `password` under a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let salt: [u8; SALT_LEN] = rand::random();
    format!("{}${}", to_hex(&salt), to_hex(&digest(&salt, password)))
}

/// Check `candidate` against a stored digest.
///
/// Any malformed stored value verifies as false; this function never errors.
pub fn verify_password(stored: &str, candidate: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let (Some(salt), Some(expected)) = (from_hex(salt_hex), from_hex(digest_hex)) else {
        return false;
    };
    if salt.len() != SALT_LEN {
        return false;
    }
    constant_time_eq(&digest(&salt, candidate), &expected)
}

fn digest(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

/// Constant-time comparison for verification (no early exit on content).
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

fn to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        s.push_str(&format!("{byte:02x}"));
    }
    s
}

fn from_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let stored = hash_password("123456");
        assert!(verify_password(&stored, "123456"));
    }

    #[test]
    fn rejects_wrong_password() {
        let stored = hash_password("123456");
        assert!(!verify_password(&stored, "1234567"));
        assert!(!verify_password(&stored, ""));
    }

    #[test]
    fn salts_differ_between_hashes() {
        assert_ne!(hash_password("123456"), hash_password("123456"));
    }

    #[test]
    fn malformed_stored_values_never_verify() {
        assert!(!verify_password("", "123456"));
        assert!(!verify_password("nodollar", "123456"));
        assert!(!verify_password("zz$zz", "123456"));
        assert!(!verify_password("abc$", "123456"));
    }
}
