//! Credential Hashing
//!
//! One-way digest of a plaintext secret. Digest equality is the sole
//! credential-verification mechanism; no salt, no KDF.

use sha2::{Digest, Sha256};

/// Compute the lowercase hex SHA-256 digest of a secret.
pub fn digest(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Compare a candidate secret against a stored digest without early exit.
pub fn verify(secret: &str, expected_digest: &str) -> bool {
    let candidate = digest(secret);
    if candidate.len() != expected_digest.len() {
        return false;
    }

    candidate
        .bytes()
        .zip(expected_digest.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
