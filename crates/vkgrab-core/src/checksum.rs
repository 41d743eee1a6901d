//! Short SHA-256 digests used to name downloaded files.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
pub const SHORT_DIGEST_LEN: usize = 8;

/// SHA-256 of `data` as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// First [`SHORT_DIGEST_LEN`] hex characters of the SHA-256 of `data`.
pub fn short_digest(data: &[u8]) -> String {
    let mut digest = sha256_hex(data);
    digest.truncate(SHORT_DIGEST_LEN);
    digest
}
