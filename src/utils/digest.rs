// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of `bytes`.
///
/// Used to derive on-disk names from logical keys (cache entries, triple
/// subjects, schema names) and to fingerprint schema content.
///
/// ```rust
/// use the_loom::utils::sha256_hex;
///
/// assert_eq!(sha256_hex(b"").len(), 64);
/// assert_eq!(sha256_hex(b"abc"), sha256_hex(b"abc"));
/// ```
pub fn sha256_hex(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(bytes.as_ref()))
}
