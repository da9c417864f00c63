use sha2::{Digest, Sha256};

/// Hashes a plaintext password together with the application pepper.
///
/// The result is always 64 uppercase hex characters. Login compares digests,
/// so the same `(plain, pepper)` pair must keep producing the same output.
pub fn hash_password(plain: &str, pepper: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plain.as_bytes());
    hasher.update(pepper.as_bytes());
    hex::encode_upper(hasher.finalize())
}
