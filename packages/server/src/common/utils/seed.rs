use sha2::{Digest, Sha256};

/// Derive a content seed from a stable key (usually the job id).
///
/// Re-running the pipeline for the same job picks the same title template and
/// caption variants, so repeated publishes replace content with identical text.
pub fn derive_seed(key: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(key.trim().as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
