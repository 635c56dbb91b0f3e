//! Deterministic pipeline identity.

use sha2::{Digest, Sha256};

use crate::stage::PipelineDescriptor;

/// Compute a deterministic digest of a pipeline descriptor.
///
/// Covers the prefix and the ordered stage names, NUL-separated so that
/// concatenation cannot alias. Reordering stages changes the digest;
/// re-running on an unchanged descriptor reproduces it exactly, which is
/// what the hosting system needs for incremental diffing.
pub fn pipeline_digest(descriptor: &PipelineDescriptor) -> String {
    let mut hasher = Sha256::new();
    hasher.update(descriptor.prefix.as_bytes());
    hasher.update(b"\0");
    for stage in &descriptor.stages {
        hasher.update(stage.stage_name.name.as_bytes());
        hasher.update(b"\0");
    }
    hex::encode(hasher.finalize())
}
