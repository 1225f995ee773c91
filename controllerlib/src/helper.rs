use async_trait::async_trait;

use crate::errors::PatchError;

/// Options forwarded to a `PatchHelper` for a single patch call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchOptions {
    /// Set `status.observedGeneration` to the object's `metadata.generation`.
    pub include_status_observed_generation: bool,
}

impl PatchOptions {
    pub fn with_status_observed_generation(mut self) -> Self {
        self.include_status_observed_generation = true;
        self
    }
}

/// Computes and submits a patch for `object` against the API server.
#[async_trait]
pub trait PatchHelper<K>: Send + Sync {
    async fn patch(&self, object: &K, options: &PatchOptions) -> Result<(), PatchError>;
}
