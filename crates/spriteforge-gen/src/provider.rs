//! Generation provider trait and shared types

use spriteforge_core::Result;
use std::fmt;

/// Remote-storage handle for an uploaded source image.
///
/// Obtained from [`GenerationProvider::upload_image`] and only valid for the
/// inference calls that follow it. Never reused across two source images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub url: String,
}

impl fmt::Display for UploadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Status returned by a provider health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Available,
    Unavailable(String),
    NoApiKey,
}

/// Trait implemented by each generation provider (Flux Kontext, Mock)
pub trait GenerationProvider: Send {
    /// Provider name (e.g. "flux-kontext", "mock")
    fn name(&self) -> &str;

    /// Check if the provider is usable (API key set, service reachable)
    fn health_check(&self) -> Result<ProviderStatus>;

    /// Upload encoded PNG bytes to remote storage and return a handle
    /// that inference calls can reference.
    fn upload_image(&self, png_bytes: &[u8]) -> Result<UploadedImage>;

    /// Run one inference with the given prompt against an uploaded image
    /// and return the raw bytes of the resulting image. Blocks until the
    /// remote job completes or fails.
    fn transform(&self, prompt: &str, image: &UploadedImage) -> Result<Vec<u8>>;
}
