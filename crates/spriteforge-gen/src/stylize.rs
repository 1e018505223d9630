//! Single-image stylization
//!
//! Drives one upload-then-infer-then-fetch pass through a provider:
//! encode the source sprite to PNG, upload it, run inference with the
//! prompt, and decode the result. Either a fully decoded image comes
//! back or the call fails; no partial output is ever returned.

use crate::provider::{GenerationProvider, UploadedImage};
use image::DynamicImage;
use spriteforge_core::{ContentHash, ForgeError, Result};
use std::time::Instant;

/// A decoded generation result with its metadata
#[derive(Debug)]
pub struct StylizedImage {
    /// The decoded result image
    pub image: DynamicImage,
    /// The exact prompt sent to the provider
    pub prompt_used: String,
    /// Provider name
    pub provider: String,
    /// Generation time in seconds
    pub duration_secs: f64,
    /// Content hash of the raw result bytes (sha256:...)
    pub content_hash: String,
}

/// Orchestrates generation against a single provider
pub struct Stylizer {
    provider: Box<dyn GenerationProvider>,
}

impl Stylizer {
    pub fn new(provider: Box<dyn GenerationProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Generate one stylized image from a source sprite and a prompt.
    ///
    /// Fails with `InvalidInput` before any provider call when the source
    /// image is empty or the prompt is blank. Every upload, inference or
    /// fetch failure is surfaced to the caller.
    pub fn generate(&self, source: &DynamicImage, prompt: &str) -> Result<StylizedImage> {
        validate_inputs(source, prompt)?;

        let png_bytes = encode_png(source)?;
        let uploaded = self.provider.upload_image(&png_bytes)?;

        self.transform_uploaded(prompt, &uploaded)
    }

    /// Run one inference against an already-uploaded image and decode the
    /// result. Shared by the single-image and batch paths.
    pub(crate) fn transform_uploaded(
        &self,
        prompt: &str,
        uploaded: &UploadedImage,
    ) -> Result<StylizedImage> {
        let start = Instant::now();

        let bytes = self.provider.transform(prompt, uploaded)?;
        let image = image::load_from_memory(&bytes).map_err(|e| {
            ForgeError::Generation(format!("Failed to decode generated image: {}", e))
        })?;

        Ok(StylizedImage {
            image,
            prompt_used: prompt.to_string(),
            provider: self.provider.name().to_string(),
            duration_secs: start.elapsed().as_secs_f64(),
            content_hash: ContentHash::from_bytes(&bytes).to_prefixed_hex(),
        })
    }

    pub(crate) fn provider(&self) -> &dyn GenerationProvider {
        self.provider.as_ref()
    }
}

/// Reject unusable inputs before any network activity
pub(crate) fn validate_inputs(source: &DynamicImage, prompt: &str) -> Result<()> {
    if source.width() == 0 || source.height() == 0 {
        return Err(ForgeError::InvalidInput(
            "Please upload a source image".to_string(),
        ));
    }
    if prompt.trim().is_empty() {
        return Err(ForgeError::InvalidInput(
            "Please enter a text prompt".to_string(),
        ));
    }
    Ok(())
}

/// Encode a source sprite to in-memory PNG for upload
pub(crate) fn encode_png(source: &DynamicImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    source
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .map_err(|e| ForgeError::Image(format!("Failed to encode source image: {}", e)))?;
    Ok(bytes)
}
