//! Mock provider for testing and offline use
//!
//! Produces solid-color PNGs derived from the prompt without any network
//! calls, and exposes call counters so tests can assert how the pipeline
//! drove it.

use crate::provider::{GenerationProvider, ProviderStatus, UploadedImage};
use spriteforge_core::{ForgeError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const MOCK_IMAGE_SIZE: u32 = 16;

/// Observable record of the calls a [`MockProvider`] received
#[derive(Default)]
pub struct MockStats {
    uploads: AtomicUsize,
    transforms: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockStats {
    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn transforms(&self) -> usize {
        self.transforms.load(Ordering::SeqCst)
    }

    /// Every prompt passed to `transform`, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

/// A provider that generates placeholder sprites locally
pub struct MockProvider {
    stats: Arc<MockStats>,
    fail_substrings: Vec<String>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(MockStats::default()),
            fail_substrings: Vec::new(),
        }
    }

    /// Make `transform` fail for any prompt containing `substring`
    pub fn fail_when_prompt_contains(mut self, substring: &str) -> Self {
        self.fail_substrings.push(substring.to_string());
        self
    }

    /// Shareable handle to this provider's call record
    pub fn stats(&self) -> Arc<MockStats> {
        Arc::clone(&self.stats)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        Ok(ProviderStatus::Available)
    }

    fn upload_image(&self, png_bytes: &[u8]) -> Result<UploadedImage> {
        if png_bytes.is_empty() {
            return Err(ForgeError::Generation(
                "Mock upload received empty image data".to_string(),
            ));
        }
        let n = self.stats.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(UploadedImage {
            url: format!("mock://sprite/{}", n),
        })
    }

    fn transform(&self, prompt: &str, _image: &UploadedImage) -> Result<Vec<u8>> {
        self.stats.transforms.fetch_add(1, Ordering::SeqCst);
        self.stats.prompts.lock().unwrap().push(prompt.to_string());

        for substring in &self.fail_substrings {
            if prompt.contains(substring.as_str()) {
                return Err(ForgeError::Generation(format!(
                    "Simulated failure for prompt '{}'",
                    prompt
                )));
            }
        }

        render_mock_png(prompt)
    }
}

/// Render the deterministic solid-color PNG the mock returns for a prompt
pub fn render_mock_png(prompt: &str) -> Result<Vec<u8>> {
    let hash_val = prompt
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    let r = ((hash_val >> 16) & 0xFF) as u8;
    let g = ((hash_val >> 8) & 0xFF) as u8;
    let b = (hash_val & 0xFF) as u8;

    let mut img_data = Vec::with_capacity((MOCK_IMAGE_SIZE * MOCK_IMAGE_SIZE * 4) as usize);
    for _ in 0..(MOCK_IMAGE_SIZE * MOCK_IMAGE_SIZE) {
        img_data.extend_from_slice(&[r, g, b, 255]);
    }

    let img = image::RgbaImage::from_raw(MOCK_IMAGE_SIZE, MOCK_IMAGE_SIZE, img_data)
        .ok_or_else(|| ForgeError::Image("Failed to create image buffer".to_string()))?;

    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .map_err(|e| ForgeError::Image(format!("Failed to encode PNG: {}", e)))?;

    Ok(bytes)
}
