//! Best-effort variant batch generation
//!
//! Uploads the source sprite once, then drives one generation per catalog
//! style against the shared upload. A single style's failure never aborts
//! the batch; the batch only fails as a whole when every style failed.

use crate::style::StyleCatalog;
use crate::stylize::{encode_png, validate_inputs, StylizedImage, Stylizer};
use image::DynamicImage;
use spriteforge_core::{ForgeError, Result};

/// One successfully generated variant
#[derive(Debug)]
pub struct Variant {
    /// Catalog style name this variant was generated for
    pub style: String,
    pub result: StylizedImage,
}

/// A style that failed to generate, kept for observability
#[derive(Debug, Clone)]
pub struct StyleFailure {
    pub style: String,
    pub reason: String,
}

/// Result of a variant batch.
///
/// `variants` preserves catalog order for whichever styles succeeded and
/// never contains placeholders for failed ones; those are in `failures`.
#[derive(Debug)]
pub struct BatchResult {
    pub variants: Vec<Variant>,
    pub failures: Vec<StyleFailure>,
}

impl Stylizer {
    /// Generate one variant per catalog style from a single source sprite.
    ///
    /// The source is uploaded exactly once and the upload is reused for
    /// every style. Fails with `InvalidInput` before any provider call on
    /// unusable input, and with `AllVariantsFailed` when no style produced
    /// an image.
    pub fn generate_variants(
        &self,
        source: &DynamicImage,
        base_prompt: &str,
        catalog: &StyleCatalog,
    ) -> Result<BatchResult> {
        validate_inputs(source, base_prompt)?;

        let png_bytes = encode_png(source)?;
        let uploaded = self.provider().upload_image(&png_bytes)?;

        let mut variants = Vec::new();
        let mut failures = Vec::new();

        for entry in catalog.entries() {
            let prompt = entry.full_prompt(base_prompt);

            match self.transform_uploaded(&prompt, &uploaded) {
                Ok(result) => {
                    variants.push(Variant {
                        style: entry.name.clone(),
                        result,
                    });
                }
                Err(e) => {
                    eprintln!("  Variant '{}' failed: {}", entry.name, e);
                    failures.push(StyleFailure {
                        style: entry.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if variants.is_empty() {
            return Err(ForgeError::AllVariantsFailed);
        }

        Ok(BatchResult { variants, failures })
    }
}
