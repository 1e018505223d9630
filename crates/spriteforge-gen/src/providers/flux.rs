//! Flux Kontext image-to-image provider (fal.ai)
//!
//! Restyles a sprite via the Flux Kontext API. The source image is uploaded
//! to fal storage first, then referenced by URL in the inference call.
//! Calls are synchronous and block until the job completes; a failed remote
//! call is never reattempted.

use crate::config::ForgeConfig;
use crate::provider::{GenerationProvider, ProviderStatus, UploadedImage};
use spriteforge_core::{ForgeError, Result};
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://fal.run/fal-ai/flux-kontext/dev";
const DEFAULT_STORAGE_URL: &str = "https://rest.alpha.fal.ai";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const UPLOAD_FILE_NAME: &str = "sprite.png";

/// Flux Kontext provider for AI sprite restyling via fal.ai
pub struct FluxKontextProvider {
    api_key: String,
    api_url: String,
    storage_url: String,
}

impl FluxKontextProvider {
    /// Create a new FluxKontextProvider from config
    pub fn from_config(config: &ForgeConfig) -> Result<Self> {
        let api_key = config
            .api_key("flux-kontext")
            .ok_or_else(|| {
                ForgeError::Config(
                    "Flux Kontext API key not configured. Set FAL_KEY or add to .spriteforge/config.toml".to_string(),
                )
            })?
            .to_string();

        let api_url = config
            .api_url("flux-kontext")
            .unwrap_or(DEFAULT_API_URL)
            .to_string();

        let storage_url = config
            .storage_url("flux-kontext")
            .unwrap_or(DEFAULT_STORAGE_URL)
            .to_string();

        Ok(Self {
            api_key,
            api_url,
            storage_url,
        })
    }

    fn post_json(&self, url: &str, payload: &serde_json::Value) -> Result<serde_json::Value> {
        let agent = build_agent();
        let mut response = agent
            .post(url)
            .header("Authorization", &format!("Key {}", self.api_key))
            .header("Content-Type", "application/json")
            .send_json(payload)
            .map_err(|e| {
                ForgeError::Generation(format!("Flux Kontext API request failed: {}", e))
            })?;

        response.body_mut().read_json().map_err(|e| {
            ForgeError::Generation(format!("Failed to parse Flux Kontext response: {}", e))
        })
    }

    fn download_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let agent = build_agent();
        let response = agent
            .get(url)
            .call()
            .map_err(|e| ForgeError::Generation(format!("Failed to download image: {}", e)))?;

        let mut reader = response.into_body().into_reader();
        let mut bytes = Vec::new();
        std::io::Read::read_to_end(&mut reader, &mut bytes)
            .map_err(|e| ForgeError::Generation(format!("Failed to read image data: {}", e)))?;
        Ok(bytes)
    }
}

fn build_agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .build();
    config.into()
}

impl GenerationProvider for FluxKontextProvider {
    fn name(&self) -> &str {
        "flux-kontext"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        if self.api_key.is_empty() {
            return Ok(ProviderStatus::NoApiKey);
        }
        Ok(ProviderStatus::Available)
    }

    fn upload_image(&self, png_bytes: &[u8]) -> Result<UploadedImage> {
        let initiate_url = format!("{}/storage/upload/initiate", self.storage_url);
        let payload = serde_json::json!({
            "content_type": "image/png",
            "file_name": UPLOAD_FILE_NAME
        });

        let response = self.post_json(&initiate_url, &payload)?;
        let (upload_url, file_url) = extract_upload_urls(&response)?;

        let agent = build_agent();
        agent
            .put(&upload_url)
            .header("Content-Type", "image/png")
            .send(png_bytes)
            .map_err(|e| ForgeError::Generation(format!("Image upload failed: {}", e)))?;

        Ok(UploadedImage { url: file_url })
    }

    fn transform(&self, prompt: &str, image: &UploadedImage) -> Result<Vec<u8>> {
        let payload = serde_json::json!({
            "prompt": prompt,
            "image_url": image.url
        });

        let response = self.post_json(&self.api_url, &payload)?;
        let result_url = extract_image_url(&response)?;

        self.download_bytes(&result_url)
    }
}

/// Pull the first generated image URL out of an inference response
fn extract_image_url(response: &serde_json::Value) -> Result<String> {
    response
        .get("images")
        .and_then(|imgs| imgs.as_array())
        .and_then(|arr| arr.first())
        .and_then(|img| img.get("url"))
        .and_then(|u| u.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            ForgeError::Generation(format!(
                "Unexpected Flux Kontext response format: {}",
                serde_json::to_string_pretty(response).unwrap_or_default()
            ))
        })
}

/// Pull the upload target and public file URL out of an initiate response
fn extract_upload_urls(response: &serde_json::Value) -> Result<(String, String)> {
    let upload_url = response.get("upload_url").and_then(|u| u.as_str());
    let file_url = response.get("file_url").and_then(|u| u.as_str());

    match (upload_url, file_url) {
        (Some(upload), Some(file)) => Ok((upload.to_string(), file.to_string())),
        _ => Err(ForgeError::Generation(format!(
            "Unexpected upload initiate response: {}",
            serde_json::to_string_pretty(response).unwrap_or_default()
        ))),
    }
}

/// Parse a Flux Kontext API response for testing
pub fn parse_generation_response(json: &str) -> Result<String> {
    let response: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| ForgeError::Generation(format!("Invalid JSON: {}", e)))?;
    extract_image_url(&response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_without_key_fails() {
        let result = FluxKontextProvider::from_config(&ForgeConfig::default());
        assert!(matches!(result, Err(ForgeError::Config(_))));
    }

    #[test]
    fn test_parse_generation_response() {
        let json = r#"{
            "images": [
                {
                    "url": "https://example.com/stylized.png",
                    "width": 1024,
                    "height": 1024,
                    "content_type": "image/png"
                }
            ],
            "seed": 42,
            "has_nsfw_concepts": [false],
            "prompt": "a sword, made of fire, lava, and embers"
        }"#;

        let url = parse_generation_response(json).unwrap();
        assert_eq!(url, "https://example.com/stylized.png");
    }

    #[test]
    fn test_parse_generation_response_first_image_wins() {
        let json = r#"{"images": [{"url": "https://example.com/a.png"}, {"url": "https://example.com/b.png"}]}"#;
        let url = parse_generation_response(json).unwrap();
        assert_eq!(url, "https://example.com/a.png");
    }

    #[test]
    fn test_parse_generation_response_invalid() {
        let json = r#"{"error": "something went wrong"}"#;
        assert!(parse_generation_response(json).is_err());
    }

    #[test]
    fn test_extract_upload_urls() {
        let response = serde_json::json!({
            "upload_url": "https://storage.example.com/put-here",
            "file_url": "https://storage.example.com/sprite.png"
        });
        let (upload, file) = extract_upload_urls(&response).unwrap();
        assert_eq!(upload, "https://storage.example.com/put-here");
        assert_eq!(file, "https://storage.example.com/sprite.png");
    }

    #[test]
    fn test_extract_upload_urls_missing_field() {
        let response = serde_json::json!({"upload_url": "https://storage.example.com/put-here"});
        assert!(extract_upload_urls(&response).is_err());
    }
}
