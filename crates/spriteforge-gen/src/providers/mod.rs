//! Provider registry
//!
//! Maps provider names to concrete implementations.

pub mod flux;
pub mod mock;

use crate::config::ForgeConfig;
use crate::provider::GenerationProvider;
use spriteforge_core::{ForgeError, Result};

/// Create a provider by name with configuration
pub fn create_provider(name: &str, config: &ForgeConfig) -> Result<Box<dyn GenerationProvider>> {
    match name {
        "mock" => Ok(Box::new(mock::MockProvider::new())),
        "flux-kontext" => Ok(Box::new(flux::FluxKontextProvider::from_config(config)?)),
        _ => Err(ForgeError::Config(format!(
            "Unknown provider '{}'. Available: mock, flux-kontext",
            name
        ))),
    }
}

/// List all available provider names
pub fn available_providers() -> Vec<&'static str> {
    vec!["mock", "flux-kontext"]
}
