pub mod generate;
pub mod styles;
pub mod variants;

use anyhow::Result;
use spriteforge_gen::providers::create_provider;
use spriteforge_gen::{ForgeConfig, StyleCatalog, Stylizer};
use std::path::Path;

/// Build a stylizer for the requested (or configured) provider
pub fn build_stylizer(config: &ForgeConfig, provider: Option<&str>) -> Result<Stylizer> {
    let provider_name = provider.unwrap_or_else(|| config.default_provider());
    if !config.is_enabled(provider_name) {
        anyhow::bail!("Provider '{}' is disabled in config", provider_name);
    }
    let provider = create_provider(provider_name, config)?;
    Ok(Stylizer::new(provider))
}

/// Resolve the active style catalog: CLI flag, then config, then built-in
pub fn load_catalog(config: &ForgeConfig, styles: Option<&str>) -> Result<StyleCatalog> {
    match styles.or_else(|| config.style_catalog()) {
        Some(path) => Ok(StyleCatalog::load(Path::new(path))?),
        None => Ok(StyleCatalog::default()),
    }
}
