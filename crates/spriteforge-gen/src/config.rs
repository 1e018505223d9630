//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `SPRITEFORGE_{PROVIDER}_API_KEY`
//!    (plus `FAL_KEY` as the conventional alias for flux-kontext)
//! 2. Project-local: `.spriteforge/config.toml`
//! 3. Global: `~/.spriteforge/config.toml`

use serde::{Deserialize, Serialize};
use spriteforge_core::{ForgeError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Provider-specific configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub storage_url: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

/// Generation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_provider_name")]
    pub default_provider: String,
    /// Path to a style catalog TOML overriding the built-in catalog
    #[serde(default)]
    pub style_catalog: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider_name(),
            style_catalog: None,
        }
    }
}

fn default_provider_name() -> String {
    "flux-kontext".to_string()
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForgeConfigFile {
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default)]
pub struct ForgeConfig {
    pub providers: HashMap<String, ProviderConfig>,
    pub generation: GenerationConfig,
}

impl ForgeConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = ForgeConfigFile::default();

        // Layer 1: Global config (~/.spriteforge/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        // Layer 2: Project-local config (.spriteforge/config.toml)
        let local_path = PathBuf::from(".spriteforge/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        // Layer 3: Environment variable overrides
        Self::apply_env_overrides(&mut config);

        Ok(ForgeConfig {
            providers: config.providers,
            generation: config.generation,
        })
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config);
        Ok(ForgeConfig {
            providers: config.providers,
            generation: config.generation,
        })
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_key.as_deref())
    }

    /// Get API URL for a provider (or its default)
    pub fn api_url(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_url.as_deref())
    }

    /// Get storage URL for a provider (or its default)
    pub fn storage_url(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.storage_url.as_deref())
    }

    /// Check if a provider is enabled
    pub fn is_enabled(&self, provider_name: &str) -> bool {
        self.providers
            .get(provider_name)
            .map(|p| p.enabled)
            .unwrap_or(true)
    }

    /// Get the default provider name
    pub fn default_provider(&self) -> &str {
        &self.generation.default_provider
    }

    /// Get the configured style catalog path
    pub fn style_catalog(&self) -> Option<&str> {
        self.generation.style_catalog.as_deref()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".spriteforge").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<ForgeConfigFile> {
        let content = std::fs::read_to_string(path)?;
        let config: ForgeConfigFile = toml::from_str(&content).map_err(|e| {
            ForgeError::Config(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    fn merge_into(base: &mut ForgeConfigFile, overlay: ForgeConfigFile) {
        for (name, provider) in overlay.providers {
            let entry = base.providers.entry(name).or_default();
            if provider.api_key.is_some() {
                entry.api_key = provider.api_key;
            }
            if provider.api_url.is_some() {
                entry.api_url = provider.api_url;
            }
            if provider.storage_url.is_some() {
                entry.storage_url = provider.storage_url;
            }
            entry.enabled = provider.enabled;
        }

        if overlay.generation.default_provider != default_provider_name() {
            base.generation.default_provider = overlay.generation.default_provider;
        }
        if overlay.generation.style_catalog.is_some() {
            base.generation.style_catalog = overlay.generation.style_catalog;
        }
    }

    fn apply_env_overrides(config: &mut ForgeConfigFile) {
        let provider_names = ["flux-kontext", "mock"];
        for name in &provider_names {
            let env_key = format!(
                "SPRITEFORGE_{}_API_KEY",
                name.to_uppercase().replace('-', "_")
            );
            if let Ok(key) = std::env::var(&env_key) {
                let entry = config.providers.entry(name.to_string()).or_default();
                entry.api_key = Some(key);
            }
        }

        // FAL_KEY is what the fal.ai tooling conventionally uses
        if let Ok(key) = std::env::var("FAL_KEY") {
            let entry = config
                .providers
                .entry("flux-kontext".to_string())
                .or_default();
            if entry.api_key.is_none() {
                entry.api_key = Some(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_config(content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "spriteforge_config_test_{}",
            uuid::Uuid::new_v4()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_config_from_file() {
        let config_str = r#"
[providers.flux-kontext]
api_key = "test-key-123"
api_url = "https://api.example.com/flux-kontext"
enabled = true

[generation]
default_provider = "mock"
style_catalog = "styles/fantasy.toml"
"#;
        let path = temp_config(config_str);
        let config = ForgeConfig::load_from_file(&path).unwrap();

        assert!(config.is_enabled("flux-kontext"));
        assert_eq!(config.default_provider(), "mock");
        assert_eq!(config.style_catalog(), Some("styles/fantasy.toml"));
        assert_eq!(
            config.api_url("flux-kontext"),
            Some("https://api.example.com/flux-kontext")
        );

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_env_var_override() {
        let config_str = r#"
[providers.flux-kontext]
api_key = "file-key"
"#;
        let path = temp_config(config_str);

        std::env::set_var("SPRITEFORGE_FLUX_KONTEXT_API_KEY", "env-key-override");

        let config = ForgeConfig::load_from_file(&path).unwrap();
        assert_eq!(config.api_key("flux-kontext"), Some("env-key-override"));

        std::env::remove_var("SPRITEFORGE_FLUX_KONTEXT_API_KEY");
        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_merge_project_over_global() {
        let mut base: ForgeConfigFile = toml::from_str(
            r#"
[providers.flux-kontext]
api_key = "global-key"
api_url = "https://global.example.com"
enabled = true

[generation]
style_catalog = "styles/global.toml"
"#,
        )
        .unwrap();

        let overlay: ForgeConfigFile = toml::from_str(
            r#"
[providers.flux-kontext]
api_key = "project-key"
enabled = false

[generation]
default_provider = "mock"
"#,
        )
        .unwrap();

        ForgeConfig::merge_into(&mut base, overlay);
        let config = ForgeConfig {
            providers: base.providers,
            generation: base.generation,
        };

        // Overlay wins where it sets a value
        assert_eq!(config.api_key("flux-kontext"), Some("project-key"));
        assert!(!config.is_enabled("flux-kontext"));
        assert_eq!(config.default_provider(), "mock");

        // Base values survive where the overlay is silent
        assert_eq!(
            config.api_url("flux-kontext"),
            Some("https://global.example.com")
        );
        assert_eq!(config.style_catalog(), Some("styles/global.toml"));
    }

    #[test]
    fn test_default_provider() {
        let config = ForgeConfig::default();
        assert_eq!(config.default_provider(), "flux-kontext");
    }

    #[test]
    fn test_missing_provider_returns_none() {
        let config = ForgeConfig::default();
        assert_eq!(config.api_key("nonexistent"), None);
        assert!(config.is_enabled("nonexistent")); // defaults to true
    }
}
