//! Ordered style catalog for variant generation
//!
//! A catalog maps style names to prompt modifiers. Iteration order matters:
//! it determines the order of the variants a batch returns.

use serde::{Deserialize, Serialize};
use spriteforge_core::{ForgeError, Result};
use std::path::Path;

/// A single named style and its prompt modifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleEntry {
    /// Style name (e.g., "Fiery")
    pub name: String,
    /// Fragment appended to the base prompt to bias generation
    pub modifier: String,
}

impl StyleEntry {
    /// Compose the full prompt sent to the provider for this style
    pub fn full_prompt(&self, base_prompt: &str) -> String {
        format!("{}, {}", base_prompt, self.modifier)
    }
}

/// An ordered, non-empty collection of styles
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    entries: Vec<StyleEntry>,
}

/// TOML file wrapper
#[derive(Debug, Deserialize)]
struct CatalogFile {
    style: Vec<StyleEntry>,
}

impl StyleCatalog {
    /// Create a catalog from a list of entries. The catalog is never empty.
    pub fn new(entries: Vec<StyleEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(ForgeError::Catalog(
                "Style catalog must contain at least one style".to_string(),
            ));
        }
        Ok(Self { entries })
    }

    /// Load a catalog from a TOML file with `[[style]]` entries
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: CatalogFile = toml::from_str(&content).map_err(|e| {
            ForgeError::Catalog(format!(
                "Failed to parse style catalog {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::new(file.style)
    }

    /// The styles in catalog order
    pub fn entries(&self) -> &[StyleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StyleCatalog {
    /// The built-in fantasy variant set
    fn default() -> Self {
        let entry = |name: &str, modifier: &str| StyleEntry {
            name: name.to_string(),
            modifier: modifier.to_string(),
        };
        Self {
            entries: vec![
                entry("Fiery", "made of fire, lava, and embers"),
                entry("Icy", "made of ice, frost, and crystals"),
                entry("Ancient", "ancient, covered in moss and vines, weathered stone"),
                entry("Magic", "glowing with magical energy, ethereal, enchanted runes"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_catalog(content: &str) -> std::path::PathBuf {
        let dir =
            std::env::temp_dir().join(format!("spriteforge_style_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("styles.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_default_catalog_order() {
        let catalog = StyleCatalog::default();
        let names: Vec<&str> = catalog.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Fiery", "Icy", "Ancient", "Magic"]);
    }

    #[test]
    fn test_full_prompt_composition() {
        let entry = StyleEntry {
            name: "Fiery".to_string(),
            modifier: "made of fire, lava, and embers".to_string(),
        };
        assert_eq!(
            entry.full_prompt("a sword"),
            "a sword, made of fire, lava, and embers"
        );
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(StyleCatalog::new(vec![]).is_err());
    }

    #[test]
    fn test_load_catalog() {
        let catalog_str = r#"
[[style]]
name = "Rusty"
modifier = "corroded metal, rust, oxidation"

[[style]]
name = "Golden"
modifier = "gilded, ornate gold filigree"
"#;
        let path = temp_catalog(catalog_str);
        let catalog = StyleCatalog::load(&path).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].name, "Rusty");
        assert_eq!(catalog.entries()[1].name, "Golden");

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_load_catalog_invalid() {
        let path = temp_catalog("this is not a catalog");
        assert!(StyleCatalog::load(&path).is_err());

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_load_catalog_empty() {
        let path = temp_catalog("style = []");
        assert!(StyleCatalog::load(&path).is_err());

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }
}
