//! Error types for spriteforge

use thiserror::Error;

/// The main error type for spriteforge operations
#[derive(Debug, Error)]
pub enum ForgeError {
    /// The caller supplied an unusable source image or prompt.
    /// Raised before any network activity takes place.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An upload, inference or result-fetch step failed.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Every style in a variant batch failed to generate.
    #[error("Unable to create any variants. Try again or change the prompt.")]
    AllVariantsFailed,

    #[error("Config error: {0}")]
    Config(String),

    #[error("Style catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Image error: {0}")]
    Image(String),
}

/// Result type alias for spriteforge operations
pub type Result<T> = std::result::Result<T, ForgeError>;

impl From<toml::de::Error> for ForgeError {
    fn from(err: toml::de::Error) -> Self {
        ForgeError::TomlParse(err.to_string())
    }
}
