//! Spriteforge Gen - AI sprite stylization pipeline
//!
//! Provides a pluggable provider framework for restyling sprite images via
//! hosted image-generation APIs (Flux Kontext), with an ordered style catalog,
//! single-image and best-effort variant-batch generation.

pub mod batch;
pub mod config;
pub mod provider;
pub mod providers;
pub mod style;
pub mod stylize;

pub use batch::{BatchResult, StyleFailure, Variant};
pub use config::ForgeConfig;
pub use provider::{GenerationProvider, ProviderStatus, UploadedImage};
pub use style::{StyleCatalog, StyleEntry};
pub use stylize::{StylizedImage, Stylizer};
