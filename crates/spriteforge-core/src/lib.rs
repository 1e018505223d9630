//! Spriteforge Core - Foundational types for spriteforge
//!
//! This crate provides the types that the other spriteforge crates depend on:
//! - `ForgeError` and the `Result` alias
//! - `ContentHash` - SHA-256 based content hashing for generated output

mod error;
mod hash;

pub use error::{ForgeError, Result};
pub use hash::ContentHash;
