//! Variant batch generation command

use anyhow::{Context, Result};
use spriteforge_gen::ForgeConfig;
use std::path::Path;

pub struct VariantsArgs {
    pub image: String,
    pub prompt: String,
    pub provider: Option<String>,
    pub styles: Option<String>,
    pub output_dir: String,
}

pub fn run(args: VariantsArgs) -> Result<()> {
    let config = ForgeConfig::load().unwrap_or_default();
    let stylizer = super::build_stylizer(&config, args.provider.as_deref())?;
    let catalog = super::load_catalog(&config, args.styles.as_deref())?;

    let source = image::open(&args.image)
        .with_context(|| format!("Failed to open source image '{}'", args.image))?;

    println!(
        "Generating {} variants with provider '{}'...",
        catalog.len(),
        stylizer.provider_name()
    );

    let result = stylizer.generate_variants(&source, &args.prompt, &catalog)?;

    let output_dir = Path::new(&args.output_dir);
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory '{}'", args.output_dir))?;

    for variant in &result.variants {
        let path = output_dir.join(format!("{}.png", variant.style.to_lowercase()));
        variant
            .result
            .image
            .save(&path)
            .with_context(|| format!("Failed to save variant '{}'", variant.style))?;
        println!(
            "  {} -> {} ({:.1}s)",
            variant.style,
            path.display(),
            variant.result.duration_secs
        );
    }

    for failure in &result.failures {
        println!("  {} FAILED: {}", failure.style, failure.reason);
    }

    println!(
        "\nGenerated {}/{} variants, {} failed",
        result.variants.len(),
        catalog.len(),
        result.failures.len()
    );

    Ok(())
}
