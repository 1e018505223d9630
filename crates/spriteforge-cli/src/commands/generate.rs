//! Single-image generation command

use anyhow::{Context, Result};
use spriteforge_gen::ForgeConfig;

pub struct GenerateArgs {
    pub image: String,
    pub prompt: String,
    pub provider: Option<String>,
    pub output: String,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let config = ForgeConfig::load().unwrap_or_default();
    let stylizer = super::build_stylizer(&config, args.provider.as_deref())?;

    let source = image::open(&args.image)
        .with_context(|| format!("Failed to open source image '{}'", args.image))?;

    println!(
        "Generating with provider '{}'...",
        stylizer.provider_name()
    );

    let result = stylizer.generate(&source, &args.prompt)?;

    result
        .image
        .save(&args.output)
        .with_context(|| format!("Failed to save output to '{}'", args.output))?;

    println!("Generated {} ({:.1}s)", args.output, result.duration_secs);
    println!("  prompt: {}", result.prompt_used);
    println!("  hash:   {}", result.content_hash);

    Ok(())
}
