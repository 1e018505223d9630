//! Spriteforge CLI - Command-line interface for the sprite forge

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{generate, styles, variants};

#[derive(Parser)]
#[command(name = "spriteforge")]
#[command(about = "AI-powered forge for sprite variations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stylize a single sprite with a prompt
    Generate {
        /// Path to the source sprite image
        image: String,

        /// Text prompt describing the desired result
        #[arg(long, short)]
        prompt: String,

        /// Provider to use (flux-kontext, mock)
        #[arg(long)]
        provider: Option<String>,

        /// Output image path
        #[arg(short, long, default_value = "stylized.png")]
        output: String,
    },

    /// Generate one stylistic variant per catalog style
    Variants {
        /// Path to the source sprite image
        image: String,

        /// Base prompt (e.g., "a pixel art sword")
        #[arg(long, short)]
        prompt: String,

        /// Provider to use (flux-kontext, mock)
        #[arg(long)]
        provider: Option<String>,

        /// Path to a style catalog TOML (defaults to the built-in catalog)
        #[arg(long)]
        styles: Option<String>,

        /// Output directory for the generated variants
        #[arg(long, default_value = "variants")]
        output_dir: String,
    },

    /// List the active style catalog
    Styles {
        /// Path to a style catalog TOML (defaults to the built-in catalog)
        #[arg(long)]
        styles: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            image,
            prompt,
            provider,
            output,
        } => generate::run(generate::GenerateArgs {
            image,
            prompt,
            provider,
            output,
        }),
        Commands::Variants {
            image,
            prompt,
            provider,
            styles,
            output_dir,
        } => variants::run(variants::VariantsArgs {
            image,
            prompt,
            provider,
            styles,
            output_dir,
        }),
        Commands::Styles { styles } => styles::run(styles.as_deref()),
    }
}
