//! Style catalog listing command

use anyhow::Result;
use spriteforge_gen::ForgeConfig;

pub fn run(styles: Option<&str>) -> Result<()> {
    let config = ForgeConfig::load().unwrap_or_default();
    let catalog = super::load_catalog(&config, styles)?;

    for entry in catalog.entries() {
        println!("{}: {}", entry.name, entry.modifier);
    }

    Ok(())
}
