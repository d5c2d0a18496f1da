use std::path::Path;

pub fn run(catalog: &Path) -> Result<(), String> {
    let loaded = super::load_catalog(catalog)?;

    println!("  All checks passed for '{}'.", catalog.display());
    println!("  {} cards, each with both orientations", loaded.len());
    if loaded.len() < arcana_core::SPREAD_SIZE {
        println!(
            "  warning: a spread needs {} cards; rituals will fail to draw",
            arcana_core::SPREAD_SIZE
        );
    }

    Ok(())
}
