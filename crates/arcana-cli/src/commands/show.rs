use std::path::Path;

use colored::Colorize;

use arcana_core::Orientation;

pub fn run(catalog: &Path, name: &str) -> Result<(), String> {
    let catalog = super::load_catalog(catalog)?;

    let card = catalog
        .find_by_name(name)
        .ok_or_else(|| format!("card not found: \"{name}\""))?;

    println!("  {} [{}]", card.name.bold(), card.id.to_string().dimmed());
    if !card.image.is_empty() {
        println!("  image: {}", card.image);
    }
    println!();

    for (orientation, keywords, meaning) in [
        (Orientation::Upright, &card.keywords_upright, &card.meaning_upright),
        (Orientation::Reversed, &card.keywords_reversed, &card.meaning_reversed),
    ] {
        println!("  {}", orientation.to_string().bold());
        println!("    keywords: {}", keywords.join(", "));
        for line in meaning.lines() {
            println!("    {}", line.trim());
        }
        println!();
    }

    Ok(())
}
