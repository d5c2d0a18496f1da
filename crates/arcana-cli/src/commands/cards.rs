use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(catalog: &Path, query: Option<&str>) -> Result<(), String> {
    let catalog = super::load_catalog(catalog)?;

    let cards = match query {
        Some(q) => catalog.search(q),
        None => catalog.cards().iter().collect(),
    };

    if cards.is_empty() {
        match query {
            Some(q) => println!("  No cards match \"{q}\"."),
            None => println!("  No cards found."),
        }
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Upright", "Reversed"]);

    for card in &cards {
        table.add_row(vec![
            card.id.to_string(),
            card.name.clone(),
            super::preview(&card.keywords_upright.join(", "), 40),
            super::preview(&card.keywords_reversed.join(", "), 40),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} cards", cards.len());

    Ok(())
}
