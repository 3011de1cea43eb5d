use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use tarot_core::{Card, Title};

pub fn run(catalog_path: Option<&Path>, title: Option<&str>) -> Result<(), String> {
    let catalog = super::load_catalog(catalog_path)?;

    let cards: Vec<&Card> = match title {
        Some(text) => {
            let title = Title::parse(text).ok_or_else(|| {
                format!("unknown title: \"{text}\". Use: Yes, No, Yes-but, No-but, Yes-and, No-and")
            })?;
            catalog.filter_by_title(title)
        }
        None => catalog.iter().collect(),
    };

    if cards.is_empty() {
        println!("  No cards found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Title", "Symbol", "Place", "Character"]);

    for card in &cards {
        table.add_row(vec![
            card.id.to_string(),
            card.title.to_string(),
            card.symbol.clone(),
            card.place.clone(),
            card.character.clone(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} cards", cards.len());

    Ok(())
}
