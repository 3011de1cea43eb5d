use std::path::Path;

use crate::render;

pub fn run(catalog_path: Option<&Path>, id: u32, framed: bool) -> Result<(), String> {
    let catalog = super::load_catalog(catalog_path)?;
    let card = catalog.by_id(id).map_err(|e| e.to_string())?;

    if framed {
        print!("{}", render::framed(card));
    } else {
        print!("{}", render::terminal(card, None));
    }
    Ok(())
}
