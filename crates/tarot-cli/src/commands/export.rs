use std::path::Path;

use tarot_core::generator::config::DEFAULT_DECK_NAME;

use crate::{docx, render};

pub fn run(catalog_path: Option<&Path>, format: &str, output: Option<&Path>) -> Result<(), String> {
    let catalog = super::load_catalog(catalog_path)?;

    let content = match format {
        "json" => (catalog.to_json().map_err(|e| e.to_string())? + "\n").into_bytes(),
        "text" | "txt" => render::text_deck(&catalog, DEFAULT_DECK_NAME).into_bytes(),
        "markdown" | "md" => render::markdown(&catalog, DEFAULT_DECK_NAME).into_bytes(),
        "docx" => {
            if output.is_none() {
                return Err("docx export needs an output file (-o)".to_string());
            }
            docx::render(&catalog, &super::image_base()?)
                .map_err(|e| format!("cannot build docx: {e}"))?
        }
        _ => {
            return Err(format!(
                "unsupported format: \"{format}\". Use: json, text, markdown, docx"
            ));
        }
    };

    if let Some(path) = output {
        super::write_file(path, content)?;
        println!("  Exported {} cards to {}", catalog.len(), path.display());
    } else {
        print!("{}", String::from_utf8_lossy(&content));
    }

    Ok(())
}
