use std::path::{Path, PathBuf};

use colored::Colorize;
use tarot_core::DrawConfig;
use tarot_core::generator::{self, DeckConfig};
use tracing::info;

use crate::{docx, render};

pub struct Options {
    pub count: Option<usize>,
    pub seed: Option<u64>,
    pub json: Option<PathBuf>,
    pub text: Option<PathBuf>,
    pub docx: Option<PathBuf>,
}

pub fn run(config_path: &Path, opts: Options) -> Result<(), String> {
    let config = DeckConfig::load_file(config_path).map_err(|e| e.to_string())?;

    let count = opts.count.unwrap_or_else(|| config.card_count());

    let mut draw_config = DrawConfig::default();
    if let Some(seed) = opts.seed {
        draw_config = draw_config.with_seed(seed);
    }
    let mut rng = draw_config.rng();

    let catalog = generator::generate(&config, count, &mut rng).map_err(|e| e.to_string())?;

    let json_path = opts.json.or_else(|| config.output.json_file.clone());
    let text_path = opts.text.or_else(|| config.output.txt_file.clone());
    let docx_path = opts.docx.or_else(|| config.output.docx_path());

    if json_path.is_none() && text_path.is_none() && docx_path.is_none() {
        print!("{}", render::generated_deck(&catalog, config.deck_name()));
        return Ok(());
    }

    println!(
        "  {} '{}' {}",
        "Generated".bold(),
        config.deck_name(),
        format!("({} cards)", catalog.len()).dimmed()
    );

    if let Some(path) = json_path {
        let json = catalog.to_json().map_err(|e| e.to_string())? + "\n";
        super::write_file(&path, json)?;
        info!(path = %path.display(), "wrote catalog");
        println!("  catalog: {}", path.display());
    }

    if let Some(path) = text_path {
        super::write_file(&path, render::generated_deck(&catalog, config.deck_name()))?;
        info!(path = %path.display(), "wrote text deck");
        println!("  text:    {}", path.display());
    }

    if let Some(path) = docx_path {
        let bytes = docx::render(&catalog, &super::image_base()?)
            .map_err(|e| format!("cannot build docx: {e}"))?;
        super::write_file(&path, bytes)?;
        info!(path = %path.display(), "wrote docx deck");
        println!("  docx:    {}", path.display());
    }

    Ok(())
}
