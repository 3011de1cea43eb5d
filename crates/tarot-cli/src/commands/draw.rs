use std::path::Path;

use colored::Colorize;
use tarot_core::{Card, DrawConfig, Stance};

use crate::render;

pub fn run(
    catalog_path: Option<&Path>,
    count: usize,
    unique: bool,
    seed: Option<u64>,
    with_stance: bool,
) -> Result<(), String> {
    let catalog = super::load_catalog(catalog_path)?;

    let mut config = DrawConfig::default();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let mut rng = config.rng();

    let cards: Vec<&Card> = if unique {
        catalog
            .draw_without_replacement(count, &mut rng)
            .map_err(|e| e.to_string())?
    } else {
        (0..count)
            .map(|_| catalog.draw(&mut rng))
            .collect::<Result<_, _>>()
            .map_err(|e| e.to_string())?
    };

    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let stance = with_stance.then(|| Stance::random(&mut rng));
        print!("{}", render::terminal(card, stance));
    }

    if count > 1 {
        println!();
        let mode = if unique {
            "without replacement"
        } else {
            "with replacement"
        };
        println!("  {}", format!("{count} cards drawn {mode}").dimmed());
    }

    Ok(())
}
