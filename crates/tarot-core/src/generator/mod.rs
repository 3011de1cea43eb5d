//! Deck generator.
//!
//! Builds a catalog by picking every card field at random from the word
//! tables of a [`DeckConfig`], with answer classes following the
//! configured title distribution.

pub mod config;
pub mod titles;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::card::Card;
use crate::catalog::CardCatalog;
use crate::error::{TarotError, TarotResult};

pub use config::{DeckConfig, OutputConfig};
pub use titles::{build_title_pool, pick_multiple};

/// Most themes printed on one card border.
const MAX_THEMES: usize = 12;

/// Generate a catalog of `count` cards with ids `1..=count`.
pub fn generate(config: &DeckConfig, count: usize, rng: &mut StdRng) -> TarotResult<CardCatalog> {
    if count == 0 {
        return Err(TarotError::InvalidConfig(
            "card count must be greater than zero".to_string(),
        ));
    }
    let id_limit = u32::try_from(count)
        .map_err(|_| TarotError::InvalidConfig(format!("card count {count} is too large")))?;

    let tables = config.tables()?;
    let titles = build_title_pool(&tables.distribution, count, rng)?;
    debug!(count, titles = titles.len(), "built title pool");

    let theme_count = config.borders.len().min(MAX_THEMES);
    let mut cards = Vec::with_capacity(count);

    for (id, title) in (1..=id_limit).zip(titles) {
        let verbs = triple(pick_multiple(tables.verbs, 3, rng), "table_verbes")?;
        let traits = triple(pick_multiple(tables.traits, 3, rng), "traits")?;

        cards.push(Card {
            id,
            title,
            symbol: pick(tables.symbols, rng).clone(),
            verbs,
            place: pick(tables.places, rng).clone(),
            character: pick(tables.characters, rng).clone(),
            object: pick(tables.objects, rng).clone(),
            motivation: pick(tables.motivations, rng).clone(),
            traits,
            secret: pick(tables.secrets, rng).clone(),
            relation: pick(tables.relations, rng).clone(),
            reaction: pick(tables.reactions, rng).clone(),
            emotions: pick_multiple(&config.emotions, 2, rng),
            appearance: (!config.appearances.is_empty())
                .then(|| pick(&config.appearances, rng).clone()),
            themes: pick_multiple(&config.borders, theme_count, rng),
        });
    }

    info!(cards = cards.len(), deck = config.deck_name(), "generated deck");
    Ok(CardCatalog::from_cards(cards)?.with_name(config.deck_name()))
}

/// Pick one entry from a validated, non-empty table.
fn pick<'a, T>(list: &'a [T], rng: &mut StdRng) -> &'a T {
    &list[rng.random_range(0..list.len())]
}

fn triple(items: Vec<String>, key: &str) -> TarotResult<[String; 3]> {
    <[String; 3]>::try_from(items)
        .map_err(|_| TarotError::InvalidConfig(format!("{key} must not be empty")))
}
