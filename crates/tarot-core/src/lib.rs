//! Card catalog and draw engine for the Tarot oracle deck.
//!
//! Provides the immutable [`CardCatalog`] with uniform draws (with and
//! without replacement), a shuffled [`Deck`] pile with reshuffle semantics,
//! and a word-table [`generator`] that builds new catalogs.

pub mod card;
pub mod catalog;
pub mod config;
pub mod deck;
pub mod error;
pub mod generator;

pub use card::{Card, CardRecord, Nuance, ReactionPair, Stance, Title};
pub use catalog::CardCatalog;
pub use config::DrawConfig;
pub use deck::Deck;
pub use error::{TarotError, TarotResult};
pub use generator::DeckConfig;
