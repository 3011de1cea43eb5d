//! A shuffled draw pile over a catalog.
//!
//! Unlike [`CardCatalog::draw`], a [`Deck`] never repeats a card until every
//! card has been dealt, matching a physical deck that is only reshuffled once
//! it runs out.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::card::Card;
use crate::catalog::CardCatalog;
use crate::config::DrawConfig;
use crate::error::{TarotError, TarotResult};

/// A draw pile borrowing its cards from a [`CardCatalog`].
pub struct Deck<'a> {
    catalog: &'a CardCatalog,
    pile: Vec<u32>,
    drawn: usize,
    auto_reshuffle: bool,
    rng: StdRng,
}

impl<'a> Deck<'a> {
    /// Create a freshly shuffled deck.
    pub fn new(catalog: &'a CardCatalog, config: DrawConfig) -> Self {
        let mut deck = Self {
            catalog,
            pile: Vec::with_capacity(catalog.len()),
            drawn: 0,
            auto_reshuffle: config.auto_reshuffle,
            rng: config.rng(),
        };
        deck.reshuffle();
        deck
    }

    /// Return every dealt card to the pile and shuffle it.
    pub fn reshuffle(&mut self) {
        self.pile.clear();
        self.pile.extend(self.catalog.ids());
        self.pile.shuffle(&mut self.rng);
        self.drawn = 0;
        debug!(cards = self.pile.len(), "reshuffled deck");
    }

    /// Cards left in the pile.
    pub fn remaining(&self) -> usize {
        self.pile.len()
    }

    /// Cards dealt since the last reshuffle.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Deal the top card.
    ///
    /// An exhausted pile is reshuffled first when `auto_reshuffle` is set,
    /// otherwise the draw fails with [`TarotError::InsufficientCards`].
    pub fn draw(&mut self) -> TarotResult<&'a Card> {
        if self.catalog.is_empty() {
            return Err(TarotError::EmptyCatalog);
        }
        if self.pile.is_empty() {
            if !self.auto_reshuffle {
                return Err(TarotError::InsufficientCards {
                    requested: 1,
                    available: 0,
                });
            }
            self.reshuffle();
        }

        let id = self.pile.pop().ok_or(TarotError::EmptyCatalog)?;
        self.drawn += 1;
        let catalog = self.catalog;
        catalog.by_id(id)
    }

    /// Deal `n` cards from the pile without reshuffling mid-deal.
    pub fn deal(&mut self, n: usize) -> TarotResult<Vec<&'a Card>> {
        if n > self.pile.len() {
            return Err(TarotError::InsufficientCards {
                requested: n,
                available: self.pile.len(),
            });
        }
        (0..n).map(|_| self.draw()).collect()
    }
}
