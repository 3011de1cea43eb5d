//! The card catalog.
//!
//! A [`CardCatalog`] owns every card of a deck, ordered and indexed by id.
//! It is built once and never mutated; draws take a caller-owned RNG so the
//! catalog itself can be shared freely between readers.

use std::collections::HashMap;
use std::path::Path;

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::index;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::card::{Card, CardRecord, Title};
use crate::error::{TarotError, TarotResult};

/// Embedded default catalog.
const BUILTIN_CATALOG: &str = include_str!("../data/builtin.json");

#[derive(Serialize)]
struct CatalogDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    cards: &'a [Card],
}

/// An immutable, id-indexed collection of oracle cards.
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    name: Option<String>,
    cards: Vec<Card>,
    by_id: HashMap<u32, usize>,
}

impl CardCatalog {
    /// Parse a JSON catalog definition.
    ///
    /// Accepts either a bare array of card records or an object with a
    /// `cards` array and an optional `name`. Errors inside a record name the
    /// record and, where it can be found, the offending field.
    pub fn load(source: &str) -> TarotResult<Self> {
        let document: Value =
            serde_json::from_str(source).map_err(|e| document_error(e.to_string()))?;

        let (name, records) = match document {
            Value::Array(records) => (None, records),
            Value::Object(mut fields) => {
                let name = match fields.remove("name") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(name)) => Some(name),
                    Some(_) => return Err(document_error("`name` must be a string")),
                };
                match fields.remove("cards") {
                    Some(Value::Array(records)) => (name, records),
                    Some(_) => return Err(document_error("`cards` must be an array")),
                    None => return Err(document_error("missing `cards` array")),
                }
            }
            _ => {
                return Err(document_error(
                    "expected an array of cards or an object with a `cards` array",
                ));
            }
        };

        let records = records
            .iter()
            .enumerate()
            .map(|(idx, value)| parse_record(idx, value))
            .collect::<TarotResult<Vec<_>>>()?;

        let mut catalog = Self::from_records(records)?;
        catalog.name = name;
        Ok(catalog)
    }

    /// Read and parse a catalog file.
    pub fn load_file(path: &Path) -> TarotResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| TarotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::load(&source)?;
        debug!(path = %path.display(), cards = catalog.len(), "loaded catalog file");
        Ok(catalog)
    }

    /// The catalog embedded in the library.
    pub fn builtin() -> TarotResult<Self> {
        Self::load(BUILTIN_CATALOG)
    }

    /// Validate records into a catalog.
    pub fn from_records(records: Vec<CardRecord>) -> TarotResult<Self> {
        let cards = records
            .into_iter()
            .enumerate()
            .map(|(idx, record)| record.into_card(idx))
            .collect::<TarotResult<Vec<_>>>()?;
        Self::from_cards(cards)
    }

    /// Build a catalog from already-typed cards.
    ///
    /// Fails if an id is zero or appears twice.
    pub fn from_cards(mut cards: Vec<Card>) -> TarotResult<Self> {
        let mut seen: HashMap<u32, usize> = HashMap::with_capacity(cards.len());
        for (idx, card) in cards.iter().enumerate() {
            if card.id == 0 {
                return Err(TarotError::malformed(idx, "id must be at least 1"));
            }
            if let Some(first) = seen.insert(card.id, idx) {
                return Err(TarotError::malformed(
                    idx,
                    format!("id {} already used by record {}", card.id, first + 1),
                ));
            }
        }

        cards.sort_by_key(|c| c.id);
        let by_id = cards.iter().enumerate().map(|(i, c)| (c.id, i)).collect();
        debug!(cards = cards.len(), "built catalog");

        Ok(Self {
            name: None,
            cards,
            by_id,
        })
    }

    /// Attach a display name to the catalog.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, if the source provided one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the catalog holds no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// All ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.cards.iter().map(|c| c.id)
    }

    /// Cards carrying the given answer class.
    pub fn filter_by_title(&self, title: Title) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.title == title).collect()
    }

    /// Look up a card by id.
    pub fn by_id(&self, id: u32) -> TarotResult<&Card> {
        self.by_id
            .get(&id)
            .map(|&idx| &self.cards[idx])
            .ok_or(TarotError::NotFound(id))
    }

    /// Draw one card uniformly at random, with replacement.
    pub fn draw(&self, rng: &mut StdRng) -> TarotResult<&Card> {
        if self.cards.is_empty() {
            return Err(TarotError::EmptyCatalog);
        }
        let card = &self.cards[rng.random_range(0..self.cards.len())];
        debug!(id = card.id, title = %card.title, "drew card");
        Ok(card)
    }

    /// Draw `n` distinct cards in random order.
    pub fn draw_without_replacement(&self, n: usize, rng: &mut StdRng) -> TarotResult<Vec<&Card>> {
        if n > self.cards.len() {
            return Err(TarotError::InsufficientCards {
                requested: n,
                available: self.cards.len(),
            });
        }
        let drawn: Vec<&Card> = index::sample(rng, self.cards.len(), n)
            .into_iter()
            .map(|idx| &self.cards[idx])
            .collect();
        debug!(count = drawn.len(), "drew cards without replacement");
        Ok(drawn)
    }

    /// Serialize the catalog as a pretty-printed JSON document that
    /// [`CardCatalog::load`] reads back.
    pub fn to_json(&self) -> TarotResult<String> {
        let doc = CatalogDocument {
            name: self.name.as_deref(),
            cards: &self.cards,
        };
        serde_json::to_string_pretty(&doc).map_err(TarotError::Serialize)
    }
}

fn document_error(reason: impl Into<String>) -> TarotError {
    TarotError::MalformedCatalog {
        record: None,
        reason: reason.into(),
    }
}

/// Deserialize one record, naming the first field that fails on its own.
fn parse_record(idx: usize, value: &Value) -> TarotResult<CardRecord> {
    CardRecord::deserialize(value).map_err(|e| {
        let field = value.as_object().and_then(|fields| {
            fields.iter().find_map(|(key, field)| {
                let alone = Value::Object(Map::from_iter([(key.clone(), field.clone())]));
                CardRecord::deserialize(&alone).is_err().then_some(key)
            })
        });
        match field {
            Some(key) => TarotError::malformed(idx, format!("field `{key}`: {e}")),
            None => TarotError::malformed(idx, e.to_string()),
        }
    })
}

impl<'a> IntoIterator for &'a CardCatalog {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    use crate::card::ReactionPair;

    const DAGGER: &str = r#"[{
        "id": 1,
        "title": "No",
        "symbol": "Dagger",
        "verbs": ["Embrace", "Dig", "Lift"],
        "place": "Plowed fields",
        "character": "Sorcerer / Giant",
        "object": "Gold coin",
        "motivation": "Knowledge",
        "traits": ["Black", "Stolen", "Easy"],
        "secret": "Responsible for a deadly fire",
        "relation": "Guide",
        "reaction": ["Recalcitrant", "Violent"]
    }]"#;

    fn card(id: u32, title: Title) -> Card {
        Card {
            id,
            title,
            symbol: format!("Symbol {id}"),
            verbs: ["Seek".into(), "Hide".into(), "Break".into()],
            place: "Crossroads".into(),
            character: "Wanderer".into(),
            object: "Lantern".into(),
            motivation: "Revenge".into(),
            traits: ["Proud".into(), "Tired".into(), "Honest".into()],
            secret: "Owes a debt".into(),
            relation: "Stranger".into(),
            reaction: ReactionPair::new("Helpful", "Suspicious"),
            emotions: Vec::new(),
            appearance: None,
            themes: Vec::new(),
        }
    }

    fn catalog_of(size: u32) -> CardCatalog {
        let titles = Title::all();
        CardCatalog::from_cards(
            (1..=size)
                .map(|id| card(id, titles[id as usize % titles.len()]))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn single_card_catalog_end_to_end() {
        let catalog = CardCatalog::load(DAGGER).unwrap();
        let expected = Card {
            id: 1,
            title: Title::No,
            symbol: "Dagger".into(),
            verbs: ["Embrace".into(), "Dig".into(), "Lift".into()],
            place: "Plowed fields".into(),
            character: "Sorcerer / Giant".into(),
            object: "Gold coin".into(),
            motivation: "Knowledge".into(),
            traits: ["Black".into(), "Stolen".into(), "Easy".into()],
            secret: "Responsible for a deadly fire".into(),
            relation: "Guide".into(),
            reaction: ReactionPair::new("Recalcitrant", "Violent"),
            emotions: Vec::new(),
            appearance: None,
            themes: Vec::new(),
        };

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(catalog.draw(&mut rng).unwrap(), &expected);
        }
        assert_eq!(catalog.by_id(1).unwrap(), &expected);
    }

    #[test]
    fn load_named_document() {
        let source = format!(r#"{{ "name": "Forgotten Realms", "cards": {DAGGER} }}"#);
        let catalog = CardCatalog::load(&source).unwrap();
        assert_eq!(catalog.name(), Some("Forgotten Realms"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn load_rejects_two_verbs() {
        let source = DAGGER.replace(r#"["Embrace", "Dig", "Lift"]"#, r#"["Embrace", "Dig"]"#);
        let err = CardCatalog::load(&source).unwrap_err();
        assert!(matches!(err, TarotError::MalformedCatalog { record: Some(0), .. }));
    }

    #[test]
    fn load_rejects_duplicate_ids() {
        let err = CardCatalog::from_cards(vec![card(1, Title::Yes), card(1, Title::No)]).unwrap_err();
        assert!(matches!(err, TarotError::MalformedCatalog { record: Some(1), .. }));
        assert!(err.to_string().contains("id 1 already used by record 1"));
    }

    #[test]
    fn load_rejects_duplicate_ids_from_json() {
        let one = DAGGER.trim().trim_start_matches('[').trim_end_matches(']');
        let source = format!("[{one}, {one}]");
        assert!(matches!(
            CardCatalog::load(&source),
            Err(TarotError::MalformedCatalog { .. })
        ));
    }

    #[test]
    fn load_rejects_invalid_json() {
        let err = CardCatalog::load("{ not json").unwrap_err();
        assert!(matches!(err, TarotError::MalformedCatalog { record: None, .. }));
    }

    #[test]
    fn load_names_record_and_field_on_type_error() {
        let err = CardCatalog::load(r#"{"cards":[{"id":"one","title":"No"}]}"#).unwrap_err();
        assert!(matches!(err, TarotError::MalformedCatalog { record: Some(0), .. }));
        let message = err.to_string();
        assert!(message.contains("(record 1)"), "{message}");
        assert!(message.contains("field `id`"), "{message}");
    }

    #[test]
    fn load_names_later_record() {
        let one = DAGGER.trim().trim_start_matches('[').trim_end_matches(']');
        let bad = one.replace(r#""Guide""#, "42");
        let err = CardCatalog::load(&format!("[{one}, {bad}]")).unwrap_err();
        assert!(matches!(err, TarotError::MalformedCatalog { record: Some(1), .. }));
        assert!(err.to_string().contains("field `relation`"), "{err}");
    }

    #[test]
    fn load_rejects_bad_document_shape() {
        for source in [r#"{"name": "x"}"#, r#"{"cards": 3}"#, r#"{"name": 1, "cards": []}"#, "42"] {
            assert!(
                matches!(
                    CardCatalog::load(source),
                    Err(TarotError::MalformedCatalog { record: None, .. })
                ),
                "{source}"
            );
        }
    }

    #[test]
    fn load_file_missing_is_io_error() {
        let err = CardCatalog::load_file(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, TarotError::Io { .. }));
    }

    #[test]
    fn builtin_catalog_loads() {
        let catalog = CardCatalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        for title in Title::all() {
            assert!(
                !catalog.filter_by_title(*title).is_empty(),
                "builtin catalog has no {title} card"
            );
        }
    }

    #[test]
    fn cards_sorted_by_id() {
        let catalog =
            CardCatalog::from_cards(vec![card(3, Title::Yes), card(1, Title::No), card(2, Title::NoAnd)])
                .unwrap();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn by_id_unknown() {
        let catalog = catalog_of(3);
        assert!(matches!(catalog.by_id(4), Err(TarotError::NotFound(4))));
    }

    #[test]
    fn draw_empty_catalog() {
        let catalog = CardCatalog::from_cards(Vec::new()).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(catalog.draw(&mut rng), Err(TarotError::EmptyCatalog)));
    }

    #[test]
    fn draw_is_uniform() {
        let catalog = catalog_of(6);
        let mut rng = StdRng::seed_from_u64(1234);
        let trials = 60_000;
        let mut counts: HashMap<u32, usize> = HashMap::new();
        for _ in 0..trials {
            *counts.entry(catalog.draw(&mut rng).unwrap().id).or_default() += 1;
        }
        let expected = trials / catalog.len();
        for id in catalog.ids() {
            let got = counts.get(&id).copied().unwrap_or(0);
            let diff = got.abs_diff(expected);
            assert!(diff < expected / 10, "card {id}: {got} draws, expected ~{expected}");
        }
    }

    #[test]
    fn draw_is_deterministic_per_seed() {
        let catalog = catalog_of(20);
        let mut rng1 = StdRng::seed_from_u64(9);
        let mut rng2 = StdRng::seed_from_u64(9);
        for _ in 0..10 {
            assert_eq!(catalog.draw(&mut rng1).unwrap().id, catalog.draw(&mut rng2).unwrap().id);
        }
    }

    #[test]
    fn draw_without_replacement_too_many() {
        let catalog = catalog_of(3);
        let mut rng = StdRng::seed_from_u64(0);
        let err = catalog.draw_without_replacement(4, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            TarotError::InsufficientCards {
                requested: 4,
                available: 3
            }
        ));
    }

    #[test]
    fn draw_without_replacement_whole_catalog() {
        let catalog = catalog_of(10);
        let mut rng = StdRng::seed_from_u64(5);
        let mut ids: Vec<u32> = catalog
            .draw_without_replacement(10, &mut rng)
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn draw_without_replacement_order_is_random() {
        let catalog = catalog_of(10);
        let shuffled = (0..20u64).any(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let ids: Vec<u32> = catalog
                .draw_without_replacement(5, &mut rng)
                .unwrap()
                .iter()
                .map(|c| c.id)
                .collect();
            ids.windows(2).any(|w| w[0] > w[1])
        });
        assert!(shuffled, "draws always came back in ascending id order");
    }

    #[test]
    fn draw_without_replacement_zero() {
        let catalog = CardCatalog::default();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(catalog.draw_without_replacement(0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn json_round_trip_keeps_cards() {
        let catalog = catalog_of(4).with_name("Test deck");
        let json = catalog.to_json().unwrap();
        let back = CardCatalog::load(&json).unwrap();
        assert_eq!(back.name(), Some("Test deck"));
        assert_eq!(back.iter().collect::<Vec<_>>(), catalog.iter().collect::<Vec<_>>());
    }

    proptest! {
        #[test]
        fn by_id_returns_matching_card(ids in proptest::collection::hash_set(1u32..10_000, 0..40)) {
            let cards: Vec<Card> = ids.iter().map(|&id| card(id, Title::Yes)).collect();
            let catalog = CardCatalog::from_cards(cards).unwrap();
            for id in &ids {
                prop_assert_eq!(catalog.by_id(*id).unwrap().id, *id);
            }
        }

        #[test]
        fn draw_without_replacement_is_distinct(size in 1u32..60, n in 0usize..60, seed in any::<u64>()) {
            let catalog = catalog_of(size);
            let mut rng = StdRng::seed_from_u64(seed);
            match catalog.draw_without_replacement(n, &mut rng) {
                Ok(cards) => {
                    prop_assert_eq!(cards.len(), n);
                    let unique: std::collections::HashSet<u32> = cards.iter().map(|c| c.id).collect();
                    prop_assert_eq!(unique.len(), n);
                }
                Err(TarotError::InsufficientCards { requested, available }) => {
                    prop_assert!(n > size as usize);
                    prop_assert_eq!(requested, n);
                    prop_assert_eq!(available, size as usize);
                }
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }
    }
}
