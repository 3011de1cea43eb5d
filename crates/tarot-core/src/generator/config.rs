//! Word-table configuration for the deck generator.
//!
//! The JSON layout keeps the key names of the printed deck's original
//! configuration files (`table_verbes`, `lieux`, `sombres_secrets`, ...), so
//! existing files load unchanged:
//!
//! ```json
//! {
//!   "card_count": 78,
//!   "title_distribution": { "Yes": 13, "No": 13, "Yes-but": 13 },
//!   "symbols": ["Dagger", "Crown"],
//!   "table_verbes": ["Embrace", "Dig", "Lift"],
//!   "reactions_amical_hostile": ["Recalcitrant / Violent"]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::card::{ReactionPair, Title};
use crate::error::{TarotError, TarotResult};

/// Template configuration written by `tarot init`.
pub const TEMPLATE: &str = include_str!("../../data/deck_config.json");

/// Default number of cards generated when the configuration names none.
pub const DEFAULT_CARD_COUNT: usize = 100;

/// Default deck name.
pub const DEFAULT_DECK_NAME: &str = "Le Tarot des Royaumes Oubliés";

/// Word document written when `create_docx` is set without a `docx_file`.
pub const DEFAULT_DOCX_FILE: &str = "deck_oracle.docx";

/// Where generated decks are written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Framed text rendering of the deck.
    pub txt_file: Option<PathBuf>,
    /// Loadable JSON catalog.
    pub json_file: Option<PathBuf>,
    /// Word document with symbol images.
    pub docx_file: Option<PathBuf>,
    /// Set to `false` to skip the Word document even when `docx_file` is set.
    pub create_docx: Option<bool>,
}

impl OutputConfig {
    /// Where to write the Word document, if anywhere.
    ///
    /// `create_docx: false` disables it, `create_docx: true` alone falls back
    /// to [`DEFAULT_DOCX_FILE`].
    pub fn docx_path(&self) -> Option<PathBuf> {
        match (self.create_docx, &self.docx_file) {
            (Some(false), _) => None,
            (_, Some(path)) => Some(path.clone()),
            (Some(true), None) => Some(PathBuf::from(DEFAULT_DOCX_FILE)),
            (None, None) => None,
        }
    }
}

/// Deck generator configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckConfig {
    /// Display name of the generated deck.
    #[serde(default)]
    pub deck_name: Option<String>,
    /// Number of cards to generate.
    #[serde(default)]
    pub card_count: Option<usize>,
    /// Answer class → number of cards (or relative weight).
    #[serde(default)]
    pub title_distribution: Option<BTreeMap<String, u32>>,
    /// Emblems.
    #[serde(default)]
    pub symbols: Option<Vec<String>>,
    /// Action prompts.
    #[serde(default, rename = "table_verbes")]
    pub verbs: Option<Vec<String>>,
    /// Places.
    #[serde(default, rename = "lieux")]
    pub places: Option<Vec<String>>,
    /// Characters.
    #[serde(default, rename = "personnages")]
    pub characters: Option<Vec<String>>,
    /// Objects.
    #[serde(default, rename = "objets")]
    pub objects: Option<Vec<String>>,
    /// Motivations.
    #[serde(default)]
    pub motivations: Option<Vec<String>>,
    /// Character traits.
    #[serde(default)]
    pub traits: Option<Vec<String>>,
    /// Dark secrets.
    #[serde(default, rename = "sombres_secrets")]
    pub secrets: Option<Vec<String>>,
    /// Friendly/hostile reaction pairs.
    #[serde(default, rename = "reactions_amical_hostile")]
    pub reactions: Option<Vec<ReactionPair>>,
    /// Relations to the player characters.
    #[serde(default, rename = "relations_pj_pnj")]
    pub relations: Option<Vec<String>>,
    /// Optional emotions table.
    #[serde(default)]
    pub emotions: Vec<String>,
    /// Optional appearances table.
    #[serde(default)]
    pub appearances: Vec<String>,
    /// Optional border themes table.
    #[serde(default)]
    pub borders: Vec<String>,
    /// Output files.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Validated, borrowed view of the required tables.
pub(crate) struct Tables<'a> {
    pub distribution: Vec<(Title, u32)>,
    pub symbols: &'a [String],
    pub verbs: &'a [String],
    pub places: &'a [String],
    pub characters: &'a [String],
    pub objects: &'a [String],
    pub motivations: &'a [String],
    pub traits: &'a [String],
    pub secrets: &'a [String],
    pub reactions: &'a [ReactionPair],
    pub relations: &'a [String],
}

impl DeckConfig {
    /// Parse a JSON configuration.
    pub fn load(source: &str) -> TarotResult<Self> {
        serde_json::from_str(source).map_err(|e| TarotError::InvalidConfig(e.to_string()))
    }

    /// Read and parse a configuration file.
    pub fn load_file(path: &Path) -> TarotResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| TarotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load(&source)
    }

    /// The configured card count, or [`DEFAULT_CARD_COUNT`].
    pub fn card_count(&self) -> usize {
        self.card_count.unwrap_or(DEFAULT_CARD_COUNT)
    }

    /// The configured deck name, or [`DEFAULT_DECK_NAME`].
    pub fn deck_name(&self) -> &str {
        self.deck_name.as_deref().unwrap_or(DEFAULT_DECK_NAME)
    }

    /// Check that every required table is present and non-empty.
    ///
    /// All problems are reported in a single error.
    pub fn validate(&self) -> TarotResult<()> {
        self.tables().map(|_| ())
    }

    pub(crate) fn tables(&self) -> TarotResult<Tables<'_>> {
        let mut missing = Vec::new();
        let mut empty = Vec::new();

        match &self.title_distribution {
            None => missing.push("title_distribution"),
            Some(d) if d.is_empty() => empty.push("title_distribution"),
            Some(_) => {}
        }

        let symbols = table(&self.symbols, "symbols", &mut missing, &mut empty);
        let verbs = table(&self.verbs, "table_verbes", &mut missing, &mut empty);
        let places = table(&self.places, "lieux", &mut missing, &mut empty);
        let characters = table(&self.characters, "personnages", &mut missing, &mut empty);
        let objects = table(&self.objects, "objets", &mut missing, &mut empty);
        let motivations = table(&self.motivations, "motivations", &mut missing, &mut empty);
        let traits = table(&self.traits, "traits", &mut missing, &mut empty);
        let secrets = table(&self.secrets, "sombres_secrets", &mut missing, &mut empty);
        let reactions = table(
            &self.reactions,
            "reactions_amical_hostile",
            &mut missing,
            &mut empty,
        );
        let relations = table(&self.relations, "relations_pj_pnj", &mut missing, &mut empty);

        if !missing.is_empty() || !empty.is_empty() {
            let mut parts = Vec::new();
            if !missing.is_empty() {
                parts.push(format!("missing keys: {}", missing.join(", ")));
            }
            if !empty.is_empty() {
                parts.push(format!("empty keys: {}", empty.join(", ")));
            }
            return Err(TarotError::InvalidConfig(parts.join("; ")));
        }

        let mut distribution = Vec::new();
        for (name, weight) in self.title_distribution.iter().flatten() {
            let title = Title::parse(name).ok_or_else(|| {
                TarotError::InvalidConfig(format!("unknown title in title_distribution: \"{name}\""))
            })?;
            distribution.push((title, *weight));
        }
        distribution.sort_by_key(|(title, _)| *title);
        if distribution.iter().all(|(_, weight)| *weight == 0) {
            return Err(TarotError::InvalidConfig(
                "title_distribution weights are all zero".to_string(),
            ));
        }

        Ok(Tables {
            distribution,
            symbols,
            verbs,
            places,
            characters,
            objects,
            motivations,
            traits,
            secrets,
            reactions,
            relations,
        })
    }
}

fn table<'a, T>(
    list: &'a Option<Vec<T>>,
    key: &'static str,
    missing: &mut Vec<&'static str>,
    empty: &mut Vec<&'static str>,
) -> &'a [T] {
    match list {
        None => {
            missing.push(key);
            &[]
        }
        Some(items) if items.is_empty() => {
            empty.push(key);
            &[]
        }
        Some(items) => items,
    }
}
