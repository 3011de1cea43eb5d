//! Oracle card records.
//!
//! A [`Card`] pairs an answer class ([`Title`]) with a fixed set of narrative
//! prompts. [`CardRecord`] is the loosely-typed shape read from catalog files;
//! it is validated into a `Card` before it reaches a catalog.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{TarotError, TarotResult};

/// The oracle's answer class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Title {
    /// Plain affirmative.
    Yes,
    /// Plain negative.
    No,
    /// Affirmative, with a complication.
    #[serde(rename = "Yes-but", alias = "Yes, but")]
    YesBut,
    /// Negative, with a complication.
    #[serde(rename = "No-but", alias = "No, but")]
    NoBut,
    /// Affirmative, with an opportunity.
    #[serde(rename = "Yes-and", alias = "Yes, and")]
    YesAnd,
    /// Negative, with an opportunity.
    #[serde(rename = "No-and", alias = "No, and")]
    NoAnd,
}

/// The modifier an answer class puts on its base yes/no.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nuance {
    /// No modifier.
    Plain,
    /// "...but": the answer comes with a cost or twist.
    Complication,
    /// "...and": the answer comes with an extra benefit or escalation.
    Opportunity,
}

impl Title {
    /// Parse an answer class from a user-supplied string.
    ///
    /// Case, punctuation and separators are ignored, so `"yes-but"`,
    /// `"Yes, but"` and `"YES_BUT"` all parse. French spellings from the
    /// printed deck (`"Oui, mais"`, `"Non et"`, ...) are accepted too.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s
            .to_lowercase()
            .replace([',', '-', '_', '.', '…'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        match normalized.as_str() {
            "yes" | "oui" => Some(Self::Yes),
            "no" | "non" => Some(Self::No),
            "yes but" | "oui mais" => Some(Self::YesBut),
            "no but" | "non mais" => Some(Self::NoBut),
            "yes and" | "oui et" => Some(Self::YesAnd),
            "no and" | "non et" => Some(Self::NoAnd),
            _ => None,
        }
    }

    /// All answer classes, plain ones first.
    pub fn all() -> &'static [Self] {
        &[
            Self::Yes,
            Self::No,
            Self::YesBut,
            Self::NoBut,
            Self::YesAnd,
            Self::NoAnd,
        ]
    }

    /// Whether the base answer is affirmative.
    pub fn is_yes(self) -> bool {
        matches!(self, Self::Yes | Self::YesBut | Self::YesAnd)
    }

    /// The modifier attached to the base answer.
    pub fn nuance(self) -> Nuance {
        match self {
            Self::Yes | Self::No => Nuance::Plain,
            Self::YesBut | Self::NoBut => Nuance::Complication,
            Self::YesAnd | Self::NoAnd => Nuance::Opportunity,
        }
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
            Self::YesBut => write!(f, "Yes-but"),
            Self::NoBut => write!(f, "No-but"),
            Self::YesAnd => write!(f, "Yes-and"),
            Self::NoAnd => write!(f, "No-and"),
        }
    }
}

/// Which pole of a reaction is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stance {
    /// The friendly pole.
    Friendly,
    /// The hostile pole.
    Hostile,
}

impl Stance {
    /// Pick a stance with even odds.
    pub fn random(rng: &mut StdRng) -> Self {
        if rng.random_bool(0.5) {
            Self::Friendly
        } else {
            Self::Hostile
        }
    }
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Friendly => write!(f, "friendly"),
            Self::Hostile => write!(f, "hostile"),
        }
    }
}

/// Serialized forms a reaction may take in catalog and configuration files.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ReactionRepr {
    /// `["friendly", "hostile"]`
    Pair(Vec<String>),
    /// `"friendly / hostile"`
    Text(String),
}

/// A friendly/hostile pair of mutually-exclusive reactions.
///
/// Serialized as a two-element array. Also accepts a single
/// `"friendly / hostile"` string when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "[String; 2]", try_from = "ReactionRepr")]
pub struct ReactionPair {
    friendly: String,
    hostile: String,
}

impl ReactionPair {
    /// Create a reaction pair.
    pub fn new(friendly: impl Into<String>, hostile: impl Into<String>) -> Self {
        Self {
            friendly: friendly.into(),
            hostile: hostile.into(),
        }
    }

    /// Parse the `"friendly / hostile"` text form.
    pub fn parse(s: &str) -> Option<Self> {
        let (friendly, hostile) = s.split_once('/')?;
        let (friendly, hostile) = (friendly.trim(), hostile.trim());
        if friendly.is_empty() || hostile.is_empty() || hostile.contains('/') {
            return None;
        }
        Some(Self::new(friendly, hostile))
    }

    /// The friendly pole.
    pub fn friendly(&self) -> &str {
        &self.friendly
    }

    /// The hostile pole.
    pub fn hostile(&self) -> &str {
        &self.hostile
    }

    /// The pole matching `stance`.
    pub fn pick(&self, stance: Stance) -> &str {
        match stance {
            Stance::Friendly => &self.friendly,
            Stance::Hostile => &self.hostile,
        }
    }

    /// Pick a stance at random and return it with its pole.
    pub fn roll(&self, rng: &mut StdRng) -> (Stance, &str) {
        let stance = Stance::random(rng);
        (stance, self.pick(stance))
    }
}

impl std::fmt::Display for ReactionPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.friendly, self.hostile)
    }
}

impl From<ReactionPair> for [String; 2] {
    fn from(pair: ReactionPair) -> Self {
        [pair.friendly, pair.hostile]
    }
}

impl TryFrom<ReactionRepr> for ReactionPair {
    type Error = String;

    fn try_from(repr: ReactionRepr) -> Result<Self, Self::Error> {
        match repr {
            ReactionRepr::Pair(items) => match <[String; 2]>::try_from(items) {
                Ok([friendly, hostile])
                    if !friendly.trim().is_empty() && !hostile.trim().is_empty() =>
                {
                    Ok(Self::new(friendly, hostile))
                }
                Ok(_) => Err("reaction poles must not be empty".to_string()),
                Err(items) => Err(format!(
                    "reaction must have exactly 2 entries, found {}",
                    items.len()
                )),
            },
            ReactionRepr::Text(text) => Self::parse(&text)
                .ok_or_else(|| format!("reaction \"{text}\" is not of the form \"friendly / hostile\"")),
        }
    }
}

/// A single oracle card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Unique 1-based identifier within its catalog.
    pub id: u32,
    /// Answer class.
    pub title: Title,
    /// Thematic emblem.
    pub symbol: String,
    /// Three action prompts.
    pub verbs: [String; 3],
    /// Where the scene happens.
    pub place: String,
    /// Who is involved, possibly a composite such as `"Sorcerer / Giant"`.
    pub character: String,
    /// A notable object.
    pub object: String,
    /// What drives the character.
    pub motivation: String,
    /// Three character traits.
    pub traits: [String; 3],
    /// A dark secret.
    pub secret: String,
    /// Relation to the player characters.
    pub relation: String,
    /// Friendly and hostile reaction candidates.
    pub reaction: ReactionPair,
    /// Two emotions, when the deck carries them.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub emotions: Vec<String>,
    /// Physical appearance, when the deck carries it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appearance: Option<String>,
    /// Dominant themes printed on the card border.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub themes: Vec<String>,
}

/// An unvalidated card as read from a catalog document.
///
/// Every field is optional so that a missing field is reported as a
/// catalog error naming the field, rather than as a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardRecord {
    /// Card id.
    #[serde(alias = "number")]
    pub id: Option<u32>,
    /// Answer class text.
    pub title: Option<String>,
    /// Emblem.
    pub symbol: Option<String>,
    /// Action prompts.
    pub verbs: Option<Vec<String>>,
    /// Place.
    #[serde(alias = "lieu")]
    pub place: Option<String>,
    /// Character.
    #[serde(alias = "personnage")]
    pub character: Option<String>,
    /// Object.
    #[serde(alias = "objet")]
    pub object: Option<String>,
    /// Motivation.
    pub motivation: Option<String>,
    /// Traits.
    pub traits: Option<Vec<String>>,
    /// Secret.
    pub secret: Option<String>,
    /// Relation.
    pub relation: Option<String>,
    /// Reaction, as a pair or `"a / b"` text.
    pub reaction: Option<ReactionRepr>,
    /// Optional emotions.
    #[serde(default)]
    pub emotions: Vec<String>,
    /// Optional appearance.
    pub appearance: Option<String>,
    /// Optional border themes.
    #[serde(default, alias = "borders")]
    pub themes: Vec<String>,
}

impl CardRecord {
    /// Validate this record into a [`Card`].
    ///
    /// `index` is the record's position in its source and is only used for
    /// error reporting.
    pub fn into_card(self, index: usize) -> TarotResult<Card> {
        let id = require(self.id, "id", index)?;
        if id == 0 {
            return Err(TarotError::malformed(index, "id must be at least 1"));
        }

        let title_text = require(self.title, "title", index)?;
        let title = Title::parse(&title_text).ok_or_else(|| {
            TarotError::malformed(index, format!("unknown title \"{title_text}\""))
        })?;

        let verbs = triple(require(self.verbs, "verbs", index)?, "verbs", index)?;
        let traits = triple(require(self.traits, "traits", index)?, "traits", index)?;

        let reaction = ReactionPair::try_from(require(self.reaction, "reaction", index)?)
            .map_err(|reason| TarotError::malformed(index, reason))?;

        if !self.emotions.is_empty() && self.emotions.len() != 2 {
            return Err(TarotError::malformed(
                index,
                format!(
                    "emotions must have exactly 2 entries, found {}",
                    self.emotions.len()
                ),
            ));
        }

        Ok(Card {
            id,
            title,
            symbol: text(self.symbol, "symbol", index)?,
            verbs,
            place: text(self.place, "place", index)?,
            character: text(self.character, "character", index)?,
            object: text(self.object, "object", index)?,
            motivation: text(self.motivation, "motivation", index)?,
            traits,
            secret: text(self.secret, "secret", index)?,
            relation: text(self.relation, "relation", index)?,
            reaction,
            emotions: self.emotions,
            appearance: self.appearance.filter(|a| !a.trim().is_empty()),
            themes: self.themes,
        })
    }
}

impl From<Card> for CardRecord {
    fn from(card: Card) -> Self {
        let [friendly, hostile]: [String; 2] = card.reaction.into();
        Self {
            id: Some(card.id),
            title: Some(card.title.to_string()),
            symbol: Some(card.symbol),
            verbs: Some(card.verbs.into()),
            place: Some(card.place),
            character: Some(card.character),
            object: Some(card.object),
            motivation: Some(card.motivation),
            traits: Some(card.traits.into()),
            secret: Some(card.secret),
            relation: Some(card.relation),
            reaction: Some(ReactionRepr::Pair(vec![friendly, hostile])),
            emotions: card.emotions,
            appearance: card.appearance,
            themes: card.themes,
        }
    }
}

fn require<T>(value: Option<T>, field: &str, index: usize) -> TarotResult<T> {
    value.ok_or_else(|| TarotError::malformed(index, format!("missing field `{field}`")))
}

fn text(value: Option<String>, field: &str, index: usize) -> TarotResult<String> {
    let value = require(value, field, index)?;
    if value.trim().is_empty() {
        return Err(TarotError::malformed(index, format!("field `{field}` is empty")));
    }
    Ok(value)
}

fn triple(items: Vec<String>, field: &str, index: usize) -> TarotResult<[String; 3]> {
    <[String; 3]>::try_from(items).map_err(|items| {
        TarotError::malformed(
            index,
            format!("{field} must have exactly 3 entries, found {}", items.len()),
        )
    })
}
