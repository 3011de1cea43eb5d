//! Text renderings of cards and catalogs.

use colored::Colorize;
use tarot_core::{Card, CardCatalog, Stance, Title};

/// Label/value lines shared by the plain-text renderings, in print order.
pub(crate) fn fields(card: &Card) -> Vec<(&'static str, String)> {
    let mut out = vec![
        ("Symbol", card.symbol.clone()),
        ("Verbs", card.verbs.join(", ")),
        ("Place", card.place.clone()),
        ("Character", card.character.clone()),
        ("Object", card.object.clone()),
    ];
    if !card.emotions.is_empty() {
        out.push(("Emotions", card.emotions.join(", ")));
    }
    if let Some(ref appearance) = card.appearance {
        out.push(("Appearance", appearance.clone()));
    }
    out.push(("Motivation", card.motivation.clone()));
    out.push(("Traits", card.traits.join(", ")));
    out.push(("Secret", card.secret.clone()));
    out.push(("Relation", card.relation.clone()));
    out.push(("Reaction (friendly/hostile)", card.reaction.to_string()));
    if !card.themes.is_empty() {
        out.push(("Themes", card.themes.join(", ")));
    }
    out
}

pub(crate) fn heading(card: &Card) -> String {
    format!("Card {} — {}", card.id, card.title)
}

/// Render a card inside a frame of asterisks, as printed on the deck sheets.
pub fn framed(card: &Card) -> String {
    let mut lines = vec![heading(card)];
    lines.extend(
        fields(card)
            .into_iter()
            .map(|(label, value)| format!("{label} : {value}")),
    );

    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let border = "*".repeat(width + 4);

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    for line in &lines {
        out.push_str(&format!("* {line:<width$} *\n"));
    }
    out.push_str(&border);
    out.push('\n');
    out
}

/// Render a whole catalog as a printable text deck.
pub fn text_deck(catalog: &CardCatalog, default_name: &str) -> String {
    let name = catalog.name().unwrap_or(default_name);
    deck_with_header(catalog, &name.to_uppercase())
}

/// Render a freshly generated deck, with the header printed on generated sheets.
pub fn generated_deck(catalog: &CardCatalog, default_name: &str) -> String {
    let name = catalog.name().unwrap_or(default_name);
    deck_with_header(catalog, &format!("{} — DECK GÉNÉRÉ", name.to_uppercase()))
}

fn deck_with_header(catalog: &CardCatalog, header: &str) -> String {
    let mut out = String::new();
    out.push_str(header);
    out.push('\n');
    out.push_str(&"=".repeat(header.chars().count()));
    out.push_str("\n\n");
    for card in catalog {
        out.push_str(&framed(card));
        out.push('\n');
    }
    out
}

/// Render a whole catalog as Markdown.
pub fn markdown(catalog: &CardCatalog, default_name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", catalog.name().unwrap_or(default_name)));

    for card in catalog {
        out.push_str(&format!("## {}\n\n", heading(card)));
        for (label, value) in fields(card) {
            out.push_str(&format!("- **{label}:** {value}\n"));
        }
        out.push('\n');
    }
    out
}

/// Render a card for the terminal.
///
/// When `stance` is given, only the active reaction pole is shown.
pub fn terminal(card: &Card, stance: Option<Stance>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  {} {} [{}]\n",
        format!("Card {}", card.id).dimmed(),
        title_colored(card.title),
        card.symbol.bold()
    ));

    let mut line = |label: &str, value: &str| {
        out.push_str(&format!("  {:<12}{value}\n", format!("{label}:")));
    };

    line("verbs", &card.verbs.join(", "));
    line("place", &card.place);
    line("character", &card.character);
    line("object", &card.object);
    if !card.emotions.is_empty() {
        line("emotions", &card.emotions.join(", "));
    }
    if let Some(ref appearance) = card.appearance {
        line("appearance", appearance);
    }
    line("motivation", &card.motivation);
    line("traits", &card.traits.join(", "));
    line("secret", &card.secret);
    line("relation", &card.relation);
    match stance {
        Some(stance) => line(
            "reaction",
            &format!("{} ({stance})", card.reaction.pick(stance)),
        ),
        None => line("reaction", &card.reaction.to_string()),
    }
    if !card.themes.is_empty() {
        line("themes", &card.themes.join(", "));
    }
    out
}

fn title_colored(title: Title) -> colored::ColoredString {
    let text = title.to_string();
    if title.is_yes() {
        text.green().bold()
    } else {
        text.red().bold()
    }
}
