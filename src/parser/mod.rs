// Natural language entry parser
//
// Turns sentences like "Daniel Craig wears a Rolex Submariner in Skyfall
// (2012)" into a structured record ready for insertion.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::constants::{BRAND_LEXICON, DEFAULT_NARRATIVE, DEFAULT_VERIFICATION};
use crate::error::{FilmWatchError, Result};

/// Structured record extracted from one free-text entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedEntry {
    pub actor: String,
    pub character: String,
    pub brand: String,
    pub model: String,
    pub title: String,
    pub year: i32,
    pub verification: String,
    pub narrative: String,
}

// Sentence shapes, tried in this order. First match wins; there is no
// fallback scoring.
//
// Shape A: "<actor> wears a <watch> [watch] in [the] <year> [word] <title>"
const SHAPE_YEAR_BEFORE_TITLE: &str =
    r"^(.+?)\s+(?:wears?|wearing)\s+(?:a|an)\s+(.+?)\s+(?:watch\s+)?in\s+(?:the\s+)?(\d{4})\s+(?:\w+\s+)?(.+?)$";
// Shape B: "<actor> wears a <watch> in <title> (<year>)"
const SHAPE_YEAR_IN_PARENS: &str =
    r"^(.+?)\s+(?:wears?|wearing)\s+(?:a|an)\s+(.+?)\s+in\s+(.+?)\s+\((\d{4})\)$";
// Shape C: "In <title> (<year>), <actor> as <character> wears a <watch>"
const SHAPE_FILM_FIRST: &str =
    r"^In\s+(.+?)\s+\((\d{4})\),\s+(.+?)\s+(?:as|plays)\s+(.+?)\s+(?:wears?|wearing)\s+(?:a|an)\s+(.+?)$";

fn shape_regex(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}

/// Parse one free-text entry into a structured record.
///
/// Fails with `FilmWatchError::Parse` when no sentence shape matches.
pub fn parse_entry(text: &str) -> Result<ParsedEntry> {
    // Trailing periods are sentence punctuation; internal ones ("Dr. No",
    // "Ref. 6538") must survive.
    let text = text.trim_end_matches('.');

    let (actor, character, watch_phrase, title, year) = match_shape(text)?;

    let (brand, model) = split_watch_phrase(&watch_phrase)?;

    // No shape captured a character: fall back to the actor's surname.
    let character = match character {
        Some(c) => c,
        None => actor
            .split_whitespace()
            .last()
            .unwrap_or_default()
            .to_string(),
    };

    Ok(ParsedEntry {
        actor,
        character,
        brand,
        model,
        title,
        year,
        verification: DEFAULT_VERIFICATION.to_string(),
        narrative: DEFAULT_NARRATIVE.to_string(),
    })
}

/// Try the sentence shapes in priority order.
/// Returns (actor, character, watch_phrase, title, year); the character is
/// only captured by the film-first shape.
fn match_shape(text: &str) -> Result<(String, Option<String>, String, String, i32)> {
    if let Some(caps) = shape_regex(SHAPE_YEAR_BEFORE_TITLE)?.captures(text) {
        return Ok((
            group(&caps, 1),
            None,
            group(&caps, 2),
            group(&caps, 4),
            parse_year(&group(&caps, 3))?,
        ));
    }

    if let Some(caps) = shape_regex(SHAPE_YEAR_IN_PARENS)?.captures(text) {
        return Ok((
            group(&caps, 1),
            None,
            group(&caps, 2),
            group(&caps, 3),
            parse_year(&group(&caps, 4))?,
        ));
    }

    if let Some(caps) = shape_regex(SHAPE_FILM_FIRST)?.captures(text) {
        return Ok((
            group(&caps, 3),
            Some(group(&caps, 4)),
            group(&caps, 5),
            group(&caps, 1),
            parse_year(&group(&caps, 2))?,
        ));
    }

    Err(FilmWatchError::Parse("could not parse entry".to_string()))
}

fn group(caps: &regex::Captures, index: usize) -> String {
    caps.get(index)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

fn parse_year(token: &str) -> Result<i32> {
    token
        .parse()
        .map_err(|_| FilmWatchError::Parse(format!("invalid year: {}", token)))
}

/// Split a watch phrase into (brand, model) using the brand lexicon.
///
/// Tried in order: an explicit " by <Brand>" / " from <Brand>" suffix, a
/// lexicon brand as phrase prefix, then a plain first-word split. The scan
/// honors lexicon order, so multi-word brands win over their substrings.
/// The first-word fallback is known to misfire on descriptors; such rows
/// are repaired later by fix_misassigned_brands.
fn split_watch_phrase(watch_phrase: &str) -> Result<(String, String)> {
    let phrase_lower = watch_phrase.to_lowercase();

    for brand in BRAND_LEXICON {
        let brand_lower = brand.to_lowercase();
        if phrase_lower.contains(&format!(" by {}", brand_lower)) {
            let model = strip_linked_brand(watch_phrase, "by", brand)?;
            return Ok((brand.to_string(), model));
        }
        if phrase_lower.contains(&format!(" from {}", brand_lower)) {
            let model = strip_linked_brand(watch_phrase, "from", brand)?;
            return Ok((brand.to_string(), model));
        }
    }

    for brand in BRAND_LEXICON {
        if phrase_lower.starts_with(&brand.to_lowercase()) {
            let model = watch_phrase
                .get(brand.len()..)
                .unwrap_or_default()
                .trim()
                .to_string();
            return Ok((brand.to_string(), model));
        }
    }

    // A lone token carries no brand information; it is stored as both.
    match watch_phrase.split_once(char::is_whitespace) {
        Some((first, rest)) => Ok((first.to_string(), rest.trim().to_string())),
        None => Ok((watch_phrase.to_string(), watch_phrase.to_string())),
    }
}

/// Remove " by <Brand>" / " from <Brand>" from the phrase, case-insensitively.
fn strip_linked_brand(watch_phrase: &str, link: &str, brand: &str) -> Result<String> {
    let re = RegexBuilder::new(&format!(" {} {}", link, regex::escape(brand)))
        .case_insensitive(true)
        .build()?;
    Ok(re.replace_all(watch_phrase, "").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_in_parens_shape() {
        let entry = parse_entry("Daniel Craig wears a Rolex Submariner in Skyfall (2012)").unwrap();
        assert_eq!(entry.actor, "Daniel Craig");
        assert_eq!(entry.character, "Craig");
        assert_eq!(entry.brand, "Rolex");
        assert_eq!(entry.model, "Submariner");
        assert_eq!(entry.title, "Skyfall");
        assert_eq!(entry.year, 2012);
        assert_eq!(entry.verification, "Confirmed");
        assert_eq!(entry.narrative, "Watch worn in film.");
    }

    #[test]
    fn test_film_first_shape_with_character() {
        let entry =
            parse_entry("In Dr. No (1962), Sean Connery as James Bond wears a Rolex Submariner")
                .unwrap();
        assert_eq!(entry.title, "Dr. No");
        assert_eq!(entry.year, 1962);
        assert_eq!(entry.actor, "Sean Connery");
        assert_eq!(entry.character, "James Bond");
        assert_eq!(entry.brand, "Rolex");
        assert_eq!(entry.model, "Submariner");
    }

    #[test]
    fn test_film_first_shape_plays_variant() {
        let entry = parse_entry(
            "In Le Mans (1971), Steve McQueen plays Michael Delaney wearing a Heuer Monaco",
        )
        .unwrap();
        assert_eq!(entry.character, "Michael Delaney");
        assert_eq!(entry.brand, "Heuer");
        assert_eq!(entry.model, "Monaco");
    }

    #[test]
    fn test_year_before_title_shape() {
        let entry =
            parse_entry("Sean Connery wears a Rolex Submariner watch in the 1962 film Dr. No.")
                .unwrap();
        assert_eq!(entry.actor, "Sean Connery");
        assert_eq!(entry.title, "Dr. No");
        assert_eq!(entry.year, 1962);
        assert_eq!(entry.brand, "Rolex");
        assert_eq!(entry.model, "Submariner");
        assert_eq!(entry.character, "Connery");
    }

    #[test]
    fn test_year_before_title_without_markers() {
        // No "watch", no "the", no filler word before the title
        let entry = parse_entry("Bill Murray wears a Timex Ironman in 1993 Groundhog Day").unwrap();
        assert_eq!(entry.year, 1993);
        // The optional filler word eats the first title token; a known quirk
        // of the year-before-title shape.
        assert_eq!(entry.title, "Day");
        assert_eq!(entry.brand, "Timex");
        assert_eq!(entry.model, "Ironman");
    }

    #[test]
    fn test_brand_by_suffix() {
        let entry = parse_entry("Daniel Craig wears a Submariner by Rolex in Skyfall (2012)").unwrap();
        assert_eq!(entry.brand, "Rolex");
        assert_eq!(entry.model, "Submariner");
    }

    #[test]
    fn test_brand_from_suffix() {
        let entry =
            parse_entry("Ryan Gosling wears a Speedmaster from Omega in First Man (2018)").unwrap();
        assert_eq!(entry.brand, "Omega");
        assert_eq!(entry.model, "Speedmaster");
    }

    #[test]
    fn test_multiword_brand_wins_over_substring() {
        let entry = parse_entry("Steve McQueen wears a TAG Heuer Monaco in Le Mans (1971)").unwrap();
        assert_eq!(entry.brand, "TAG Heuer");
        assert_eq!(entry.model, "Monaco");
    }

    #[test]
    fn test_unknown_brand_falls_back_to_first_word() {
        let entry =
            parse_entry("Elvis Presley wears an Accutron Spaceview in Viva Las Vegas (1964)")
                .unwrap();
        assert_eq!(entry.brand, "Accutron");
        assert_eq!(entry.model, "Spaceview");
    }

    #[test]
    fn test_single_token_phrase_degenerates() {
        let entry = parse_entry("Al Pacino wears a Chronograph in Heat (1995)").unwrap();
        assert_eq!(entry.brand, "Chronograph");
        assert_eq!(entry.model, "Chronograph");
    }

    #[test]
    fn test_case_insensitive_matching_canonicalizes_brand() {
        let entry = parse_entry("daniel craig WEARS a rolex submariner in skyfall (2012)").unwrap();
        // The lexicon entry supplies the canonical brand spelling; the model
        // keeps the input casing.
        assert_eq!(entry.brand, "Rolex");
        assert_eq!(entry.model, "submariner");
        assert_eq!(entry.character, "craig");
    }

    #[test]
    fn test_surname_default_uses_last_token() {
        let entry =
            parse_entry("Benedict Timothy Cumberbatch wears a Jaeger-LeCoultre Reverso in The Imitation Game (2014)")
                .unwrap();
        assert_eq!(entry.character, "Cumberbatch");
        assert_eq!(entry.brand, "Jaeger-LeCoultre");
        assert_eq!(entry.model, "Reverso");
    }

    #[test]
    fn test_trailing_periods_stripped() {
        let entry = parse_entry("Daniel Craig wears an Omega Seamaster in Casino Royale (2006).").unwrap();
        assert_eq!(entry.title, "Casino Royale");
        assert_eq!(entry.brand, "Omega");
        assert_eq!(entry.model, "Seamaster");
    }

    #[test]
    fn test_unparseable_entry() {
        let err = parse_entry("This sentence has nothing to do with watches").unwrap_err();
        assert!(matches!(err, FilmWatchError::Parse(_)));
    }

    #[test]
    fn test_year_must_be_four_digits() {
        let err = parse_entry("Someone wears a Rolex in Skyfall (12)").unwrap_err();
        assert!(matches!(err, FilmWatchError::Parse(_)));
    }

    #[test]
    fn test_split_watch_phrase_direct() {
        assert_eq!(
            split_watch_phrase("IWC Schaffhausen Big Pilot").unwrap(),
            ("IWC Schaffhausen".to_string(), "Big Pilot".to_string())
        );
        assert_eq!(
            split_watch_phrase("IWC Mark XI").unwrap(),
            ("IWC".to_string(), "Mark XI".to_string())
        );
        assert_eq!(
            split_watch_phrase("gold digital watch").unwrap(),
            ("gold".to_string(), "digital watch".to_string())
        );
    }
}
