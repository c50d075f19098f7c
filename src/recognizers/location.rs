//! Locations: prepositional phrases, street addresses, full postal
//! addresses.
//!
//! Three escalating patterns with distinct confidence. Richer patterns score
//! higher, so when they overlap ("1 Infinite Loop" inside
//! "1 Infinite Loop, Cupertino, CA 95014") the conflict resolver keeps the
//! most specific one.

use crate::recognizers::is_calendar_word;
use crate::tag::{TagType, TagValue};
use crate::{Candidate, Context, Span};

const NAME: &str = "location";

/// "at X" is structurally ambiguous with time phrases; lowest confidence.
const PREPOSITION_CONFIDENCE: f64 = 0.55;
const STREET_CONFIDENCE: f64 = 0.8;
const POSTAL_CONFIDENCE: f64 = 0.95;

pub(crate) fn recognize(text: &str, _context: &Context) -> Vec<Candidate> {
    let mut out = Vec::new();

    // (c) Full postal address: street, city, 2-letter state, 5-digit ZIP.
    for m in regex!(r"\b\d{1,5}\s+[A-Za-z][A-Za-z' ]*?,\s*[A-Za-z][A-Za-z' ]*?,\s*[A-Z]{2}\s+\d{5}(?:-\d{4})?\b")
        .find_iter(text)
    {
        out.push(candidate(m.start(), m.end(), collapse_ws(m.as_str()), POSTAL_CONFIDENCE));
    }

    // (b) Street address: house number + name + recognized street suffix.
    for m in regex!(
        r"\b\d{1,5}\s+(?:[A-Z][A-Za-z']*\s+){1,3}(?:St|Street|Ave|Avenue|Rd|Road|Blvd|Boulevard|Dr|Drive|Ln|Lane|Ct|Court|Pl|Place|Sq|Square|Ter|Terrace|Pkwy|Parkway|Hwy|Highway|Way|Loop)\b\.?"
    )
    .find_iter(text)
    {
        out.push(candidate(m.start(), m.end(), collapse_ws(m.as_str()), STREET_CONFIDENCE));
    }

    // (a) Prepositional phrase: "at/in <Capitalized Phrase>". The span keeps
    // the preposition (so title cleanup removes the whole phrase); the
    // display drops it.
    for caps in regex!(r"\b(?:[Aa]t|[Ii]n)\s+([A-Z][A-Za-z']*(?:\s+[A-Z][A-Za-z']*)*)").captures_iter(text) {
        let whole = caps.get(0).unwrap();
        let phrase = caps.get(1).unwrap().as_str();
        // "in January", "at Friday" belong to the datetime vocabulary.
        if phrase.split_whitespace().next().is_some_and(is_calendar_word) {
            continue;
        }
        out.push(candidate(whole.start(), whole.end(), phrase.to_string(), PREPOSITION_CONFIDENCE));
    }

    out
}

fn candidate(start: usize, end: usize, display: String, confidence: f64) -> Candidate {
    Candidate {
        tag_type: TagType::Location,
        value: TagValue::Text(display.clone()),
        span: Span { start, end },
        display,
        confidence,
        recognizer: NAME,
    }
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str) -> Vec<(String, f64)> {
        recognize(text, &Context::default())
            .into_iter()
            .map(|c| (text[c.span.start..c.span.end].to_string(), c.confidence))
            .collect()
    }

    #[test]
    fn prepositional_phrase_captures_the_capitalized_run() {
        let found = recognize("Lunch at Central Park", &Context::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].display, "Central Park");
        assert_eq!(found[0].confidence, PREPOSITION_CONFIDENCE);
    }

    #[test]
    fn street_address_beats_nothing_but_scores_medium() {
        let found = spans("Meet at 123 Main St, bring docs");
        assert!(found.iter().any(|(s, c)| s == "123 Main St" && *c == STREET_CONFIDENCE));
    }

    #[test]
    fn full_postal_address_scores_highest() {
        let found = spans("Ship to 1 Infinite Loop, Cupertino, CA 95014");
        let postal = found.iter().find(|(_, c)| *c == POSTAL_CONFIDENCE).unwrap();
        assert!(postal.0.contains("Infinite Loop"));
        assert!(postal.0.contains("95014"));
        // The street prefix also matches on its own; the resolver will
        // prefer the richer pattern by confidence.
        assert!(found.iter().any(|(_, c)| *c == STREET_CONFIDENCE));
        assert!(POSTAL_CONFIDENCE > PREPOSITION_CONFIDENCE);
    }

    #[test]
    fn calendar_words_are_not_locations() {
        assert!(recognize("meet in January", &Context::default()).is_empty());
        assert!(recognize("done at Noon", &Context::default()).is_empty());
    }

    #[test]
    fn lowercase_phrases_do_not_match() {
        assert!(recognize("sit at home", &Context::default()).is_empty());
    }
}
