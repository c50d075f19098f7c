//! People: `@person` sigil tokens and "with <Name>" phrases.

use crate::recognizers::is_calendar_word;
use crate::tag::{TagType, TagValue};
use crate::{Candidate, Context, Span};

const NAME: &str = "person";

const SIGIL_CONFIDENCE: f64 = 0.97;
/// "with <Name>" is a guess — the capitalized word may be a project, a
/// place, anything. Ranked below every sigil and address pattern.
const WITH_CONFIDENCE: f64 = 0.6;

pub(crate) fn recognize(text: &str, _context: &Context) -> Vec<Candidate> {
    let mut out = Vec::new();

    for caps in regex!(r"@([A-Za-z][A-Za-z0-9._-]*)").captures_iter(text) {
        let m = caps.get(0).unwrap();
        let token = caps.get(1).unwrap().as_str();
        out.push(Candidate {
            tag_type: TagType::Person,
            value: TagValue::Text(token.to_string()),
            span: Span { start: m.start(), end: m.end() },
            display: format!("@{token}"),
            confidence: SIGIL_CONFIDENCE,
            recognizer: NAME,
        });
    }

    // "with John", "with Mary Jane". The span keeps the connector (so title
    // cleanup removes the whole phrase); value and display carry the name.
    for caps in regex!(r"\b[Ww]ith\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)\b").captures_iter(text) {
        let whole = caps.get(0).unwrap();
        let name = caps.get(1).unwrap().as_str();
        if name.split_whitespace().any(is_calendar_word) {
            continue;
        }
        out.push(Candidate {
            tag_type: TagType::Person,
            value: TagValue::Text(name.to_string()),
            span: Span { start: whole.start(), end: whole.end() },
            display: name.to_string(),
            confidence: WITH_CONFIDENCE,
            recognizer: NAME,
        });
    }

    out
}
