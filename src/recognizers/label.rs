//! `#label` sigil tokens.

use crate::tag::{TagType, TagValue};
use crate::{Candidate, Context, Span};

const NAME: &str = "label";

/// Sigil syntax is unambiguous, so confidence sits near 1.0.
const SIGIL_CONFIDENCE: f64 = 0.97;

pub(crate) fn recognize(text: &str, _context: &Context) -> Vec<Candidate> {
    regex!(r"#([A-Za-z][A-Za-z0-9_-]*)")
        .captures_iter(text)
        .map(|caps| {
            let m = caps.get(0).unwrap();
            let token = caps.get(1).unwrap().as_str();
            Candidate {
                tag_type: TagType::Label,
                value: TagValue::Text(token.to_string()),
                span: Span { start: m.start(), end: m.end() },
                display: format!("#{}", token.to_ascii_lowercase()),
                confidence: SIGIL_CONFIDENCE,
                recognizer: NAME,
            }
        })
        .collect()
}
