//! Priority markers: explicit keywords and bang notation.

use crate::tag::{Priority, TagType, TagValue};
use crate::{Candidate, Context, Span};

const NAME: &str = "priority";

/// Explicit keywords score higher than bang markers: "urgent" is
/// unambiguous, "!!" is an inferred convention.
const KEYWORD_CONFIDENCE: f64 = 0.9;
const BANG_CONFIDENCE: f64 = 0.7;

pub(crate) fn recognize(text: &str, _context: &Context) -> Vec<Candidate> {
    let mut out = Vec::new();

    for caps in regex!(r"(?i)\b(urgent|critical|asap|important|(high|medium|med|low)[ -]priority)\b").captures_iter(text)
    {
        let m = caps.get(0).unwrap();
        let level = match caps.get(2).map(|g| g.as_str().to_ascii_lowercase()) {
            Some(level) => match level.as_str() {
                "low" => Priority::Low,
                "medium" | "med" => Priority::Medium,
                _ => Priority::High,
            },
            // urgent / critical / asap / important
            None => Priority::High,
        };
        out.push(candidate(m.start(), m.end(), level, KEYWORD_CONFIDENCE));
    }

    // Standalone bang runs: "!" low, "!!" medium, "!!!" high. The trailing
    // class anchors the run to a token end (the regex crate has no
    // lookahead); the span comes from the capture group alone.
    for caps in regex!(r"(!{1,3})(?:[\s.,;)]|$)").captures_iter(text) {
        let m = caps.get(1).unwrap();
        let level = match m.len() {
            1 => Priority::Low,
            2 => Priority::Medium,
            _ => Priority::High,
        };
        out.push(candidate(m.start(), m.end(), level, BANG_CONFIDENCE));
    }

    out
}

fn candidate(start: usize, end: usize, level: Priority, confidence: f64) -> Candidate {
    Candidate {
        tag_type: TagType::Priority,
        value: TagValue::Priority(level),
        span: Span { start, end },
        display: level.label().to_string(),
        confidence,
        recognizer: NAME,
    }
}
