//! Pipeline orchestration.
//!
//! Runs the active recognizers over the input, hands the combined candidate
//! list to conflict resolution, and assembles the [`ParseResult`]: clean
//! title (winning spans removed, whitespace collapsed), aggregate
//! confidence, recorded conflicts.
//!
//! Fault isolation: each recognizer runs under `catch_unwind`. A panicking
//! recognizer contributes zero candidates and sets the result-level error;
//! the remaining recognizers still run, so the caller gets the best partial
//! result instead of a crash.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::{Duration, Instant};

use super::conflict;
use super::metrics::{PipelineRun, RecognizerReport, RunMetrics};
use super::trigger::TriggerInfo;
use crate::api::{ParseError, ParseResult};
use crate::tag::ParsedTag;
use crate::{Candidate, Context, Options, Recognizer};

pub(crate) fn run(text: &str, context: &Context, _options: &Options, recognizers: &[Recognizer]) -> PipelineRun {
    let total_start = Instant::now();
    let trigger = TriggerInfo::scan(text);

    let mut candidates: Vec<Candidate> = Vec::new();
    let mut error: Option<ParseError> = None;
    let mut reports = Vec::with_capacity(recognizers.len());

    for recognizer in recognizers {
        if !recognizer.buckets.is_empty() && !trigger.buckets.intersects(recognizer.buckets) {
            log::trace!("recognizer `{}` inactive for this input", recognizer.name);
            reports.push(RecognizerReport {
                name: recognizer.name,
                active: false,
                produced: 0,
                duration: Duration::ZERO,
            });
            continue;
        }

        let started = Instant::now();
        let produced = match catch_unwind(AssertUnwindSafe(|| (recognizer.run)(text, context))) {
            Ok(found) => {
                let before = candidates.len();
                for candidate in found {
                    // A span that is not an exact substring of the input
                    // breaks every downstream invariant; drop it here rather
                    // than poison the result.
                    if !valid_span(text, &candidate) {
                        log::warn!("recognizer `{}` produced an invalid span, dropped", recognizer.name);
                        continue;
                    }
                    candidates.push(candidate);
                }
                candidates.len() - before
            }
            Err(_) => {
                log::warn!("recognizer `{}` panicked; treated as zero candidates", recognizer.name);
                error.get_or_insert(ParseError::RecognizerPanicked(recognizer.name));
                0
            }
        };
        log::debug!("recognizer `{}` produced {produced} candidate(s)", recognizer.name);
        reports.push(RecognizerReport { name: recognizer.name, active: true, produced, duration: started.elapsed() });
    }
    let recognize = total_start.elapsed();

    let resolve_start = Instant::now();
    let resolution = conflict::resolve(text, &candidates);

    let clean_title = clean_title(text, &resolution.winners);
    let confidence = if resolution.winners.is_empty() {
        // An empty parse is not evidence of low confidence.
        1.0
    } else {
        resolution.winners.iter().map(|t| t.confidence).sum::<f64>() / resolution.winners.len() as f64
    };

    let all_candidates: Vec<ParsedTag> =
        candidates.iter().enumerate().map(|(i, c)| conflict::materialize(text, c, (i + 1) as u32)).collect();

    let result = ParseResult {
        clean_title,
        tags: resolution.winners,
        confidence,
        conflicts: resolution.conflicts,
        error: error.map(|e| e.to_string()),
    };

    let resolve = resolve_start.elapsed();
    PipelineRun {
        result,
        all_candidates,
        reports,
        metrics: RunMetrics { total: total_start.elapsed(), recognize, resolve },
    }
}

fn valid_span(text: &str, candidate: &Candidate) -> bool {
    let span = candidate.span;
    span.start < span.end
        && span.end <= text.len()
        && text.is_char_boundary(span.start)
        && text.is_char_boundary(span.end)
}

/// Source text with all winning spans removed, whitespace runs collapsed to
/// single spaces, and the ends trimmed. Winners are sorted and
/// non-overlapping, so a single left-to-right gap walk suffices.
fn clean_title(text: &str, winners: &[ParsedTag]) -> String {
    let mut kept = String::with_capacity(text.len());
    let mut cursor = 0;
    for tag in winners {
        kept.push_str(&text[cursor..tag.start]);
        cursor = tag.end;
    }
    kept.push_str(&text[cursor..]);
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BucketMask;
    use crate::tag::{TagType, TagValue};
    use crate::Span;

    fn noop(_: &str, _: &Context) -> Vec<Candidate> {
        Vec::new()
    }

    fn panicky(_: &str, _: &Context) -> Vec<Candidate> {
        panic!("boom")
    }

    fn whole_word(text: &str, _: &Context) -> Vec<Candidate> {
        text.split_whitespace()
            .filter(|w| w.starts_with('#'))
            .map(|w| {
                let start = w.as_ptr() as usize - text.as_ptr() as usize;
                Candidate {
                    tag_type: TagType::Label,
                    value: TagValue::Text(w[1..].to_string()),
                    span: Span { start, end: start + w.len() },
                    display: w.to_string(),
                    confidence: 0.9,
                    recognizer: "labels",
                }
            })
            .collect()
    }

    fn rec(name: &'static str, run: fn(&str, &Context) -> Vec<Candidate>) -> Recognizer {
        Recognizer { name, buckets: BucketMask::empty(), run }
    }

    #[test]
    fn panicking_recognizer_is_isolated() {
        let recognizers = [rec("broken", panicky), rec("labels", whole_word)];
        let run = run("pay rent #home", &Context::default(), &Options::default(), &recognizers);
        let result = run.result;
        assert_eq!(result.error.as_deref(), Some("recognizer `broken` panicked"));
        // The healthy recognizer still contributed.
        assert_eq!(result.tags.len(), 1);
        assert_eq!(result.tags[0].original_text, "#home");
        assert_eq!(result.clean_title, "pay rent");
    }

    #[test]
    fn no_candidates_means_full_confidence_and_trimmed_title() {
        let recognizers = [rec("noop", noop)];
        let run = run("  water   the plants  ", &Context::default(), &Options::default(), &recognizers);
        assert_eq!(run.result.clean_title, "water the plants");
        assert_eq!(run.result.confidence, 1.0);
        assert!(run.result.tags.is_empty());
        assert!(run.result.error.is_none());
    }

    #[test]
    fn inactive_recognizers_are_reported_but_not_run() {
        let recognizers =
            [Recognizer { name: "gated", buckets: BucketMask::HAS_SIGIL, run: panicky }, rec("labels", whole_word)];
        let run = run("no sigils here", &Context::default(), &Options::default(), &recognizers);
        assert!(run.result.error.is_none());
        assert!(!run.reports[0].active);
        assert!(run.reports[1].active);
    }
}
