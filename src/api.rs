use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::engine;
use crate::recognizers;

pub use crate::engine::RecognizerReport;
use crate::tag::ParsedTag;

/// Parsing context.
///
/// Holds the anchor instant used to resolve relative expressions
/// ("tomorrow", "next Friday"). The pipeline never reads a clock on its own:
/// identical `(text, context)` inputs always produce identical results.
#[derive(Debug, Clone)]
pub struct Context {
    /// Reference datetime for all relative-date arithmetic.
    pub reference_time: NaiveDateTime,
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            // Pinned anchor (a Monday) so tests are reproducible.
            let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
            Self { reference_time: NaiveDateTime::new(date, NaiveTime::MIN) }
        } else {
            Self { reference_time: Local::now().naive_local() }
        }
    }
}

/// Options that affect parsing behavior.
///
/// Intentionally minimal today; kept in the signature so callers don't churn
/// when knobs (locale, recognizer subsets) arrive.
#[derive(Debug, Clone, Default)]
pub struct Options {}

/// Failures surfaced at the result level.
///
/// A recognizer fault never aborts a parse: the faulty recognizer is treated
/// as having produced zero candidates and the error is recorded here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("recognizer `{0}` panicked")]
    RecognizerPanicked(&'static str),
}

/// A cluster of overlapping candidates where more than one competed:
/// which one won and which were discarded, for diagnostic display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictGroup {
    pub winner: ParsedTag,
    pub discarded: Vec<ParsedTag>,
}

/// Result of one parse call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    /// Source text with all winning tag spans removed, whitespace runs
    /// collapsed to single spaces, and the ends trimmed. Falls back to the
    /// trimmed input when no tags are found.
    pub clean_title: String,
    /// Winning tags, sorted by `start`, pairwise non-overlapping.
    pub tags: Vec<ParsedTag>,
    /// Mean of the winning tags' confidences; `1.0` when no tags were found
    /// (an empty parse is not evidence of low confidence).
    pub confidence: f64,
    /// One entry per overlap cluster that had more than one candidate.
    pub conflicts: Vec<ConflictGroup>,
    /// Set when a recognizer faulted; the rest of the result is the best
    /// partial output.
    pub error: Option<String>,
}

/// Additional details returned by [`parse_verbose_with`].
///
/// Compact on purpose: enough to debug recognizer behavior and check the
/// per-keystroke budget without dumping internal state.
#[derive(Debug, Clone)]
pub struct ParseDetails {
    /// Total elapsed time.
    pub total: Duration,
    /// Time spent in the trigger scan + recognizers.
    pub recognize: Duration,
    /// Time spent in conflict resolution and result assembly.
    pub resolve: Duration,
    /// Per-recognizer activation, candidate counts and timings.
    pub recognizers: Vec<RecognizerReport>,
    /// Every candidate before conflict resolution.
    pub all_candidates: Vec<ParsedTag>,
}

/// Result from [`parse_verbose_with`].
#[derive(Debug, Clone)]
pub struct ParseVerbose {
    pub result: ParseResult,
    pub details: ParseDetails,
}

/// Parse `text` with a default [`Context`] (the local clock as anchor).
///
/// # Example
/// ```
/// use tagline::parse;
///
/// let out = parse("pay rent #home");
/// assert_eq!(out.clean_title, "pay rent");
/// assert_eq!(out.tags.len(), 1);
/// ```
pub fn parse(text: &str) -> ParseResult {
    parse_with(text, &Context::default(), &Options::default())
}

/// Parse `text` against an explicit anchor.
///
/// Use this everywhere determinism matters — the UI flows pass the instant
/// the keystroke arrived, tests pass a pinned date.
pub fn parse_with(text: &str, context: &Context, options: &Options) -> ParseResult {
    engine::run(text, context, options, recognizers::all()).result
}

/// Parse `text` and return extra diagnostics alongside the result.
///
/// The plain [`parse_with`] path does not allocate these traces.
pub fn parse_verbose_with(text: &str, context: &Context, options: &Options) -> ParseVerbose {
    let run = engine::run(text, context, options, recognizers::all());
    ParseVerbose {
        result: run.result,
        details: ParseDetails {
            total: run.metrics.total,
            recognize: run.metrics.recognize,
            resolve: run.metrics.resolve,
            recognizers: run.reports,
            all_candidates: run.all_candidates,
        },
    }
}
