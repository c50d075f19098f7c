//! Engine run metrics.
//!
//! Timing and candidate counts for one pipeline run. Metrics are opt-in:
//! [`crate::parse_with`] discards them, [`crate::parse_verbose_with`]
//! surfaces them through [`crate::ParseDetails`] for rule debugging and
//! keystroke-budget profiling.

use std::time::Duration;

use crate::api::ParseResult;
use crate::tag::ParsedTag;

/// Stage timings for one run.
#[derive(Debug, Default, Clone)]
pub(crate) struct RunMetrics {
    /// Total elapsed time.
    pub total: Duration,
    /// Time spent running recognizers (including the trigger scan).
    pub recognize: Duration,
    /// Time spent in conflict resolution and result assembly.
    pub resolve: Duration,
}

/// Per-recognizer outcome for one run.
#[derive(Debug, Clone)]
pub struct RecognizerReport {
    /// Recognizer name, e.g. `"datetime"`.
    pub name: &'static str,
    /// Whether the trigger scan let this recognizer run at all.
    pub active: bool,
    /// Candidates produced (after local validation).
    pub produced: usize,
    /// Elapsed time inside the recognizer. Zero when skipped.
    pub duration: Duration,
}

/// Pipeline output bundled with diagnostics.
#[derive(Debug, Clone)]
pub(crate) struct PipelineRun {
    pub result: ParseResult,
    /// Every candidate (pre-resolution), materialized for inspection.
    pub all_candidates: Vec<ParsedTag>,
    pub reports: Vec<RecognizerReport>,
    pub metrics: RunMetrics,
}
