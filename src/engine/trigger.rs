//! Trigger scanning (input pre-classification).
//!
//! The facade re-parses on every keystroke, so the engine avoids running
//! recognizers that cannot possibly match. This module inspects the raw
//! input once and produces coarse [`BucketMask`] buckets; each recognizer
//! declares the buckets it needs and is skipped when none of them fired.
//!
//! This is a *heuristic* scan: false positives are fine (the recognizer
//! still has to match its full patterns), false negatives are not — a bucket
//! must fire for every input its recognizers could match.

use bitflags::bitflags;

bitflags! {
    /// Cheap signals derived from the raw input.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BucketMask: u32 {
        /// At least one ASCII digit.
        const HAS_DIGITS = 1 << 0;
        /// A `#` or `@` sigil.
        const HAS_SIGIL = 1 << 1;
        /// A `!` marker.
        const HAS_BANG = 1 << 2;
        /// At least one uppercase letter (capitalized-phrase patterns).
        const HAS_CAPITAL = 1 << 3;
        /// Weekday/month names or relative-date keywords.
        const DATEISH = 1 << 4;
        /// Clock separators, am/pm markers, named times of day.
        const TIMEISH = 1 << 5;
        /// Priority keywords.
        const PRIORITYISH = 1 << 6;
    }
}

/// Input characteristics detected from the raw input.
#[derive(Debug, Clone, Copy)]
pub struct TriggerInfo {
    pub buckets: BucketMask,
}

const DATE_WORDS: &[&str] = &[
    "today",
    "tomorrow",
    "tmrw",
    "yesterday",
    "next",
    "this",
    "last",
    "in",
    "from",
    "week",
    "month",
    "day",
    "days",
    "weeks",
    "months",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "mon",
    "tue",
    "tues",
    "wed",
    "thu",
    "thur",
    "thurs",
    "fri",
    "sat",
    "sun",
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
    "jan",
    "feb",
    "mar",
    "apr",
    "jun",
    "jul",
    "aug",
    "sep",
    "sept",
    "oct",
    "nov",
    "dec",
    "first",
    "second",
    "third",
    "fourth",
    "fifth",
];

const TIME_WORDS: &[&str] = &["noon", "midnight", "am", "pm", "at"];

const PRIORITY_WORDS: &[&str] = &["urgent", "critical", "asap", "important", "priority"];

impl TriggerInfo {
    /// Scan `input` once and set every bucket it plausibly belongs to.
    ///
    /// Uses ASCII lowercasing and whitespace tokenization; all current
    /// recognizer vocabularies are ASCII English.
    pub fn scan(input: &str) -> Self {
        let mut buckets = BucketMask::empty();

        if input.bytes().any(|b| b.is_ascii_digit()) {
            buckets |= BucketMask::HAS_DIGITS | BucketMask::DATEISH | BucketMask::TIMEISH;
        }
        if input.contains('#') || input.contains('@') {
            buckets |= BucketMask::HAS_SIGIL;
        }
        if input.contains('!') {
            buckets |= BucketMask::HAS_BANG;
        }
        if input.chars().any(|c| c.is_uppercase()) {
            buckets |= BucketMask::HAS_CAPITAL;
        }
        if input.contains(':') {
            buckets |= BucketMask::TIMEISH;
        }

        let lower = input.to_ascii_lowercase();
        for word in lower.split_whitespace().map(|w| w.trim_matches(|c: char| !c.is_ascii_alphanumeric())) {
            if DATE_WORDS.contains(&word) {
                buckets |= BucketMask::DATEISH;
            }
            if TIME_WORDS.contains(&word) {
                buckets |= BucketMask::TIMEISH;
            }
            if PRIORITY_WORDS.contains(&word) {
                buckets |= BucketMask::PRIORITYISH;
            }
        }

        TriggerInfo { buckets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_fires_nothing() {
        assert_eq!(TriggerInfo::scan("").buckets, BucketMask::empty());
    }

    #[test]
    fn sigils_and_bangs() {
        let info = TriggerInfo::scan("ship it #release @ana !!");
        assert!(info.buckets.contains(BucketMask::HAS_SIGIL));
        assert!(info.buckets.contains(BucketMask::HAS_BANG));
    }

    #[test]
    fn date_words_fire_dateish() {
        let info = TriggerInfo::scan("lunch tomorrow");
        assert!(info.buckets.contains(BucketMask::DATEISH));
        assert!(!info.buckets.contains(BucketMask::HAS_DIGITS));
    }

    #[test]
    fn punctuation_does_not_hide_keywords() {
        let info = TriggerInfo::scan("call mom (tomorrow)");
        assert!(info.buckets.contains(BucketMask::DATEISH));
    }

    #[test]
    fn digits_enable_date_and_time() {
        let info = TriggerInfo::scan("pay rent 9:30");
        assert!(info.buckets.contains(BucketMask::HAS_DIGITS));
        assert!(info.buckets.contains(BucketMask::TIMEISH));
        assert!(info.buckets.contains(BucketMask::DATEISH));
    }
}
