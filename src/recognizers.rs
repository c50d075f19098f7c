//! Recognizer families.
//!
//! One module per tag family, each exposing a pure
//! `recognize(text, context) -> Vec<Candidate>`. A recognizer:
//!
//! - never mutates its input and tolerates any Unicode string,
//! - only emits spans that are exact substrings of the input,
//! - drops a candidate it cannot fully resolve (a date phrase with no valid
//!   calendar value) instead of emitting a malformed tag,
//! - may emit mutually overlapping candidates — the conflict resolver picks
//!   winners downstream.
//!
//! [`all`] fixes the execution order. That order is the final conflict
//! tie-break, so it is part of the observable contract: changing it changes
//! which of two fully tied candidates survives.

#[path = "recognizers/datetime.rs"]
mod datetime;
#[path = "recognizers/label.rs"]
mod label;
#[path = "recognizers/location.rs"]
mod location;
#[path = "recognizers/person.rs"]
mod person;
#[path = "recognizers/priority.rs"]
mod priority;

#[cfg(test)]
#[path = "recognizers/tests.rs"]
mod tests;

use crate::Recognizer;
use crate::engine::BucketMask;

/// The default recognizer set, in execution order.
pub(crate) fn all() -> &'static [Recognizer] {
    static REGISTRY: &[Recognizer] = &[
        Recognizer {
            name: "priority",
            buckets: BucketMask::HAS_BANG.union(BucketMask::PRIORITYISH),
            run: priority::recognize,
        },
        Recognizer { name: "label", buckets: BucketMask::HAS_SIGIL, run: label::recognize },
        Recognizer {
            name: "person",
            buckets: BucketMask::HAS_SIGIL.union(BucketMask::HAS_CAPITAL),
            run: person::recognize,
        },
        Recognizer {
            name: "location",
            buckets: BucketMask::HAS_CAPITAL.union(BucketMask::HAS_DIGITS),
            run: location::recognize,
        },
        Recognizer {
            name: "datetime",
            buckets: BucketMask::DATEISH.union(BucketMask::TIMEISH).union(BucketMask::HAS_DIGITS),
            run: datetime::recognize,
        },
    ];
    REGISTRY
}

/// Capitalized words that belong to the calendar vocabulary, not to
/// locations or people ("in January", "with Friday" are not entities).
pub(crate) fn is_calendar_word(word: &str) -> bool {
    const WORDS: &[&str] = &[
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
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
        "today",
        "tomorrow",
        "yesterday",
        "next",
        "this",
        "last",
        "noon",
        "midnight",
    ];
    WORDS.contains(&word.to_ascii_lowercase().as_str())
}
