//! Public tag model.
//!
//! A [`ParsedTag`] is a typed span extracted from the input text, carrying a
//! resolved value, a confidence score and deterministic presentation hints.
//! Everything here is plain data — construction happens in the engine, and
//! downstream layers (UI highlighting, persistence adapters) only read it.

use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Tag taxonomy. One variant per recognizer family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagType {
    Date,
    Time,
    Priority,
    Location,
    Person,
    Label,
}

impl TagType {
    pub fn name(self) -> &'static str {
        match self {
            TagType::Date => "date",
            TagType::Time => "time",
            TagType::Priority => "priority",
            TagType::Location => "location",
            TagType::Person => "person",
            TagType::Label => "label",
        }
    }

    /// Icon hint, fixed per type.
    pub fn icon(self) -> &'static str {
        match self {
            TagType::Date => "calendar",
            TagType::Time => "clock",
            TagType::Priority => "flag",
            TagType::Location => "map-pin",
            TagType::Person => "user",
            TagType::Label => "tag",
        }
    }
}

impl std::fmt::Display for TagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Priority level carried by `priority` tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low priority",
            Priority::Medium => "Medium priority",
            Priority::High => "High priority",
        }
    }
}

/// Type-dependent tag payload.
///
/// `date` tags carry a full datetime (midnight for date-only phrases, the
/// anchor's time of day for offset phrases); `time` tags carry a time of day;
/// `location`/`person`/`label` carry free text with the sigil stripped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagValue {
    Date(NaiveDateTime),
    Time(NaiveTime),
    Priority(Priority),
    Text(String),
}

/// A typed span extracted from the input text.
///
/// Invariants upheld by the engine:
/// - `0 <= start < end <= text.len()` (byte offsets, half-open)
/// - `&text[start..end] == original_text`
/// - within one [`crate::ParseResult`], tags are sorted by `start` and spans
///   are pairwise non-overlapping
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedTag {
    /// Unique within one parse result, assigned in span order. Not stable
    /// across re-parses; never random, so identical inputs produce identical
    /// results.
    pub id: u32,
    pub tag_type: TagType,
    pub value: TagValue,
    /// Exact substring matched.
    pub original_text: String,
    /// Human-readable rendering (normalized casing, resolved dates).
    pub display_text: String,
    pub start: usize,
    pub end: usize,
    pub confidence: f64,
    pub icon: &'static str,
    pub color: &'static str,
    /// Name of the recognizer that produced this tag.
    pub recognizer: &'static str,
}

/// Color hint, fixed per type — except priority, which colors by level.
pub(crate) fn color_for(tag_type: TagType, value: &TagValue) -> &'static str {
    match (tag_type, value) {
        (TagType::Priority, TagValue::Priority(Priority::High)) => "#ef4444",
        (TagType::Priority, TagValue::Priority(Priority::Medium)) => "#f59e0b",
        (TagType::Priority, _) => "#10b981",
        (TagType::Date, _) => "#3b82f6",
        (TagType::Time, _) => "#8b5cf6",
        (TagType::Location, _) => "#14b8a6",
        (TagType::Person, _) => "#ec4899",
        (TagType::Label, _) => "#6366f1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_colors_differ_by_level() {
        let high = color_for(TagType::Priority, &TagValue::Priority(Priority::High));
        let low = color_for(TagType::Priority, &TagValue::Priority(Priority::Low));
        assert_ne!(high, low);
    }

    #[test]
    fn type_names_round_trip_display() {
        for t in [TagType::Date, TagType::Time, TagType::Priority, TagType::Location, TagType::Person, TagType::Label]
        {
            assert_eq!(t.to_string(), t.name());
        }
    }
}
