//! End-to-end scenario tables over the full pipeline.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use proptest::prelude::*;

use crate::api::{Context, Options, parse_with};
use crate::tag::{TagType, TagValue};

/// Pinned anchor: Monday, 2024-01-15, midnight.
fn ctx() -> Context {
    Context { reference_time: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(0, 0, 0).unwrap() }
}

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
}

#[test]
fn clean_titles_and_tag_types() {
    use TagType::*;

    // (input, clean title, tag types in span order)
    let cases: Vec<(&str, &str, Vec<TagType>)> = vec![
        ("water the plants", "water the plants", vec![]),
        ("call mom tomorrow", "call mom", vec![Date]),
        ("pay rent #home", "pay rent", vec![Label]),
        ("review doc @maria", "review doc", vec![Person]),
        ("standup at 9:30am", "standup", vec![Time]),
        ("fix login bug urgent", "fix login bug", vec![Priority]),
        ("ship it !!", "ship it", vec![Priority]),
        ("dinner in Rome tomorrow", "dinner", vec![Location, Date]),
        ("submit report in 3 days", "submit report", vec![Date]),
        ("rent due 1/15/2024", "rent due", vec![Date]),
        ("coffee with Anna at 10", "coffee", vec![Person, Time]),
        ("", "", vec![]),
    ];

    for (input, clean, types) in cases {
        let res = parse_with(input, &ctx(), &Options::default());
        assert_eq!(res.clean_title, clean, "clean title for {input:?}");
        let found: Vec<TagType> = res.tags.iter().map(|t| t.tag_type).collect();
        assert_eq!(found, types, "tag types for {input:?}");
        assert!(res.error.is_none(), "unexpected error for {input:?}");
    }
}

#[test]
fn full_smart_input_line() {
    let text = "Lunch at Central Park next Friday at noon #urgent @john";
    let res = parse_with(text, &ctx(), &Options::default());

    let types: Vec<TagType> = res.tags.iter().map(|t| t.tag_type).collect();
    assert_eq!(types, vec![TagType::Location, TagType::Date, TagType::Time, TagType::Label, TagType::Person]);
    assert_eq!(res.clean_title, "Lunch");

    let location = &res.tags[0];
    assert_eq!(location.display_text, "Central Park");
    assert!(location.original_text.ends_with("Central Park"));
    assert!(!location.original_text.contains("Lunch"));

    let date = &res.tags[1];
    assert_eq!(date.original_text, "next Friday");
    // "next Friday" from Monday 2024-01-15 lands in the following week.
    assert_eq!(date.value, TagValue::Date(at(2024, 1, 26)));

    let time = &res.tags[2];
    assert_eq!(time.value, TagValue::Time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));

    // "next Friday" vs bare "Friday", and "#urgent" vs the priority keyword
    // inside it, were real fights.
    assert_eq!(res.conflicts.len(), 2);

    let mean = res.tags.iter().map(|t| t.confidence).sum::<f64>() / res.tags.len() as f64;
    assert!((res.confidence - mean).abs() < 1e-9);
}

#[test]
fn third_friday_of_next_month_resolves_exactly() {
    let res = parse_with("dentist the third Friday of next month", &ctx(), &Options::default());

    let date = res.tags.iter().find(|t| t.tag_type == TagType::Date).unwrap();
    assert_eq!(date.original_text, "the third Friday of next month");
    assert_eq!(date.value, TagValue::Date(at(2024, 2, 16)));
    // The ordinal phrase subsumed the bare weekday and "next month".
    assert!(!res.conflicts.is_empty());
    assert_eq!(res.clean_title, "dentist");
}

#[test]
fn two_weeks_from_now_resolves_exactly() {
    let res = parse_with("follow up two weeks from now", &ctx(), &Options::default());

    let date = res.tags.iter().find(|t| t.tag_type == TagType::Date).unwrap();
    assert_eq!(date.value, TagValue::Date(at(2024, 1, 29)));
    assert_eq!(res.clean_title, "follow up");
}

#[test]
fn street_address_yields_one_location() {
    let text = "Meet at 123 Main St, bring docs";
    let res = parse_with(text, &ctx(), &Options::default());

    let locations: Vec<_> = res.tags.iter().filter(|t| t.tag_type == TagType::Location).collect();
    assert_eq!(locations.len(), 1);
    assert!(regex!(r"(?i)123\s+Main\s+St").is_match(&locations[0].original_text));
}

#[test]
fn full_postal_address_beats_its_own_fragments() {
    let text = "Ship to 1 Infinite Loop, Cupertino, CA 95014";
    let res = parse_with(text, &ctx(), &Options::default());

    let locations: Vec<_> = res.tags.iter().filter(|t| t.tag_type == TagType::Location).collect();
    assert_eq!(locations.len(), 1);
    let postal = locations[0];
    assert!(postal.display_text.contains("Infinite Loop"));
    assert!(postal.display_text.contains("95014"));

    // Higher than any bare prepositional match would be.
    let prep = parse_with("Lunch at Central Park", &ctx(), &Options::default());
    let prep_location = prep.tags.iter().find(|t| t.tag_type == TagType::Location).unwrap();
    assert!(postal.confidence > prep_location.confidence);

    // The street-address fragment lost inside a recorded conflict.
    assert!(res.conflicts.iter().any(|c| c.winner.id == postal.id && !c.discarded.is_empty()));
}

#[test]
fn disjoint_date_and_time_are_not_a_conflict() {
    let res = parse_with("Friday at 3", &ctx(), &Options::default());

    let types: Vec<TagType> = res.tags.iter().map(|t| t.tag_type).collect();
    assert_eq!(types, vec![TagType::Date, TagType::Time]);
    assert!(res.conflicts.is_empty());
    assert_eq!(res.tags[0].original_text, "Friday");
    assert_eq!(res.tags[1].original_text, "at 3");
}

#[test]
fn clean_title_reparse_is_tag_free() {
    let inputs = [
        "Lunch at Central Park next Friday at noon #urgent @john",
        "call mom tomorrow",
        "Meet at 123 Main St, bring docs",
        "Ship to 1 Infinite Loop, Cupertino, CA 95014",
        "dinner in Rome tomorrow",
        "coffee with Anna at 10",
        "Friday at 3",
    ];
    for input in inputs {
        let first = parse_with(input, &ctx(), &Options::default());
        let again = parse_with(&first.clean_title, &ctx(), &Options::default());
        assert!(again.tags.is_empty(), "clean title {:?} of {input:?} still had tags", first.clean_title);
    }
}

proptest! {
    #[test]
    fn tags_never_overlap_and_spans_are_exact(text in ".{0,80}") {
        let res = parse_with(&text, &ctx(), &Options::default());

        for pair in res.tags.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start, "overlapping spans in {text:?}");
        }
        for tag in &res.tags {
            prop_assert_eq!(&text[tag.start..tag.end], tag.original_text.as_str());
            prop_assert!(tag.confidence >= 0.0 && tag.confidence <= 1.0);
        }
        prop_assert!(res.confidence >= 0.0 && res.confidence <= 1.0);
    }

    #[test]
    fn parsing_is_deterministic(text in ".{0,60}") {
        let a = parse_with(&text, &ctx(), &Options::default());
        let b = parse_with(&text, &ctx(), &Options::default());
        prop_assert_eq!(a, b);
    }
}
