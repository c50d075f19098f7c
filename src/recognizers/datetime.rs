//! Dates and times of day.
//!
//! Date phrases are classified into a [`DateExpr`] and resolved against the
//! anchor by [`date_expr::normalize`]; a phrase with no valid calendar value
//! ("the fifth Friday of next month" when the month has four) produces no
//! candidate. Time-of-day phrases are a distinct `time` tag type, so "next
//! Friday at noon" yields two candidates over disjoint sub-spans.

use chrono::NaiveTime;

use crate::date_expr::{self, DateExpr, Grain, MonthRef, WeekShift};
use crate::tag::{TagType, TagValue};
use crate::{Candidate, Context, Span};

const NAME: &str = "datetime";

const ABSOLUTE_CONFIDENCE: f64 = 0.95;
const MONTH_DAY_CONFIDENCE: f64 = 0.9;
const RELATIVE_DAY_CONFIDENCE: f64 = 0.9;
const OFFSET_CONFIDENCE: f64 = 0.85;
const ORDINAL_CONFIDENCE: f64 = 0.85;
const MODIFIED_WEEKDAY_CONFIDENCE: f64 = 0.85;
const SLASH_DATE_CONFIDENCE: f64 = 0.85;
const PERIOD_CONFIDENCE: f64 = 0.8;
/// A bare weekday name is often a false friend ("wed", "sat", "may"-style
/// words), so it ranks below every modified form.
const BARE_WEEKDAY_CONFIDENCE: f64 = 0.7;

const TIME_AT_CONFIDENCE: f64 = 0.9;
const TIME_PLAIN_CONFIDENCE: f64 = 0.85;
const TIME_24H_CONFIDENCE: f64 = 0.75;
/// Bare "at 3" carries no meridiem; lowest-confidence time form.
const TIME_BARE_HOUR_CONFIDENCE: f64 = 0.6;

pub(crate) fn recognize(text: &str, context: &Context) -> Vec<Candidate> {
    let mut out = Vec::new();
    dates(text, context, &mut out);
    times(text, &mut out);
    out
}

fn dates(text: &str, context: &Context, out: &mut Vec<Candidate>) {
    // "today", "tomorrow", "yesterday"
    for m in regex!(r"(?i)\b(today|tomorrow|tmrw|yesterday)\b").find_iter(text) {
        let days = match m.as_str().to_ascii_lowercase().as_str() {
            "yesterday" => -1,
            "today" => 0,
            _ => 1,
        };
        date(DateExpr::DayOffset(days), m.start(), m.end(), RELATIVE_DAY_CONFIDENCE, context, out);
    }

    // "the third Friday of next month", "first Monday of March 2025"
    for caps in regex!(
        r"(?i)\b(?:the\s+)?(first|second|third|fourth|fifth|1st|2nd|3rd|4th|5th)\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday|mon|tue|tues|wed|thu|thur|thurs|fri|sat|sun)\s+(?:of|in)\s+(?:(next|this|last)\s+month|(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|sept|oct|nov|dec))(?:\s+(\d{4}))?\b"
    )
    .captures_iter(text)
    {
        let m = caps.get(0).unwrap();
        let Some(n) = ordinal_from(caps.get(1).unwrap().as_str()) else { continue };
        let Some(weekday) = weekday_from(caps.get(2).unwrap().as_str()) else { continue };
        let month = match (caps.get(3), caps.get(4)) {
            (Some(rel), _) => match rel.as_str().to_ascii_lowercase().as_str() {
                "next" => MonthRef::Relative(1),
                "last" => MonthRef::Relative(-1),
                _ => MonthRef::Relative(0),
            },
            (None, Some(name)) => {
                let Some(month) = month_from(name.as_str()) else { continue };
                MonthRef::Named { month, year: caps.get(5).and_then(|y| y.as_str().parse().ok()) }
            }
            (None, None) => continue,
        };
        date(DateExpr::NthWeekdayOfMonth { n, weekday, month }, m.start(), m.end(), ORDINAL_CONFIDENCE, context, out);
    }

    // "next Friday", "this Tuesday", "last Monday"
    for caps in regex!(
        r"(?i)\b(next|this|last)\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday|mon|tue|tues|wed|thu|thur|thurs|fri|sat|sun)\b"
    )
    .captures_iter(text)
    {
        let m = caps.get(0).unwrap();
        let Some(weekday) = weekday_from(caps.get(2).unwrap().as_str()) else { continue };
        let shift = match caps.get(1).unwrap().as_str().to_ascii_lowercase().as_str() {
            "next" => WeekShift::Next,
            "last" => WeekShift::Last,
            _ => WeekShift::This,
        };
        date(DateExpr::Weekday { weekday, shift }, m.start(), m.end(), MODIFIED_WEEKDAY_CONFIDENCE, context, out);
    }

    // Bare weekday names
    for m in regex!(
        r"(?i)\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday|mon|tue|tues|wed|thu|thur|thurs|fri|sat|sun)\b"
    )
    .find_iter(text)
    {
        let Some(weekday) = weekday_from(m.as_str()) else { continue };
        let expr = DateExpr::Weekday { weekday, shift: WeekShift::Upcoming };
        date(expr, m.start(), m.end(), BARE_WEEKDAY_CONFIDENCE, context, out);
    }

    // "next week", "last month"
    for caps in regex!(r"(?i)\b(next|last)\s+(week|month)\b").captures_iter(text) {
        let m = caps.get(0).unwrap();
        let amount = if caps.get(1).unwrap().as_str().eq_ignore_ascii_case("last") { -1 } else { 1 };
        let grain = grain_from(caps.get(2).unwrap().as_str());
        date(DateExpr::PeriodOffset { amount, grain }, m.start(), m.end(), PERIOD_CONFIDENCE, context, out);
    }

    // "in 3 days", "in two weeks"
    for caps in regex!(
        r"(?i)\bin\s+(\d{1,3}|an?|one|two|three|four|five|six|seven|eight|nine|ten)\s+(day|week|month)s?\b"
    )
    .captures_iter(text)
    {
        let m = caps.get(0).unwrap();
        let Some(amount) = amount_from(caps.get(1).unwrap().as_str()) else { continue };
        let grain = grain_from(caps.get(2).unwrap().as_str());
        date(DateExpr::Shift { amount, grain }, m.start(), m.end(), OFFSET_CONFIDENCE, context, out);
    }

    // "two weeks from now", "10 days from today"
    for caps in regex!(
        r"(?i)\b(\d{1,3}|an?|one|two|three|four|five|six|seven|eight|nine|ten)\s+(day|week|month)s?\s+from\s+(?:now|today)\b"
    )
    .captures_iter(text)
    {
        let m = caps.get(0).unwrap();
        let Some(amount) = amount_from(caps.get(1).unwrap().as_str()) else { continue };
        let grain = grain_from(caps.get(2).unwrap().as_str());
        date(DateExpr::Shift { amount, grain }, m.start(), m.end(), OFFSET_CONFIDENCE, context, out);
    }

    // ISO "2024-01-15"
    for caps in regex!(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").captures_iter(text) {
        let m = caps.get(0).unwrap();
        let expr = DateExpr::Absolute {
            year: caps[1].parse().unwrap_or(0),
            month: caps[2].parse().unwrap_or(0),
            day: caps[3].parse().unwrap_or(0),
        };
        date(expr, m.start(), m.end(), ABSOLUTE_CONFIDENCE, context, out);
    }

    // US slash dates: "1/15/2024", "1/15"
    for caps in regex!(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{2,4}))?\b").captures_iter(text) {
        let m = caps.get(0).unwrap();
        let month: u32 = caps[1].parse().unwrap_or(0);
        let day: u32 = caps[2].parse().unwrap_or(0);
        let expr = match caps.get(3) {
            Some(y) => {
                let mut year: i32 = y.as_str().parse().unwrap_or(0);
                if y.as_str().len() == 2 {
                    year += 2000;
                }
                DateExpr::Absolute { year, month, day }
            }
            None => DateExpr::MonthDay { month, day },
        };
        date(expr, m.start(), m.end(), SLASH_DATE_CONFIDENCE, context, out);
    }

    // "Jan 15", "January 15th, 2025"
    for caps in regex!(
        r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|sept|oct|nov|dec)\.?\s+(\d{1,2})(?:st|nd|rd|th)?(?:,?\s+(\d{4}))?\b"
    )
    .captures_iter(text)
    {
        let m = caps.get(0).unwrap();
        let Some(month) = month_from(caps.get(1).unwrap().as_str()) else { continue };
        let day: u32 = caps[2].parse().unwrap_or(0);
        let (expr, confidence) = match caps.get(3) {
            Some(y) => {
                (DateExpr::Absolute { year: y.as_str().parse().unwrap_or(0), month, day }, ABSOLUTE_CONFIDENCE)
            }
            None => (DateExpr::MonthDay { month, day }, MONTH_DAY_CONFIDENCE),
        };
        date(expr, m.start(), m.end(), confidence, context, out);
    }
}

fn times(text: &str, out: &mut Vec<Candidate>) {
    // "at noon", "midnight"
    for caps in regex!(r"(?i)\b(at\s+)?(noon|midnight)\b").captures_iter(text) {
        let m = caps.get(0).unwrap();
        let hour = if caps[2].eq_ignore_ascii_case("noon") { 12 } else { 0 };
        let confidence = if caps.get(1).is_some() { TIME_AT_CONFIDENCE } else { TIME_PLAIN_CONFIDENCE };
        time(hour, 0, m.start(), m.end(), confidence, out);
    }

    // "at 3pm", "9:30am", "3 p.m."
    for caps in regex!(r"(?i)\b(at\s+)?(\d{1,2})(?::([0-5]\d))?\s*([ap])\.?m\b\.?").captures_iter(text) {
        let m = caps.get(0).unwrap();
        let hour12: u32 = caps[2].parse().unwrap_or(0);
        if !(1..=12).contains(&hour12) {
            continue;
        }
        let minute: u32 = caps.get(3).map_or(0, |g| g.as_str().parse().unwrap_or(0));
        let pm = caps[4].eq_ignore_ascii_case("p");
        let hour = match (hour12, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
        let confidence = if caps.get(1).is_some() { TIME_AT_CONFIDENCE } else { TIME_PLAIN_CONFIDENCE };
        time(hour, minute, m.start(), m.end(), confidence, out);
    }

    // 24-hour "9:30", "at 18:05"
    for caps in regex!(r"(?i)\b(at\s+)?(\d{1,2}):([0-5]\d)\b").captures_iter(text) {
        let m = caps.get(0).unwrap();
        let hour: u32 = caps[2].parse().unwrap_or(99);
        if hour > 23 {
            continue;
        }
        let minute: u32 = caps[3].parse().unwrap_or(0);
        time(hour, minute, m.start(), m.end(), TIME_24H_CONFIDENCE, out);
    }

    // Bare "at 3": no meridiem. Small hours read as afternoon, 8-11 as
    // morning, 12 as noon.
    for caps in regex!(r"(?i)\bat\s+(\d{1,2})\b").captures_iter(text) {
        let m = caps.get(0).unwrap();
        let raw: u32 = caps[1].parse().unwrap_or(99);
        if raw > 23 {
            continue;
        }
        let hour = if (1..=7).contains(&raw) { raw + 12 } else { raw };
        time(hour, 0, m.start(), m.end(), TIME_BARE_HOUR_CONFIDENCE, out);
    }
}

fn date(expr: DateExpr, start: usize, end: usize, confidence: f64, context: &Context, out: &mut Vec<Candidate>) {
    // Recognition failure is local: an unresolvable phrase produces nothing.
    let Some(resolved) = date_expr::normalize(&expr, context.reference_time) else {
        log::debug!("date phrase at {start}..{end} did not resolve, dropped");
        return;
    };
    let display = if resolved.time() == NaiveTime::MIN {
        resolved.format("%Y-%m-%d").to_string()
    } else {
        resolved.format("%Y-%m-%d %H:%M").to_string()
    };
    out.push(Candidate {
        tag_type: TagType::Date,
        value: TagValue::Date(resolved),
        span: Span { start, end },
        display,
        confidence,
        recognizer: NAME,
    });
}

fn time(hour: u32, minute: u32, start: usize, end: usize, confidence: f64, out: &mut Vec<Candidate>) {
    let Some(value) = NaiveTime::from_hms_opt(hour, minute, 0) else { return };
    out.push(Candidate {
        tag_type: TagType::Time,
        value: TagValue::Time(value),
        span: Span { start, end },
        display: value.format("%H:%M").to_string(),
        confidence,
        recognizer: NAME,
    });
}

fn weekday_from(name: &str) -> Option<chrono::Weekday> {
    use chrono::Weekday;
    match name.to_ascii_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thur" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

fn month_from(name: &str) -> Option<u32> {
    let month = match name.to_ascii_lowercase().as_str() {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" | "sept" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn ordinal_from(text: &str) -> Option<u32> {
    match text.to_ascii_lowercase().as_str() {
        "first" | "1st" => Some(1),
        "second" | "2nd" => Some(2),
        "third" | "3rd" => Some(3),
        "fourth" | "4th" => Some(4),
        "fifth" | "5th" => Some(5),
        _ => None,
    }
}

fn amount_from(text: &str) -> Option<i64> {
    match text.to_ascii_lowercase().as_str() {
        "a" | "an" | "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        "eight" => Some(8),
        "nine" => Some(9),
        "ten" => Some(10),
        _ => text.parse().ok(),
    }
}

fn grain_from(unit: &str) -> Grain {
    match unit.to_ascii_lowercase().as_str() {
        "week" => Grain::Week,
        "month" => Grain::Month,
        _ => Grain::Day,
    }
}
