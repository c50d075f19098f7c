//! Relative date expressions and their resolution.
//!
//! Recognizers never compute calendar dates inline. They build a small
//! [`DateExpr`] describing *what the phrase means* ("third Friday of next
//! month", "two weeks from now") and the engine resolves it here against the
//! caller-supplied anchor:
//!
//! ```text
//! phrase ──(datetime recognizer)──▶ DateExpr ──normalize(expr, reference)──▶ NaiveDateTime
//! ```
//!
//! `normalize` is total over its inputs and returns `None` for expressions
//! with no valid calendar value (February 30th, a fifth Friday that a month
//! does not have). A `None` drops the candidate — it is never clamped or
//! wrapped into a neighboring month.
//!
//! All arithmetic is relative to the explicit `reference`; nothing in this
//! module reads a clock.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

/// Calendar grain for offset phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Grain {
    Day,
    Week,
    Month,
}

/// How a named weekday relates to the reference week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WeekShift {
    /// Bare "Friday": the upcoming occurrence, counting today.
    Upcoming,
    /// "this Friday": same as upcoming.
    This,
    /// "next Friday": that weekday within the following ISO week.
    Next,
    /// "last Friday": that weekday within the previous ISO week.
    Last,
}

/// A month reference inside an ordinal-weekday phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MonthRef {
    /// "this month" (0), "next month" (1), "last month" (-1).
    Relative(i32),
    /// "February", "February 2025". Without a year: the occurrence
    /// at-or-after the reference month.
    Named { month: u32, year: Option<i32> },
}

/// A classified relative-date phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateExpr {
    /// "today" (0), "tomorrow" (1), "yesterday" (-1). Date-only.
    DayOffset(i64),
    /// "Friday", "next Friday", "last Monday". Date-only.
    Weekday { weekday: Weekday, shift: WeekShift },
    /// "in 2 weeks", "two weeks from now". Preserves the anchor's
    /// time of day.
    Shift { amount: i64, grain: Grain },
    /// "next week", "last month" as standalone phrases. Date-only.
    PeriodOffset { amount: i32, grain: Grain },
    /// "the third Friday of next month". Date-only; `n` is 1-indexed.
    NthWeekdayOfMonth { n: u32, weekday: Weekday, month: MonthRef },
    /// "2024-01-15", "1/15/2024". Date-only.
    Absolute { year: i32, month: u32, day: u32 },
    /// "Jan 15", "15/3" — month and day without a year; the next
    /// occurrence at-or-after the reference date. Date-only.
    MonthDay { month: u32, day: u32 },
}

/// Resolve `expr` against `reference`. `None` means the phrase has no valid
/// calendar value and the candidate must be dropped.
pub(crate) fn normalize(expr: &DateExpr, reference: NaiveDateTime) -> Option<NaiveDateTime> {
    match *expr {
        DateExpr::DayOffset(days) => {
            let date = reference.date().checked_add_signed(Duration::days(days))?;
            date.and_hms_opt(0, 0, 0)
        }
        DateExpr::Weekday { weekday, shift } => {
            let date = resolve_weekday(reference.date(), weekday, shift)?;
            date.and_hms_opt(0, 0, 0)
        }
        DateExpr::Shift { amount, grain } => Some(shift_datetime(reference, amount, grain)),
        DateExpr::PeriodOffset { amount, grain } => {
            shift_datetime(reference, amount as i64, grain).date().and_hms_opt(0, 0, 0)
        }
        DateExpr::NthWeekdayOfMonth { n, weekday, month } => {
            let (year, month) = resolve_month_ref(month, reference)?;
            let date = nth_weekday_of_month(n, weekday, year, month)?;
            date.and_hms_opt(0, 0, 0)
        }
        DateExpr::Absolute { year, month, day } => NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0),
        DateExpr::MonthDay { month, day } => {
            let this_year = NaiveDate::from_ymd_opt(reference.year(), month, day);
            let date = match this_year {
                Some(d) if d >= reference.date() => d,
                _ => NaiveDate::from_ymd_opt(reference.year() + 1, month, day)?,
            };
            date.and_hms_opt(0, 0, 0)
        }
    }
}

fn shift_datetime(dt: NaiveDateTime, amount: i64, grain: Grain) -> NaiveDateTime {
    match grain {
        Grain::Day => dt + Duration::days(amount),
        Grain::Week => dt + Duration::weeks(amount),
        Grain::Month => add_months(dt, amount as i32),
    }
}

fn resolve_weekday(reference: NaiveDate, weekday: Weekday, shift: WeekShift) -> Option<NaiveDate> {
    let ref_dow = reference.weekday().num_days_from_monday() as i64;
    let target_dow = weekday.num_days_from_monday() as i64;
    match shift {
        WeekShift::Upcoming | WeekShift::This => {
            let ahead = (target_dow - ref_dow).rem_euclid(7);
            reference.checked_add_signed(Duration::days(ahead))
        }
        WeekShift::Next => {
            let next_monday = reference.checked_add_signed(Duration::days(7 - ref_dow))?;
            next_monday.checked_add_signed(Duration::days(target_dow))
        }
        WeekShift::Last => {
            let last_monday = reference.checked_sub_signed(Duration::days(ref_dow + 7))?;
            last_monday.checked_add_signed(Duration::days(target_dow))
        }
    }
}

fn resolve_month_ref(month: MonthRef, reference: NaiveDateTime) -> Option<(i32, u32)> {
    match month {
        MonthRef::Relative(offset) => {
            let first = NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1)?.and_hms_opt(0, 0, 0)?;
            let shifted = add_months(first, offset);
            Some((shifted.year(), shifted.month()))
        }
        MonthRef::Named { month, year: Some(year) } => Some((year, month)),
        MonthRef::Named { month, year: None } => {
            let year = if month >= reference.month() { reference.year() } else { reference.year() + 1 };
            Some((year, month))
        }
    }
}

/// Nth (1-indexed) occurrence of `weekday` in `(year, month)`. Months with
/// fewer than `n` such weekdays resolve to `None`.
fn nth_weekday_of_month(n: u32, weekday: Weekday, year: i32, month: u32) -> Option<NaiveDate> {
    if n == 0 {
        return None;
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let first_dow = first.weekday().num_days_from_monday() as i64;
    let target_dow = weekday.num_days_from_monday() as i64;
    let day = 1 + (target_dow - first_dow).rem_euclid(7) as u32 + 7 * (n - 1);
    if day > days_in_month(year, month) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn add_months(dt: NaiveDateTime, months: i32) -> NaiveDateTime {
    let zero_based = dt.date().month() as i32 - 1 + months;
    let year = dt.date().year() + zero_based.div_euclid(12);
    let month = (zero_based.rem_euclid(12) + 1) as u32;
    let day = dt.date().day().min(days_in_month(year, month));
    let date = NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| dt.date());
    NaiveDateTime::new(date, dt.time())
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 1).unwrap());
    (first_next - Duration::days(1)).day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn third_friday_of_next_month() {
        // 2024-01-15 is a Monday; next month is February 2024.
        let expr = DateExpr::NthWeekdayOfMonth { n: 3, weekday: Weekday::Fri, month: MonthRef::Relative(1) };
        assert_eq!(normalize(&expr, anchor(2024, 1, 15)), Some(anchor(2024, 2, 16)));
    }

    #[test]
    fn two_weeks_from_now_preserves_time_of_day() {
        let expr = DateExpr::Shift { amount: 2, grain: Grain::Week };
        assert_eq!(normalize(&expr, anchor(2024, 1, 15)), Some(anchor(2024, 1, 29)));

        let evening = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(18, 45, 0).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 29).unwrap().and_hms_opt(18, 45, 0).unwrap();
        assert_eq!(normalize(&expr, evening), Some(expected));
    }

    #[test]
    fn missing_fifth_friday_fails_instead_of_wrapping() {
        // February 2024 has four Fridays (2, 9, 16, 23).
        let expr = DateExpr::NthWeekdayOfMonth { n: 5, weekday: Weekday::Fri, month: MonthRef::Relative(1) };
        assert_eq!(normalize(&expr, anchor(2024, 1, 15)), None);
    }

    #[test]
    fn weekday_counting_today() {
        // Anchor is a Monday: bare "Monday" resolves to the anchor itself.
        let expr = DateExpr::Weekday { weekday: Weekday::Mon, shift: WeekShift::Upcoming };
        assert_eq!(normalize(&expr, anchor(2024, 1, 15)), Some(anchor(2024, 1, 15)));

        let expr = DateExpr::Weekday { weekday: Weekday::Fri, shift: WeekShift::Upcoming };
        assert_eq!(normalize(&expr, anchor(2024, 1, 15)), Some(anchor(2024, 1, 19)));
    }

    #[test]
    fn next_weekday_lands_in_the_following_week() {
        // "next Friday" from Monday 2024-01-15 is the Friday of next week.
        let expr = DateExpr::Weekday { weekday: Weekday::Fri, shift: WeekShift::Next };
        assert_eq!(normalize(&expr, anchor(2024, 1, 15)), Some(anchor(2024, 1, 26)));

        let expr = DateExpr::Weekday { weekday: Weekday::Fri, shift: WeekShift::Last };
        assert_eq!(normalize(&expr, anchor(2024, 1, 15)), Some(anchor(2024, 1, 12)));
    }

    #[test]
    fn month_shift_clamps_day() {
        let jan31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().and_hms_opt(8, 0, 0).unwrap();
        let feb29 = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap().and_hms_opt(8, 0, 0).unwrap();
        assert_eq!(shift_datetime(jan31, 1, Grain::Month), feb29);
    }

    #[test]
    fn named_month_without_year_picks_next_occurrence() {
        // Anchored in March, "February" means next year's February.
        let expr = DateExpr::NthWeekdayOfMonth {
            n: 1,
            weekday: Weekday::Mon,
            month: MonthRef::Named { month: 2, year: None },
        };
        assert_eq!(normalize(&expr, anchor(2024, 3, 10)), Some(anchor(2025, 2, 3)));
    }

    #[test]
    fn invalid_absolute_date_is_dropped() {
        let expr = DateExpr::Absolute { year: 2024, month: 2, day: 30 };
        assert_eq!(normalize(&expr, anchor(2024, 1, 15)), None);
    }

    #[test]
    fn month_day_rolls_to_next_year_when_past() {
        let expr = DateExpr::MonthDay { month: 1, day: 2 };
        assert_eq!(normalize(&expr, anchor(2024, 1, 15)), Some(anchor(2025, 1, 2)));
    }
}
