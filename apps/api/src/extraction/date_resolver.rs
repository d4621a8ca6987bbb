//! Date Resolver — turns the model's date-time expression plus the source text into
//! a best-effort `EventTime`.
//!
//! Resolution order (first success wins):
//! 1. Direct instant: `YYYY-MM-DD HH:MM` is trusted as-is.
//! 2. Symbolic date via `resolve_date`, then a time-of-day scan of the *source text*.
//!
//! A time without an anchor date is discarded, and so is a date whose time pattern
//! cannot form a valid time. Pure functions only; "today" is passed in.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::models::event::EventTime;

const DIRECT_INSTANT_FORMAT: &str = "%Y-%m-%d %H:%M";

const TODAY_WORDS: &[&str] = &["오늘", "today"];
const TOMORROW_WORDS: &[&str] = &["내일", "tomorrow"];
const YESTERDAY_WORDS: &[&str] = &["어제", "yesterday"];

const PM_MARKER: &str = "오후";

// Patterns match ASCII digits only; full-width digits are folded first.
static RE_ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid regex"));
static RE_MONTH_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{1,2})월\s*([0-9]{1,2})일").expect("Invalid regex"));
static RE_SLASH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{1,2})/([0-9]{1,2})").expect("Invalid regex"));

// Hour forms: "3시", "오전 3시", "오후 3시". Leftmost match picks up a leading marker.
static RE_HOUR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(오전|오후)\s*)?([0-9]{1,2})시").expect("Invalid regex")
});
static RE_CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{1,2}):([0-9]{1,2})").expect("Invalid regex"));

/// Result of scanning text for a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeScan {
    Found(NaiveTime),
    /// A time pattern matched but names no real time, e.g. "25시".
    Invalid,
    NotFound,
}

/// Resolves a date-time expression against `source_text`.
///
/// Returns `None` when no date can be derived, even if the text carries a time,
/// and when the first time pattern in the text is out of range.
pub fn resolve_event_time(expr: &str, source_text: &str, today: NaiveDate) -> Option<EventTime> {
    if let Some(instant) = parse_direct_instant(expr) {
        return Some(EventTime::DateTime(instant));
    }

    let date = resolve_date(expr, today)?;
    match scan_time_of_day(source_text) {
        TimeScan::Found(time) => Some(EventTime::DateTime(date.and_time(time))),
        TimeScan::NotFound => Some(EventTime::Date(date)),
        TimeScan::Invalid => None,
    }
}

fn parse_direct_instant(expr: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(normalize_digits(expr.trim()).as_ref(), DIRECT_INSTANT_FORMAT).ok()
}

/// Maps a date expression to a calendar date.
///
/// Handles: "오늘"/"today", "내일"/"tomorrow", "어제"/"yesterday", "2025-12-25",
/// "12월 25일", "12/25". Month/day forms always land in `today`'s year, even when
/// that date has already passed.
pub fn resolve_date(expr: &str, today: NaiveDate) -> Option<NaiveDate> {
    let expr = normalize_digits(expr.trim()).to_lowercase();

    if TODAY_WORDS.contains(&expr.as_str()) {
        return Some(today);
    }
    if TOMORROW_WORDS.contains(&expr.as_str()) {
        return today.checked_add_signed(Duration::days(1));
    }
    if YESTERDAY_WORDS.contains(&expr.as_str()) {
        return today.checked_sub_signed(Duration::days(1));
    }

    if RE_ISO_DATE.is_match(&expr) {
        return NaiveDate::parse_from_str(&expr, "%Y-%m-%d").ok();
    }

    if let Some(caps) = RE_MONTH_DAY.captures(&expr) {
        return month_day_this_year(&caps[1], &caps[2], today);
    }

    if let Some(caps) = RE_SLASH_DATE.captures(&expr) {
        return month_day_this_year(&caps[1], &caps[2], today);
    }

    None
}

fn month_day_this_year(month: &str, day: &str, today: NaiveDate) -> Option<NaiveDate> {
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(today.year(), month, day)
}

/// Scans free text for a time of day.
///
/// Hour forms ("3시", "오전 3시", "오후 3시") are tried before the "14:30" clock form,
/// and the first match wins, valid or not. "오후" adds 12 to hours below 12.
pub fn scan_time_of_day(text: &str) -> TimeScan {
    let text = normalize_digits(text);

    if let Some(caps) = RE_HOUR.captures(&text) {
        let Ok(mut hour) = caps[2].parse::<u32>() else {
            return TimeScan::Invalid;
        };
        let is_pm = caps.get(1).is_some_and(|m| m.as_str() == PM_MARKER);
        if is_pm && hour < 12 {
            hour += 12;
        }
        return to_scan(NaiveTime::from_hms_opt(hour, 0, 0));
    }

    if let Some(caps) = RE_CLOCK.captures(&text) {
        let (Ok(hour), Ok(minute)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
            return TimeScan::Invalid;
        };
        return to_scan(NaiveTime::from_hms_opt(hour, minute, 0));
    }

    TimeScan::NotFound
}

fn to_scan(time: Option<NaiveTime>) -> TimeScan {
    time.map_or(TimeScan::Invalid, TimeScan::Found)
}

fn is_fullwidth_digit(c: char) -> bool {
    ('０'..='９').contains(&c)
}

/// Folds full-width digits ("１２월") to ASCII so the patterns and parsers see them.
fn normalize_digits(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_fullwidth_digit) {
        return Cow::Borrowed(text);
    }
    text.chars()
        .map(|c| {
            if is_fullwidth_digit(c) {
                char::from(b'0' + (c as u32 - '０' as u32) as u8)
            } else {
                c
            }
        })
        .collect::<String>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_today_keyword_returns_today() {
        let today = ymd(2025, 3, 10);
        assert_eq!(resolve_date("오늘", today), Some(today));
        assert_eq!(resolve_date("Today", today), Some(today));
    }

    #[test]
    fn test_tomorrow_korean_and_english_agree() {
        let today = ymd(2025, 12, 31);
        assert_eq!(resolve_date("내일", today), Some(ymd(2026, 1, 1)));
        assert_eq!(resolve_date("내일", today), resolve_date("tomorrow", today));
    }

    #[test]
    fn test_yesterday_keyword() {
        let today = ymd(2025, 3, 1);
        assert_eq!(resolve_date(" 어제 ", today), Some(ymd(2025, 2, 28)));
        assert_eq!(resolve_date("YESTERDAY", today), Some(ymd(2025, 2, 28)));
    }

    #[test]
    fn test_iso_date_passes_through() {
        let today = ymd(2025, 3, 10);
        assert_eq!(resolve_date("2024-07-04", today), Some(ymd(2024, 7, 4)));
    }

    #[test]
    fn test_invalid_iso_date_is_absent() {
        assert_eq!(resolve_date("2025-13-45", ymd(2025, 1, 1)), None);
    }

    #[test]
    fn test_month_day_korean_uses_current_year() {
        let today = ymd(2025, 6, 1);
        assert_eq!(resolve_date("12월 25일", today), Some(ymd(2025, 12, 25)));
        assert_eq!(resolve_date("3월3일 오후", today), Some(ymd(2025, 3, 3)));
    }

    /// Known boundary: no rollover to next year once the date has passed.
    #[test]
    fn test_month_day_in_past_stays_in_current_year() {
        let today = ymd(2025, 12, 28);
        assert_eq!(resolve_date("1월 5일", today), Some(ymd(2025, 1, 5)));
        assert_eq!(resolve_date("1/5", today), Some(ymd(2025, 1, 5)));
    }

    #[test]
    fn test_slash_date_uses_current_year() {
        let today = ymd(2025, 6, 1);
        assert_eq!(resolve_date("12/25", today), Some(ymd(2025, 12, 25)));
    }

    #[test]
    fn test_invalid_month_day_is_absent() {
        let today = ymd(2025, 6, 1);
        assert_eq!(resolve_date("2월 30일", today), None);
        assert_eq!(resolve_date("4/31", today), None);
        assert_eq!(resolve_date("13월 1일", today), None);
    }

    #[test]
    fn test_unrecognized_expression_is_absent() {
        let today = ymd(2025, 6, 1);
        assert_eq!(resolve_date("다음 주 목요일", today), None);
        assert_eq!(resolve_date("", today), None);
    }

    #[test]
    fn test_time_pm_marker_adds_twelve() {
        assert_eq!(scan_time_of_day("오후 3시에 뵙겠습니다"), TimeScan::Found(hm(15, 0)));
        assert_eq!(scan_time_of_day("오후3시"), TimeScan::Found(hm(15, 0)));
    }

    #[test]
    fn test_time_pm_marker_keeps_noon() {
        assert_eq!(scan_time_of_day("오후 12시"), TimeScan::Found(hm(12, 0)));
    }

    #[test]
    fn test_time_am_marker_unchanged() {
        assert_eq!(scan_time_of_day("오전 3시"), TimeScan::Found(hm(3, 0)));
    }

    #[test]
    fn test_time_bare_hour_unchanged() {
        assert_eq!(scan_time_of_day("14시 미팅"), TimeScan::Found(hm(14, 0)));
        assert_eq!(scan_time_of_day("3시"), TimeScan::Found(hm(3, 0)));
    }

    #[test]
    fn test_time_clock_form() {
        assert_eq!(scan_time_of_day("meet at 14:30 sharp"), TimeScan::Found(hm(14, 30)));
    }

    #[test]
    fn test_time_hour_form_beats_clock_form() {
        assert_eq!(scan_time_of_day("9:15 말고 4시로 해주세요"), TimeScan::Found(hm(4, 0)));
    }

    #[test]
    fn test_time_absent_when_no_pattern() {
        assert_eq!(scan_time_of_day("내일 봬요"), TimeScan::NotFound);
    }

    #[test]
    fn test_time_out_of_range_is_invalid() {
        assert_eq!(scan_time_of_day("25:10"), TimeScan::Invalid);
        assert_eq!(scan_time_of_day("25시"), TimeScan::Invalid);
        assert_eq!(scan_time_of_day("14:75"), TimeScan::Invalid);
    }

    #[test]
    fn test_invalid_time_does_not_fall_through_to_clock_form() {
        assert_eq!(scan_time_of_day("25시 또는 14:30"), TimeScan::Invalid);
    }

    #[test]
    fn test_fullwidth_digits_in_dates() {
        let today = ymd(2025, 6, 1);
        assert_eq!(resolve_date("１２월 ２５일", today), Some(ymd(2025, 12, 25)));
        assert_eq!(resolve_date("１２/２５", today), Some(ymd(2025, 12, 25)));
        assert_eq!(resolve_date("２０２５-０７-０４", today), Some(ymd(2025, 7, 4)));
    }

    #[test]
    fn test_fullwidth_digits_in_times() {
        assert_eq!(scan_time_of_day("오후 ３시"), TimeScan::Found(hm(15, 0)));
        assert_eq!(scan_time_of_day("３시 또는 14:30"), TimeScan::Found(hm(3, 0)));
        assert_eq!(scan_time_of_day("１４:３０"), TimeScan::Found(hm(14, 30)));
    }

    #[test]
    fn test_direct_instant_is_trusted() {
        let today = ymd(2025, 6, 1);
        let resolved = resolve_event_time("2025-01-15 14:00", "오후 5시", today);
        assert_eq!(
            resolved,
            Some(EventTime::DateTime(ymd(2025, 1, 15).and_time(hm(14, 0))))
        );
    }

    #[test]
    fn test_date_with_time_from_source_text() {
        let today = ymd(2025, 6, 1);
        let resolved = resolve_event_time("내일", "내일 오후 3시에 면접 가능하신가요?", today);
        assert_eq!(
            resolved,
            Some(EventTime::DateTime(ymd(2025, 6, 2).and_time(hm(15, 0))))
        );
    }

    #[test]
    fn test_date_without_time_is_date_only() {
        let today = ymd(2025, 6, 1);
        let resolved = resolve_event_time("12월 25일", "크리스마스에 픽업할게요", today);
        assert_eq!(resolved, Some(EventTime::Date(ymd(2025, 12, 25))));
    }

    #[test]
    fn test_time_without_date_is_discarded() {
        let today = ymd(2025, 6, 1);
        assert_eq!(resolve_event_time("목요일", "목요일 오후 3시", today), None);
    }

    #[test]
    fn test_out_of_range_time_makes_instant_absent() {
        let today = ymd(2025, 6, 1);
        assert_eq!(resolve_event_time("내일", "내일 25시에 봬요", today), None);
        assert_eq!(resolve_event_time("12/25", "12/25 25:10", today), None);
    }

    #[test]
    fn test_fullwidth_date_and_time_combine() {
        let today = ymd(2025, 6, 1);
        let resolved = resolve_event_time("１２월 ２５일", "１２월 ２５일 오후 ３시 픽업", today);
        assert_eq!(
            resolved,
            Some(EventTime::DateTime(ymd(2025, 12, 25).and_time(hm(15, 0))))
        );
    }
}
