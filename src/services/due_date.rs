use chrono::{Datelike, Local, NaiveDate};
use tracing::warn;

/// Parse a loosely formatted due date relative to today's local date.
pub fn parse_due_date(input: &str) -> Option<NaiveDate> {
    parse_due_date_on(input, Local::now().date_naive())
}

/// Parse a due date, resolving year-less input against `today`.
///
/// Accepts an optional `due:` prefix followed by `MM/DD`, `MM/DD/YY`
/// (read as 20YY), `MM/DD/YYYY`, or `YYYY-MM-DD`. Blank input gives
/// `None` silently; anything else unparseable gives `None` with a warning.
pub fn parse_due_date_on(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let mut text = input.trim();
    if text.get(..4).is_some_and(|prefix| prefix.eq_ignore_ascii_case("due:")) {
        text = text[4..].trim();
    }
    if text.is_empty() {
        return None;
    }

    let parsed = parse_slashed(text, today).or_else(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok());
    if parsed.is_none() {
        warn!(input = %input, "could not parse due date");
    }
    parsed
}

fn parse_slashed(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.split('/').collect();
    let (month, day, year) = match parts.as_slice() {
        [m, d] => (*m, *d, today.year()),
        [m, d, y] if y.len() == 2 => (*m, *d, 2000 + y.parse::<i32>().ok()?),
        [m, d, y] if y.len() == 4 => (*m, *d, y.parse::<i32>().ok()?),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_month_day_uses_current_year() {
        assert_eq!(parse_due_date_on("12/25", today()), ymd(2024, 12, 25));
        assert_eq!(parse_due_date_on("due:1/5", today()), ymd(2024, 1, 5));
    }

    #[test]
    fn test_two_and_four_digit_years() {
        assert_eq!(parse_due_date_on("12/25/25", today()), ymd(2025, 12, 25));
        assert_eq!(parse_due_date_on("due: 07/04/2026", today()), ymd(2026, 7, 4));
    }

    #[test]
    fn test_iso_fallback() {
        assert_eq!(parse_due_date_on("2024-11-02", today()), ymd(2024, 11, 2));
        assert_eq!(parse_due_date_on("DUE:2024-11-02", today()), ymd(2024, 11, 2));
    }

    #[test]
    fn test_invalid_input_gives_none() {
        assert_eq!(parse_due_date_on("", today()), None);
        assert_eq!(parse_due_date_on("due:", today()), None);
        assert_eq!(parse_due_date_on("13/40", today()), None);
        assert_eq!(parse_due_date_on("02/30/2024", today()), None);
        assert_eq!(parse_due_date_on("next tuesday", today()), None);
        assert_eq!(parse_due_date_on("1/2/345", today()), None);
    }
}
