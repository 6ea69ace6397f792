//! Date and title formatting for timeline labels.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::{TimelineError, TimelineResult};

/// Parse a `YYYY-MM-DD` calendar date.
///
/// Dates are treated as plain calendar days, never shifted by a time zone.
pub fn parse_date(value: &str) -> TimelineResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| TimelineError::InvalidDate {
        value: value.to_string(),
        source,
    })
}

/// `2025-01-15` → `15/01/25`.
pub fn format_date(value: &str) -> TimelineResult<String> {
    Ok(parse_date(value)?.format("%d/%m/%y").to_string())
}

/// Spanish weekday name of a `YYYY-MM-DD` date.
pub fn day_of_week(value: &str) -> TimelineResult<&'static str> {
    Ok(spanish_weekday(parse_date(value)?.weekday()))
}

fn spanish_weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// Turn a slug into a display title: `two-sum` → `Two Sum`.
///
/// Hyphens become spaces and every ASCII letter that starts a word is
/// upper-cased. Only `[A-Za-z0-9_]` count as word characters, so a letter
/// following an accented one also starts a word.
pub fn normalize_title(slug: &str) -> String {
    let mut title = String::with_capacity(slug.len());
    let mut prev_is_word = false;

    for c in slug.chars() {
        let c = if c == '-' { ' ' } else { c };
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            title.push(c.to_ascii_uppercase());
        } else {
            title.push(c);
        }
        prev_is_word = is_word;
    }

    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-01-15").unwrap(), "15/01/25");
        assert_eq!(format_date("1999-12-31").unwrap(), "31/12/99");
    }

    #[test]
    fn test_format_date_rejects_garbage() {
        let err = format_date("15/01/2025").unwrap_err();
        assert!(matches!(err, TimelineError::InvalidDate { ref value, .. } if value == "15/01/2025"));
        assert!(format_date("2025-02-30").is_err());
    }

    #[test]
    fn test_day_of_week() {
        assert_eq!(day_of_week("2025-01-15").unwrap(), "miércoles");
        assert_eq!(day_of_week("2025-01-19").unwrap(), "domingo");
        assert_eq!(day_of_week("2025-01-18").unwrap(), "sábado");
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("two-sum"), "Two Sum");
        assert_eq!(normalize_title("3sum-closest"), "3sum Closest");
        assert_eq!(normalize_title("already Titled"), "Already Titled");
        assert_eq!(normalize_title(""), "");
    }

    #[test]
    fn test_normalize_title_word_boundaries() {
        assert_eq!(normalize_title("don't-stop"), "Don'T Stop");
        assert_eq!(normalize_title("más-allá"), "MáS Allá");
        assert_eq!(normalize_title("snake_case-id"), "Snake_case Id");
    }
}
