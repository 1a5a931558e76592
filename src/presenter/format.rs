//! Display formatting shared by the presenters. Output is fixed to en-GB.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NHS_NUMBER: Regex = Regex::new(r"^(\d{3})(\d{3})(\d{4})$").unwrap();
}

/// `5 March 2024`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// `5 March 2024 at 2:30pm`
pub fn long_datetime(at: DateTime<Utc>) -> String {
    format!("{} at {}", long_date(at.date_naive()), at.format("%-I:%M%P"))
}

/// Collapse a date span, sharing the parts both ends have in common.
pub fn date_range(first: NaiveDate, last: NaiveDate) -> String {
    let (first, last) = if first <= last { (first, last) } else { (last, first) };
    if first == last {
        long_date(first)
    } else if first.year() == last.year() && first.month() == last.month() {
        format!("{} – {}", first.day(), long_date(last))
    } else if first.year() == last.year() {
        format!("{} – {}", first.format("%-d %B"), long_date(last))
    } else {
        format!("{} – {}", long_date(first), long_date(last))
    }
}

/// Space an NHS number as `999 123 4567`. Anything else passes through trimmed.
pub fn nhs_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    match NHS_NUMBER.captures(&digits) {
        Some(parts) => format!("{} {} {}", &parts[1], &parts[2], &parts[3]),
        None => raw.trim().to_string(),
    }
}

/// Whole years between `dob` and `today`.
pub fn age_in_years(dob: NaiveDate, today: NaiveDate) -> u32 {
    today.years_since(dob).unwrap_or(0)
}

/// `A`, `A and B`, `A, B and C`
pub fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}

/// `1 record`, `3 records`
pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_long_date() {
        assert_eq!(long_date(date(2024, 3, 5)), "5 March 2024");
        assert_eq!(long_date(date(2023, 12, 25)), "25 December 2023");
    }

    #[test]
    fn test_long_datetime() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        assert_eq!(long_datetime(at), "5 March 2024 at 2:30pm");
        let morning = Utc.with_ymd_and_hms(2024, 3, 5, 9, 5, 0).unwrap();
        assert_eq!(long_datetime(morning), "5 March 2024 at 9:05am");
    }

    #[test]
    fn test_date_range() {
        assert_eq!(date_range(date(2024, 3, 5), date(2024, 3, 5)), "5 March 2024");
        assert_eq!(date_range(date(2024, 3, 5), date(2024, 3, 7)), "5 – 7 March 2024");
        assert_eq!(
            date_range(date(2024, 3, 30), date(2024, 4, 2)),
            "30 March – 2 April 2024"
        );
        assert_eq!(
            date_range(date(2024, 1, 2), date(2023, 12, 30)),
            "30 December 2023 – 2 January 2024"
        );
    }

    #[test]
    fn test_nhs_number() {
        assert_eq!(nhs_number("9991234567"), "999 123 4567");
        assert_eq!(nhs_number("999 123 4567"), "999 123 4567");
        assert_eq!(nhs_number(" 12345 "), "12345");
    }

    #[test]
    fn test_age_in_years() {
        assert_eq!(age_in_years(date(2012, 6, 1), date(2024, 5, 31)), 11);
        assert_eq!(age_in_years(date(2012, 6, 1), date(2024, 6, 1)), 12);
        assert_eq!(age_in_years(date(2030, 1, 1), date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_join_list() {
        assert_eq!(join_list::<&str>(&[]), "");
        assert_eq!(join_list(&["Flu"]), "Flu");
        assert_eq!(join_list(&["Flu", "HPV"]), "Flu and HPV");
        assert_eq!(join_list(&["Flu", "HPV", "MenACWY"]), "Flu, HPV and MenACWY");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "error", "errors"), "1 error");
        assert_eq!(plural(0, "error", "errors"), "0 errors");
    }
}
