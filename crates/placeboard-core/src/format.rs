//! Display formatting for amounts, percentages, and dates.

use std::fmt::Display;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

const DATE_FORMAT: &str = "%B %-d, %Y at %-I:%M:%S %p %Z";

/// Formats a rupee amount in Indian units.
///
/// ```text
/// 15_000_000 -> ₹1.50 Crores
///    250_000 -> ₹2.50 Lakhs
///      5_000 -> ₹5.00K
///        500 -> ₹500
/// ```
pub fn format_amount(amount: f64) -> String {
    if amount >= CRORE {
        format!("₹{:.2} Crores", amount / CRORE)
    } else if amount >= LAKH {
        format!("₹{:.2} Lakhs", amount / LAKH)
    } else if amount >= THOUSAND {
        format!("₹{:.2}K", amount / THOUSAND)
    } else {
        format!("₹{amount}")
    }
}

/// Like [`format_amount`], but absent or zero amounts render as "".
pub fn format_optional_amount(amount: Option<f64>) -> String {
    match amount {
        Some(n) if n != 0.0 => format_amount(n),
        _ => String::new(),
    }
}

/// Package value already expressed in lakhs.
pub fn format_lakhs(value: f64) -> String {
    format!("₹{value:.2}L")
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

pub fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

pub fn yes_no_upper(value: bool) -> &'static str {
    if value { "YES" } else { "NO" }
}

/// Formats a timestamp in the local timezone, e.g.
/// "January 5, 2025 at 8:34:05 PM +05:30". Unparseable input is returned as is.
pub fn format_date(input: &str) -> String {
    format_date_with(input, &chrono::Local)
}

/// [`format_date`] in an explicit timezone.
pub fn format_date_with<Tz>(input: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_timestamp(input) {
        Some(utc) => utc.with_timezone(tz).format(DATE_FORMAT).to_string(),
        None => input.to_string(),
    }
}

/// RFC 3339, or a naive ISO-8601 datetime taken as UTC.
fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    #[test]
    fn test_format_amount_units() {
        assert_eq!(format_amount(15_000_000.0), "₹1.50 Crores");
        assert_eq!(format_amount(250_000.0), "₹2.50 Lakhs");
        assert_eq!(format_amount(5_000.0), "₹5.00K");
        assert_eq!(format_amount(500.0), "₹500");
        assert_eq!(format_amount(12.5), "₹12.5");
    }

    #[test]
    fn test_format_amount_boundaries() {
        assert_eq!(format_amount(10_000_000.0), "₹1.00 Crores");
        assert_eq!(format_amount(9_999_999.0), "₹100.00 Lakhs");
        assert_eq!(format_amount(100_000.0), "₹1.00 Lakhs");
        assert_eq!(format_amount(1_000.0), "₹1.00K");
        assert_eq!(format_amount(999.0), "₹999");
    }

    #[test]
    fn test_optional_amount_blank_for_missing_or_zero() {
        assert_eq!(format_optional_amount(None), "");
        assert_eq!(format_optional_amount(Some(0.0)), "");
        assert_eq!(format_optional_amount(Some(2_000.0)), "₹2.00K");
    }

    #[test]
    fn test_lakhs_and_percent() {
        assert_eq!(format_lakhs(12.345), "₹12.35L");
        assert_eq!(format_percent(81.0), "81.00%");
    }

    #[test]
    fn test_format_date_utc() {
        assert_eq!(
            format_date_with("2025-01-05T15:04:05Z", &Utc),
            "January 5, 2025 at 3:04:05 PM UTC"
        );
        assert_eq!(
            format_date_with("2025-01-05T09:30:00.000", &Utc),
            "January 5, 2025 at 9:30:00 AM UTC"
        );
    }

    #[test]
    fn test_format_date_converts_timezone() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(
            format_date_with("2025-01-05T15:04:05Z", &ist),
            "January 5, 2025 at 8:34:05 PM +05:30"
        );
    }

    #[test]
    fn test_format_date_passthrough_on_garbage() {
        assert_eq!(format_date_with("next tuesday", &Utc), "next tuesday");
        assert_eq!(format_date_with("", &Utc), "");
    }
}
