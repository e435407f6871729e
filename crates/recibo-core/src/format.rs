//! Human-readable formatting for the receipt views

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

const FILE_SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Render a byte count in base-1024 units with up to two decimals.
///
/// Zero is special-cased to "0 Bytes" so the unit selection below never
/// takes the logarithm of zero.
pub fn format_file_size(size: i64) -> String {
    if size <= 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((size as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(FILE_SIZE_UNITS.len() - 1);
    let value = size as f64 / 1024_f64.powi(exponent as i32);

    let mut rendered = format!("{:.2}", value);
    if rendered.contains('.') {
        rendered = rendered.trim_end_matches('0').trim_end_matches('.').to_string();
    }

    format!("{} {}", rendered, FILE_SIZE_UNITS[exponent])
}

/// Render a monetary amount with two decimals and an optional currency suffix.
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    format!("{:.2}{}", amount, currency)
}

/// Short upload-time label, e.g. "Mar 5, 1:05 PM".
pub fn format_upload_date(uploaded_at: DateTime<Utc>) -> String {
    uploaded_at.format("%b %-d, %-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    #[test]
    fn test_format_file_size_zero() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(-1), "0 Bytes");
    }

    #[test]
    fn test_format_file_size_exact_kilobyte() {
        assert_eq!(format_file_size(1024), "1 KB");
    }

    #[test]
    fn test_format_file_size_fractional() {
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(500), "500 Bytes");
    }

    #[test]
    fn test_format_file_size_larger_units() {
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5 GB");
        assert_eq!(format_file_size(1024_i64.pow(4)), "1 TB");
    }

    #[test]
    fn test_format_file_size_two_decimal_rounding() {
        // 2048000 bytes = 1.953125 MB, rounded to two decimals
        assert_eq!(format_file_size(2_048_000), "1.95 MB");
    }

    #[test]
    fn test_format_currency() {
        let amount = Decimal::from_str("23.4").unwrap();
        assert_eq!(format_currency(amount, "EUR"), "23.40EUR");
        assert_eq!(format_currency(amount, ""), "23.40");
    }

    #[test]
    fn test_format_upload_date() {
        let date = Utc.with_ymd_and_hms(2026, 3, 5, 13, 5, 0).unwrap();
        assert_eq!(format_upload_date(date), "Mar 5, 1:05 PM");
    }
}
