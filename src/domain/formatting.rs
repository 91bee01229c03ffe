//! Currency, percentage and month-range formatting.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;

use crate::domain::error::{DomainError, DomainResult};

/// Largest accepted percentage accuracy; beyond this `f64` has no digits left.
pub const MAX_PERCENT_ACCURACY: usize = 12;

/// Largest accepted number of money fraction digits.
pub const MAX_MONEY_DECIMALS: usize = 20;

/// Formats `value` with thousands separators and exactly `decimals` fraction digits.
///
/// ```
/// use citytree::domain::to_money;
/// assert_eq!(to_money(1234567.891, 2).unwrap(), "1,234,567.89");
/// assert_eq!(to_money(1234.0, 0).unwrap(), "1,234");
/// ```
pub fn to_money(value: f64, decimals: usize) -> DomainResult<String> {
    if !value.is_finite() {
        return Err(DomainError::NonFinite { value });
    }
    if decimals > MAX_MONEY_DECIMALS {
        return Err(DomainError::InvalidArgument(format!(
            "money decimals {} exceeds {}",
            decimals, MAX_MONEY_DECIMALS
        )));
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    // no "-0.00"
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    let grouped = group_thousands(int_part);
    Ok(match frac_part {
        Some(frac_part) => format!("{sign}{grouped}.{frac_part}"),
        None => format!("{sign}{grouped}"),
    })
}

fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    chars
        .rchunks(3)
        .rev()
        .map(|chunk| chunk.iter().collect::<String>())
        .join(",")
}

/// Formats a ratio as a percentage truncated (floored) to `accuracy` places.
///
/// `0.12345` at accuracy 2 is `"12.34%"`; accuracy 0 prints no decimal point.
pub fn to_percent(point: f64, accuracy: usize) -> DomainResult<String> {
    if !point.is_finite() {
        return Err(DomainError::NonFinite { value: point });
    }
    if accuracy > MAX_PERCENT_ACCURACY {
        return Err(DomainError::InvalidArgument(format!(
            "percent accuracy {} exceeds {}",
            accuracy, MAX_PERCENT_ACCURACY
        )));
    }

    let scale = 10f64.powi(accuracy as i32);
    let raw = point * 100.0 * scale;
    if !raw.is_finite() {
        return Err(DomainError::InvalidArgument(format!(
            "{} as a percentage with {} places is out of range",
            point, accuracy
        )));
    }
    // 0.57 * 100 * 100 is 5699.999..., which is representation noise, not a fraction
    let nearest = raw.round();
    let units = if (raw - nearest).abs() < 1e-6 {
        nearest
    } else {
        raw.floor()
    };
    // no "-0.00%"
    let units = if units == 0.0 { 0.0 } else { units };

    Ok(format!("{:.*}%", accuracy, units / scale))
}

/// First and last calendar day of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for MonthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// The month containing `date`.
pub fn month_range(date: NaiveDate) -> DomainResult<MonthRange> {
    let out_of_range = || DomainError::InvalidArgument(format!("month of {} out of range", date));

    let start = date.with_day(1).ok_or_else(out_of_range)?;
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    let end = next_month
        .and_then(|d| d.pred_opt())
        .ok_or_else(out_of_range)?;

    Ok(MonthRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 2, "0.00")]
    #[case(5.0, 2, "5.00")]
    #[case(999.5, 1, "999.5")]
    #[case(1000.0, 2, "1,000.00")]
    #[case(1234567.891, 2, "1,234,567.89")]
    #[case(1234.5678, 4, "1,234.5678")]
    #[case(-9876543.21, 2, "-9,876,543.21")]
    #[case(1234.4, 0, "1,234")]
    #[case(-0.001, 2, "0.00")]
    fn test_to_money(#[case] value: f64, #[case] decimals: usize, #[case] expected: &str) {
        assert_eq!(to_money(value, decimals).unwrap(), expected);
    }

    #[test]
    fn given_nan_when_formatting_money_then_error() {
        assert!(matches!(
            to_money(f64::NAN, 2),
            Err(DomainError::NonFinite { .. })
        ));
    }

    #[rstest]
    #[case(0.0, 2, "0.00%")]
    #[case(0.5, 2, "50.00%")]
    #[case(0.12345, 2, "12.34%")]
    #[case(0.12349, 2, "12.34%")]
    #[case(0.57, 2, "57.00%")]
    #[case(1.0, 0, "100%")]
    #[case(0.123, 0, "12%")]
    #[case(0.1, 3, "10.000%")]
    #[case(-0.0, 2, "0.00%")]
    #[case(-1e-11, 2, "0.00%")]
    #[case(-0.25, 1, "-25.0%")]
    fn test_to_percent(#[case] point: f64, #[case] accuracy: usize, #[case] expected: &str) {
        assert_eq!(to_percent(point, accuracy).unwrap(), expected);
    }

    #[test]
    fn given_finite_point_overflowing_when_scaled_then_error_not_inf() {
        assert!(matches!(
            to_percent(1e296, MAX_PERCENT_ACCURACY),
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn given_excessive_decimals_when_formatting_money_then_error() {
        assert_eq!(to_money(1.5, MAX_MONEY_DECIMALS).unwrap().len(), 22);
        assert!(matches!(
            to_money(1.0, MAX_MONEY_DECIMALS + 1),
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn given_excessive_accuracy_when_formatting_percent_then_error() {
        assert!(matches!(
            to_percent(0.5, MAX_PERCENT_ACCURACY + 1),
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[rstest]
    #[case((2024, 2, 10), "2024-02-01 2024-02-29")]
    #[case((2023, 2, 28), "2023-02-01 2023-02-28")]
    #[case((2023, 12, 31), "2023-12-01 2023-12-31")]
    #[case((2023, 4, 1), "2023-04-01 2023-04-30")]
    fn test_month_range(#[case] ymd: (i32, u32, u32), #[case] expected: &str) {
        let date = NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap();
        assert_eq!(month_range(date).unwrap().to_string(), expected);
    }
}
