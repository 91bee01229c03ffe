//! Tests for the bit, Fibonacci and formatting helpers through the public API

use chrono::NaiveDate;
use rstest::rstest;

use citytree::domain::{
    count_set_bits, fibonacci_nth, get_bit, month_range, multiply, set_bit, to_money, to_percent,
    DomainError,
};

#[test]
fn given_numbers_when_counting_bits_then_matches_reading_each_bit() {
    for number in [0u64, 1, 2, 255, 256, 0xDEAD_BEEF, u64::MAX - 1] {
        let by_reading: u32 = (0..64).map(|p| u32::from(get_bit(number, p))).sum();
        assert_eq!(count_set_bits(number), by_reading, "number {number:#x}");
    }
}

#[test]
fn given_cleared_number_when_setting_each_bit_then_rebuilds_all_ones() {
    let all_ones = (0..64).fold(0u64, |acc, p| set_bit(acc, p, true));
    assert_eq!(all_ones, u64::MAX);

    let all_zero = (0..64).fold(all_ones, |acc, p| set_bit(acc, p, false));
    assert_eq!(all_zero, 0);
}

#[test]
fn given_operand_grid_when_multiplying_then_matches_native() {
    let operands = [-1_000_003i64, -17, -1, 0, 1, 2, 3, 255, 65_536, 9_999_991];
    for a in operands {
        for b in operands {
            assert_eq!(multiply(a, b), a * b, "{a} * {b}");
        }
    }
}

#[test]
fn given_consecutive_positions_when_computing_fibonacci_then_recurrence_holds() {
    for n in 2..180 {
        let (a, b, c) = (
            fibonacci_nth(n - 2).unwrap(),
            fibonacci_nth(n - 1).unwrap(),
            fibonacci_nth(n).unwrap(),
        );
        assert_eq!(a + b, c, "F({n})");
    }
}

#[rstest]
#[case(12.5, 2, "12.50")]
#[case(1_000_000.0, 0, "1,000,000")]
#[case(-1234.5, 1, "-1,234.5")]
fn given_value_when_formatting_money_then_grouped(
    #[case] value: f64,
    #[case] decimals: usize,
    #[case] expected: &str,
) {
    assert_eq!(to_money(value, decimals).unwrap(), expected);
}

#[test]
fn given_infinite_input_when_formatting_then_non_finite_error() {
    assert!(matches!(
        to_money(f64::INFINITY, 2),
        Err(DomainError::NonFinite { .. })
    ));
    assert!(matches!(
        to_percent(f64::NEG_INFINITY, 2),
        Err(DomainError::NonFinite { .. })
    ));
}

#[rstest]
#[case(0.0001, 2, "0.01%")]
#[case(0.99999, 2, "99.99%")]
#[case(2.5, 1, "250.0%")]
fn given_ratio_when_formatting_percent_then_truncated(
    #[case] point: f64,
    #[case] accuracy: usize,
    #[case] expected: &str,
) {
    assert_eq!(to_percent(point, accuracy).unwrap(), expected);
}

#[test]
fn given_every_month_of_leap_year_when_computing_range_then_spans_whole_year() {
    let mut days = 0;
    for month in 1..=12 {
        let date = NaiveDate::from_ymd_opt(2024, month, 15).unwrap();
        let range = month_range(date).unwrap();
        assert_eq!(range.start.format("%d").to_string(), "01");
        days += (range.end - range.start).num_days() + 1;
    }
    assert_eq!(days, 366);
}
