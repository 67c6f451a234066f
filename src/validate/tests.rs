//! Tests for parameter validation

use super::*;
use test_case::test_case;

fn params(pairs: &[(&str, &str)]) -> RequestParams {
    pairs.iter().copied().collect()
}

fn validation_message(result: Result<()>) -> String {
    match result {
        Err(Error::Validation { message }) => message,
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn test_empty_params_pass() {
    assert!(validate(&RequestParams::new()).is_ok());
}

#[test]
fn test_unrelated_fields_are_not_checked() {
    assert!(validate(&params(&[("rtn", "xml"), ("page", "abc"), ("foo", "")])).is_ok());
}

// ============================================================================
// Date Format Tests
// ============================================================================

#[test_case("2021-01-01" ; "first day")]
#[test_case("2021-12-31" ; "last day")]
#[test_case("2021-02-31" ; "day count not calendar aware")]
#[test_case("0000-01-01" ; "year zero")]
fn test_valid_start_date(date: &str) {
    assert!(validate(&params(&[("start", date)])).is_ok());
}

#[test_case("2021-13-01" ; "month thirteen")]
#[test_case("2021-00-10" ; "month zero")]
#[test_case("2021-01-00" ; "day zero")]
#[test_case("2021-01-32" ; "day thirty two")]
#[test_case("2021-1-01" ; "single digit month")]
#[test_case("21-01-01" ; "two digit year")]
#[test_case("2021/01/01" ; "slashes")]
#[test_case("2021-01-01T00:00:00" ; "timestamp")]
#[test_case("" ; "empty")]
fn test_invalid_start_date(date: &str) {
    let message = validation_message(validate(&params(&[("start", date)])));
    assert_eq!(message, "Date string must be in format yyyy-mm-dd.");
}

#[test]
fn test_invalid_end_date() {
    let message = validation_message(validate(&params(&[("end", "2021-13-01")])));
    assert_eq!(message, "Date string must be in format yyyy-mm-dd.");
}

// ============================================================================
// Date Ordering Tests
// ============================================================================

#[test]
fn test_start_after_end_fails() {
    let message = validation_message(validate(&params(&[
        ("start", "2021-01-01"),
        ("end", "2020-01-01"),
    ])));
    assert_eq!(message, "Start date is greater than end date.");
}

#[test_case("2020-01-01", "2020-02-01" ; "start before end")]
#[test_case("2020-01-01", "2020-01-01" ; "same day")]
fn test_ordered_dates_pass(start: &str, end: &str) {
    assert!(validate(&params(&[("start", start), ("end", end)])).is_ok());
}

#[test]
fn test_overflowing_day_compares_as_next_month() {
    // 2021-02-31 rolls over to 2021-03-03
    let result = validate(&params(&[("start", "2021-02-31"), ("end", "2021-03-02")]));
    assert_eq!(
        validation_message(result),
        "Start date is greater than end date."
    );

    let result = validate(&params(&[("start", "2021-02-31"), ("end", "2021-03-03")]));
    assert!(result.is_ok());
}

#[test]
fn test_format_checked_before_ordering() {
    let message = validation_message(validate(&params(&[
        ("start", "2021-01-01"),
        ("end", "2020-13-01"),
    ])));
    assert_eq!(message, "Date string must be in format yyyy-mm-dd.");
}

// ============================================================================
// aggregateData Tests
// ============================================================================

#[test_case("true" ; "lower true")]
#[test_case("false" ; "lower false")]
fn test_aggregate_data_valid(value: &str) {
    assert!(validate(&params(&[("aggregateData", value)])).is_ok());
}

#[test_case("yes" ; "yes")]
#[test_case("TRUE" ; "upper case")]
#[test_case("1" ; "numeric")]
#[test_case("" ; "empty")]
fn test_aggregate_data_invalid(value: &str) {
    let message = validation_message(validate(&params(&[("aggregateData", value)])));
    assert_eq!(message, "aggregateData must either be 'true' or 'false'.");
}

#[test]
fn test_aggregate_data_from_bool() {
    let params = RequestParams::new().with("aggregateData", false);
    assert!(validate(&params).is_ok());
}

#[test]
fn test_first_violation_wins() {
    let message = validation_message(validate(&params(&[
        ("aggregateData", "yes"),
        ("start", "bad"),
    ])));
    assert_eq!(message, "Date string must be in format yyyy-mm-dd.");
}
