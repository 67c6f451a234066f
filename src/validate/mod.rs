//! Parameter validation
//!
//! Cheap sanity checks run before any session lookup or network I/O, so a
//! rejected call leaves no trace behind. Checks stop at the first failure.

use crate::error::{Error, Result};
use crate::types::RequestParams;
use chrono::{Days, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-(0[1-9]|1[0-2])-(0[1-9]|[1-2][0-9]|3[0-1])$").unwrap()
});

/// Validate request parameters
///
/// Rules, in order:
/// 1. `start`, if present, is `yyyy-mm-dd`
/// 2. `end`, if present, is `yyyy-mm-dd`
/// 3. `start` is not after `end`
/// 4. `aggregateData`, if present, is exactly `"true"` or `"false"`
pub fn validate(params: &RequestParams) -> Result<()> {
    let start = params.get("start");
    let end = params.get("end");

    if let Some(start) = start {
        check_date(start)?;
    }
    if let Some(end) = end {
        check_date(end)?;
    }

    if let (Some(start), Some(end)) = (start, end) {
        if to_date(start) > to_date(end) {
            return Err(Error::validation("Start date is greater than end date."));
        }
    }

    if let Some(flag) = params.get("aggregateData") {
        if flag != "true" && flag != "false" {
            return Err(Error::validation(
                "aggregateData must either be 'true' or 'false'.",
            ));
        }
    }

    Ok(())
}

fn check_date(value: &str) -> Result<()> {
    if DATE_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(Error::validation(
            "Date string must be in format yyyy-mm-dd.",
        ))
    }
}

/// Resolve a pattern-checked date, rolling day overflow into the next month
///
/// `2021-02-31` is accepted by the pattern and compares as `2021-03-03`.
fn to_date(value: &str) -> Option<NaiveDate> {
    let caps = DATE_REGEX.captures(value)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u64 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(day - 1))
}

#[cfg(test)]
mod tests;
