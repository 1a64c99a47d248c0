//! Days-until-drawing countdown.
//!
//! Raffle dates are stored as `dd.MM.yy` and read as midnight UTC on that
//! Gregorian date, independent of locale and local timezone.

use chrono::{DateTime, NaiveDate, Utc};

pub const RAFFLE_DATE_FORMAT: &str = "%d.%m.%y";

#[must_use]
pub fn parse_raffle_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), RAFFLE_DATE_FORMAT).ok()
}

/// Whole days from `now` until the raffle date, truncated toward zero.
///
/// Negative once the date has passed. An unparseable date counts as `now`
/// and yields 0.
#[must_use]
pub fn days_until_raffle(raw: &str, now: DateTime<Utc>) -> i64 {
    let end = parse_raffle_date(raw)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map_or(now, |midnight| midnight.and_utc());
    (end - now).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
            .single()
            .expect("valid instant")
    }

    #[test]
    fn two_days_before_drawing() {
        assert_eq!(days_until_raffle("14.04.24", at(2024, 4, 12, 0)), 2);
    }

    #[test]
    fn partial_days_truncate() {
        assert_eq!(days_until_raffle("14.04.24", at(2024, 4, 12, 10)), 1);
        assert_eq!(days_until_raffle("14.04.24", at(2024, 4, 13, 23)), 0);
    }

    #[test]
    fn past_dates_stay_negative() {
        assert_eq!(days_until_raffle("10.04.24", at(2024, 4, 12, 0)), -2);
        assert_eq!(days_until_raffle("10.04.24", at(2024, 4, 12, 12)), -2);
    }

    #[test]
    fn unparseable_dates_count_as_today() {
        assert_eq!(days_until_raffle("", at(2024, 4, 12, 9)), 0);
        assert_eq!(days_until_raffle("2024-04-14", at(2024, 4, 12, 9)), 0);
        assert_eq!(days_until_raffle("31.02.24", at(2024, 4, 12, 9)), 0);
    }

    #[test]
    fn two_digit_years_land_in_this_century() {
        assert_eq!(
            parse_raffle_date("01.01.30"),
            NaiveDate::from_ymd_opt(2030, 1, 1)
        );
    }
}
