//! The calendar-add primitive and local date-time construction.
//!
//! `add_date` normalizes like a wall calendar: months carry into years, and a
//! day-of-month that does not exist in the target month rolls forward into the
//! next one (Jan 31 + 1 month is Mar 3 in a common year). The wall-clock time
//! is kept and re-resolved in the instant's zone via [`crate::dst`].

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

use crate::config::MONTHS_PER_YEAR;
use crate::dst::resolve_local;

/// Add years, months and days to `instant` with calendar normalization.
///
/// Returns `None` if the result falls outside chrono's representable range.
pub fn add_date(instant: &DateTime<Tz>, years: i64, months: i64, days: i64) -> Option<DateTime<Tz>> {
    let local = instant.naive_local();
    let date = local.date();

    let total_months = (date.year() as i64)
        .checked_add(years)?
        .checked_mul(MONTHS_PER_YEAR)?
        .checked_add(date.month0() as i64)?
        .checked_add(months)?;
    let year = i32::try_from(total_months.div_euclid(MONTHS_PER_YEAR)).ok()?;
    let month = total_months.rem_euclid(MONTHS_PER_YEAR) as u32 + 1;

    // Day offset from the first of the target month; overflow rolls forward.
    let offset_days = (date.day() as i64 - 1).checked_add(days)?;
    let new_date = NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_signed(Duration::try_days(offset_days)?)?;

    resolve_local(&instant.timezone(), &new_date.and_time(local.time()))
}

/// Build a local date-time in `tz`, resolving DST transitions.
pub fn local_datetime(
    tz: &Tz,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<DateTime<Tz>> {
    let naive: NaiveDateTime = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    resolve_local(tz, &naive)
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

/// The last day of the month before `instant`'s month, same time of day.
pub fn last_day_of_previous_month(instant: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    add_date(instant, 0, 0, -(instant.naive_local().day() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Tz> {
        Tz::UTC.with_ymd_and_hms(y, m, d, 15, 4, 5).unwrap()
    }

    #[test]
    fn month_overflow_rolls_into_next_month() {
        assert_eq!(add_date(&utc(2021, 1, 31), 0, 1, 0).unwrap(), utc(2021, 3, 3));
        assert_eq!(add_date(&utc(2020, 1, 31), 0, 1, 0).unwrap(), utc(2020, 3, 2));
    }

    #[test]
    fn negative_months_borrow_from_years() {
        assert_eq!(add_date(&utc(2021, 1, 15), 0, -2, 0).unwrap(), utc(2020, 11, 15));
        assert_eq!(add_date(&utc(2021, 1, 15), -1, 14, 0).unwrap(), utc(2021, 3, 15));
    }

    #[test]
    fn days_cross_month_and_year_boundaries() {
        assert_eq!(add_date(&utc(2020, 12, 30), 0, 0, 3).unwrap(), utc(2021, 1, 2));
        assert_eq!(add_date(&utc(2021, 3, 1), 0, 0, -1).unwrap(), utc(2021, 2, 28));
    }

    #[test]
    fn leap_day_plus_one_year_rolls_to_march() {
        assert_eq!(add_date(&utc(2020, 2, 29), 1, 0, 0).unwrap(), utc(2021, 3, 1));
    }

    #[test]
    fn out_of_range_is_none() {
        assert!(add_date(&utc(2021, 1, 1), i64::MAX / 2, 0, 0).is_none());
        assert!(add_date(&utc(2021, 1, 1), 0, 0, i64::MAX).is_none());
    }

    #[test]
    fn day_add_keeps_wall_clock_across_dst() {
        let tz: Tz = "Europe/Paris".parse().unwrap();
        let before = tz.with_ymd_and_hms(2026, 3, 28, 12, 0, 0).unwrap();
        let after = add_date(&before, 0, 0, 1).unwrap();
        assert_eq!(after.hour(), 12);
        assert_eq!((after - before).num_hours(), 23);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2021, 2), Some(28));
        assert_eq!(days_in_month(2020, 2), Some(29));
        assert_eq!(days_in_month(2021, 12), Some(31));
        assert_eq!(days_in_month(2021, 13), None);
    }

    #[test]
    fn previous_month_end() {
        assert_eq!(
            last_day_of_previous_month(&utc(2021, 3, 3)).unwrap(),
            utc(2021, 2, 28)
        );
    }
}
