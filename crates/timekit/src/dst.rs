//! Resolution of wall-clock times that fall on a DST transition.
//!
//! Calendar arithmetic keeps the local time-of-day, so the result has to be
//! mapped back into the zone:
//!
//! - unique local time: used as is
//! - ambiguous local time (fall back): the earlier of the two instants
//! - nonexistent local time (spring forward): read with the offset in effect
//!   before the transition, which moves it forward by the length of the gap

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

/// Map a local wall-clock time in `tz` to an instant.
///
/// Returns `None` only when the local time is at the edge of chrono's
/// representable range.
pub fn resolve_local(tz: &Tz, naive: &NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => resolve_gap(tz, naive),
    }
}

fn resolve_gap(tz: &Tz, naive: &NaiveDateTime) -> Option<DateTime<Tz>> {
    // Transitions are never closer than a day apart, so a day earlier is on
    // the far side of the gap.
    let before = naive.checked_sub_signed(Duration::days(1))?;
    let offset = tz.from_local_datetime(&before).earliest()?.offset().fix();
    let utc = naive.checked_sub_signed(Duration::seconds(offset.local_minus_utc() as i64))?;
    Some(tz.from_utc_datetime(&utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike, Utc};

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn unique_local_time_is_kept() {
        let tz: Tz = "America/New_York".parse().unwrap();
        let dt = resolve_local(&tz, &naive(2026, 1, 15, 9, 0)).unwrap();
        assert_eq!(dt.hour(), 9);
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2026, 1, 15, 14, 0, 0).unwrap()
        );
    }

    #[test]
    fn spring_forward_gap_shifts_forward() {
        // 2026-03-08 02:30 does not exist in New York.
        let tz: Tz = "America/New_York".parse().unwrap();
        let dt = resolve_local(&tz, &naive(2026, 3, 8, 2, 30)).unwrap();
        assert_eq!((dt.hour(), dt.minute()), (3, 30));
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2026, 3, 8, 7, 30, 0).unwrap()
        );
    }

    #[test]
    fn fall_back_overlap_takes_earlier_instant() {
        // 2026-11-01 01:30 happens twice in New York; EDT (UTC-4) comes first.
        let tz: Tz = "America/New_York".parse().unwrap();
        let dt = resolve_local(&tz, &naive(2026, 11, 1, 1, 30)).unwrap();
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2026, 11, 1, 5, 30, 0).unwrap()
        );
    }
}
