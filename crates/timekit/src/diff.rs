//! Differences between two [`TimeKit`] values.
//!
//! Every diff takes an optional other value; `None` means "now" in this
//! value's zone. Signed results are positive when `other` is later, except
//! [`diff_in_months`](TimeKit::diff_in_months), which counts from self.

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Offset, Utc};
use chrono_tz::Tz;
use log::{debug, trace, warn};

use crate::config::{DAYS_PER_WEEK, HOURS_PER_DAY, MINUTES_PER_HOUR, SECONDS_PER_MINUTE};
use crate::kit::TimeKit;

impl TimeKit {
    /// `other.timestamp() - self.timestamp()`, or its magnitude when
    /// `absolute` is set.
    pub fn diff_in_seconds(&self, other: Option<&TimeKit>, absolute: bool) -> i64 {
        let other_ts = other.map_or_else(|| Utc::now().timestamp(), TimeKit::timestamp);
        absolute_value(absolute, other_ts.saturating_sub(self.timestamp()))
    }

    /// Seconds difference divided by 60, truncating toward zero.
    pub fn diff_in_minutes(&self, other: Option<&TimeKit>, absolute: bool) -> i64 {
        self.diff_in_seconds(other, absolute) / SECONDS_PER_MINUTE
    }

    pub fn diff_in_hours(&self, other: Option<&TimeKit>, absolute: bool) -> i64 {
        self.diff_in_minutes(other, absolute) / MINUTES_PER_HOUR
    }

    pub fn diff_in_days(&self, other: Option<&TimeKit>, absolute: bool) -> i64 {
        self.diff_in_hours(other, absolute) / HOURS_PER_DAY
    }

    pub fn diff_in_weeks(&self, other: Option<&TimeKit>, absolute: bool) -> i64 {
        self.diff_in_days(other, absolute) / DAYS_PER_WEEK
    }

    /// Complete calendar months between the two dates, counted from self:
    /// positive when self is the later date.
    ///
    /// Calendar months have no fixed length, so this compares year, month
    /// and day fields rather than dividing a duration: a month is complete
    /// once the day-of-month is reached again, so Sep 18 to Jan 2 is three
    /// months. When the two values have different UTC offsets both are
    /// compared in UTC.
    pub fn diff_in_months(&self, other: Option<&TimeKit>, absolute: bool) -> i64 {
        let other = self.other_or_now(other);
        let (a, b) = (self.instant(), other.instant());

        let (a, b) = if a.offset().fix() != b.offset().fix() {
            debug!("diff_in_months: offsets differ, comparing {} and {} in UTC", a, b);
            (a.naive_utc(), b.naive_utc())
        } else {
            (a.naive_local(), b.naive_local())
        };

        count_month_difference(&a, &b, absolute)
    }

    /// The absolute duration between the two values, e.g. `72h3m5s`.
    pub fn diff_duration_in_string(&self, other: Option<&TimeKit>) -> String {
        let other = self.other_or_now(other);
        format_duration(self.instant() - other.instant())
    }

    /// Count the `step`s between the two values for which `filter` holds.
    ///
    /// The walk starts at the later of the two values and moves back one
    /// `step` at a time while at least one whole step remains, testing
    /// `filter` before each move. The result is negative when self is the
    /// later value, unless `absolute` is set. Walking values carry the
    /// default configuration.
    ///
    /// A `step` shorter than one second counts nothing.
    pub fn diff_filtered<F>(
        &self,
        other: Option<&TimeKit>,
        step: Duration,
        filter: F,
        absolute: bool,
    ) -> i64
    where
        F: Fn(&TimeKit) -> bool,
    {
        let step_secs = step.num_seconds();
        if step_secs <= 0 {
            warn!("diff_filtered: step {} is shorter than one second", step);
            return 0;
        }

        let mut start = self.copy();
        let mut end = self.other_or_now(other);
        let inverse = start.instant() > end.instant();
        if inverse {
            std::mem::swap(&mut start, &mut end);
        }

        let mut count: i64 = 0;
        while start.diff_in_seconds(Some(&end), true) / step_secs > 0 {
            if filter(&end) {
                count += 1;
            }
            trace!("diff_filtered: at {}, count {}", end.instant(), count);
            let Some(previous) = end.instant().checked_sub_signed(step) else {
                break;
            };
            end.set_instant(previous);
        }

        if inverse {
            count = -count;
        }
        absolute_value(absolute, count)
    }

    /// [`diff_filtered`](Self::diff_filtered) with a one-day step.
    pub fn diff_in_days_filtered<F>(&self, other: Option<&TimeKit>, filter: F, absolute: bool) -> i64
    where
        F: Fn(&TimeKit) -> bool,
    {
        self.diff_filtered(other, Duration::hours(HOURS_PER_DAY), filter, absolute)
    }

    /// [`diff_filtered`](Self::diff_filtered) with a one-hour step.
    pub fn diff_in_hours_filtered<F>(&self, other: Option<&TimeKit>, filter: F, absolute: bool) -> i64
    where
        F: Fn(&TimeKit) -> bool,
    {
        self.diff_filtered(other, Duration::hours(1), filter, absolute)
    }

    fn other_or_now(&self, other: Option<&TimeKit>) -> TimeKit {
        match other {
            Some(other) => other.copy(),
            None => TimeKit::new(now_in(&self.timezone())),
        }
    }
}

fn now_in(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

fn count_month_difference(a: &NaiveDateTime, b: &NaiveDateTime, absolute: bool) -> i64 {
    let (y1, m1, d1) = (a.year() as i64, a.month() as i64, a.day());
    let (y2, m2, d2) = (b.year() as i64, b.month() as i64, b.day());

    let mut year_interval = y1 - y2;
    if m1 < m2 || (m1 == m2 && d1 < d2) {
        year_interval -= 1;
    }

    let mut month_interval = (m1 + 12) - m2;
    if d1 < d2 {
        month_interval -= 1;
    }
    month_interval %= 12;

    absolute_value(absolute, year_interval * 12 + month_interval)
}

/// Render a duration without sign: `1h0m0s`, `1m30s`, `2.5s`, `1.5ms`, `0s`.
fn format_duration(d: Duration) -> String {
    let d = d.abs();
    let secs = d.num_seconds().unsigned_abs();
    let nanos = d.subsec_nanos().unsigned_abs();

    if secs == 0 {
        return match nanos {
            0 => "0s".to_string(),
            1..=999 => format!("{}ns", nanos),
            1_000..=999_999 => format!("{}µs", with_fraction(nanos as u64, 1_000)),
            _ => format!("{}ms", with_fraction(nanos as u64, 1_000_000)),
        };
    }

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60 * 1_000_000_000 + nanos as u64;
    let seconds = with_fraction(seconds, 1_000_000_000);

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// `value / unit` with the remainder as trimmed decimal digits.
fn with_fraction(value: u64, unit: u64) -> String {
    let whole = value / unit;
    let rest = value % unit;
    if rest == 0 {
        return whole.to_string();
    }
    let width = unit.ilog10() as usize;
    let digits = format!("{:0width$}", rest, width = width);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

fn absolute_value(absolute: bool, value: i64) -> i64 {
    if absolute {
        value.saturating_abs()
    } else {
        value
    }
}
