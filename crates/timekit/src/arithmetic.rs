//! Shifting a [`TimeKit`] by a signed number of units.
//!
//! Every `add_*` takes a signed count and every `sub_*` is the matching
//! `add_*` with the count negated. Hours, minutes and seconds are fixed
//! durations; days and larger go through [`calendar::add_date`], so adding a
//! day across a DST change keeps the wall-clock time instead of adding 24h.

use chrono::{Datelike, Duration};
use log::{debug, trace, warn};

use crate::calendar;
use crate::config::{
    DAYS_PER_WEEK, MINUTES_PER_HOUR, MONTHS_PER_QUARTER, SECONDS_PER_MINUTE, YEARS_PER_CENTURY,
};
use crate::kit::TimeKit;
use crate::unit::DurationUnit;

impl TimeKit {
    /// Add `n` of `unit`, dispatching to the matching `add_*` method.
    pub fn add(&mut self, unit: DurationUnit, n: i64) -> &mut Self {
        match unit {
            DurationUnit::Second => self.add_seconds(n),
            DurationUnit::Minute => self.add_minutes(n),
            DurationUnit::Hour => self.add_hours(n),
            DurationUnit::Day => self.add_days(n),
            DurationUnit::Week => self.add_weeks(n),
            DurationUnit::Month => self.add_months(n),
            DurationUnit::Quarter => self.add_quarters(n),
            DurationUnit::Year => self.add_years(n),
            DurationUnit::Century => self.add_centuries(n),
        }
    }

    /// Subtract `n` of `unit`.
    pub fn sub(&mut self, unit: DurationUnit, n: i64) -> &mut Self {
        self.add(unit, n.saturating_neg())
    }

    // ── Calendar units ──────────────────────────────────────────────────────

    /// Add `n` centuries (100 years).
    pub fn add_centuries(&mut self, n: i64) -> &mut Self {
        let result = n
            .checked_mul(YEARS_PER_CENTURY)
            .and_then(|years| calendar::add_date(&self.instant(), years, 0, 0));
        self.apply("add_centuries", result)
    }

    /// Add one century.
    pub fn add_century(&mut self) -> &mut Self {
        self.add_centuries(1)
    }

    /// Subtract `n` centuries.
    pub fn sub_centuries(&mut self, n: i64) -> &mut Self {
        self.add_centuries(n.saturating_neg())
    }

    /// Subtract one century.
    pub fn sub_century(&mut self) -> &mut Self {
        self.sub_centuries(1)
    }

    /// Add `n` years.
    pub fn add_years(&mut self, n: i64) -> &mut Self {
        let result = calendar::add_date(&self.instant(), n, 0, 0);
        self.apply("add_years", result)
    }

    /// Add one year.
    pub fn add_year(&mut self) -> &mut Self {
        self.add_years(1)
    }

    /// Subtract `n` years.
    pub fn sub_years(&mut self, n: i64) -> &mut Self {
        self.add_years(n.saturating_neg())
    }

    /// Subtract one year.
    pub fn sub_year(&mut self) -> &mut Self {
        self.sub_years(1)
    }

    /// Add `n` quarters (3 months).
    pub fn add_quarters(&mut self, n: i64) -> &mut Self {
        let result = n
            .checked_mul(MONTHS_PER_QUARTER)
            .and_then(|months| calendar::add_date(&self.instant(), 0, months, 0));
        self.apply("add_quarters", result)
    }

    /// Add one quarter.
    pub fn add_quarter(&mut self) -> &mut Self {
        self.add_quarters(1)
    }

    /// Subtract `n` quarters.
    pub fn sub_quarters(&mut self, n: i64) -> &mut Self {
        self.add_quarters(n.saturating_neg())
    }

    /// Subtract one quarter.
    pub fn sub_quarter(&mut self) -> &mut Self {
        self.sub_quarters(1)
    }

    /// Add quarters, clamping to the end of the target month instead of
    /// rolling over. See [`add_months_no_overflow`](Self::add_months_no_overflow).
    pub fn add_quarters_no_overflow(&mut self, n: i64) -> &mut Self {
        match n.checked_mul(MONTHS_PER_QUARTER) {
            Some(months) => self.add_months_no_overflow(months),
            None => self.apply("add_quarters_no_overflow", None),
        }
    }

    /// Subtract quarters without overflowing the target month.
    pub fn sub_quarters_no_overflow(&mut self, n: i64) -> &mut Self {
        self.add_quarters_no_overflow(n.saturating_neg())
    }

    /// Add months. A day-of-month missing from the target month rolls
    /// forward: Jan 31 + 1 month is Mar 3 (Mar 2 in a leap year).
    pub fn add_months(&mut self, n: i64) -> &mut Self {
        let result = calendar::add_date(&self.instant(), 0, n, 0);
        self.apply("add_months", result)
    }

    /// Add one month.
    pub fn add_month(&mut self) -> &mut Self {
        self.add_months(1)
    }

    /// Subtract `n` months, rolling over like [`add_months`](Self::add_months).
    pub fn sub_months(&mut self, n: i64) -> &mut Self {
        self.add_months(n.saturating_neg())
    }

    /// Subtract one month.
    pub fn sub_month(&mut self) -> &mut Self {
        self.sub_months(1)
    }

    /// Add months without overflowing into the following month.
    ///
    /// When the naive result lands on a different day-of-month than the
    /// original, the target month was too short and the result is moved back
    /// to the last day of the month before it: Jan 31 + 1 month is Feb 28.
    ///
    /// Not generally invertible: subtracting `n` again does not restore a
    /// clamped day.
    pub fn add_months_no_overflow(&mut self, n: i64) -> &mut Self {
        let original_day = self.instant().day();
        let result = calendar::add_date(&self.instant(), 0, n, 0).and_then(|naive| {
            if naive.day() == original_day {
                return Some(naive);
            }
            debug!(
                "{} rolled over to day {}; clamping to previous month end",
                naive, naive.day()
            );
            calendar::last_day_of_previous_month(&naive)
        });
        self.apply("add_months_no_overflow", result)
    }

    /// Add one month without overflow.
    pub fn add_month_no_overflow(&mut self) -> &mut Self {
        self.add_months_no_overflow(1)
    }

    /// Subtract months without overflowing the target month.
    pub fn sub_months_no_overflow(&mut self, n: i64) -> &mut Self {
        self.add_months_no_overflow(n.saturating_neg())
    }

    /// Subtract one month without overflow.
    pub fn sub_month_no_overflow(&mut self) -> &mut Self {
        self.sub_months_no_overflow(1)
    }

    /// Add `n` weeks (7 calendar days).
    pub fn add_weeks(&mut self, n: i64) -> &mut Self {
        let result = n
            .checked_mul(DAYS_PER_WEEK)
            .and_then(|days| calendar::add_date(&self.instant(), 0, 0, days));
        self.apply("add_weeks", result)
    }

    /// Add one week.
    pub fn add_week(&mut self) -> &mut Self {
        self.add_weeks(1)
    }

    /// Subtract `n` weeks.
    pub fn sub_weeks(&mut self, n: i64) -> &mut Self {
        self.add_weeks(n.saturating_neg())
    }

    /// Subtract one week.
    pub fn sub_week(&mut self) -> &mut Self {
        self.sub_weeks(1)
    }

    /// Add `n` calendar days, keeping the wall-clock time.
    pub fn add_days(&mut self, n: i64) -> &mut Self {
        let result = calendar::add_date(&self.instant(), 0, 0, n);
        self.apply("add_days", result)
    }

    /// Add one day.
    pub fn add_day(&mut self) -> &mut Self {
        self.add_days(1)
    }

    /// Subtract `n` days.
    pub fn sub_days(&mut self, n: i64) -> &mut Self {
        self.add_days(n.saturating_neg())
    }

    /// Subtract one day.
    pub fn sub_day(&mut self) -> &mut Self {
        self.sub_days(1)
    }

    /// Add `n` weekdays, stepping one calendar day at a time and counting
    /// only days outside the configured weekend. Weekend days are passed
    /// over without being counted.
    pub fn add_weekdays(&mut self, n: i64) -> &mut Self {
        if n != 0 && !self.config().has_weekdays() {
            warn!("every day is a weekend day; add_weekdays({}) has no effect", n);
            return self;
        }

        let step = if n < 0 { -1 } else { 1 };
        let mut remaining = n.unsigned_abs();
        while remaining > 0 {
            let before = self.instant();
            self.add_days(step);
            if self.instant() == before {
                // Hit the edge of the representable range.
                break;
            }
            if self.is_weekday() {
                remaining -= 1;
            }
            trace!("add_weekdays: at {}, {} remaining", self.instant(), remaining);
        }
        self
    }

    /// Add one weekday.
    pub fn add_weekday(&mut self) -> &mut Self {
        self.add_weekdays(1)
    }

    /// Step back `n` weekdays.
    pub fn sub_weekdays(&mut self, n: i64) -> &mut Self {
        self.add_weekdays(n.saturating_neg())
    }

    /// Subtract one weekday.
    pub fn sub_weekday(&mut self) -> &mut Self {
        self.sub_weekdays(1)
    }

    // ── Clock units ─────────────────────────────────────────────────────────

    /// Add `n` hours as a fixed duration.
    pub fn add_hours(&mut self, n: i64) -> &mut Self {
        self.add_fixed("add_hours", n.checked_mul(MINUTES_PER_HOUR * SECONDS_PER_MINUTE))
    }

    /// Add one hour.
    pub fn add_hour(&mut self) -> &mut Self {
        self.add_hours(1)
    }

    /// Subtract `n` hours.
    pub fn sub_hours(&mut self, n: i64) -> &mut Self {
        self.add_hours(n.saturating_neg())
    }

    /// Subtract one hour.
    pub fn sub_hour(&mut self) -> &mut Self {
        self.sub_hours(1)
    }

    /// Add `n` minutes as a fixed duration.
    pub fn add_minutes(&mut self, n: i64) -> &mut Self {
        self.add_fixed("add_minutes", n.checked_mul(SECONDS_PER_MINUTE))
    }

    /// Add one minute.
    pub fn add_minute(&mut self) -> &mut Self {
        self.add_minutes(1)
    }

    /// Subtract `n` minutes.
    pub fn sub_minutes(&mut self, n: i64) -> &mut Self {
        self.add_minutes(n.saturating_neg())
    }

    /// Subtract one minute.
    pub fn sub_minute(&mut self) -> &mut Self {
        self.sub_minutes(1)
    }

    /// Add `n` seconds.
    pub fn add_seconds(&mut self, n: i64) -> &mut Self {
        self.add_fixed("add_seconds", Some(n))
    }

    /// Add one second.
    pub fn add_second(&mut self) -> &mut Self {
        self.add_seconds(1)
    }

    /// Subtract `n` seconds.
    pub fn sub_seconds(&mut self, n: i64) -> &mut Self {
        self.add_seconds(n.saturating_neg())
    }

    /// Subtract one second.
    pub fn sub_second(&mut self) -> &mut Self {
        self.sub_seconds(1)
    }

    fn add_fixed(&mut self, op: &str, seconds: Option<i64>) -> &mut Self {
        let result = seconds
            .and_then(Duration::try_seconds)
            .and_then(|d| self.instant().checked_add_signed(d));
        self.apply(op, result)
    }
}
