//! Start and end of the enclosing day, week, month, quarter, year or century.
//!
//! Start boundaries land on 00:00:00 and end boundaries on 23:59:59 (or the
//! last second of the hour/minute), always in the instant's own zone.

use chrono::{DateTime, Datelike, Duration, Timelike};
use chrono_tz::Tz;

use crate::calendar::{add_date, days_in_month, local_datetime};
use crate::config::{DAYS_PER_WEEK, MONTHS_PER_QUARTER, YEARS_PER_CENTURY};
use crate::kit::TimeKit;
use crate::unit::DurationUnit;

impl TimeKit {
    /// Move to the start of the enclosing `unit`.
    pub fn start_of(&mut self, unit: DurationUnit) -> &mut Self {
        match unit {
            DurationUnit::Second => self.start_of_second(),
            DurationUnit::Minute => self.start_of_minute(),
            DurationUnit::Hour => self.start_of_hour(),
            DurationUnit::Day => self.start_of_day(),
            DurationUnit::Week => self.start_of_week(),
            DurationUnit::Month => self.start_of_month(),
            DurationUnit::Quarter => self.start_of_quarter(),
            DurationUnit::Year => self.start_of_year(),
            DurationUnit::Century => self.start_of_century(),
        }
    }

    /// Move to the end of the enclosing `unit`.
    pub fn end_of(&mut self, unit: DurationUnit) -> &mut Self {
        match unit {
            DurationUnit::Second => self.end_of_second(),
            DurationUnit::Minute => self.end_of_minute(),
            DurationUnit::Hour => self.end_of_hour(),
            DurationUnit::Day => self.end_of_day(),
            DurationUnit::Week => self.end_of_week(),
            DurationUnit::Month => self.end_of_month(),
            DurationUnit::Quarter => self.end_of_quarter(),
            DurationUnit::Year => self.end_of_year(),
            DurationUnit::Century => self.end_of_century(),
        }
    }

    /// January 1st 00:00:00 of the year floored to a multiple of 100
    /// (2021 → 2000).
    pub fn start_of_century(&mut self) -> &mut Self {
        let year = century_start_year(self.instant().year());
        let result = local_datetime(&self.timezone(), year, 1, 1, 0, 0, 0);
        self.apply("start_of_century", result)
    }

    /// December 31st 23:59:59 of the century's final year (2021 → 2099).
    pub fn end_of_century(&mut self) -> &mut Self {
        let year = century_start_year(self.instant().year()).checked_add(YEARS_PER_CENTURY as i32 - 1);
        let result = year.and_then(|y| local_datetime(&self.timezone(), y, 12, 31, 23, 59, 59));
        self.apply("end_of_century", result)
    }

    /// January 1st 00:00:00.
    pub fn start_of_year(&mut self) -> &mut Self {
        let result = local_datetime(&self.timezone(), self.instant().year(), 1, 1, 0, 0, 0);
        self.apply("start_of_year", result)
    }

    /// December 31st 23:59:59.
    pub fn end_of_year(&mut self) -> &mut Self {
        let result = local_datetime(&self.timezone(), self.instant().year(), 12, 31, 23, 59, 59);
        self.apply("end_of_year", result)
    }

    /// First day of the quarter's first month, `(q - 1) * 3 + 1`.
    pub fn start_of_quarter(&mut self) -> &mut Self {
        let month = (self.quarter() - 1) * MONTHS_PER_QUARTER as u32 + 1;
        let result = local_datetime(&self.timezone(), self.instant().year(), month, 1, 0, 0, 0);
        self.apply("start_of_quarter", result)
    }

    /// 23:59:59 on the last day of the quarter's final month.
    pub fn end_of_quarter(&mut self) -> &mut Self {
        let month = self.quarter() * MONTHS_PER_QUARTER as u32;
        let result = self.month_end(month);
        self.apply("end_of_quarter", result)
    }

    /// The 1st at 00:00:00.
    pub fn start_of_month(&mut self) -> &mut Self {
        let now = self.instant();
        let result = local_datetime(&self.timezone(), now.year(), now.month(), 1, 0, 0, 0);
        self.apply("start_of_month", result)
    }

    /// 23:59:59 on the last day of the month.
    pub fn end_of_month(&mut self) -> &mut Self {
        let result = self.month_end(self.instant().month());
        self.apply("end_of_month", result)
    }

    /// Midnight of the closest configured week-start day on or before today.
    pub fn start_of_week(&mut self) -> &mut Self {
        let target = self.week_starts_at();
        let result = self.walk_to_weekday(0, 0, 0, target, -1);
        self.apply("start_of_week", result)
    }

    /// 23:59:59 of the closest configured week-end day on or after today.
    pub fn end_of_week(&mut self) -> &mut Self {
        let target = self.week_ends_at();
        let result = self.walk_to_weekday(23, 59, 59, target, 1);
        self.apply("end_of_week", result)
    }

    /// 00:00:00 today.
    pub fn start_of_day(&mut self) -> &mut Self {
        let result = self.at_time(0, 0, 0);
        self.apply("start_of_day", result)
    }

    /// 23:59:59 today.
    pub fn end_of_day(&mut self) -> &mut Self {
        let result = self.at_time(23, 59, 59);
        self.apply("end_of_day", result)
    }

    /// The top of the hour.
    pub fn start_of_hour(&mut self) -> &mut Self {
        let result = self.at_time(self.instant().hour(), 0, 0);
        self.apply("start_of_hour", result)
    }

    /// Minute 59, second 59 of this hour.
    pub fn end_of_hour(&mut self) -> &mut Self {
        let result = self.at_time(self.instant().hour(), 59, 59);
        self.apply("end_of_hour", result)
    }

    /// Second 0 of this minute.
    pub fn start_of_minute(&mut self) -> &mut Self {
        let now = self.instant();
        let result = self.at_time(now.hour(), now.minute(), 0);
        self.apply("start_of_minute", result)
    }

    /// Second 59 of this minute.
    pub fn end_of_minute(&mut self) -> &mut Self {
        let now = self.instant();
        let result = self.at_time(now.hour(), now.minute(), 59);
        self.apply("end_of_minute", result)
    }

    /// Drop the sub-second part.
    pub fn start_of_second(&mut self) -> &mut Self {
        let result = self.instant().with_nanosecond(0);
        self.apply("start_of_second", result)
    }

    /// End boundaries land on whole seconds, so this truncates like
    /// [`start_of_second`](Self::start_of_second).
    pub fn end_of_second(&mut self) -> &mut Self {
        let result = self.instant().with_nanosecond(0);
        self.apply("end_of_second", result)
    }

    fn at_time(&self, hour: u32, minute: u32, second: u32) -> Option<DateTime<Tz>> {
        let now = self.instant();
        local_datetime(&self.timezone(), now.year(), now.month(), now.day(), hour, minute, second)
    }

    fn month_end(&self, month: u32) -> Option<DateTime<Tz>> {
        let year = self.instant().year();
        let day = days_in_month(year, month)?;
        local_datetime(&self.timezone(), year, month, day, 23, 59, 59)
    }

    /// Set the time of day, then step one day at a time in `direction` until
    /// the weekday matches. Every weekday is reached within a week.
    fn walk_to_weekday(
        &self,
        hour: u32,
        minute: u32,
        second: u32,
        target: chrono::Weekday,
        direction: i64,
    ) -> Option<DateTime<Tz>> {
        let start = self.at_time(hour, minute, second)?;
        let date = start.naive_local().date();
        let offset = (0..DAYS_PER_WEEK).find(|i| {
            date.checked_add_signed(Duration::days(direction * i))
                .is_some_and(|d| d.weekday() == target)
        })?;
        let days = direction * offset;
        if days == 0 {
            return Some(start);
        }
        add_date(&start, 0, 0, days)
    }
}

fn century_start_year(year: i32) -> i32 {
    year - year.rem_euclid(YEARS_PER_CENTURY as i32)
}

#[cfg(test)]
mod tests {
    use super::century_start_year;

    #[test]
    fn century_floors_to_multiple_of_100() {
        assert_eq!(century_start_year(2021), 2000);
        assert_eq!(century_start_year(2000), 2000);
        assert_eq!(century_start_year(1999), 1900);
        assert_eq!(century_start_year(-50), -100);
    }
}
