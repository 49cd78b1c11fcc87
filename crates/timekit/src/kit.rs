//! The temporal value: an instant in a timezone plus its configuration.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc, Weekday};
use chrono_tz::Tz;
use log::{debug, warn};

use crate::calendar;
use crate::config::{validate_format, TimeKitConfig, DATE_FORMAT, DEFAULT_FORMAT, TIME_FORMAT};
use crate::dst::resolve_local;
use crate::error::{Result, TimeKitError};

/// An instant in a timezone together with display and week settings.
///
/// Operations mutate the value in place and return `&mut Self`, so they
/// chain:
///
/// ```
/// use timekit::TimeKit;
///
/// let mut tk = TimeKit::parse("%Y-%m-%d %H:%M:%S", "2021-01-02 15:04:05", "UTC").unwrap();
/// tk.add_months(7).start_of_month();
/// assert_eq!(tk.to_string(), "2021-08-01 00:00:00");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeKit {
    instant: DateTime<Tz>,
    config: TimeKitConfig,
}

impl TimeKit {
    /// Wrap an instant with the default configuration.
    pub fn new(instant: DateTime<Tz>) -> Self {
        Self::with_config(instant, TimeKitConfig::default())
    }

    /// Wrap an instant with an explicit configuration.
    ///
    /// The configuration is used as given; call
    /// [`TimeKitConfig::validate`] first if it came from outside input. A
    /// format chrono cannot render falls back to [`DEFAULT_FORMAT`] when
    /// displayed.
    pub fn with_config(instant: DateTime<Tz>, config: TimeKitConfig) -> Self {
        Self { instant, config }
    }

    /// The current time in the system's local zone (UTC if it cannot be
    /// determined).
    pub fn now() -> Self {
        Self::new(Utc::now().with_timezone(&local_timezone()))
    }

    /// The current time in the named IANA location.
    ///
    /// # Errors
    ///
    /// Returns [`TimeKitError::InvalidTimezone`] if the location is unknown.
    pub fn now_in(location: &str) -> Result<Self> {
        let tz = parse_location(location)?;
        Ok(Self::new(Utc::now().with_timezone(&tz)))
    }

    /// Parse `value` with the strftime-style `layout` as a wall-clock time in
    /// `location`. A date-only layout yields midnight.
    ///
    /// # Errors
    ///
    /// Returns [`TimeKitError::InvalidTimezone`] for an unknown location and
    /// [`TimeKitError::InvalidDatetime`] if `value` does not match `layout`.
    pub fn parse(layout: &str, value: &str, location: &str) -> Result<Self> {
        let tz = parse_location(location)?;
        let naive = parse_naive(layout, value)?;
        let instant = resolve_local(&tz, &naive)
            .ok_or_else(|| TimeKitError::InvalidDatetime(format!("'{}': out of range", value)))?;
        Ok(Self::new(instant))
    }

    /// Build from unix seconds, expressed in the named location.
    ///
    /// # Errors
    ///
    /// Returns [`TimeKitError::InvalidTimezone`] for an unknown location and
    /// [`TimeKitError::InvalidTimestamp`] if the timestamp cannot be
    /// represented.
    pub fn from_timestamp(secs: i64, location: &str) -> Result<Self> {
        let tz = parse_location(location)?;
        Ok(Self::new(instant_from_timestamp(secs, &tz)?))
    }

    // ── Builders ────────────────────────────────────────────────────────────

    /// Set the display format. An unrenderable format is ignored with a
    /// warning; use [`set_format`](Self::set_format) to get the error.
    pub fn with_format(mut self, format: &str) -> Self {
        if let Err(e) = self.set_format(format) {
            warn!("keeping format '{}': {}", self.config.format, e);
        }
        self
    }

    /// Replace the weekend days.
    pub fn with_weekend_days(mut self, days: &[Weekday]) -> Self {
        self.set_weekend_days(days);
        self
    }

    /// Set the first day of the week.
    pub fn with_week_start(mut self, day: Weekday) -> Self {
        self.set_week_starts_at(day);
        self
    }

    /// Set the last day of the week.
    pub fn with_week_end(mut self, day: Weekday) -> Self {
        self.set_week_ends_at(day);
        self
    }

    // ── Setters ─────────────────────────────────────────────────────────────

    /// Set the display format.
    ///
    /// # Errors
    ///
    /// Returns [`TimeKitError::InvalidFormat`] if chrono cannot render it; the
    /// previous format is kept.
    pub fn set_format(&mut self, format: &str) -> Result<()> {
        validate_format(format)?;
        self.config.format = format.to_string();
        Ok(())
    }

    /// Replace the instant, keeping the configuration.
    pub fn set_instant(&mut self, instant: DateTime<Tz>) {
        self.instant = instant;
    }

    /// Move to the given unix seconds, keeping the current zone.
    ///
    /// # Errors
    ///
    /// Returns [`TimeKitError::InvalidTimestamp`] if it cannot be represented.
    pub fn set_timestamp(&mut self, secs: i64) -> Result<()> {
        self.instant = instant_from_timestamp(secs, &self.instant.timezone())?;
        Ok(())
    }

    /// Replace the weekend days. An empty slice means every day is a weekday.
    pub fn set_weekend_days(&mut self, days: &[Weekday]) {
        self.config.weekend_days = days.to_vec();
    }

    /// Set the day `start_of_week` moves back to.
    pub fn set_week_starts_at(&mut self, day: Weekday) {
        self.config.week_start = day;
    }

    /// Set the day `end_of_week` moves forward to.
    pub fn set_week_ends_at(&mut self, day: Weekday) {
        self.config.week_end = day;
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn instant(&self) -> DateTime<Tz> {
        self.instant
    }

    pub fn timezone(&self) -> Tz {
        self.instant.timezone()
    }

    /// Seconds since 1970-01-01 00:00:00 UTC.
    pub fn timestamp(&self) -> i64 {
        self.instant.timestamp()
    }

    pub fn config(&self) -> &TimeKitConfig {
        &self.config
    }

    pub fn format(&self) -> &str {
        &self.config.format
    }

    pub fn weekend_days(&self) -> &[Weekday] {
        &self.config.weekend_days
    }

    pub fn week_starts_at(&self) -> Weekday {
        self.config.week_start
    }

    pub fn week_ends_at(&self) -> Weekday {
        self.config.week_end
    }

    /// Quarter of the year, 1 through 4.
    pub fn quarter(&self) -> u32 {
        match self.instant.month() {
            1..=3 => 1,
            4..=6 => 2,
            7..=9 => 3,
            _ => 4,
        }
    }

    pub fn is_weekend(&self) -> bool {
        self.config.is_weekend(self.instant.weekday())
    }

    pub fn is_weekday(&self) -> bool {
        !self.is_weekend()
    }

    /// The last day of the previous month at the same time of day.
    pub fn last_day_of_previous_month(&self) -> DateTime<Tz> {
        calendar::last_day_of_previous_month(&self.instant).unwrap_or(self.instant)
    }

    /// An independent value with the same instant and the default
    /// configuration. Use `clone()` to keep the configuration as well.
    pub fn copy(&self) -> Self {
        Self::new(self.instant)
    }

    // ── Rendering ───────────────────────────────────────────────────────────

    /// `YYYY-MM-DD HH:MM:SS`, regardless of the configured format.
    pub fn date_time_string(&self) -> String {
        self.instant.format(DEFAULT_FORMAT).to_string()
    }

    pub fn date_string(&self) -> String {
        self.instant.format(DATE_FORMAT).to_string()
    }

    pub fn time_string(&self) -> String {
        self.instant.format(TIME_FORMAT).to_string()
    }

    /// Replace the instant with the result of an operation, or keep it when
    /// the operation left chrono's range.
    pub(crate) fn apply(&mut self, op: &str, result: Option<DateTime<Tz>>) -> &mut Self {
        match result {
            Some(instant) => self.instant = instant,
            None => warn!("{} overflowed the representable range; instant unchanged", op),
        }
        self
    }
}

/// Renders with the configured format, or [`DEFAULT_FORMAT`] when the
/// configured one cannot be rendered.
impl fmt::Display for TimeKit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = match validate_format(&self.config.format) {
            Ok(()) => self.config.format.as_str(),
            Err(e) => {
                warn!("rendering with the default format: {}", e);
                DEFAULT_FORMAT
            }
        };
        write!(f, "{}", self.instant.format(format))
    }
}

/// Parse an IANA location name into `Tz`.
pub fn parse_location(location: &str) -> Result<Tz> {
    location
        .parse::<Tz>()
        .map_err(|_| TimeKitError::InvalidTimezone(format!("'{}'", location)))
}

/// The system's IANA zone, or UTC when it is unknown to the tz database.
pub fn local_timezone() -> Tz {
    zone_or_utc(iana_time_zone::get_timezone().ok().as_deref())
}

fn zone_or_utc(name: Option<&str>) -> Tz {
    match name.map(str::parse::<Tz>) {
        Some(Ok(tz)) => tz,
        Some(Err(_)) => {
            debug!("system zone {:?} not in the tz database, using UTC", name);
            Tz::UTC
        }
        None => {
            debug!("system zone unavailable, using UTC");
            Tz::UTC
        }
    }
}

fn parse_naive(layout: &str, value: &str) -> Result<NaiveDateTime> {
    match NaiveDateTime::parse_from_str(value, layout) {
        Ok(naive) => Ok(naive),
        Err(full_err) => NaiveDate::parse_from_str(value, layout)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or_else(|| TimeKitError::InvalidDatetime(format!("'{}': {}", value, full_err))),
    }
}

fn instant_from_timestamp(secs: i64, tz: &Tz) -> Result<DateTime<Tz>> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|utc| utc.with_timezone(tz))
        .ok_or(TimeKitError::InvalidTimestamp(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_only_layout_is_midnight() {
        let naive = parse_naive("%Y-%m-%d", "2021-01-02").unwrap();
        assert_eq!(naive.to_string(), "2021-01-02 00:00:00");
    }

    #[test]
    fn mismatched_value_is_invalid_datetime() {
        assert!(matches!(
            parse_naive("%Y-%m-%d %H:%M:%S", "yesterday"),
            Err(TimeKitError::InvalidDatetime(_))
        ));
    }

    #[test]
    fn system_zone_falls_back_to_utc() {
        assert_eq!(zone_or_utc(Some("Asia/Tokyo")), Tz::Asia__Tokyo);
        assert_eq!(zone_or_utc(Some("Not/AZone")), Tz::UTC);
        assert_eq!(zone_or_utc(None), Tz::UTC);
    }

    #[test]
    fn unrepresentable_timestamp() {
        assert_eq!(
            instant_from_timestamp(i64::MAX, &Tz::UTC),
            Err(TimeKitError::InvalidTimestamp(i64::MAX))
        );
    }
}
