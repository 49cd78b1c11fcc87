//! Tests for construction, configuration and rendering of `TimeKit`.

use chrono::{TimeZone, Weekday};
use chrono_tz::Tz;
use timekit::config::DEFAULT_FORMAT;
use timekit::{TimeKit, TimeKitConfig, TimeKitError};

fn fixture() -> TimeKit {
    TimeKit::new(Tz::UTC.with_ymd_and_hms(2021, 1, 2, 15, 4, 5).unwrap())
}

// ── Construction ────────────────────────────────────────────────────────────

#[test]
fn parse_in_location() {
    let tk = TimeKit::parse(DEFAULT_FORMAT, "2020-12-23 11:13:11", "America/New_York").unwrap();
    assert_eq!(tk.to_string(), "2020-12-23 11:13:11");
    assert_eq!(tk.timezone(), Tz::America__New_York);
    // EST is UTC-5.
    assert_eq!(
        tk.timestamp(),
        Tz::UTC.with_ymd_and_hms(2020, 12, 23, 16, 13, 11).unwrap().timestamp()
    );
}

#[test]
fn parse_date_only_layout_is_midnight() {
    let tk = TimeKit::parse("%Y-%m-%d", "2021-01-02", "UTC").unwrap();
    assert_eq!(tk.to_string(), "2021-01-02 00:00:00");
}

#[test]
fn parse_rejects_unknown_location() {
    let err = TimeKit::parse(DEFAULT_FORMAT, "2020-12-23 11:13:11", "Mars/Olympus").unwrap_err();
    assert!(matches!(err, TimeKitError::InvalidTimezone(_)));
    assert!(err.to_string().contains("Mars/Olympus"));
}

#[test]
fn parse_rejects_mismatched_value() {
    let err = TimeKit::parse(DEFAULT_FORMAT, "23/12/2020", "UTC").unwrap_err();
    assert!(matches!(err, TimeKitError::InvalidDatetime(_)));
}

#[test]
fn from_timestamp_in_location() {
    let tk = TimeKit::from_timestamp(1_609_599_845, "Asia/Tokyo").unwrap();
    assert_eq!(tk.timestamp(), 1_609_599_845);
    assert_eq!(tk.to_string(), "2021-01-03 00:04:05");
}

#[test]
fn from_timestamp_rejects_bad_location() {
    assert!(matches!(
        TimeKit::from_timestamp(0, "Nowhere"),
        Err(TimeKitError::InvalidTimezone(_))
    ));
}

#[test]
fn now_in_location() {
    let tk = TimeKit::now_in("Europe/Paris").unwrap();
    assert_eq!(tk.timezone(), Tz::Europe__Paris);
    assert!(TimeKit::now_in("Europe/Atlantis").is_err());
}

#[test]
fn now_uses_the_system_zone() {
    assert_eq!(TimeKit::now().timezone(), timekit::kit::local_timezone());
}

#[test]
fn set_timestamp_keeps_zone() {
    let tz: Tz = "Asia/Tokyo".parse().unwrap();
    let mut tk = TimeKit::new(tz.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap());
    tk.set_timestamp(0).unwrap();
    assert_eq!(tk.to_string(), "1970-01-01 09:00:00");
    assert_eq!(tk.set_timestamp(i64::MAX), Err(TimeKitError::InvalidTimestamp(i64::MAX)));
}

// ── Configuration ───────────────────────────────────────────────────────────

#[test]
fn defaults() {
    let tk = fixture();
    assert_eq!(tk.format(), DEFAULT_FORMAT);
    assert_eq!(tk.weekend_days(), &[Weekday::Sat, Weekday::Sun]);
    assert_eq!(tk.week_starts_at(), Weekday::Mon);
    assert_eq!(tk.week_ends_at(), Weekday::Sun);
}

#[test]
fn weekend_classification() {
    let saturday = fixture();
    assert!(saturday.is_weekend());
    assert!(!saturday.is_weekday());

    let custom = fixture().with_weekend_days(&[Weekday::Fri]);
    assert!(custom.is_weekday());
}

#[test]
fn format_controls_display_only() {
    let mut tk = fixture();
    tk.set_format("%d/%m/%Y").unwrap();
    assert_eq!(tk.to_string(), "02/01/2021");
    assert_eq!(tk.date_time_string(), "2021-01-02 15:04:05");
    assert_eq!(tk.date_string(), "2021-01-02");
    assert_eq!(tk.time_string(), "15:04:05");
}

#[test]
fn invalid_format_is_rejected_and_previous_kept() {
    let mut tk = fixture();
    assert!(matches!(tk.set_format("%Q"), Err(TimeKitError::InvalidFormat(_))));
    assert_eq!(tk.format(), DEFAULT_FORMAT);

    let built = fixture().with_format("%Q");
    assert_eq!(built.format(), DEFAULT_FORMAT);
}

#[test]
fn unchecked_format_renders_with_default() {
    let config = TimeKitConfig {
        format: "%Q".to_string(),
        ..TimeKitConfig::default()
    };
    let tk = TimeKit::with_config(fixture().instant(), config);
    assert_eq!(tk.to_string(), "2021-01-02 15:04:05");
    assert_eq!(format!("[{}]", tk), "[2021-01-02 15:04:05]");
    assert_eq!(tk.format(), "%Q");
}

#[test]
fn deserialized_config_skips_validation_but_still_renders() {
    let config: TimeKitConfig = serde_json::from_str(r#"{"format": "%Q"}"#).unwrap();
    let tk = TimeKit::with_config(fixture().instant(), config);
    assert_eq!(tk.to_string(), "2021-01-02 15:04:05");
}

#[test]
fn config_from_json_overrides_given_fields() {
    let config = TimeKitConfig::from_json(
        r#"{"format": "%Y/%m/%d", "weekend_days": ["Fri", "Sat"], "week_start": "Sun"}"#,
    )
    .unwrap();
    assert_eq!(config.weekend_days, vec![Weekday::Fri, Weekday::Sat]);
    assert_eq!(config.week_start, Weekday::Sun);
    assert_eq!(config.week_end, Weekday::Sun);

    let tk = TimeKit::with_config(fixture().instant(), config);
    assert_eq!(tk.to_string(), "2021/01/02");
    assert!(tk.is_weekend());
}

#[test]
fn config_from_json_errors() {
    assert!(matches!(
        TimeKitConfig::from_json("{not json"),
        Err(TimeKitError::InvalidConfig(_))
    ));
    assert!(matches!(
        TimeKitConfig::from_json(r#"{"week_start": "Funday"}"#),
        Err(TimeKitError::InvalidConfig(_))
    ));
    assert!(matches!(
        TimeKitConfig::from_json(r#"{"format": "%Q"}"#),
        Err(TimeKitError::InvalidFormat(_))
    ));
}

#[test]
fn config_roundtrips_through_json() {
    let config = TimeKitConfig {
        week_start: Weekday::Sun,
        week_end: Weekday::Sat,
        ..TimeKitConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(TimeKitConfig::from_json(&json).unwrap(), config);
}

// ── Copy ────────────────────────────────────────────────────────────────────

#[test]
fn copy_keeps_instant_but_resets_config() {
    let original = fixture()
        .with_format("%d.%m.%Y")
        .with_week_start(Weekday::Sun)
        .with_weekend_days(&[Weekday::Fri]);
    let copy = original.copy();
    assert_eq!(copy.instant(), original.instant());
    assert_eq!(copy.format(), DEFAULT_FORMAT);
    assert_eq!(copy.week_starts_at(), Weekday::Mon);
    assert_eq!(copy.weekend_days(), &[Weekday::Sat, Weekday::Sun]);

    let cloned = original.clone();
    assert_eq!(cloned.config(), original.config());
}

#[test]
fn mutating_a_copy_leaves_the_original() {
    let original = fixture();
    let mut copy = original.copy();
    copy.add_years(3).start_of_month();
    assert_eq!(original.to_string(), "2021-01-02 15:04:05");
    assert_eq!(copy.to_string(), "2024-01-01 00:00:00");
}

#[test]
fn last_day_of_previous_month() {
    let tk = fixture();
    assert_eq!(
        tk.last_day_of_previous_month(),
        Tz::UTC.with_ymd_and_hms(2020, 12, 31, 15, 4, 5).unwrap()
    );
}

#[test]
fn timekit_can_be_shared_behind_a_mutex() {
    use std::sync::{Arc, Mutex};

    let shared = Arc::new(Mutex::new(fixture()));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                shared.lock().unwrap().add_day();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(shared.lock().unwrap().date_string(), "2021-01-06");
}
