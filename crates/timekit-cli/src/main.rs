//! `timekit` CLI — calendar arithmetic from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Shift an instant (negative counts subtract)
//! timekit --at "2021-01-31 10:00:00" shift month 1 --no-overflow
//!
//! # Business days
//! timekit --at 2021-01-01 --layout %Y-%m-%d shift weekdays 5
//!
//! # Period boundaries in a zone
//! timekit --tz Europe/Paris --at "2021-01-08 18:00:00" start week
//!
//! # Differences
//! timekit --at "2021-01-02 15:04:05" diff --to "2020-09-18 10:30:40" --unit months --abs
//! timekit --at 2021-01-04 --layout %Y-%m-%d diff --to 2021-01-11 --unit days --weekdays-only
//!
//! # Describe an instant
//! timekit --at "2021-01-02 15:04:05" info --json
//! ```
//!
//! Set `RUST_LOG=debug` to see what the library is doing.

use anyhow::{Context, Result};
use chrono::{Datelike, Weekday};
use clap::{Parser, Subcommand};
use log::debug;
use timekit::config::{parse_weekday, DEFAULT_FORMAT};
use timekit::{DurationUnit, TimeKit, TimeKitConfig};

#[derive(Parser)]
#[command(name = "timekit", version, about = "Calendar arithmetic CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// IANA timezone of the anchor instant
    #[arg(long, global = true, default_value = "UTC")]
    tz: String,

    /// Anchor instant (defaults to now)
    #[arg(long, global = true)]
    at: Option<String>,

    /// strftime layout used to parse --at and --to
    #[arg(long, global = true, default_value = DEFAULT_FORMAT)]
    layout: String,

    /// JSON config file (format, weekend_days, week_start, week_end)
    #[arg(long, global = true)]
    config: Option<String>,

    /// strftime format for printed instants
    #[arg(long, global = true)]
    format: Option<String>,

    /// First day of the week, e.g. "mon"
    #[arg(long, global = true)]
    week_start: Option<String>,

    /// Last day of the week, e.g. "sun"
    #[arg(long, global = true)]
    week_end: Option<String>,

    /// Comma-separated weekend days, e.g. "fri,sat"
    #[arg(long, global = true)]
    weekend: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a signed number of units (second .. century, or weekdays)
    Shift {
        unit: String,
        #[arg(allow_negative_numbers = true)]
        count: i64,
        /// Clamp to month end instead of rolling over (month/quarter only)
        #[arg(long)]
        no_overflow: bool,
    },
    /// Move to the start of the enclosing unit
    Start { unit: String },
    /// Move to the end of the enclosing unit
    End { unit: String },
    /// Difference between the anchor and --to
    Diff {
        /// Other instant, parsed like --at (defaults to now)
        #[arg(long)]
        to: Option<String>,
        /// seconds, minutes, hours, days, weeks, months or duration
        #[arg(long, default_value = "seconds")]
        unit: String,
        /// Print the magnitude only
        #[arg(long)]
        abs: bool,
        /// Count only weekday steps (days or hours)
        #[arg(long)]
        weekdays_only: bool,
    },
    /// Describe the anchor instant
    Info {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    let mut tk = anchor(&cli, cli.at.as_deref(), config.clone())?;
    debug!("anchor {} ({})", tk.date_time_string(), tk.timezone());

    match &cli.command {
        Commands::Shift {
            unit,
            count,
            no_overflow,
        } => {
            shift(&mut tk, unit, *count, *no_overflow)?;
            println!("{}", tk);
        }
        Commands::Start { unit } => {
            tk.start_of(parse_unit(unit)?);
            println!("{}", tk);
        }
        Commands::End { unit } => {
            tk.end_of(parse_unit(unit)?);
            println!("{}", tk);
        }
        Commands::Diff {
            to,
            unit,
            abs,
            weekdays_only,
        } => {
            let other = match to {
                Some(value) => Some(anchor(&cli, Some(value), config.clone())?),
                None => None,
            };
            let out = diff(&tk, other.as_ref(), unit, *abs, *weekdays_only, &config)?;
            println!("{}", out);
        }
        Commands::Info { json } => print_info(&tk, *json)?,
    }

    Ok(())
}

/// Load the config file, if any, then overlay command-line flags.
fn build_config(cli: &Cli) -> Result<TimeKitConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            TimeKitConfig::from_json(&raw)
                .with_context(|| format!("Failed to load config file: {}", path))?
        }
        None => TimeKitConfig::default(),
    };

    if let Some(format) = &cli.format {
        config.format = format.clone();
    }
    if let Some(day) = &cli.week_start {
        config.week_start = parse_weekday(day)?;
    }
    if let Some(day) = &cli.week_end {
        config.week_end = parse_weekday(day)?;
    }
    if let Some(days) = &cli.weekend {
        config.weekend_days = parse_weekday_list(days)?;
    }

    config.validate().context("Invalid --format")?;
    Ok(config)
}

fn parse_weekday_list(raw: &str) -> Result<Vec<Weekday>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_weekday(part).map_err(anyhow::Error::from))
        .collect()
}

fn anchor(cli: &Cli, value: Option<&str>, config: TimeKitConfig) -> Result<TimeKit> {
    let tk = match value {
        Some(value) => TimeKit::parse(&cli.layout, value, &cli.tz)
            .with_context(|| format!("Failed to parse '{}' with layout '{}'", value, cli.layout))?,
        None => TimeKit::now_in(&cli.tz).context("Failed to resolve --tz")?,
    };
    Ok(TimeKit::with_config(tk.instant(), config))
}

fn parse_unit(unit: &str) -> Result<DurationUnit> {
    unit.parse::<DurationUnit>()
        .with_context(|| format!("Unknown unit: '{}'", unit))
}

fn shift(tk: &mut TimeKit, unit: &str, count: i64, no_overflow: bool) -> Result<()> {
    if matches!(unit.to_lowercase().as_str(), "weekday" | "weekdays") {
        if no_overflow {
            anyhow::bail!("--no-overflow only applies to month and quarter");
        }
        tk.add_weekdays(count);
        return Ok(());
    }

    let unit = parse_unit(unit)?;
    match (unit, no_overflow) {
        (DurationUnit::Month, true) => tk.add_months_no_overflow(count),
        (DurationUnit::Quarter, true) => tk.add_quarters_no_overflow(count),
        (_, true) => anyhow::bail!("--no-overflow only applies to month and quarter"),
        (unit, false) => tk.add(unit, count),
    };
    Ok(())
}

fn diff(
    tk: &TimeKit,
    other: Option<&TimeKit>,
    unit: &str,
    abs: bool,
    weekdays_only: bool,
    config: &TimeKitConfig,
) -> Result<String> {
    if unit.eq_ignore_ascii_case("duration") {
        return Ok(tk.diff_duration_in_string(other));
    }

    let unit = parse_unit(unit)?;
    if weekdays_only {
        // Walking values carry the default config, so test against ours.
        let weekend = config.weekend_days.clone();
        let is_weekday = move |t: &TimeKit| !weekend.contains(&t.instant().weekday());
        let count = match unit {
            DurationUnit::Day => tk.diff_in_days_filtered(other, is_weekday, abs),
            DurationUnit::Hour => tk.diff_in_hours_filtered(other, is_weekday, abs),
            other_unit => anyhow::bail!("--weekdays-only counts days or hours, not {}", other_unit),
        };
        return Ok(count.to_string());
    }

    let value = match unit {
        DurationUnit::Second => tk.diff_in_seconds(other, abs),
        DurationUnit::Minute => tk.diff_in_minutes(other, abs),
        DurationUnit::Hour => tk.diff_in_hours(other, abs),
        DurationUnit::Day => tk.diff_in_days(other, abs),
        DurationUnit::Week => tk.diff_in_weeks(other, abs),
        DurationUnit::Month => tk.diff_in_months(other, abs),
        other_unit => anyhow::bail!("Cannot diff in {}; use seconds through months", other_unit),
    };
    Ok(value.to_string())
}

fn print_info(tk: &TimeKit, json: bool) -> Result<()> {
    let weekday = tk.instant().weekday();
    if json {
        let value = serde_json::json!({
            "datetime": tk.date_time_string(),
            "formatted": tk.to_string(),
            "timezone": tk.timezone().name(),
            "quarter": tk.quarter(),
            "weekday": weekday.to_string(),
            "weekend": tk.is_weekend(),
            "timestamp": tk.timestamp(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("datetime:   {}", tk.date_time_string());
        println!("timezone:   {}", tk.timezone().name());
        println!("quarter:    {}", tk.quarter());
        println!("weekday:    {}", weekday);
        println!("weekend:    {}", tk.is_weekend());
        println!("timestamp:  {}", tk.timestamp());
    }
    Ok(())
}
