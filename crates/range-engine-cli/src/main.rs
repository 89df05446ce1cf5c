mod logging;

use anyhow::Context;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use serde::Serialize;
use serde_json::json;

use range_engine::zone::offset_ms;
use range_engine::{
    known_zones, matrix_in, matrix_of, parse_time, parts_of, resolve, validate, Clock,
    Constraints, DateTimeRange, FixedClock, LocalDateTime, ParsedTime, Preset, RangeState,
    RangeStateOptions, SystemClock, ZonedInstant,
};

#[derive(Parser)]
#[command(name = "rangepick", version)]
#[command(about = "Inspect timezone-correct date-time range picking", long_about = None)]
struct Cli {
    /// Log level specification (overrides RUST_LOG), e.g. `debug`
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every IANA zone name the database knows
    Zones,

    /// Show the civil fields of an instant in a zone
    Parts {
        /// Epoch milliseconds
        instant_ms: i64,

        #[arg(long)]
        zone: String,
    },

    /// Turn a local reading (YYYY-MM-DDTHH:MM) into an instant
    Resolve {
        local: String,

        #[arg(long)]
        zone: String,
    },

    /// Print the 6x7 calendar grid of a month (YYYY-MM)
    Matrix {
        month: String,

        /// Zone for cell midnights; the host zone when omitted
        #[arg(long)]
        zone: Option<String>,
    },

    /// Check a range against constraints
    Validate {
        #[arg(long)]
        start: i64,

        #[arg(long)]
        end: i64,

        /// Constraints as JSON, e.g. '{"minDurationMs": 3600000}'
        #[arg(long)]
        constraints: Option<String>,
    },

    /// Compute a preset range
    Preset {
        preset: PresetArg,

        #[arg(long)]
        zone: String,

        /// Epoch milliseconds to use as "now"
        #[arg(long)]
        now: Option<i64>,
    },

    /// Parse HH:MM on a civil date in a zone
    Time {
        text: String,

        /// Civil date, YYYY-MM-DD
        #[arg(long)]
        date: String,

        #[arg(long)]
        zone: String,
    },

    /// Replay calendar clicks through the range state machine
    Select {
        /// Clicked instants, epoch milliseconds
        #[arg(required = true)]
        clicks: Vec<i64>,

        #[arg(long)]
        zone: String,

        /// Constraints as JSON
        #[arg(long)]
        constraints: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    Today,
    #[value(name = "last-7-days")]
    Last7Days,
    ThisMonth,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Today => Preset::Today,
            PresetArg::Last7Days => Preset::Last7Days,
            PresetArg::ThisMonth => Preset::ThisMonth,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = logging::init(cli.log_level.as_deref())?;

    match cli.command {
        Command::Zones => print_json(&known_zones()),
        Command::Parts { instant_ms, zone } => {
            let parts = parts_of(instant_ms, &zone)?;
            print_json(&json!({
                "instantMs": instant_ms,
                "zone": zone,
                "parts": parts,
                "offsetMs": offset_ms(instant_ms, &zone)?,
            }))
        }
        Command::Resolve { local, zone } => {
            let reading = parse_local(&local)?;
            let resolution = resolve(reading, &zone)?;
            debug!("event=resolve zone={zone} local={local} resolution={resolution:?}");
            print_json(&json!({
                "local": reading,
                "zone": zone,
                "resolution": resolution,
            }))
        }
        Command::Matrix { month, zone } => {
            let (year, month0) = parse_month(&month)?;
            let grid = match zone {
                Some(zone) => matrix_in(year, month0, &zone)?,
                None => matrix_of(year, month0)?,
            };
            print_json(&grid)
        }
        Command::Validate {
            start,
            end,
            constraints,
        } => {
            let constraints = parse_constraints(constraints.as_deref())?;
            let range = DateTimeRange::new(
                ZonedInstant::new(start, "UTC"),
                ZonedInstant::new(end, "UTC"),
            );
            print_json(&validate(&range, constraints.as_ref()))
        }
        Command::Preset { preset, zone, now } => {
            let clock: Box<dyn Clock> = match now {
                Some(now) => Box::new(FixedClock(now)),
                None => Box::new(SystemClock),
            };
            let preset = Preset::from(preset);
            let range = preset.range_in(&zone, clock.as_ref())?;
            print_json(&json!({ "preset": preset.label(), "range": range }))
        }
        Command::Time { text, date, zone } => {
            let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("invalid date `{date}`, expected YYYY-MM-DD"))?;
            let output = match parse_time(&text, day, &zone)? {
                ParsedTime::Instant(instant_ms) => json!({ "valid": true, "instantMs": instant_ms }),
                ParsedTime::Rejected(err) => json!({ "valid": false, "error": err.to_string() }),
            };
            print_json(&output)
        }
        Command::Select {
            clicks,
            zone,
            constraints,
        } => {
            // Unknown zones fail before any click is recorded.
            parts_of(0, &zone)?;
            let mut state = RangeState::new(RangeStateOptions {
                initial_value: None,
                constraints: parse_constraints(constraints.as_deref())?,
            });
            for click in clicks {
                let transition = state.select_date(ZonedInstant::new(click, &zone));
                debug!("event=click instant_ms={click} transition={transition:?}");
            }
            print_json(&state.snapshot())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_local(text: &str) -> anyhow::Result<LocalDateTime> {
    let parsed = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M")
        .with_context(|| format!("invalid local time `{text}`, expected YYYY-MM-DDTHH:MM"))?;
    Ok(LocalDateTime::from_naive(&parsed))
}

/// `YYYY-MM` to a year and zero-based month.
fn parse_month(text: &str) -> anyhow::Result<(i32, i32)> {
    let first = NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d")
        .with_context(|| format!("invalid month `{text}`, expected YYYY-MM"))?;
    Ok((first.year(), first.month0() as i32))
}

fn parse_constraints(json: Option<&str>) -> anyhow::Result<Option<Constraints>> {
    let Some(json) = json else {
        return Ok(None);
    };
    let constraints: Constraints =
        serde_json::from_str(json).context("invalid constraints JSON")?;
    Ok(Some(constraints))
}
