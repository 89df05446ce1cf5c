//! Named ranges ("Today", "Last 7 Days", "This Month") in a zone.
//!
//! Presets are the only part of the core that depends on the current time,
//! and they read it through an injected [`Clock`] so results are
//! reproducible.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::civil::{LocalDateTime, MS_PER_DAY};
use crate::error::{PickerError, Result};
use crate::range::{DateTimeRange, ZonedInstant};
use crate::resolve::resolve;
use crate::zone::parts_of;

/// Source of "now", in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// The host's wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

impl<F: Fn() -> i64> Clock for F {
    fn now_ms(&self) -> i64 {
        self()
    }
}

/// The preset buttons a picker offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Preset {
    Today,
    Last7Days,
    ThisMonth,
}

impl Preset {
    /// Every preset, in display order.
    pub const ALL: [Preset; 3] = [Preset::Today, Preset::Last7Days, Preset::ThisMonth];

    pub fn label(&self) -> &'static str {
        match self {
            Preset::Today => "Today",
            Preset::Last7Days => "Last 7 Days",
            Preset::ThisMonth => "This Month",
        }
    }

    pub fn range_in(&self, zone: &str, clock: &dyn Clock) -> Result<DateTimeRange> {
        match self {
            Preset::Today => today_in(zone, clock),
            Preset::Last7Days => last_7_days_in(zone, clock),
            Preset::ThisMonth => this_month_in(zone, clock),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Today, from midnight through 23:59:59.999 (as 24 hours) in `zone`.
pub fn today_in(zone: &str, clock: &dyn Clock) -> Result<DateTimeRange> {
    let start = start_of_day_in(clock.now_ms(), zone)?;
    Ok(zoned_range(start, start + MS_PER_DAY - 1, zone))
}

/// The seven days ending today, inclusive.
pub fn last_7_days_in(zone: &str, clock: &dyn Clock) -> Result<DateTimeRange> {
    let today = start_of_day_in(clock.now_ms(), zone)?;
    Ok(zoned_range(
        today - 6 * MS_PER_DAY,
        today + MS_PER_DAY - 1,
        zone,
    ))
}

/// The current civil month in `zone`, ending one millisecond before the
/// next month's first midnight.
///
/// # Examples
///
/// ```
/// use range_engine::presets::{this_month_in, FixedClock};
///
/// // now = 2025-01-15T12:00:00Z
/// let range = this_month_in("UTC", &FixedClock(1_736_942_400_000)).unwrap();
/// assert_eq!(range.bounds(), Some((1_735_689_600_000, 1_738_367_999_999)));
/// ```
pub fn this_month_in(zone: &str, clock: &dyn Clock) -> Result<DateTimeRange> {
    let today = parts_of(clock.now_ms(), zone)?
        .date()
        .ok_or_else(|| PickerError::InvalidTime("zone adapter returned no date".to_string()))?;
    let month = YearMonth::of_date(today);
    let start = midnight_in(month.day(1)?, zone)?;
    let next_start = midnight_in(month.next().day(1)?, zone)?;
    Ok(zoned_range(start, next_start - 1, zone))
}

/// Midnight of the civil day containing `instant_ms` in `zone`.
///
/// # Errors
///
/// Returns [`PickerError::NonexistentMidnight`] when that midnight is
/// skipped by a DST transition.
pub fn start_of_day_in(instant_ms: i64, zone: &str) -> Result<i64> {
    let date = parts_of(instant_ms, zone)?
        .date()
        .ok_or_else(|| PickerError::InvalidTime("zone adapter returned no date".to_string()))?;
    midnight_in(date, zone)
}

fn midnight_in(date: chrono::NaiveDate, zone: &str) -> Result<i64> {
    resolve(LocalDateTime::midnight(date), zone)?
        .instant_ms()
        .ok_or_else(|| PickerError::NonexistentMidnight {
            zone: zone.to_string(),
            date,
        })
}

fn zoned_range(start: i64, end: i64, zone: &str) -> DateTimeRange {
    DateTimeRange::new(ZonedInstant::new(start, zone), ZonedInstant::new(end, zone))
}

// ── Tests ───────────────────────────────────────────────────────────────────
