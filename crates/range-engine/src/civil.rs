//! Civil (zone-less) date-time readings and the UTC arithmetic built on them.
//!
//! A [`LocalDateTime`] is what a user types or sees on a wall clock. It
//! only becomes an instant once it is resolved against a zone, see
//! [`crate::resolve`].

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PickerError, Result};

/// Milliseconds in one minute.
pub const MS_PER_MINUTE: i64 = 60_000;

/// Milliseconds in one 24-hour day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// A wall-clock reading with no zone attached.
///
/// `month` is zero-based (`0` = January, `11` = December); `day` is
/// one-based. Fields are not range-checked on construction: a reading such
/// as February 30 is representable and simply never resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl LocalDateTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
        }
    }

    /// 00:00 on `date`.
    pub fn midnight(date: NaiveDate) -> Self {
        Self::on_date(date, 0, 0)
    }

    /// `hour:minute` on `date`.
    pub fn on_date(date: NaiveDate, hour: u32, minute: u32) -> Self {
        Self::new(date.year(), date.month0(), date.day(), hour, minute)
    }

    /// Truncates seconds.
    pub fn from_naive(dt: &NaiveDateTime) -> Self {
        Self::on_date(dt.date(), dt.hour(), dt.minute())
    }

    /// The calendar date, if the fields name one.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.checked_add(1)?, self.day)
    }

    /// The chrono reading, if the fields name a real calendar minute.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        self.date()?.and_hms_opt(self.hour, self.minute, 0)
    }

    /// Milliseconds since the epoch of this reading taken as UTC.
    pub(crate) fn as_utc_ms(&self) -> Option<i64> {
        Some(self.to_naive()?.and_utc().timestamp_millis())
    }
}

/// An instant decomposed into the civil fields observed in some zone.
///
/// `month` is zero-based, matching [`LocalDateTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ZonedParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ZonedParts {
    pub fn from_naive(dt: &NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month0(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
        }
    }

    /// The minute-level reading, dropping seconds.
    pub fn local(&self) -> LocalDateTime {
        LocalDateTime::new(self.year, self.month, self.day, self.hour, self.minute)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.local().date()
    }

    /// Milliseconds since the epoch of this reading taken as UTC, seconds included.
    pub(crate) fn as_utc_ms(&self) -> Option<i64> {
        let naive = self
            .date()?
            .and_hms_opt(self.hour, self.minute, self.second)?;
        Some(naive.and_utc().timestamp_millis())
    }
}

/// Convert epoch milliseconds to a chrono UTC datetime.
pub(crate) fn utc_datetime(instant_ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(instant_ms).ok_or_else(|| {
        PickerError::InvalidTime(format!("instant {instant_ms} ms is out of range"))
    })
}

/// Number of days in `month` (zero-based) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_first = if month >= 11 {
        year.checked_add(1).and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
    } else {
        NaiveDate::from_ymd_opt(year, month + 2, 1)
    };
    next_first
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

// ── Tests ───────────────────────────────────────────────────────────────────
