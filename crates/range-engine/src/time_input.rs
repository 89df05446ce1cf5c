//! `HH:MM` time-of-day entry combined with a civil day and a zone.
//!
//! The grammar is strict: two ASCII digits, a colon, two ASCII digits.
//! Anything else is [`TimeInputError::InvalidFormat`]; well-formed text with
//! an hour above 23 or a minute above 59 is [`TimeInputError::InvalidTime`];
//! a reading skipped by a DST transition is [`TimeInputError::DstGap`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

use crate::civil::LocalDateTime;
use crate::error::Result;
use crate::resolve::resolve;
use crate::zone::parts_of;

/// Why typed time text was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeInputError {
    #[error("Invalid format")]
    InvalidFormat,

    #[error("Invalid time")]
    InvalidTime,

    #[error("DST gap")]
    DstGap,
}

/// A minute of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

/// Arrow-key direction for [`TimeOfDay::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour <= 23 && minute <= 59).then_some(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// The time of day `instant_ms` shows in `zone`.
    pub fn of_instant(instant_ms: i64, zone: &str) -> Result<Self> {
        let parts = parts_of(instant_ms, zone)?;
        Ok(Self {
            hour: parts.hour,
            minute: parts.minute,
        })
    }

    /// One minute later or earlier. Minutes carry into hours; hours wrap at
    /// midnight without touching the day.
    pub fn step(self, step: Step) -> Self {
        let total = self.hour * 60 + self.minute;
        let total = match step {
            Step::Up => (total + 1) % (24 * 60),
            Step::Down => (total + 24 * 60 - 1) % (24 * 60),
        };
        Self {
            hour: total / 60,
            minute: total % 60,
        }
    }

    /// This time on `date` as a civil reading.
    pub fn on(&self, date: NaiveDate) -> LocalDateTime {
        LocalDateTime::on_date(date, self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeInputError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
        if !well_formed {
            return Err(TimeInputError::InvalidFormat);
        }
        let hour = two_digits(bytes[0], bytes[1]);
        let minute = two_digits(bytes[3], bytes[4]);
        TimeOfDay::new(hour, minute).ok_or(TimeInputError::InvalidTime)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

fn two_digits(tens: u8, ones: u8) -> u32 {
    u32::from(tens - b'0') * 10 + u32::from(ones - b'0')
}

/// Outcome of [`parse_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTime {
    Instant(i64),
    Rejected(TimeInputError),
}

impl ParsedTime {
    pub fn instant_ms(&self) -> Option<i64> {
        match self {
            ParsedTime::Instant(ms) => Some(*ms),
            ParsedTime::Rejected(_) => None,
        }
    }

    pub fn error(&self) -> Option<TimeInputError> {
        match self {
            ParsedTime::Instant(_) => None,
            ParsedTime::Rejected(err) => Some(*err),
        }
    }
}

/// Parse `text` as `HH:MM` on `base_day` in `zone`.
///
/// Bad text and skipped readings come back as [`ParsedTime::Rejected`];
/// only an unknown zone is an `Err`. In a fall-back overlap the earlier
/// instant is used.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use range_engine::time_input::{parse_time, ParsedTime, TimeInputError};
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
/// assert_eq!(
///     parse_time("02:30", day, "America/New_York").unwrap(),
///     ParsedTime::Rejected(TimeInputError::DstGap),
/// );
/// ```
pub fn parse_time(text: &str, base_day: NaiveDate, zone: &str) -> Result<ParsedTime> {
    let time = match text.parse::<TimeOfDay>() {
        Ok(time) => time,
        Err(err) => {
            // Unknown zones fail loudly even for malformed text.
            parts_of(0, zone)?;
            return Ok(ParsedTime::Rejected(err));
        }
    };
    let parsed = match resolve(time.on(base_day), zone)?.instant_ms() {
        Some(instant_ms) => ParsedTime::Instant(instant_ms),
        None => ParsedTime::Rejected(TimeInputError::DstGap),
    };
    Ok(parsed)
}

/// Step raw input text by one minute, as the arrow keys do.
///
/// Returns `None`, leaving the text as typed, when it is not a valid time.
pub fn step_text(text: &str, step: Step) -> Option<String> {
    text.parse::<TimeOfDay>()
        .ok()
        .map(|time| time.step(step).to_string())
}

// ── Tests ───────────────────────────────────────────────────────────────────
