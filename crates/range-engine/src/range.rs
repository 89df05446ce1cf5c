//! Zoned instants and the ranges built from them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An instant paired with the zone it is displayed in.
///
/// The zone is presentational: two values with the same `instant_ms` are
/// the same point in time whatever their zones (see [`same_instant`]).
///
/// [`same_instant`]: ZonedInstant::same_instant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonedInstant {
    pub instant_ms: i64,
    pub zone: String,
}

impl ZonedInstant {
    pub fn new(instant_ms: i64, zone: impl Into<String>) -> Self {
        Self {
            instant_ms,
            zone: zone.into(),
        }
    }

    /// The same instant shown in another zone.
    pub fn with_zone(&self, zone: impl Into<String>) -> Self {
        Self::new(self.instant_ms, zone)
    }

    pub fn same_instant(&self, other: &ZonedInstant) -> bool {
        self.instant_ms == other.instant_ms
    }
}

/// Which end of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::End => f.write_str("end"),
        }
    }
}

/// A possibly incomplete `[start, end]` selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateTimeRange {
    pub start: Option<ZonedInstant>,
    pub end: Option<ZonedInstant>,
}

impl DateTimeRange {
    /// A range with neither endpoint.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(start: ZonedInstant, end: ZonedInstant) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Both endpoints are set.
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn endpoint(&self, which: Endpoint) -> Option<&ZonedInstant> {
        match which {
            Endpoint::Start => self.start.as_ref(),
            Endpoint::End => self.end.as_ref(),
        }
    }

    /// A copy with one endpoint replaced.
    pub fn with_endpoint(&self, which: Endpoint, value: ZonedInstant) -> Self {
        let mut next = self.clone();
        match which {
            Endpoint::Start => next.start = Some(value),
            Endpoint::End => next.end = Some(value),
        }
        next
    }

    /// `(start, end)` in milliseconds when the range is complete.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        Some((self.start.as_ref()?.instant_ms, self.end.as_ref()?.instant_ms))
    }

    /// Whether `instant_ms` lies strictly between the endpoints.
    ///
    /// Endpoint order does not matter. This is the "in range" highlight of a
    /// calendar cell; the endpoints themselves are [`is_endpoint`].
    ///
    /// [`is_endpoint`]: DateTimeRange::is_endpoint
    pub fn contains_strictly(&self, instant_ms: i64) -> bool {
        match self.bounds() {
            Some((a, b)) => instant_ms > a.min(b) && instant_ms < a.max(b),
            None => false,
        }
    }

    /// Whether `instant_ms` is exactly one of the set endpoints.
    pub fn is_endpoint(&self, instant_ms: i64) -> bool {
        [self.start.as_ref(), self.end.as_ref()]
            .into_iter()
            .flatten()
            .any(|endpoint| endpoint.instant_ms == instant_ms)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
