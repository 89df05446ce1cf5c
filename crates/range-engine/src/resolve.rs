//! Local-to-instant resolution with DST gap and overlap detection.
//!
//! A wall-clock reading is mapped onto a zone's timeline by probing the
//! zone's offset and verifying every candidate with a round trip through
//! [`ZoneAdapter::parts_of`]:
//!
//! 1. Treat the reading as UTC (`probe`).
//! 2. Measure the zone's offset at `probe`, and at one day either side of it.
//! 3. For each distinct offset, `candidate = probe - offset`.
//! 4. Keep the candidates whose decomposition in the zone equals the reading
//!    on all five civil fields.
//!
//! No surviving candidate means the reading falls in a spring-forward gap;
//! two mean it falls in a fall-back overlap. The offset at `probe` alone is
//! enough away from transitions; the neighbouring probes cover zones east
//! of UTC, where `probe` lands after a transition that the true instant
//! precedes.
//!
//! # Overlap policy
//!
//! In a fall-back overlap the canonical instant is the **earlier** one (the
//! first occurrence of the reading). [`Resolution::Ambiguous`] still carries
//! both.

use serde::Serialize;
use tracing::debug;

use crate::civil::{LocalDateTime, MS_PER_DAY};
use crate::error::{PickerError, Result};
use crate::zone::{Tzdb, ZoneAdapter};

/// Where a wall-clock reading lands on a zone's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Resolution {
    /// The reading occurs exactly once.
    Exact { instant_ms: i64 },
    /// The reading occurs twice (fall back).
    Ambiguous { earlier: i64, later: i64 },
    /// The reading is skipped (spring forward). `shifted` is the reading
    /// pushed forward by the length of the gap.
    Gap { shifted: i64 },
    /// The fields do not name a calendar minute (February 30, 24:00, ...).
    Impossible,
}

impl Resolution {
    /// The canonical instant, or `None` when the reading does not exist.
    pub fn instant_ms(&self) -> Option<i64> {
        match *self {
            Resolution::Exact { instant_ms } => Some(instant_ms),
            Resolution::Ambiguous { earlier, .. } => Some(earlier),
            Resolution::Gap { .. } | Resolution::Impossible => None,
        }
    }

    /// Whether the reading has no instant in the zone.
    pub fn is_invalid(&self) -> bool {
        self.instant_ms().is_none()
    }
}

/// Resolve a wall-clock reading in `zone` against the IANA database.
///
/// # Errors
///
/// Returns [`PickerError::InvalidTimezone`] for an unknown zone. A reading
/// that does not exist in the zone is not an error; it resolves to
/// [`Resolution::Gap`] or [`Resolution::Impossible`].
///
/// # Examples
///
/// ```
/// use range_engine::civil::LocalDateTime;
/// use range_engine::resolve::resolve;
///
/// // 2025-03-09 02:30 is skipped in New York.
/// let gap = resolve(LocalDateTime::new(2025, 2, 9, 2, 30), "America/New_York").unwrap();
/// assert!(gap.is_invalid());
///
/// // 2025-11-02 01:30 happens twice; the earlier (EDT) instant is canonical.
/// let overlap = resolve(LocalDateTime::new(2025, 10, 2, 1, 30), "America/New_York").unwrap();
/// assert_eq!(overlap.instant_ms(), Some(1_762_061_400_000));
/// ```
pub fn resolve(local: LocalDateTime, zone: &str) -> Result<Resolution> {
    resolve_with(&Tzdb, local, zone)
}

/// Resolve a wall-clock reading through any [`ZoneAdapter`].
pub fn resolve_with<A: ZoneAdapter + ?Sized>(
    adapter: &A,
    local: LocalDateTime,
    zone: &str,
) -> Result<Resolution> {
    let Some(probe) = local.as_utc_ms() else {
        // Unknown zones still fail loudly for impossible readings.
        adapter.parts_of(0, zone)?;
        return Ok(Resolution::Impossible);
    };

    let mut offsets: Vec<i64> = Vec::with_capacity(3);
    for at in [probe, probe - MS_PER_DAY, probe + MS_PER_DAY] {
        let offset = offset_at(adapter, at, zone)?;
        if !offsets.contains(&offset) {
            offsets.push(offset);
        }
    }

    let mut matches: Vec<i64> = Vec::with_capacity(2);
    for offset in &offsets {
        let candidate = probe - offset;
        if adapter.parts_of(candidate, zone)?.local() == local && !matches.contains(&candidate) {
            matches.push(candidate);
        }
    }
    matches.sort_unstable();

    let resolution = match matches.as_slice() {
        [] => {
            let smallest = offsets.iter().copied().min().unwrap_or(0);
            debug!(zone, ?local, "reading falls in a DST gap");
            Resolution::Gap {
                shifted: probe - smallest,
            }
        }
        [instant_ms] => Resolution::Exact {
            instant_ms: *instant_ms,
        },
        [earlier, .., later] => {
            debug!(zone, ?local, "reading falls in a DST overlap");
            Resolution::Ambiguous {
                earlier: *earlier,
                later: *later,
            }
        }
    };
    Ok(resolution)
}

/// The zone's offset at `at`: its civil reading taken as UTC, minus `at`.
fn offset_at<A: ZoneAdapter + ?Sized>(adapter: &A, at: i64, zone: &str) -> Result<i64> {
    let parts = adapter.parts_of(at, zone)?;
    parts
        .as_utc_ms()
        .map(|reconstructed| reconstructed - at)
        .ok_or_else(|| PickerError::InvalidTime(format!("adapter returned {parts:?} for {at}")))
}

// ── Tests ───────────────────────────────────────────────────────────────────
