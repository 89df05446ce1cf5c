//! Zone adapter: decompose instants into civil parts as observed in an IANA zone.
//!
//! Everything above this module reasons in `(instant, zone)` pairs and never
//! touches offsets directly. The [`ZoneAdapter`] trait is the single seam to
//! the timezone database; [`Tzdb`] binds it to the IANA database compiled
//! into `chrono-tz`.

use chrono::Offset;
use chrono_tz::{Tz, TZ_VARIANTS};
use tracing::{debug, warn};

use crate::civil::{utc_datetime, ZonedParts};
use crate::error::{PickerError, Result};

/// Zones every adapter can list, even when it cannot enumerate its database.
pub const FALLBACK_ZONES: [&str; 5] = [
    "UTC",
    "America/New_York",
    "Europe/London",
    "Asia/Kolkata",
    "Asia/Tokyo",
];

/// Zone used when the host's local zone cannot be discovered.
pub const DEFAULT_ZONE: &str = "UTC";

/// Access to a timezone database.
pub trait ZoneAdapter {
    /// Decompose `instant_ms` into the civil fields observed in `zone`.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidTimezone`] for a zone the adapter does
    /// not know, or [`PickerError::InvalidTime`] for an instant outside the
    /// representable calendar.
    fn parts_of(&self, instant_ms: i64, zone: &str) -> Result<ZonedParts>;

    /// The zones this adapter can resolve, in display order.
    fn known_zones(&self) -> Vec<String> {
        FALLBACK_ZONES.iter().map(|zone| zone.to_string()).collect()
    }
}

/// The IANA database shipped with `chrono-tz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tzdb;

impl ZoneAdapter for Tzdb {
    fn parts_of(&self, instant_ms: i64, zone: &str) -> Result<ZonedParts> {
        let tz = parse_timezone(zone)?;
        let local = utc_datetime(instant_ms)?.with_timezone(&tz);
        Ok(ZonedParts::from_naive(&local.naive_local()))
    }

    fn known_zones(&self) -> Vec<String> {
        TZ_VARIANTS.iter().map(|tz| tz.name().to_string()).collect()
    }
}

/// Decompose an instant in `zone` using the IANA database.
///
/// # Examples
///
/// ```
/// use range_engine::zone::parts_of;
///
/// // 2025-01-12T00:00:00Z is 19:00 the previous evening in New York.
/// let parts = parts_of(1_736_640_000_000, "America/New_York").unwrap();
/// assert_eq!((parts.month, parts.day, parts.hour), (0, 11, 19));
/// ```
pub fn parts_of(instant_ms: i64, zone: &str) -> Result<ZonedParts> {
    Tzdb.parts_of(instant_ms, zone)
}

/// Every zone name in the IANA database.
pub fn known_zones() -> Vec<String> {
    Tzdb.known_zones()
}

/// The UTC offset of `zone` at `instant_ms`, in milliseconds (east positive).
pub fn offset_ms(instant_ms: i64, zone: &str) -> Result<i64> {
    let tz = parse_timezone(zone)?;
    let local = utc_datetime(instant_ms)?.with_timezone(&tz);
    Ok(i64::from(local.offset().fix().local_minus_utc()) * 1000)
}

/// The host's local zone, or [`DEFAULT_ZONE`] when it cannot be discovered
/// or is not in the database.
pub fn system_zone() -> String {
    match iana_time_zone::get_timezone() {
        Ok(name) if name.parse::<Tz>().is_ok() => name,
        Ok(name) => {
            debug!(zone = %name, fallback = DEFAULT_ZONE, "system zone not in tzdb");
            DEFAULT_ZONE.to_string()
        }
        Err(err) => {
            debug!(error = %err, fallback = DEFAULT_ZONE, "system zone unavailable");
            DEFAULT_ZONE.to_string()
        }
    }
}

/// Parse an IANA timezone string into `Tz`.
pub(crate) fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>().map_err(|_| {
        warn!(zone = s, "unknown timezone");
        PickerError::InvalidTimezone(format!("'{s}'"))
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────
