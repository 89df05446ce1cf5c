//! # range-engine
//!
//! Timezone-correct core of a date-time range picker.
//!
//! Every point in time is an absolute instant (epoch milliseconds) paired
//! with an IANA zone. Civil readings ("9 March 2025, 02:30") are only ever
//! turned into instants through the zone database, so DST gaps and overlaps
//! are detected rather than silently shifted.
//!
//! ## Modules
//!
//! - [`zone`] — Instant → civil parts in an IANA zone, zone listing, host zone
//! - [`resolve`] — Civil reading → instant, classifying gaps and overlaps
//! - [`calendar`] — 6×7 month grid with zone-correct midnights and keyboard navigation
//! - [`validation`] — Range checks against min/max, blackout and duration constraints
//! - [`state`] — Two-click range selection state machine
//! - [`presets`] — "Today", "Last 7 Days", "This Month" with an injected clock
//! - [`time_input`] — `HH:MM` parsing and stepping
//! - [`range`] — Zoned instants and ranges
//! - [`civil`] — Civil date-time value types
//! - [`error`] — Error types

pub mod calendar;
pub mod civil;
pub mod error;
pub mod presets;
pub mod range;
pub mod resolve;
pub mod state;
pub mod time_input;
pub mod validation;
pub mod zone;

pub use calendar::{matrix_in, matrix_of, CalendarCell, CalendarMatrix, GridKey, GridMove, YearMonth};
pub use civil::{LocalDateTime, ZonedParts};
pub use error::PickerError;
pub use presets::{
    last_7_days_in, start_of_day_in, this_month_in, today_in, Clock, FixedClock, Preset,
    SystemClock,
};
pub use range::{DateTimeRange, Endpoint, ZonedInstant};
pub use resolve::{resolve, resolve_with, Resolution};
pub use state::{Draft, RangeState, RangeStateOptions, Selecting, Snapshot, Transition};
pub use time_input::{parse_time, step_text, ParsedTime, Step, TimeInputError, TimeOfDay};
pub use validation::{validate, Constraints, ValidationError, ValidationResult};
pub use zone::{known_zones, parts_of, system_zone, Tzdb, ZoneAdapter};
