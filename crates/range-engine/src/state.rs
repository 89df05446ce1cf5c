//! The two-click range selection state machine.
//!
//! A [`RangeState`] owns the committed range, the in-progress draft and the
//! most recent validation result. It waits for a start click
//! ([`Draft::AwaitingStart`]), then for an end click
//! ([`Draft::AwaitingEnd`]). The second click always returns it to
//! `AwaitingStart`; the candidate range is committed only if it validates.
//! Endpoints are never swapped: a second click before the first is rejected
//! as [`ValidationError::MinDuration`].
//!
//! Change observers registered with [`RangeState::on_change`] fire only when
//! the committed range actually changes.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::{PickerError, Result};
use crate::presets::{Clock, Preset};
use crate::range::{DateTimeRange, Endpoint, ZonedInstant};
use crate::time_input::{parse_time, ParsedTime, TimeInputError};
use crate::validation::{validate, Constraints, ValidationError, ValidationResult};
use crate::zone::parts_of;

/// Progress through the two-click protocol.
///
/// Serializes as `{"selecting":"start","draftStart":null}` or
/// `{"selecting":"end","draftStart":{..}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Draft {
    /// Next click picks the start.
    #[default]
    AwaitingStart,
    /// Next click picks the end of a range starting at `draft_start`.
    AwaitingEnd { draft_start: ZonedInstant },
}

/// Which endpoint the next click picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Selecting {
    Start,
    End,
}

impl Draft {
    pub fn selecting(&self) -> Selecting {
        match self {
            Draft::AwaitingStart => Selecting::Start,
            Draft::AwaitingEnd { .. } => Selecting::End,
        }
    }

    pub fn draft_start(&self) -> Option<&ZonedInstant> {
        match self {
            Draft::AwaitingStart => None,
            Draft::AwaitingEnd { draft_start } => Some(draft_start),
        }
    }
}

impl Serialize for Draft {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Draft", 2)?;
        state.serialize_field("selecting", &self.selecting())?;
        state.serialize_field("draftStart", &self.draft_start())?;
        state.end()
    }
}

/// What an operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A start click was recorded in the draft.
    Drafted,
    /// A range passed validation and is now the committed range.
    Committed,
    /// A candidate range failed validation; the committed range is unchanged.
    Rejected(ValidationError),
    /// Typed time text was rejected before any range was built.
    TimeRejected(TimeInputError),
    /// Everything was cleared.
    Reset,
}

/// Construction options.
#[derive(Debug, Clone, Default)]
pub struct RangeStateOptions {
    /// Committed range to start from. It is not validated.
    pub initial_value: Option<DateTimeRange>,
    pub constraints: Option<Constraints>,
}

/// A copy of everything a collaborator renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub range: DateTimeRange,
    pub draft: Draft,
    pub validation: ValidationResult,
}

type ChangeObserver = Box<dyn FnMut(&DateTimeRange)>;

pub struct RangeState {
    range: DateTimeRange,
    draft: Draft,
    validation: ValidationResult,
    constraints: Option<Constraints>,
    observers: Vec<ChangeObserver>,
}

impl fmt::Debug for RangeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeState")
            .field("range", &self.range)
            .field("draft", &self.draft)
            .field("validation", &self.validation)
            .field("constraints", &self.constraints)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for RangeState {
    fn default() -> Self {
        Self::new(RangeStateOptions::default())
    }
}

impl RangeState {
    pub fn new(options: RangeStateOptions) -> Self {
        Self {
            range: options.initial_value.unwrap_or_default(),
            draft: Draft::AwaitingStart,
            validation: ValidationResult::Valid,
            constraints: options.constraints,
            observers: Vec::new(),
        }
    }

    /// The committed range.
    pub fn range(&self) -> &DateTimeRange {
        &self.range
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// The result of the most recent validation.
    pub fn validation(&self) -> ValidationResult {
        self.validation
    }

    pub fn constraints(&self) -> Option<&Constraints> {
        self.constraints.as_ref()
    }

    /// Replace the constraints. The committed range is not revalidated.
    pub fn set_constraints(&mut self, constraints: Option<Constraints>) {
        self.constraints = constraints;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            range: self.range.clone(),
            draft: self.draft.clone(),
            validation: self.validation,
        }
    }

    /// Call `observer` with the new range whenever the committed range changes.
    pub fn on_change(&mut self, observer: impl FnMut(&DateTimeRange) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Feed one calendar click.
    pub fn select_date(&mut self, date: ZonedInstant) -> Transition {
        match std::mem::take(&mut self.draft) {
            Draft::AwaitingStart => {
                debug!(instant_ms = date.instant_ms, zone = %date.zone, "draft start");
                self.draft = Draft::AwaitingEnd { draft_start: date };
                Transition::Drafted
            }
            Draft::AwaitingEnd { draft_start } => {
                self.try_commit(DateTimeRange::new(draft_start, date))
            }
        }
    }

    /// Validate `range` and commit it if it passes.
    ///
    /// A committed range also clears any pending draft. A rejected range
    /// leaves both the committed range and the draft untouched.
    pub fn set_range(&mut self, range: DateTimeRange) -> Transition {
        let transition = self.try_commit(range);
        if transition == Transition::Committed {
            self.draft = Draft::AwaitingStart;
        }
        transition
    }

    /// Return to the initial state: empty range, no draft, valid.
    pub fn reset(&mut self) -> Transition {
        self.draft = Draft::AwaitingStart;
        self.validation = ValidationResult::Valid;
        self.replace_range(DateTimeRange::empty());
        Transition::Reset
    }

    /// Apply a preset computed in `zone`.
    ///
    /// # Errors
    ///
    /// Fails without touching the state when the preset cannot be built
    /// (unknown zone, skipped midnight).
    pub fn apply_preset(
        &mut self,
        preset: Preset,
        zone: &str,
        clock: &dyn Clock,
    ) -> Result<Transition> {
        let range = preset.range_in(zone, clock)?;
        debug!(preset = preset.label(), zone, "apply preset");
        Ok(self.set_range(range))
    }

    /// Retype the time of one endpoint, keeping its civil day in `zone`.
    ///
    /// Text the parser rejects records [`ValidationError::InvalidTime`] and
    /// returns [`Transition::TimeRejected`]. A parsed time goes through
    /// [`set_range`](RangeState::set_range).
    ///
    /// # Errors
    ///
    /// [`PickerError::EmptyEndpoint`] if that endpoint is not set, or a zone
    /// error for an unknown `zone`.
    pub fn edit_time(&mut self, endpoint: Endpoint, text: &str, zone: &str) -> Result<Transition> {
        let current = self
            .range
            .endpoint(endpoint)
            .ok_or(PickerError::EmptyEndpoint(endpoint))?;
        let base_day = parts_of(current.instant_ms, zone)?
            .date()
            .ok_or_else(|| PickerError::InvalidTime("zone adapter returned no date".to_string()))?;

        match parse_time(text, base_day, zone)? {
            ParsedTime::Instant(instant_ms) => {
                let edited = self
                    .range
                    .with_endpoint(endpoint, ZonedInstant::new(instant_ms, zone));
                Ok(self.set_range(edited))
            }
            ParsedTime::Rejected(err) => {
                debug!(%endpoint, text, error = %err, "time text rejected");
                self.validation = ValidationResult::Invalid(ValidationError::InvalidTime);
                Ok(Transition::TimeRejected(err))
            }
        }
    }

    fn try_commit(&mut self, candidate: DateTimeRange) -> Transition {
        self.validation = validate(&candidate, self.constraints.as_ref());
        match self.validation {
            ValidationResult::Valid => {
                self.replace_range(candidate);
                Transition::Committed
            }
            ValidationResult::Invalid(reason) => {
                debug!(%reason, "candidate range rejected");
                Transition::Rejected(reason)
            }
        }
    }

    fn replace_range(&mut self, range: DateTimeRange) {
        if range == self.range {
            return;
        }
        self.range = range;
        debug!(bounds = ?self.range.bounds(), "range committed");
        for observer in &mut self.observers {
            observer(&self.range);
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
