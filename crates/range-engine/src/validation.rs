//! Range constraints and the pure validator that checks them.
//!
//! [`validate`] is deterministic and side-effect free. Checks run in a fixed
//! order and the first failure wins:
//!
//! 1. an incomplete range is valid;
//! 2. `start > end` is reported as [`ValidationError::MinDuration`];
//! 3. no constraints means valid;
//! 4. `start < min` → [`ValidationError::Min`];
//! 5. `end > max` → [`ValidationError::Max`];
//! 6. a blackout instant inside `[start, end]` → [`ValidationError::Blackout`];
//! 7. `end - start < min_duration_ms` → [`ValidationError::MinDuration`];
//! 8. `end - start > max_duration_ms` → [`ValidationError::MaxDuration`];
//! 9. otherwise valid.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::range::DateTimeRange;

/// Limits a committed range must satisfy. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Constraints {
    /// Earliest allowed start.
    pub min: Option<i64>,
    /// Latest allowed end.
    pub max: Option<i64>,
    /// Instants no range may contain.
    pub blackout: Vec<i64>,
    pub min_duration_ms: Option<i64>,
    pub max_duration_ms: Option<i64>,
}

impl Constraints {
    /// Whether a calendar cell at `instant_ms` is unselectable.
    ///
    /// A cell is disabled when it is before `min`, after `max`, or is itself
    /// a blackout instant. This is narrower than [`validate`], which rejects
    /// any range that merely *contains* a blackout instant.
    pub fn disables(&self, instant_ms: i64) -> bool {
        self.min.is_some_and(|min| instant_ms < min)
            || self.max.is_some_and(|max| instant_ms > max)
            || self.blackout.contains(&instant_ms)
    }
}

/// Why a range was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationError {
    Min,
    Max,
    Blackout,
    MinDuration,
    MaxDuration,
    InvalidTime,
}

impl ValidationError {
    /// The stable reason code (`"minDuration"`, ...).
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Min => "min",
            ValidationError::Max => "max",
            ValidationError::Blackout => "blackout",
            ValidationError::MinDuration => "minDuration",
            ValidationError::MaxDuration => "maxDuration",
            ValidationError::InvalidTime => "invalidTime",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of [`validate`].
///
/// Serializes as `{"valid":true}` or `{"valid":false,"reason":"<code>"}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ValidationResult {
    #[default]
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn reason(&self) -> Option<ValidationError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(reason) => Some(*reason),
        }
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ValidationResult::Valid => {
                let mut state = serializer.serialize_struct("ValidationResult", 1)?;
                state.serialize_field("valid", &true)?;
                state.end()
            }
            ValidationResult::Invalid(reason) => {
                let mut state = serializer.serialize_struct("ValidationResult", 2)?;
                state.serialize_field("valid", &false)?;
                state.serialize_field("reason", reason)?;
                state.end()
            }
        }
    }
}

/// Check `range` against `constraints`.
///
/// # Examples
///
/// ```
/// use range_engine::range::{DateTimeRange, ZonedInstant};
/// use range_engine::validation::{validate, Constraints, ValidationError, ValidationResult};
///
/// let range = DateTimeRange::new(
///     ZonedInstant::new(1_736_640_000_000, "UTC"),
///     ZonedInstant::new(1_737_244_800_000, "UTC"),
/// );
/// let constraints = Constraints { blackout: vec![1_736_726_400_000], ..Default::default() };
///
/// assert_eq!(validate(&range, None), ValidationResult::Valid);
/// assert_eq!(
///     validate(&range, Some(&constraints)),
///     ValidationResult::Invalid(ValidationError::Blackout),
/// );
/// ```
pub fn validate(range: &DateTimeRange, constraints: Option<&Constraints>) -> ValidationResult {
    use ValidationResult::{Invalid, Valid};

    let Some((start, end)) = range.bounds() else {
        return Valid;
    };

    if start > end {
        return Invalid(ValidationError::MinDuration);
    }

    let Some(c) = constraints else {
        return Valid;
    };

    if c.min.is_some_and(|min| start < min) {
        return Invalid(ValidationError::Min);
    }

    if c.max.is_some_and(|max| end > max) {
        return Invalid(ValidationError::Max);
    }

    if c.blackout.iter().any(|&b| start <= b && b <= end) {
        return Invalid(ValidationError::Blackout);
    }

    // Widened: the span between two instants can exceed i64::MAX.
    let duration = i128::from(end) - i128::from(start);

    if c.min_duration_ms.is_some_and(|min| duration < i128::from(min)) {
        return Invalid(ValidationError::MinDuration);
    }

    if c.max_duration_ms.is_some_and(|max| duration > i128::from(max)) {
        return Invalid(ValidationError::MaxDuration);
    }

    Valid
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::ZonedInstant;
    use proptest::prelude::*;

    const HOUR: i64 = 3_600_000;

    fn range(start: i64, end: i64) -> DateTimeRange {
        DateTimeRange::new(ZonedInstant::new(start, "UTC"), ZonedInstant::new(end, "UTC"))
    }

    fn invalid(reason: ValidationError) -> ValidationResult {
        ValidationResult::Invalid(reason)
    }

    // ── ordering of checks ──────────────────────────────────────────────

    #[test]
    fn test_incomplete_range_is_valid_even_with_constraints() {
        let c = Constraints {
            min: Some(i64::MAX),
            ..Default::default()
        };
        let half = DateTimeRange {
            start: Some(ZonedInstant::new(0, "UTC")),
            end: None,
        };
        assert_eq!(validate(&half, Some(&c)), ValidationResult::Valid);
        assert_eq!(validate(&DateTimeRange::empty(), Some(&c)), ValidationResult::Valid);
    }

    #[test]
    fn test_reversed_range_is_min_duration_without_constraints() {
        assert_eq!(validate(&range(10, 5), None), invalid(ValidationError::MinDuration));
    }

    #[test]
    fn test_reversed_range_beats_min() {
        let c = Constraints {
            min: Some(100),
            ..Default::default()
        };
        assert_eq!(validate(&range(10, 5), Some(&c)), invalid(ValidationError::MinDuration));
    }

    #[test]
    fn test_no_constraints_is_valid() {
        assert_eq!(validate(&range(5, 5), None), ValidationResult::Valid);
    }

    #[test]
    fn test_min_and_max() {
        let c = Constraints {
            min: Some(10),
            max: Some(20),
            ..Default::default()
        };
        assert_eq!(validate(&range(9, 15), Some(&c)), invalid(ValidationError::Min));
        assert_eq!(validate(&range(10, 21), Some(&c)), invalid(ValidationError::Max));
        assert_eq!(validate(&range(10, 20), Some(&c)), ValidationResult::Valid);
        // min is checked before max
        assert_eq!(validate(&range(9, 21), Some(&c)), invalid(ValidationError::Min));
    }

    #[test]
    fn test_blackout_is_inclusive_on_both_ends() {
        let c = Constraints {
            blackout: vec![10],
            ..Default::default()
        };
        assert_eq!(validate(&range(10, 20), Some(&c)), invalid(ValidationError::Blackout));
        assert_eq!(validate(&range(0, 10), Some(&c)), invalid(ValidationError::Blackout));
        assert_eq!(validate(&range(11, 20), Some(&c)), ValidationResult::Valid);
    }

    #[test]
    fn test_max_beats_blackout() {
        let c = Constraints {
            max: Some(15),
            blackout: vec![12],
            ..Default::default()
        };
        assert_eq!(validate(&range(10, 20), Some(&c)), invalid(ValidationError::Max));
    }

    #[test]
    fn test_durations() {
        let c = Constraints {
            min_duration_ms: Some(HOUR),
            max_duration_ms: Some(24 * HOUR),
            ..Default::default()
        };
        assert_eq!(validate(&range(0, HOUR - 1), Some(&c)), invalid(ValidationError::MinDuration));
        assert_eq!(validate(&range(0, HOUR), Some(&c)), ValidationResult::Valid);
        assert_eq!(validate(&range(0, 24 * HOUR), Some(&c)), ValidationResult::Valid);
        assert_eq!(
            validate(&range(0, 24 * HOUR + 1), Some(&c)),
            invalid(ValidationError::MaxDuration)
        );
    }

    #[test]
    fn test_duration_spanning_whole_timeline() {
        let c = Constraints {
            min_duration_ms: Some(0),
            max_duration_ms: Some(i64::MAX),
            ..Default::default()
        };
        assert_eq!(validate(&range(i64::MIN, i64::MAX), Some(&c)), invalid(ValidationError::MaxDuration));
        let no_max = Constraints {
            min_duration_ms: Some(i64::MAX),
            ..Default::default()
        };
        assert_eq!(validate(&range(i64::MIN, i64::MAX), Some(&no_max)), ValidationResult::Valid);
        assert_eq!(validate(&range(i64::MIN, 0), Some(&no_max)), ValidationResult::Valid);
        assert_eq!(
            validate(&range(i64::MIN, -2), Some(&no_max)),
            invalid(ValidationError::MinDuration)
        );
    }

    #[test]
    fn test_blackout_beats_duration() {
        let c = Constraints {
            blackout: vec![5],
            max_duration_ms: Some(1),
            ..Default::default()
        };
        assert_eq!(validate(&range(0, 10), Some(&c)), invalid(ValidationError::Blackout));
    }

    // ── calendar disabling ──────────────────────────────────────────────

    #[test]
    fn test_disables_uses_exact_blackout_membership() {
        let c = Constraints {
            min: Some(10),
            max: Some(100),
            blackout: vec![50],
            ..Default::default()
        };
        assert!(c.disables(9));
        assert!(!c.disables(10));
        assert!(c.disables(50));
        assert!(!c.disables(51));
        assert!(c.disables(101));
        assert!(!Constraints::default().disables(i64::MIN));
    }

    // ── serialization ───────────────────────────────────────────────────

    #[test]
    fn test_result_serialization() {
        assert_eq!(
            serde_json::to_string(&ValidationResult::Valid).unwrap(),
            r#"{"valid":true}"#
        );
        assert_eq!(
            serde_json::to_string(&invalid(ValidationError::MinDuration)).unwrap(),
            r#"{"valid":false,"reason":"minDuration"}"#
        );
    }

    #[test]
    fn test_constraints_deserialize_camel_case_with_defaults() {
        let c: Constraints =
            serde_json::from_str(r#"{"min": 5, "minDurationMs": 60000}"#).unwrap();
        assert_eq!(c.min, Some(5));
        assert_eq!(c.min_duration_ms, Some(60_000));
        assert!(c.blackout.is_empty());
        assert_eq!(c.max, None);
    }

    #[test]
    fn test_reason_codes_match_serde() {
        for reason in [
            ValidationError::Min,
            ValidationError::Max,
            ValidationError::Blackout,
            ValidationError::MinDuration,
            ValidationError::MaxDuration,
            ValidationError::InvalidTime,
        ] {
            let json = serde_json::to_value(reason).unwrap();
            assert_eq!(json, serde_json::Value::String(reason.code().to_string()));
        }
    }

    // ── properties ──────────────────────────────────────────────────────

    fn constraints_strategy() -> impl Strategy<Value = Constraints> {
        (
            proptest::option::of(-1_000i64..1_000),
            proptest::option::of(-1_000i64..1_000),
            proptest::collection::vec(-1_000i64..1_000, 0..4),
            proptest::option::of(0i64..500),
            proptest::option::of(0i64..2_000),
        )
            .prop_map(|(min, max, blackout, min_duration_ms, max_duration_ms)| Constraints {
                min,
                max,
                blackout,
                min_duration_ms,
                max_duration_ms,
            })
    }

    proptest! {
        #[test]
        fn prop_validate_is_deterministic(
            start in -1_000i64..1_000,
            end in -1_000i64..1_000,
            c in constraints_strategy(),
        ) {
            let r = range(start, end);
            let first = validate(&r, Some(&c));
            prop_assert_eq!(first, validate(&r, Some(&c)));
            prop_assert_eq!(first.is_valid(), first.reason().is_none());
        }

        #[test]
        fn prop_valid_complete_range_is_ordered(
            start in -1_000i64..1_000,
            end in -1_000i64..1_000,
            c in proptest::option::of(constraints_strategy()),
        ) {
            if validate(&range(start, end), c.as_ref()).is_valid() {
                prop_assert!(start <= end);
            }
        }
    }
}
