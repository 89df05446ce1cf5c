//! End-to-end picker flows driven through the public API only.

use chrono::NaiveDate;
use range_engine::{
    matrix_in, parse_time, this_month_in, validate, Constraints, DateTimeRange, FixedClock,
    GridKey, GridMove, LocalDateTime, ParsedTime, RangeState, RangeStateOptions, Resolution,
    TimeInputError, Transition, ValidationError, ValidationResult, ZonedInstant,
};

/// 2025-01-12T00:00:00Z
const JAN_12: i64 = 1_736_640_000_000;
/// 2025-01-13T00:00:00Z
const JAN_13: i64 = 1_736_726_400_000;
/// 2025-01-19T00:00:00Z
const JAN_19: i64 = 1_737_244_800_000;

fn utc(ms: i64) -> ZonedInstant {
    ZonedInstant::new(ms, "UTC")
}

// ── selection ───────────────────────────────────────────────────────────────

#[test]
fn test_two_clicks_commit_a_week() {
    let mut state = RangeState::default();
    state.select_date(utc(JAN_12));
    state.select_date(utc(JAN_19));

    assert_eq!(state.range(), &DateTimeRange::new(utc(JAN_12), utc(JAN_19)));
    assert_eq!(state.validation(), ValidationResult::Valid);
    assert_eq!(state.draft().draft_start(), None);
}

#[test]
fn test_reversed_clicks_report_min_duration() {
    let mut state = RangeState::default();
    state.select_date(utc(JAN_19));
    let transition = state.select_date(utc(JAN_12));

    assert_eq!(transition, Transition::Rejected(ValidationError::MinDuration));
    assert!(state.range().is_empty());
    assert_eq!(state.validation().reason(), Some(ValidationError::MinDuration));
}

#[test]
fn test_range_over_blackout_is_rejected() {
    let mut state = RangeState::new(RangeStateOptions {
        initial_value: None,
        constraints: Some(Constraints {
            blackout: vec![JAN_13],
            ..Default::default()
        }),
    });
    state.select_date(utc(JAN_12));
    state.select_date(utc(JAN_19));

    assert!(state.range().is_empty());
    assert_eq!(state.validation().reason(), Some(ValidationError::Blackout));
}

// ── calendar + constraints ──────────────────────────────────────────────────

#[test]
fn test_cells_before_min_are_disabled() {
    let zone = "America/New_York";
    // 2025-01-05T00:00 in New York (EST) is 05:00Z.
    let min = 1_736_053_200_000;
    let constraints = Constraints {
        min: Some(min),
        ..Default::default()
    };
    let grid = matrix_in(2025, 0, zone).unwrap();
    let jan_5 = grid
        .index_of(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap())
        .unwrap();
    assert_eq!(jan_5, 7);
    assert_eq!(grid.cell(jan_5).unwrap().instant_ms, min);

    for index in 0..jan_5 {
        assert!(grid.is_disabled(index, Some(&constraints)), "cell {index}");
        assert_eq!(grid.navigate(index, GridKey::Enter, Some(&constraints)), GridMove::Stay);
    }
    for index in jan_5..42 {
        assert!(!grid.is_disabled(index, Some(&constraints)), "cell {index}");
    }

    // Enter on the first enabled cell feeds the state machine.
    let GridMove::Select(clicked) = grid.navigate(jan_5, GridKey::Enter, Some(&constraints)) else {
        panic!("Enter on an enabled cell should select it");
    };
    let mut state = RangeState::new(RangeStateOptions {
        initial_value: None,
        constraints: Some(constraints),
    });
    assert_eq!(state.select_date(clicked.clone()), Transition::Drafted);
    assert_eq!(state.select_date(clicked), Transition::Committed);
    assert_eq!(state.range().bounds(), Some((min, min)));
}

// ── time entry ──────────────────────────────────────────────────────────────

#[test]
fn test_typed_time_in_spring_gap() {
    let day = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
    assert_eq!(
        parse_time("02:30", day, "America/New_York").unwrap(),
        ParsedTime::Rejected(TimeInputError::DstGap)
    );
    assert!(matches!(
        range_engine::resolve(LocalDateTime::new(2025, 2, 9, 2, 30), "America/New_York").unwrap(),
        Resolution::Gap { .. }
    ));
}

// ── presets ─────────────────────────────────────────────────────────────────

#[test]
fn test_this_month_in_utc() {
    // now = 2025-01-15T12:00:00Z
    let range = this_month_in("UTC", &FixedClock(1_736_942_400_000)).unwrap();
    assert_eq!(range.bounds(), Some((1_735_689_600_000, 1_738_367_999_999)));
    assert_eq!(validate(&range, None), ValidationResult::Valid);
}

// ── boundaries ──────────────────────────────────────────────────────────────

#[test]
fn test_single_instant_range_is_valid() {
    let range = DateTimeRange::new(utc(JAN_12), utc(JAN_12));
    assert!(validate(&range, None).is_valid());
    let no_zero = Constraints {
        min_duration_ms: Some(1),
        ..Default::default()
    };
    assert_eq!(
        validate(&range, Some(&no_zero)),
        ValidationResult::Invalid(ValidationError::MinDuration)
    );
}

#[test]
fn test_blackout_on_endpoint_is_rejected() {
    let on_end = Constraints {
        blackout: vec![JAN_19],
        ..Default::default()
    };
    assert_eq!(
        validate(&DateTimeRange::new(utc(JAN_12), utc(JAN_19)), Some(&on_end)).reason(),
        Some(ValidationError::Blackout)
    );
}

#[test]
fn test_endpoints_keep_their_own_zones() {
    let mut state = RangeState::default();
    state.select_date(ZonedInstant::new(JAN_12, "Asia/Tokyo"));
    state.select_date(ZonedInstant::new(JAN_19, "America/New_York"));
    let range = state.range();
    assert_eq!(range.start.as_ref().unwrap().zone, "Asia/Tokyo");
    assert_eq!(range.end.as_ref().unwrap().zone, "America/New_York");
}

#[test]
fn test_navigation_pages_between_months() {
    let grid = matrix_in(2025, 11, "UTC").unwrap();
    let GridMove::ShowMonth(next) = grid.navigate(0, GridKey::PageDown, None) else {
        panic!("PageDown should change month");
    };
    let following = matrix_in(next.year(), next.month() as i32, "UTC").unwrap();
    assert_eq!(following.month().year(), 2026);
    assert_eq!(following.month().month(), 0);
}
