//! Six-week calendar grids and the keyboard navigation model behind them.
//!
//! A [`CalendarMatrix`] always has 6 rows of 7 cells, column 0 being
//! Sunday. With `W` the weekday of the first of the month, `D` its length
//! and `Pd` the length of the previous month, cell `i` holds:
//!
//! * `i < W`: day `Pd - W + i + 1` of the previous month;
//! * `i - W < D`: day `i - W + 1` of the month itself;
//! * otherwise: day `i - W - D + 1` of the next month.
//!
//! A cell's instant is the start of its civil day in the matrix zone. When
//! midnight is skipped by a DST transition, the cell uses the first instant
//! after the jump.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::civil::{days_in_month, LocalDateTime};
use crate::error::{PickerError, Result};
use crate::range::ZonedInstant;
use crate::resolve::{resolve, Resolution};
use crate::validation::Constraints;
use crate::zone::system_zone;

pub const ROWS: usize = 6;
pub const COLUMNS: usize = 7;
pub const CELL_COUNT: usize = ROWS * COLUMNS;

/// A calendar month. `month` is zero-based.
///
/// Construction normalizes out-of-range months into neighbouring years, so
/// `YearMonth::new(2025, -1)` is December 2024 and `YearMonth::new(2025, 12)`
/// is January 2026.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: i32) -> Self {
        Self {
            year: year.saturating_add(month.div_euclid(12)),
            month: month.rem_euclid(12) as u32,
        }
    }

    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn add_months(&self, delta: i32) -> Self {
        Self::new(self.year, (self.month as i32).saturating_add(delta))
    }

    pub fn next(&self) -> Self {
        self.add_months(1)
    }

    pub fn prev(&self) -> Self {
        self.add_months(-1)
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Day `day` of this month.
    pub fn day(&self, day: u32) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, day).ok_or_else(|| {
            PickerError::InvalidTime(format!(
                "no day {day} in {}-{:02}",
                self.year,
                self.month + 1
            ))
        })
    }
}

/// One day of the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    /// The civil day this cell represents.
    pub date: NaiveDate,
    /// Start of `date` in the matrix zone.
    pub instant_ms: i64,
    pub in_current_month: bool,
}

/// A 6×7 month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMatrix {
    month: YearMonth,
    zone: String,
    rows: [[CalendarCell; COLUMNS]; ROWS],
}

/// Build the grid for `month` (zero-based, normalized) of `year` with cell
/// instants at midnight in the host's local zone.
pub fn matrix_of(year: i32, month: i32) -> Result<CalendarMatrix> {
    matrix_in(year, month, &system_zone())
}

/// Build the grid for `month` (zero-based, normalized) of `year` with cell
/// instants at midnight in `zone`.
///
/// # Examples
///
/// ```
/// use range_engine::calendar::matrix_in;
///
/// let grid = matrix_in(2024, 1, "UTC").unwrap();
/// assert_eq!(grid.cells().filter(|c| c.in_current_month).count(), 29);
/// ```
pub fn matrix_in(year: i32, month: i32, zone: &str) -> Result<CalendarMatrix> {
    let current = YearMonth::new(year, month);
    let previous = current.prev();
    let next = current.next();

    let lead = current.day(1)?.weekday().num_days_from_sunday() as usize;
    let days = current.days() as usize;
    let prev_days = previous.days() as usize;

    let mut rows = [[CalendarCell::default(); COLUMNS]; ROWS];
    for i in 0..CELL_COUNT {
        let (date, in_current_month) = if i < lead {
            (previous.day((prev_days - lead + i + 1) as u32)?, false)
        } else if i - lead < days {
            (current.day((i - lead + 1) as u32)?, true)
        } else {
            (next.day((i - lead - days + 1) as u32)?, false)
        };
        rows[i / COLUMNS][i % COLUMNS] = CalendarCell {
            date,
            instant_ms: start_of_civil_day(date, zone)?,
            in_current_month,
        };
    }

    Ok(CalendarMatrix {
        month: current,
        zone: zone.to_string(),
        rows,
    })
}

/// First instant of `date` in `zone`.
fn start_of_civil_day(date: NaiveDate, zone: &str) -> Result<i64> {
    match resolve(LocalDateTime::midnight(date), zone)? {
        Resolution::Exact { instant_ms } => Ok(instant_ms),
        Resolution::Ambiguous { earlier, .. } => Ok(earlier),
        Resolution::Gap { shifted } => Ok(shifted),
        Resolution::Impossible => Err(PickerError::InvalidTime(format!("no midnight on {date}"))),
    }
}

/// A key the grid reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridKey {
    Left,
    Right,
    Up,
    Down,
    /// First column of the focused row.
    Home,
    /// Last column of the focused row.
    End,
    /// Previous month.
    PageUp,
    /// Next month.
    PageDown,
    /// Same month of the previous year.
    ShiftPageUp,
    /// Same month of the next year.
    ShiftPageDown,
    /// Select the focused cell.
    Enter,
    /// Same as [`GridKey::Enter`].
    Space,
}

/// What the host should do in response to a [`GridKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridMove {
    /// Move focus to this cell index.
    Focus(usize),
    /// Show another month.
    ShowMonth(YearMonth),
    /// Feed this date to the range state machine.
    Select(ZonedInstant),
    /// Ignore the key (edge of the grid, disabled cell).
    Stay,
}

impl CalendarMatrix {
    pub fn month(&self) -> YearMonth {
        self.month
    }

    /// The zone cell instants are expressed in.
    pub fn zone(&self) -> &str {
        &self.zone
    }

    pub fn rows(&self) -> &[[CalendarCell; COLUMNS]; ROWS] {
        &self.rows
    }

    /// All 42 cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.rows.iter().flatten()
    }

    pub fn cell(&self, index: usize) -> Option<&CalendarCell> {
        self.rows.get(index / COLUMNS)?.get(index % COLUMNS)
    }

    /// Index of the cell showing `date`.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.cells().position(|cell| cell.date == date)
    }

    /// Whether the cell at `index` cannot be selected.
    pub fn is_disabled(&self, index: usize, constraints: Option<&Constraints>) -> bool {
        match (self.cell(index), constraints) {
            (Some(cell), Some(c)) => c.disables(cell.instant_ms),
            (Some(_), None) => false,
            (None, _) => true,
        }
    }

    /// React to `key` with the cell at `focused` holding focus.
    ///
    /// Focus never leaves the grid: moves past an edge are ignored rather
    /// than wrapped. Disabled cells cannot be selected.
    pub fn navigate(
        &self,
        focused: usize,
        key: GridKey,
        constraints: Option<&Constraints>,
    ) -> GridMove {
        let column = focused % COLUMNS;
        let target = match key {
            GridKey::Left => focused.checked_sub(1),
            GridKey::Right => focused.checked_add(1),
            GridKey::Up => focused.checked_sub(COLUMNS),
            GridKey::Down => focused.checked_add(COLUMNS),
            GridKey::Home => Some(focused - column),
            GridKey::End => focused.checked_add(COLUMNS - 1 - column),
            GridKey::PageUp => return GridMove::ShowMonth(self.month.prev()),
            GridKey::PageDown => return GridMove::ShowMonth(self.month.next()),
            GridKey::ShiftPageUp => return GridMove::ShowMonth(self.month.add_months(-12)),
            GridKey::ShiftPageDown => return GridMove::ShowMonth(self.month.add_months(12)),
            GridKey::Enter | GridKey::Space => {
                return match self.cell(focused) {
                    Some(cell) if !self.is_disabled(focused, constraints) => {
                        GridMove::Select(ZonedInstant::new(cell.instant_ms, self.zone.clone()))
                    }
                    _ => GridMove::Stay,
                };
            }
        };
        match target {
            Some(index) if index < CELL_COUNT => GridMove::Focus(index),
            _ => GridMove::Stay,
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
