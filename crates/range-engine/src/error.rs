//! Error types for range-engine operations.
//!
//! Only system faults live here. User-input problems (bad `HH:MM` text,
//! constraint violations) are returned as values, see
//! [`crate::validation::ValidationResult`] and
//! [`crate::time_input::TimeInputError`].

use chrono::NaiveDate;
use thiserror::Error;

use crate::range::Endpoint;
use crate::validation::ValidationError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Midnight of {date} does not exist in {zone}")]
    NonexistentMidnight { zone: String, date: NaiveDate },

    #[error("Range has no {0} to edit")]
    EmptyEndpoint(Endpoint),
}

impl PickerError {
    /// The validation reason a collaborator shows for this fault.
    ///
    /// Every system fault is a time that cannot be represented, so all of
    /// them surface as [`ValidationError::InvalidTime`].
    pub fn reason(&self) -> ValidationError {
        ValidationError::InvalidTime
    }
}

pub type Result<T> = std::result::Result<T, PickerError>;
