//! Create-request schemas. Each input type rejects unknown fields at
//! deserialization and checks value ranges in `Validate`.

pub mod golf_club;
pub mod golf_course;
pub mod golf_round;
pub mod hole;
pub mod tee_box;

use std::collections::HashMap;

use crate::error::ApiError;

pub use golf_club::GolfClubInput;
pub use golf_course::GolfCourseInput;
pub use golf_round::GolfRoundInput;
pub use hole::{HoleBatch, HoleInput};
pub use tee_box::TeeBoxInput;

pub const UNITS: &[&str] = &["yards", "meters"];

/// Per-field validation messages collected before rejecting a request
#[derive(Debug, Default)]
pub struct FieldErrors(HashMap<String, String>);

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Record `message` against `field` unless `ok` holds
    pub fn check(&mut self, ok: bool, field: impl Into<String>, message: impl Into<String>) {
        if !ok {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), ApiError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ApiError::unprocessable_entity("Validation failed", self.0))
        }
    }
}

pub trait Validate: Sized {
    fn validate(&self, errors: &mut FieldErrors);

    fn validated(self) -> Result<Self, ApiError> {
        let mut errors = FieldErrors::default();
        self.validate(&mut errors);
        errors.into_result()?;
        Ok(self)
    }
}

pub(crate) fn non_empty(errors: &mut FieldErrors, field: &str, value: &str) {
    errors.check(!value.trim().is_empty(), field, "must not be empty");
}

pub(crate) fn known_unit(errors: &mut FieldErrors, field: &str, unit: &str) {
    errors.check(
        UNITS.contains(&unit),
        field,
        format!("must be one of {}", UNITS.join(", ")),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = FieldErrors::default();
        errors.add("par", "must be greater than 0");
        errors.add("par", "ignored");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_json()["field_errors"]["par"], "must be greater than 0");
    }

    #[test]
    fn empty_errors_pass() {
        let mut errors = FieldErrors::default();
        errors.check(true, "name", "must not be empty");
        assert!(errors.is_empty());
        assert!(errors.into_result().is_ok());
    }
}
