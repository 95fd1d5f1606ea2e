use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

use super::{known_unit, FieldErrors, Validate};
use crate::database::models::{Hole, NewHole};
use crate::error::ApiError;
use crate::middleware::json::schema_error;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HoleInput {
    pub hole_number: i32,
    #[serde(default)]
    pub name: String,
    pub par: i32,
    pub handicap: i32,
    pub distance: i32,
    pub unit: String,
}

/// The `{"holes": [...]}` envelope submitted for one tee box
#[derive(Debug, Clone)]
pub struct HoleBatch(pub Vec<HoleInput>);

impl HoleBatch {
    /// A missing `holes` key is a bad request; a malformed entry is a schema error
    pub fn from_body(mut body: Map<String, Value>) -> Result<Self, ApiError> {
        let holes = body
            .remove("holes")
            .ok_or_else(|| ApiError::bad_request("Request body must contain \"holes\""))?;
        serde_json::from_value(holes)
            .map(HoleBatch)
            .map_err(|e| schema_error(&e))
    }

    /// Hole numbers and handicaps stay unique across every batch for a tee box
    pub fn check_against(&self, stored: &[Hole]) -> Result<(), ApiError> {
        let mut errors = FieldErrors::default();
        for (i, hole) in self.0.iter().enumerate() {
            let field = |name: &str| format!("holes[{}].{}", i, name);
            errors.check(
                !stored.iter().any(|h| h.hole_number == hole.hole_number),
                field("hole_number"),
                "hole number already exists for this tee box",
            );
            errors.check(
                !stored.iter().any(|h| h.handicap == hole.handicap),
                field("handicap"),
                "handicap already exists for this tee box",
            );
        }
        errors.into_result()
    }

    pub fn into_new(self, golf_course_id: i32, tee_box_id: i32) -> Vec<NewHole> {
        self.0
            .into_iter()
            .map(|hole| NewHole {
                golf_course_id,
                tee_box_id,
                hole_number: hole.hole_number,
                name: hole.name,
                par: hole.par,
                handicap: hole.handicap,
                distance: hole.distance,
                unit: hole.unit,
            })
            .collect()
    }
}

impl Validate for HoleBatch {
    fn validate(&self, errors: &mut FieldErrors) {
        errors.check(!self.0.is_empty(), "holes", "must contain at least one hole");

        let mut numbers = HashSet::new();
        let mut handicaps = HashSet::new();
        for (i, hole) in self.0.iter().enumerate() {
            let field = |name: &str| format!("holes[{}].{}", i, name);

            errors.check((1..=18).contains(&hole.hole_number), field("hole_number"), "must be between 1 and 18");
            errors.check(numbers.insert(hole.hole_number), field("hole_number"), "duplicate hole number");
            errors.check((1..=18).contains(&hole.handicap), field("handicap"), "must be between 1 and 18");
            errors.check(handicaps.insert(hole.handicap), field("handicap"), "duplicate handicap");
            errors.check((3..=6).contains(&hole.par), field("par"), "must be between 3 and 6");
            errors.check(hole.distance > 0, field("distance"), "must be greater than 0");
            known_unit(errors, &field("unit"), &hole.unit);
        }
    }
}
