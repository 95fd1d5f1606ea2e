use serde::Deserialize;

use super::{known_unit, non_empty, FieldErrors, Validate};
use crate::database::models::NewTeeBox;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeeBoxInput {
    pub tee_color: String,
    pub par: i32,
    pub distance: i32,
    pub unit: String,
    pub course_rating: f64,
    pub slope: f64,
}

impl Validate for TeeBoxInput {
    fn validate(&self, errors: &mut FieldErrors) {
        non_empty(errors, "tee_color", &self.tee_color);
        errors.check(self.par > 0, "par", "must be greater than 0");
        errors.check(self.distance > 0, "distance", "must be greater than 0");
        known_unit(errors, "unit", &self.unit);
        errors.check(self.course_rating > 0.0, "course_rating", "must be greater than 0");
        // USGA slope range
        errors.check(
            (55.0..=155.0).contains(&self.slope),
            "slope",
            "must be between 55 and 155",
        );
    }
}

impl TeeBoxInput {
    pub fn into_new(self, golf_course_id: i32) -> NewTeeBox {
        NewTeeBox {
            golf_course_id,
            tee_color: self.tee_color,
            par: self.par,
            distance: self.distance,
            unit: self.unit,
            course_rating: self.course_rating,
            slope: self.slope,
        }
    }
}
