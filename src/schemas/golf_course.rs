use serde::Deserialize;

use super::{non_empty, FieldErrors, Validate};
use crate::database::models::NewGolfCourse;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GolfCourseInput {
    pub name: String,
    pub num_holes: i32,
}

impl Validate for GolfCourseInput {
    fn validate(&self, errors: &mut FieldErrors) {
        non_empty(errors, "name", &self.name);
        errors.check(matches!(self.num_holes, 9 | 18), "num_holes", "must be 9 or 18");
    }
}

impl GolfCourseInput {
    pub fn into_new(self, golf_club_id: i32) -> NewGolfCourse {
        NewGolfCourse {
            golf_club_id,
            name: self.name,
            num_holes: self.num_holes,
        }
    }
}
