use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use super::{FieldErrors, Validate};
use crate::database::models::NewGolfRound;

fn counts_by_default() -> bool {
    true
}

/// Round submission; the owner comes from the bearer token, never the body
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GolfRoundInput {
    pub golf_course_id: i32,
    pub tee_box_id: i32,
    pub gross_score: i32,
    #[serde(default = "counts_by_default")]
    pub towards_handicap: bool,
    pub played_on: NaiveDate,
}

impl Validate for GolfRoundInput {
    fn validate(&self, errors: &mut FieldErrors) {
        errors.check(self.gross_score > 0, "gross_score", "must be greater than 0");
        errors.check(
            self.played_on <= Utc::now().date_naive(),
            "played_on",
            "must not be in the future",
        );
    }
}

impl GolfRoundInput {
    pub fn into_new(self, user_id: i32) -> NewGolfRound {
        NewGolfRound {
            golf_course_id: self.golf_course_id,
            tee_box_id: self.tee_box_id,
            user_id,
            gross_score: self.gross_score,
            towards_handicap: self.towards_handicap,
            played_on: self.played_on,
        }
    }
}
