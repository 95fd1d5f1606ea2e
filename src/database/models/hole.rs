use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, FromRow, Postgres};

use crate::database::repository::{Insertable, Model};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Hole {
    pub id: i32,
    pub golf_course_id: i32,
    pub tee_box_id: i32,
    pub hole_number: i32,
    pub name: String,
    pub par: i32,
    /// Difficulty rank among the tee box's holes, 1 is hardest
    pub handicap: i32,
    pub distance: i32,
    pub unit: String,
    pub created_ts: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHole {
    pub golf_course_id: i32,
    pub tee_box_id: i32,
    pub hole_number: i32,
    pub name: String,
    pub par: i32,
    pub handicap: i32,
    pub distance: i32,
    pub unit: String,
}

impl Insertable for NewHole {
    const COLUMNS: &'static [&'static str] = &[
        "golf_course_id",
        "tee_box_id",
        "hole_number",
        "name",
        "par",
        "handicap",
        "distance",
        "unit",
    ];

    fn push_values(&self, row: &mut Separated<'_, '_, Postgres, &'static str>) {
        row.push_bind(self.golf_course_id)
            .push_bind(self.tee_box_id)
            .push_bind(self.hole_number)
            .push_bind(self.name.clone())
            .push_bind(self.par)
            .push_bind(self.handicap)
            .push_bind(self.distance)
            .push_bind(self.unit.clone());
    }
}

impl Model for Hole {
    type New = NewHole;

    const TABLE: &'static str = "hole";

    fn id(&self) -> i32 {
        self.id
    }

    fn materialize(id: i32, new: NewHole, created_ts: NaiveDateTime) -> Self {
        Self {
            id,
            golf_course_id: new.golf_course_id,
            tee_box_id: new.tee_box_id,
            hole_number: new.hole_number,
            name: new.name,
            par: new.par,
            handicap: new.handicap,
            distance: new.distance,
            unit: new.unit,
            created_ts,
        }
    }
}
