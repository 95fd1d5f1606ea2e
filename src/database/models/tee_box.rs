use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, FromRow, PgPool, Postgres};

use super::{attach, Hole};
use crate::database::manager::DatabaseError;
use crate::database::repository::{Insertable, Model, PgRepository};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TeeBox {
    pub id: i32,
    pub golf_course_id: i32,
    pub tee_color: String,
    pub par: i32,
    pub distance: i32,
    pub unit: String,
    pub course_rating: f64,
    pub slope: f64,
    pub created_ts: NaiveDateTime,
    pub touched_ts: Option<NaiveDateTime>,
    #[sqlx(skip)]
    #[serde(default)]
    pub holes: Vec<Hole>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTeeBox {
    pub golf_course_id: i32,
    pub tee_color: String,
    pub par: i32,
    pub distance: i32,
    pub unit: String,
    pub course_rating: f64,
    pub slope: f64,
}

impl Insertable for NewTeeBox {
    const COLUMNS: &'static [&'static str] = &[
        "golf_course_id",
        "tee_color",
        "par",
        "distance",
        "unit",
        "course_rating",
        "slope",
    ];

    fn push_values(&self, row: &mut Separated<'_, '_, Postgres, &'static str>) {
        row.push_bind(self.golf_course_id)
            .push_bind(self.tee_color.clone())
            .push_bind(self.par)
            .push_bind(self.distance)
            .push_bind(self.unit.clone())
            .push_bind(self.course_rating)
            .push_bind(self.slope);
    }
}

#[async_trait]
impl Model for TeeBox {
    type New = NewTeeBox;

    const TABLE: &'static str = "tee_box";

    fn id(&self) -> i32 {
        self.id
    }

    fn materialize(id: i32, new: NewTeeBox, created_ts: NaiveDateTime) -> Self {
        Self {
            id,
            golf_course_id: new.golf_course_id,
            tee_color: new.tee_color,
            par: new.par,
            distance: new.distance,
            unit: new.unit,
            course_rating: new.course_rating,
            slope: new.slope,
            created_ts,
            touched_ts: None,
            holes: vec![],
        }
    }

    async fn load_children(records: &mut [Self], pool: &PgPool) -> Result<(), DatabaseError> {
        let ids: Vec<i32> = records.iter().map(|r| r.id).collect();
        let mut holes = PgRepository::<Hole>::new(pool.clone())
            .select_in("tee_box_id", &ids)
            .await?;
        holes.sort_by_key(|h| h.hole_number);
        attach(records, holes, |h| h.tee_box_id, |r| r.id, |r| &mut r.holes);
        Ok(())
    }
}
