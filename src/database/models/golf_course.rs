use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, FromRow, PgPool, Postgres};

use super::{attach, TeeBox};
use crate::database::manager::DatabaseError;
use crate::database::repository::{Insertable, Model, PgRepository};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GolfCourse {
    pub id: i32,
    pub golf_club_id: i32,
    pub name: String,
    pub num_holes: i32,
    pub created_ts: NaiveDateTime,
    pub touched_ts: Option<NaiveDateTime>,
    #[sqlx(skip)]
    #[serde(default)]
    pub tee_boxes: Vec<TeeBox>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGolfCourse {
    pub golf_club_id: i32,
    pub name: String,
    pub num_holes: i32,
}

impl Insertable for NewGolfCourse {
    const COLUMNS: &'static [&'static str] = &["golf_club_id", "name", "num_holes"];

    fn push_values(&self, row: &mut Separated<'_, '_, Postgres, &'static str>) {
        row.push_bind(self.golf_club_id)
            .push_bind(self.name.clone())
            .push_bind(self.num_holes);
    }
}

#[async_trait]
impl Model for GolfCourse {
    type New = NewGolfCourse;

    const TABLE: &'static str = "golf_course";

    fn id(&self) -> i32 {
        self.id
    }

    fn materialize(id: i32, new: NewGolfCourse, created_ts: NaiveDateTime) -> Self {
        Self {
            id,
            golf_club_id: new.golf_club_id,
            name: new.name,
            num_holes: new.num_holes,
            created_ts,
            touched_ts: None,
            tee_boxes: vec![],
        }
    }

    async fn load_children(records: &mut [Self], pool: &PgPool) -> Result<(), DatabaseError> {
        let ids: Vec<i32> = records.iter().map(|r| r.id).collect();
        let tee_boxes = PgRepository::<TeeBox>::new(pool.clone())
            .select_in("golf_course_id", &ids)
            .await?;
        attach(records, tee_boxes, |t| t.golf_course_id, |r| r.id, |r| &mut r.tee_boxes);
        Ok(())
    }
}
