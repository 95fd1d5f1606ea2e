use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, FromRow, PgPool, Postgres};

use super::{attach, GolfCourse};
use crate::database::manager::DatabaseError;
use crate::database::repository::{Insertable, Model, PgRepository};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GolfClub {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state_code: String,
    pub zip_code: String,
    pub phone_number: String,
    pub email: String,
    pub created_ts: NaiveDateTime,
    pub touched_ts: Option<NaiveDateTime>,
    #[sqlx(skip)]
    #[serde(default)]
    pub golf_courses: Vec<GolfCourse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGolfClub {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state_code: String,
    pub zip_code: String,
    pub phone_number: String,
    pub email: String,
}

impl Insertable for NewGolfClub {
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "address",
        "city",
        "state_code",
        "zip_code",
        "phone_number",
        "email",
    ];

    fn push_values(&self, row: &mut Separated<'_, '_, Postgres, &'static str>) {
        row.push_bind(self.name.clone())
            .push_bind(self.address.clone())
            .push_bind(self.city.clone())
            .push_bind(self.state_code.clone())
            .push_bind(self.zip_code.clone())
            .push_bind(self.phone_number.clone())
            .push_bind(self.email.clone());
    }
}

#[async_trait]
impl Model for GolfClub {
    type New = NewGolfClub;

    const TABLE: &'static str = "golf_club";

    fn id(&self) -> i32 {
        self.id
    }

    fn materialize(id: i32, new: NewGolfClub, created_ts: NaiveDateTime) -> Self {
        Self {
            id,
            name: new.name,
            address: new.address,
            city: new.city,
            state_code: new.state_code,
            zip_code: new.zip_code,
            phone_number: new.phone_number,
            email: new.email,
            created_ts,
            touched_ts: None,
            golf_courses: vec![],
        }
    }

    async fn load_children(records: &mut [Self], pool: &PgPool) -> Result<(), DatabaseError> {
        let ids: Vec<i32> = records.iter().map(|r| r.id).collect();
        let courses = PgRepository::<GolfCourse>::new(pool.clone())
            .select_in("golf_club_id", &ids)
            .await?;
        attach(records, courses, |c| c.golf_club_id, |r| r.id, |r| &mut r.golf_courses);
        Ok(())
    }
}
