use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, FromRow, PgPool, Postgres};

use super::attach;
use crate::database::manager::DatabaseError;
use crate::database::repository::{Insertable, Model};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GolfRound {
    pub id: i32,
    pub golf_course_id: i32,
    pub tee_box_id: i32,
    pub user_id: i32,
    pub gross_score: i32,
    /// Whether the round counts toward the player's handicap index
    pub towards_handicap: bool,
    pub played_on: NaiveDate,
    pub created_ts: NaiveDateTime,
    pub touched_ts: Option<NaiveDateTime>,
    #[sqlx(skip)]
    #[serde(default)]
    pub stats: Vec<RoundStat>,
}

/// Per-hole result recorded against a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RoundStat {
    pub id: i32,
    pub golf_round_id: i32,
    pub hole_id: i32,
    pub strokes: i32,
    pub putts: Option<i32>,
    pub created_ts: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGolfRound {
    pub golf_course_id: i32,
    pub tee_box_id: i32,
    pub user_id: i32,
    pub gross_score: i32,
    pub towards_handicap: bool,
    pub played_on: NaiveDate,
}

impl Insertable for NewGolfRound {
    const COLUMNS: &'static [&'static str] = &[
        "golf_course_id",
        "tee_box_id",
        "user_id",
        "gross_score",
        "towards_handicap",
        "played_on",
    ];

    fn push_values(&self, row: &mut Separated<'_, '_, Postgres, &'static str>) {
        row.push_bind(self.golf_course_id)
            .push_bind(self.tee_box_id)
            .push_bind(self.user_id)
            .push_bind(self.gross_score)
            .push_bind(self.towards_handicap)
            .push_bind(self.played_on);
    }
}

#[async_trait]
impl Model for GolfRound {
    type New = NewGolfRound;

    const TABLE: &'static str = "golf_round";

    fn id(&self) -> i32 {
        self.id
    }

    fn materialize(id: i32, new: NewGolfRound, created_ts: NaiveDateTime) -> Self {
        Self {
            id,
            golf_course_id: new.golf_course_id,
            tee_box_id: new.tee_box_id,
            user_id: new.user_id,
            gross_score: new.gross_score,
            towards_handicap: new.towards_handicap,
            played_on: new.played_on,
            created_ts,
            touched_ts: None,
            stats: vec![],
        }
    }

    async fn load_children(records: &mut [Self], pool: &PgPool) -> Result<(), DatabaseError> {
        let ids: Vec<i32> = records.iter().map(|r| r.id).collect();
        let stats = sqlx::query_as::<_, RoundStat>(
            "SELECT * FROM golf_round_stats WHERE golf_round_id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;
        attach(records, stats, |s| s.golf_round_id, |r| r.id, |r| &mut r.stats);
        Ok(())
    }
}
