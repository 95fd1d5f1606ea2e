use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{postgres::PgRow, query_builder::Separated, FromRow, PgPool, Postgres, QueryBuilder};

use crate::database::manager::DatabaseError;
use crate::database::models::{GolfClub, GolfCourse, GolfRound, Hole, TeeBox};

/// Insert payload for a model: column list plus the matching bind values
pub trait Insertable: Clone + Send + Sync + 'static {
    const COLUMNS: &'static [&'static str];

    /// Push one bind per entry of `COLUMNS`, in the same order
    fn push_values(&self, row: &mut Separated<'_, '_, Postgres, &'static str>);
}

/// A persisted record type backed by one table
#[async_trait]
pub trait Model:
    Clone + Serialize + Send + Sync + Unpin + 'static + for<'r> FromRow<'r, PgRow>
{
    type New: Insertable;

    const TABLE: &'static str;

    fn id(&self) -> i32;

    /// Build the stored form of a new record without a database round-trip
    fn materialize(id: i32, new: Self::New, created_ts: NaiveDateTime) -> Self;

    /// Attach owned child records after a read
    async fn load_children(_records: &mut [Self], _pool: &PgPool) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Persistence operations shared by every entity
#[async_trait]
pub trait Repository<M: Model>: Send + Sync {
    async fn get(&self, model_id: i32) -> Result<Option<M>, DatabaseError>;

    /// Ids arrive as strings from the query string and are parsed here
    async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<M>, DatabaseError>;

    async fn get_all(&self) -> Result<Vec<M>, DatabaseError>;

    async fn create(&self, data: M::New) -> Result<M, DatabaseError>;

    async fn bulk_create(&self, records: Vec<M::New>) -> Result<Vec<M>, DatabaseError>;

    /// Returns false when nothing was deleted or a constraint blocked it
    async fn delete(&self, model_id: i32) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait GolfCourseRepository: Repository<GolfCourse> {
    async fn get_by_golf_club_id(&self, golf_club_id: i32) -> Result<Vec<GolfCourse>, DatabaseError>;
}

#[async_trait]
pub trait TeeBoxRepository: Repository<TeeBox> {
    async fn get_by_golf_course_id(&self, golf_course_id: i32) -> Result<Vec<TeeBox>, DatabaseError>;
}

#[async_trait]
pub trait HoleRepository: Repository<Hole> {
    async fn get_by_tee_box_id(&self, tee_box_id: i32) -> Result<Vec<Hole>, DatabaseError>;
}

#[async_trait]
pub trait GolfRoundRepository: Repository<GolfRound> {
    /// Most recently played first
    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<GolfRound>, DatabaseError>;
}

/// Translate string ids into typed ids
pub fn parse_ids(ids: &[String]) -> Result<Vec<i32>, DatabaseError> {
    ids.iter()
        .map(|id| {
            id.trim()
                .parse::<i32>()
                .map_err(|_| DatabaseError::InvalidId(id.clone()))
        })
        .collect()
}

/// Surface constraint violations on insert as client-facing errors
pub fn insert_error(table: &str, err: sqlx::Error) -> DatabaseError {
    match err {
        sqlx::Error::Database(db)
            if db.is_unique_violation() || db.is_foreign_key_violation() || db.is_check_violation() =>
        {
            DatabaseError::Constraint {
                constraint: db.constraint().unwrap_or(table).to_string(),
                message: db.message().to_string(),
            }
        }
        other => other.into(),
    }
}

/// PostgreSQL repository for any `Model`
pub struct PgRepository<M> {
    pool: PgPool,
    _phantom: std::marker::PhantomData<M>,
}

impl<M: Model> PgRepository<M> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Rows whose `column` equals `value`, children attached
    pub async fn select_where(&self, column: &'static str, value: i32) -> Result<Vec<M>, DatabaseError> {
        let sql = format!("SELECT * FROM {} WHERE {} = $1 ORDER BY id", M::TABLE, column);
        let rows = sqlx::query_as::<_, M>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        self.with_children(rows).await
    }

    /// Rows whose `column` is any of `values`, children attached
    pub async fn select_in(&self, column: &'static str, values: &[i32]) -> Result<Vec<M>, DatabaseError> {
        if values.is_empty() {
            return Ok(vec![]);
        }
        let sql = format!("SELECT * FROM {} WHERE {} = ANY($1) ORDER BY id", M::TABLE, column);
        let rows = sqlx::query_as::<_, M>(&sql)
            .bind(values.to_vec())
            .fetch_all(&self.pool)
            .await?;
        self.with_children(rows).await
    }

    async fn with_children(&self, mut rows: Vec<M>) -> Result<Vec<M>, DatabaseError> {
        if !rows.is_empty() {
            M::load_children(&mut rows, &self.pool).await?;
        }
        Ok(rows)
    }
}

#[async_trait]
impl<M: Model> Repository<M> for PgRepository<M> {
    async fn get(&self, model_id: i32) -> Result<Option<M>, DatabaseError> {
        Ok(self.select_where("id", model_id).await?.into_iter().next())
    }

    async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<M>, DatabaseError> {
        let ids = parse_ids(ids)?;
        self.select_in("id", &ids).await
    }

    async fn get_all(&self) -> Result<Vec<M>, DatabaseError> {
        let sql = format!("SELECT * FROM {} ORDER BY id", M::TABLE);
        let rows = sqlx::query_as::<_, M>(&sql).fetch_all(&self.pool).await?;
        self.with_children(rows).await
    }

    async fn create(&self, data: M::New) -> Result<M, DatabaseError> {
        self.bulk_create(vec![data])
            .await?
            .pop()
            .ok_or_else(|| DatabaseError::QueryError(format!("insert into {} returned no rows", M::TABLE)))
    }

    async fn bulk_create(&self, records: Vec<M::New>) -> Result<Vec<M>, DatabaseError> {
        if records.is_empty() {
            return Ok(vec![]);
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) ",
            M::TABLE,
            <M::New as Insertable>::COLUMNS.join(", ")
        ));
        builder.push_values(records.iter(), |mut row, record| record.push_values(&mut row));
        builder.push(" RETURNING *");

        let created = builder
            .build_query_as::<M>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| insert_error(M::TABLE, e))?;
        tracing::debug!("Inserted {} rows into {}", created.len(), M::TABLE);
        Ok(created)
    }

    async fn delete(&self, model_id: i32) -> Result<bool, DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", M::TABLE);
        match sqlx::query(&sql).bind(model_id).execute(&self.pool).await {
            Ok(result) => Ok(result.rows_affected() > 0),
            Err(sqlx::Error::Database(err)) if err.is_foreign_key_violation() => {
                tracing::warn!("Delete of {} {} blocked by dependent rows: {}", M::TABLE, model_id, err);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl GolfCourseRepository for PgRepository<GolfCourse> {
    async fn get_by_golf_club_id(&self, golf_club_id: i32) -> Result<Vec<GolfCourse>, DatabaseError> {
        self.select_where("golf_club_id", golf_club_id).await
    }
}

#[async_trait]
impl TeeBoxRepository for PgRepository<TeeBox> {
    async fn get_by_golf_course_id(&self, golf_course_id: i32) -> Result<Vec<TeeBox>, DatabaseError> {
        self.select_where("golf_course_id", golf_course_id).await
    }
}

#[async_trait]
impl HoleRepository for PgRepository<Hole> {
    async fn get_by_tee_box_id(&self, tee_box_id: i32) -> Result<Vec<Hole>, DatabaseError> {
        let rows = sqlx::query_as::<_, Hole>(
            "SELECT * FROM hole WHERE tee_box_id = $1 ORDER BY hole_number",
        )
        .bind(tee_box_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl GolfRoundRepository for PgRepository<GolfRound> {
    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<GolfRound>, DatabaseError> {
        let rows = sqlx::query_as::<_, GolfRound>(
            "SELECT * FROM golf_round WHERE user_id = $1 ORDER BY played_on DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        self.with_children(rows).await
    }
}

/// `GolfClub` has no lookup beyond the shared operations
pub type GolfClubRepository = dyn Repository<GolfClub>;
