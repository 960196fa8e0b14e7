//! PostgreSQL-backed `CourseRepository` using Diesel.
//!
//! Uniqueness of `id` and `name` is enforced by the primary key and the
//! `courses_name_key` unique index. Violations are translated into
//! `DuplicateId` / `DuplicateName` by constraint name so the service can
//! retry or report a conflict.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, info, warn};

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseId, CourseName, Syllabus};

use super::models::{CourseRow, CourseUpdate, NewCourseRow};
use super::pool::{DbPool, PoolError};
use super::schema::courses;

const NAME_UNIQUE_CONSTRAINT: &str = "courses_name_key";
const PRIMARY_KEY_CONSTRAINT: &str = "courses_pkey";

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS courses (
    id VARCHAR(5) PRIMARY KEY,
    name TEXT NOT NULL,
    syllabus TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
)";
const CREATE_NAME_INDEX_SQL: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS courses_name_key ON courses (name)";

/// Diesel implementation of the `CourseRepository` port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CourseRepositoryError {
    CourseRepositoryError::connection(error.into_message())
}

/// Map Diesel errors, recognising unique violations on the course constraints.
///
/// `attempted` supplies the id and name of the row being written so the
/// duplicate variants can name the offending value.
fn map_diesel_error(
    error: diesel::result::Error,
    attempted: Option<(&str, &str)>,
) -> CourseRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = ?info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let (id, name) = attempted.unwrap_or_default();
            match info.constraint_name() {
                Some(NAME_UNIQUE_CONSTRAINT) => CourseRepositoryError::duplicate_name(name),
                Some(PRIMARY_KEY_CONSTRAINT) => CourseRepositoryError::duplicate_id(id),
                other => {
                    warn!(constraint = ?other, "unrecognised unique violation on courses");
                    CourseRepositoryError::query("unique constraint violated")
                }
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CourseRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => CourseRepositoryError::query("database query error"),
        _ => CourseRepositoryError::query("database error"),
    }
}

fn row_to_course(row: CourseRow) -> Result<Course, CourseRepositoryError> {
    let id = CourseId::new(row.id.as_str()).map_err(|err| {
        CourseRepositoryError::query(format!("stored course id {:?} is invalid: {err}", row.id))
    })?;
    let name = CourseName::new(row.name).map_err(|err| {
        CourseRepositoryError::query(format!("stored course {id} has an invalid name: {err}"))
    })?;
    let syllabus = Syllabus::new(row.syllabus).map_err(|err| {
        CourseRepositoryError::query(format!("stored course {id} has an invalid syllabus: {err}"))
    })?;
    Ok(Course::new(id, name, syllabus))
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn ensure_name_index(&self) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        for statement in [CREATE_TABLE_SQL, CREATE_NAME_INDEX_SQL] {
            diesel::sql_query(statement)
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, None))?;
        }
        info!(index = NAME_UNIQUE_CONSTRAINT, "course name index ensured");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CourseRow> = courses::table
            .order((courses::created_at.asc(), courses::id.asc()))
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        rows.into_iter().map(row_to_course).collect()
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CourseRow> = courses::table
            .find(id.as_str())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_course).transpose()
    }

    async fn find_by_name(
        &self,
        name: &CourseName,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CourseRow> = courses::table
            .filter(courses::name.eq(name.as_str()))
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_course).transpose()
    }

    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let attempted = (course.id().as_str(), course.name().as_str());

        diesel::insert_into(courses::table)
            .values(&NewCourseRow {
                id: attempted.0,
                name: attempted.1,
                syllabus: course.syllabus().as_str(),
            })
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, Some(attempted)))
    }

    async fn update(&self, course: &Course) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let attempted = (course.id().as_str(), course.name().as_str());

        let row: Option<CourseRow> = diesel::update(courses::table.find(attempted.0))
            .set(&CourseUpdate {
                name: attempted.1,
                syllabus: course.syllabus().as_str(),
            })
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, Some(attempted)))?;

        row.map(row_to_course).transpose()
    }

    async fn delete(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CourseRow> = diesel::delete(courses::table.find(id.as_str()))
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_course).transpose()
    }
}
