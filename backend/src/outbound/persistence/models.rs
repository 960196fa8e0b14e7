//! Diesel row structs for the `courses` table. Internal to the adapter.

use diesel::prelude::*;

use super::schema::courses;

/// Row read back from `courses`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: String,
    pub name: String,
    pub syllabus: String,
}

/// Insertable course; `created_at` takes the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub(crate) struct NewCourseRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub syllabus: &'a str,
}

/// Changeset replacing the mutable columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = courses)]
pub(crate) struct CourseUpdate<'a> {
    pub name: &'a str,
    pub syllabus: &'a str,
}
