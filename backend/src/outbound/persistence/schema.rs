//! Diesel table definitions.
//!
//! Must match the DDL issued by `DieselCourseRepository::ensure_name_index`.

diesel::table! {
    /// Course records.
    courses (id) {
        /// Five-digit identifier.
        id -> Varchar,
        /// Unique course name (`courses_name_key`).
        name -> Text,
        syllabus -> Text,
        /// Insertion time; orders listings.
        created_at -> Timestamptz,
    }
}
