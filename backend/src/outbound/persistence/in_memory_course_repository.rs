//! Process-local `CourseRepository`.
//!
//! Courses are kept in insertion order behind a Tokio `RwLock`. Each write
//! checks for duplicate ids and names while holding the write lock, which
//! gives the same guarantees as unique indexes in a database.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseId, CourseName};

/// In-memory course store.
#[derive(Debug, Default)]
pub struct InMemoryCourseRepository {
    courses: RwLock<Vec<Course>>,
}

impl InMemoryCourseRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with `courses`, kept in the given order.
    ///
    /// Duplicates are not rejected here; `ensure_name_index` reports them.
    pub fn with_courses(courses: Vec<Course>) -> Self {
        Self {
            courses: RwLock::new(courses),
        }
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn ensure_name_index(&self) -> Result<(), CourseRepositoryError> {
        let courses = self.courses.read().await;
        for (index, course) in courses.iter().enumerate() {
            let clash = courses
                .iter()
                .skip(index + 1)
                .any(|other| other.name() == course.name());
            if clash {
                return Err(CourseRepositoryError::duplicate_name(course.name().as_str()));
            }
        }
        let count = courses.len();
        debug!(count, "in-memory course name index verified");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        Ok(self.courses.read().await.clone())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let courses = self.courses.read().await;
        Ok(courses.iter().find(|course| course.id() == id).cloned())
    }

    async fn find_by_name(
        &self,
        name: &CourseName,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let courses = self.courses.read().await;
        Ok(courses.iter().find(|held| held.name() == name).cloned())
    }

    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut courses = self.courses.write().await;
        if courses.iter().any(|existing| existing.id() == course.id()) {
            return Err(CourseRepositoryError::duplicate_id(course.id().as_str()));
        }
        if courses.iter().any(|existing| existing.name() == course.name()) {
            return Err(CourseRepositoryError::duplicate_name(course.name().as_str()));
        }
        courses.push(course.clone());
        Ok(())
    }

    async fn update(&self, course: &Course) -> Result<Option<Course>, CourseRepositoryError> {
        let mut courses = self.courses.write().await;
        let name_taken = courses
            .iter()
            .any(|existing| existing.id() != course.id() && existing.name() == course.name());

        let slot = courses.iter_mut().find(|held| held.id() == course.id());
        let Some(slot) = slot else {
            return Ok(None);
        };
        if name_taken {
            return Err(CourseRepositoryError::duplicate_name(course.name().as_str()));
        }
        *slot = course.clone();
        Ok(Some(course.clone()))
    }

    async fn delete(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut courses = self.courses.write().await;
        let position = courses.iter().position(|course| course.id() == id);
        Ok(position.map(|index| courses.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Syllabus;
    use rstest::{fixture, rstest};

    fn course(id: &str, name: &str) -> Course {
        Course::new(
            CourseId::new(id).expect("valid id"),
            CourseName::new(name).expect("valid name"),
            Syllabus::new("syllabus").expect("valid syllabus"),
        )
    }

    #[fixture]
    fn repo() -> InMemoryCourseRepository {
        InMemoryCourseRepository::with_courses(vec![
            course("10001", "Algebra"),
            course("10002", "Biology"),
        ])
    }

    #[rstest]
    #[tokio::test]
    async fn list_keeps_insertion_order(repo: InMemoryCourseRepository) {
        repo.insert(&course("00003", "Chemistry"))
            .await
            .expect("insert succeeds");

        let names: Vec<String> = repo
            .list()
            .await
            .expect("list succeeds")
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, ["Algebra", "Biology", "Chemistry"]);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_duplicate_ids(repo: InMemoryCourseRepository) {
        let result = repo.insert(&course("10001", "Chemistry")).await;
        assert_eq!(result, Err(CourseRepositoryError::duplicate_id("10001")));
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_duplicate_names(repo: InMemoryCourseRepository) {
        let result = repo.insert(&course("10003", "Algebra")).await;
        assert_eq!(
            result,
            Err(CourseRepositoryError::duplicate_name("Algebra"))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn update_replaces_in_place(repo: InMemoryCourseRepository) {
        let updated = repo
            .update(&course("10001", "Linear Algebra"))
            .await
            .expect("update succeeds");
        assert_eq!(updated, Some(course("10001", "Linear Algebra")));

        let first = repo.list().await.expect("list succeeds").remove(0);
        assert_eq!(first.name().as_str(), "Linear Algebra");
    }

    #[rstest]
    #[tokio::test]
    async fn update_rejects_names_held_by_others(repo: InMemoryCourseRepository) {
        let result = repo.update(&course("10001", "Biology")).await;
        assert_eq!(
            result,
            Err(CourseRepositoryError::duplicate_name("Biology"))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_missing_course_is_none(repo: InMemoryCourseRepository) {
        let result = repo.update(&course("99999", "Physics")).await;
        assert_eq!(result, Ok(None));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_and_returns(repo: InMemoryCourseRepository) {
        let id = CourseId::new("10002").expect("valid id");
        let removed = repo.delete(&id).await.expect("delete succeeds");
        assert_eq!(removed, Some(course("10002", "Biology")));
        assert_eq!(repo.find_by_id(&id).await, Ok(None));
        assert_eq!(repo.delete(&id).await, Ok(None));
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_name_matches_exactly(repo: InMemoryCourseRepository) {
        let hit = CourseName::new("Algebra").expect("valid name");
        let miss = CourseName::new("algebra").expect("valid name");
        assert!(repo.find_by_name(&hit).await.expect("lookup").is_some());
        assert!(repo.find_by_name(&miss).await.expect("lookup").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn ensure_name_index_reports_existing_duplicates() {
        let repo = InMemoryCourseRepository::with_courses(vec![
            course("10001", "Algebra"),
            course("10002", "Algebra"),
        ]);
        assert_eq!(
            repo.ensure_name_index().await,
            Err(CourseRepositoryError::duplicate_name("Algebra"))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn ensure_name_index_accepts_unique_names(repo: InMemoryCourseRepository) {
        assert_eq!(repo.ensure_name_index().await, Ok(()));
    }
}
