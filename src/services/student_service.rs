//! Student service - Handles student-related use cases.
//!
//! Each operation is a single delegation to the repository. Repository
//! errors are returned unchanged.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::Student;
use crate::errors::{AppResult, OptionExt};
use crate::infra::StudentRepository;

/// Student service trait for dependency injection.
#[async_trait]
pub trait StudentService: Send + Sync {
    /// Create the student, or update it when it already carries an id
    async fn save_student(&self, student: Student) -> AppResult<Student>;

    /// List all students in storage order
    async fn get_all_students(&self) -> AppResult<Vec<Student>>;

    /// Get student by id, `AppError::NotFound` when absent
    async fn get_student_by_id(&self, id: i64) -> AppResult<Student>;

    /// Delete student by id
    async fn delete_student(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of StudentService using repository.
pub struct StudentManager {
    repo: Arc<dyn StudentRepository>,
}

impl StudentManager {
    /// Create new student service instance with repository
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl StudentService for StudentManager {
    async fn save_student(&self, student: Student) -> AppResult<Student> {
        self.repo.save(student).await
    }

    async fn get_all_students(&self) -> AppResult<Vec<Student>> {
        self.repo.find_all().await
    }

    async fn get_student_by_id(&self, id: i64) -> AppResult<Student> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn delete_student(&self, id: i64) -> AppResult<()> {
        self.repo.delete_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::MockStudentRepository;
    use mockall::predicate::eq;

    fn john() -> Student {
        Student::with_id(1, "John", "Doe")
    }

    fn manager(repo: MockStudentRepository) -> StudentManager {
        StudentManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_save_student() {
        let mut repo = MockStudentRepository::new();
        repo.expect_save()
            .with(eq(john()))
            .times(1)
            .returning(|s| Ok(s));

        let result = manager(repo).save_student(john()).await.unwrap();

        assert_eq!(result.first_name, "John");
        assert_eq!(result, john());
    }

    #[tokio::test]
    async fn test_save_student_returns_repository_value() {
        let mut repo = MockStudentRepository::new();
        repo.expect_save()
            .with(eq(Student::new("John", "Doe")))
            .times(1)
            .returning(|_| Ok(Student::with_id(42, "John", "Doe")));

        let result = manager(repo)
            .save_student(Student::new("John", "Doe"))
            .await
            .unwrap();

        assert_eq!(result.id, Some(42));
    }

    #[tokio::test]
    async fn test_get_all_students() {
        let mut repo = MockStudentRepository::new();
        repo.expect_find_all()
            .times(1)
            .returning(|| Ok(vec![john()]));

        let result = manager(repo).get_all_students().await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0], john());
    }

    #[tokio::test]
    async fn test_get_all_students_preserves_order() {
        let stored = vec![
            Student::with_id(3, "Ada", "Lovelace"),
            Student::with_id(1, "John", "Doe"),
            Student::with_id(2, "Alan", "Turing"),
        ];
        let expected = stored.clone();

        let mut repo = MockStudentRepository::new();
        repo.expect_find_all()
            .times(1)
            .returning(move || Ok(stored.clone()));

        let result = manager(repo).get_all_students().await.unwrap();

        assert_eq!(result, expected);
    }

    #[tokio::test]
    async fn test_get_student_by_id() {
        let mut repo = MockStudentRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(Some(john())));

        let result = manager(repo).get_student_by_id(1).await.unwrap();

        assert_eq!(result.first_name, "John");
        assert_eq!(result.last_name, "Doe");
    }

    #[tokio::test]
    async fn test_get_student_by_id_not_found() {
        let mut repo = MockStudentRepository::new();
        repo.expect_find_by_id()
            .with(eq(99))
            .times(1)
            .returning(|_| Ok(None));

        let result = manager(repo).get_student_by_id(99).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_student() {
        let mut repo = MockStudentRepository::new();
        repo.expect_delete_by_id()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(()));

        let result = manager(repo).delete_student(1).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_repository_errors_propagate_unchanged() {
        let mut repo = MockStudentRepository::new();
        repo.expect_save()
            .returning(|_| Err(AppError::Database(sea_orm::DbErr::RecordNotInserted)));
        repo.expect_find_all()
            .returning(|| Err(AppError::internal("storage offline")));

        let service = manager(repo);

        let err = service.save_student(john()).await.unwrap_err();
        assert!(matches!(err, AppError::Database(sea_orm::DbErr::RecordNotInserted)));

        let err = service.get_all_students().await.unwrap_err();
        assert!(matches!(err, AppError::Internal(ref msg) if msg == "storage offline"));
    }
}
