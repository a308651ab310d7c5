//! Student repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::student::{self, ActiveModel, Entity as StudentEntity};
use crate::domain::Student;
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Student repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert a student without id, or update the stored record matching its id
    async fn save(&self, student: Student) -> AppResult<Student>;

    /// List every stored student
    async fn find_all(&self) -> AppResult<Vec<Student>>;

    /// Find student by id
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Student>>;

    /// Delete student by id
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of StudentRepository backed by SeaORM
pub struct StudentStore {
    db: DatabaseConnection,
}

impl StudentStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn insert(&self, student: Student) -> AppResult<Student> {
        let active_model = ActiveModel {
            id: NotSet,
            first_name: Set(student.first_name),
            last_name: Set(student.last_name),
        };

        let model = active_model.insert(&self.db).await?;
        tracing::debug!(id = model.id, "Inserted student");
        Ok(Student::from(model))
    }

    async fn update(&self, id: i64, changes: Student) -> AppResult<Student> {
        let result = StudentEntity::update_many()
            .col_expr(student::Column::FirstName, Expr::value(changes.first_name.clone()))
            .col_expr(student::Column::LastName, Expr::value(changes.last_name.clone()))
            .filter(student::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        tracing::debug!(id, "Updated student");
        Ok(Student::with_id(id, changes.first_name, changes.last_name))
    }

    /// Count stored students
    pub async fn count(&self) -> AppResult<u64> {
        let total = StudentEntity::find().count(&self.db).await?;
        Ok(total)
    }
}

#[async_trait]
impl StudentRepository for StudentStore {
    async fn save(&self, student: Student) -> AppResult<Student> {
        match student.id {
            None => self.insert(student).await,
            Some(id) => self.update(id, student).await,
        }
    }

    async fn find_all(&self) -> AppResult<Vec<Student>> {
        let models = StudentEntity::find()
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Student::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Student>> {
        let result = StudentEntity::find_by_id(id).one(&self.db).await?;

        Ok(result.map(Student::from))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = StudentEntity::delete_by_id(id).exec(&self.db).await?;

        // Deleting a missing student is a no-op
        if result.rows_affected == 0 {
            tracing::debug!(id, "No student to delete");
        }

        Ok(())
    }
}
