//! Student command - CRUD over the student registry.

use std::sync::Arc;

use serde::Serialize;

use crate::cli::args::{StudentAction, StudentArgs};
use crate::config::Config;
use crate::domain::Student;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, StudentStore};
use crate::services::{StudentManager, StudentService};

/// Execute the student command
pub async fn execute(args: StudentArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    db.ping().await?;

    let repo = Arc::new(StudentStore::new(db.get_connection()));
    let service = StudentManager::new(repo);

    run(args.action, &service).await
}

/// Dispatch a student action against any service implementation.
pub async fn run(action: StudentAction, service: &dyn StudentService) -> AppResult<()> {
    match action {
        StudentAction::Add { first_name, last_name } => {
            let student = service
                .save_student(Student::new(first_name, last_name))
                .await?;
            tracing::info!(id = ?student.id, "Student created");
            print_json(&student)
        }
        StudentAction::Update { id, first_name, last_name } => {
            let student = service
                .save_student(Student::with_id(id, first_name, last_name))
                .await?;
            tracing::info!(id, "Student updated");
            print_json(&student)
        }
        StudentAction::List => {
            let students = service.get_all_students().await?;
            tracing::debug!(count = students.len(), "Listed students");
            print_json(&students)
        }
        StudentAction::Get { id } => {
            let student = service.get_student_by_id(id).await?;
            print_json(&student)
        }
        StudentAction::Delete { id } => {
            service.delete_student(id).await?;
            tracing::info!(id, "Student deleted");
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal(format!("Failed to render output: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}
