//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod student_repository;

pub use student_repository::{StudentRepository, StudentStore};

#[cfg(test)]
pub use student_repository::MockStudentRepository;
