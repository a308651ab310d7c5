//! Infrastructure layer - External systems integration
//!
//! This module handles database connections, migrations and repositories.

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{StudentRepository, StudentStore};

#[cfg(test)]
pub use repositories::MockStudentRepository;
