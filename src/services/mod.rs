//! Application services layer - Use cases.
//!
//! Services depend on repository traits, not implementations, so tests
//! can substitute mocks or fakes.

mod student_service;

pub use student_service::{StudentManager, StudentService};
