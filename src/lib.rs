//! Student Management - CRUD service over a student repository
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core entities
//! - **services**: Application use cases
//! - **infra**: Database, migrations and repositories
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Create and list students
//! cargo run -- student add --first-name John --last-name Doe
//! cargo run -- student list
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::Student;
pub use errors::{AppError, AppResult};
pub use services::{StudentManager, StudentService};
