//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `migrate` - Database migrations
//! - `student` - Student CRUD

pub mod args;

pub use args::{Cli, Commands};
