//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Student Management - CRUD over the student registry
#[derive(Parser, Debug)]
#[command(name = "student-management")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run database migrations
    Migrate(MigrateArgs),

    /// Manage students
    Student(StudentArgs),
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the student command
#[derive(Parser, Debug)]
pub struct StudentArgs {
    #[command(subcommand)]
    pub action: StudentAction,
}

/// Student actions
#[derive(Subcommand, Debug)]
pub enum StudentAction {
    /// Create a new student
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Replace the names of an existing student
    Update {
        id: i64,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// List all students
    List,
    /// Show a single student
    Get { id: i64 },
    /// Delete a student
    Delete { id: i64 },
}
