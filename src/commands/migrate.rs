//! Migrate command - Schema management for the student registry.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, StudentStore};

/// State of the student registry after a migration action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryState {
    /// Students table present, holding this many rows
    Ready { students: u64 },
    /// Students table absent
    Missing,
}

impl std::fmt::Display for RegistryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryState::Ready { students } => write!(f, "ready ({} students)", students),
            RegistryState::Missing => write!(f, "missing"),
        }
    }
}

/// Outcome of a migration action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Every known migration with its applied flag, in declaration order
    pub migrations: Vec<(String, bool)>,
    pub registry: RegistryState,
}

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Connect without auto-running migrations for manual control
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let report = run(args.action, &db).await?;

    for (name, applied) in &report.migrations {
        println!("{}: {}", name, if *applied { "applied" } else { "pending" });
    }
    println!("students table: {}", report.registry);

    Ok(())
}

/// Apply a migration action and report where the registry stands.
pub async fn run(action: MigrateAction, db: &Database) -> AppResult<MigrationReport> {
    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            tracing::info!("Student registry migrated");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            tracing::info!("Rolled back last student registry migration");
        }
        MigrateAction::Status => {}
        MigrateAction::Fresh => {
            tracing::warn!("Dropping the student registry and re-running all migrations");
            db.fresh_migrations().await?;
        }
    }

    let registry = registry_state(db).await?;
    tracing::info!(%registry, "Student registry state");

    Ok(MigrationReport {
        migrations: db.migration_status().await?,
        registry,
    })
}

async fn registry_state(db: &Database) -> AppResult<RegistryState> {
    if !db.students_table_ready().await? {
        return Ok(RegistryState::Missing);
    }

    let students = StudentStore::new(db.get_connection()).count().await?;
    Ok(RegistryState::Ready { students })
}
