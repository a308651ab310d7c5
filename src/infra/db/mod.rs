//! Database connection and initialization.

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement,
};
use sea_orm_migration::{MigratorTrait, SchemaManager};

use crate::config::Config;

pub mod migrations;

pub use migrations::Migrator;

const STUDENTS_TABLE: &str = "students";
const MIGRATIONS_TABLE: &str = "seaql_migrations";

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Initialize database connection and run migrations.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let db = Self::connect_without_migrations(config).await?;

        // Run pending migrations
        db.run_migrations().await?;
        tracing::info!("Database connected and migrations applied");

        Ok(db)
    }

    /// Connect without running migrations (for CLI commands).
    ///
    /// Fails without connecting when the pool has no capacity.
    pub async fn connect_without_migrations(config: &Config) -> Result<Self, DbErr> {
        if config.max_connections == 0 {
            return Err(DbErr::Custom(
                "max_connections must be greater than zero".to_string(),
            ));
        }

        let connection = SeaDatabase::connect(connect_options(config)).await?;
        Ok(Self { connection })
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Get migration status (list all migrations with applied status).
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        use sea_orm::{EntityTrait, QueryOrder};
        use sea_orm_migration::seaql_migrations;

        // The tracking table only exists once a migration has run
        let tracked = SchemaManager::new(&self.connection)
            .has_table(MIGRATIONS_TABLE)
            .await?;

        let mut applied = std::collections::HashSet::new();
        if tracked {
            applied.extend(
                seaql_migrations::Entity::find()
                    .order_by_asc(seaql_migrations::Column::Version)
                    .all(&self.connection)
                    .await?
                    .into_iter()
                    .map(|m| m.version),
            );
        }

        // Map all defined migrations with their applied status
        let migrations: Vec<(String, bool)> = Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect();

        Ok(migrations)
    }

    /// Reset database and run all migrations fresh.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Check whether the students table exists.
    pub async fn students_table_ready(&self) -> Result<bool, DbErr> {
        SchemaManager::new(&self.connection)
            .has_table(STUDENTS_TABLE)
            .await
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}

fn connect_options(config: &Config) -> ConnectOptions {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);
    options
}
