//! # Shelf App Library
//!
//! The layer the mobile UI calls into: startup, state and commands.
//!
//! ## Module Organization
//! ```text
//! shelf_app/
//! ├── lib.rs          ◄─── You are here (startup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Stock list and product CRUD
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shelf_db::{Database, DbConfig, DbError};
use state::{ConfigState, DbState};

/// Failures that stop the app from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("Could not create data directory: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Database(#[from] DbError),
}

/// Opens the store: reads configuration, connects to the database and
/// applies migrations.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. ConfigState::from_env()     SHELF_* variables over defaults        │
/// │  2. get_database_path()         override or platform data dir          │
/// │  3. Database::new()             SQLite, WAL mode, pending migrations   │
/// │  4. (DbState, ConfigState)      handed to the UI bridge                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn bootstrap() -> Result<(DbState, ConfigState), StartupError> {
    let config = ConfigState::from_env();

    let db_path = get_database_path(&config)?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    info!(store = %config.store_name, "Database connected and migrations applied");

    Ok((DbState::new(db), config))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shelf_db=trace` - Show trace for the storage crate only
/// - Default: INFO, DEBUG for shelf crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shelf=debug,sqlx=warn"));

    // A subscriber may already be installed by the host
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **Android**: the app's internal data directory
/// - **macOS**: `~/Library/Application Support/com.shelf.stock/shelf.db`
/// - **Linux**: `~/.local/share/stock/shelf.db`
///
/// ## Development Override
/// Set `SHELF_DB_PATH` to use a custom path.
pub fn get_database_path(config: &ConfigState) -> Result<PathBuf, StartupError> {
    if let Some(path) = &config.db_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "shelf", "stock").ok_or(StartupError::NoDataDir)?;
    let data_dir = proj_dirs.data_dir();

    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("shelf.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_override() {
        let config = ConfigState {
            db_path: Some(PathBuf::from("/tmp/custom.db")),
            ..ConfigState::default()
        };
        assert_eq!(
            get_database_path(&config).unwrap(),
            PathBuf::from("/tmp/custom.db")
        );
    }

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing();
        init_tracing();
    }
}
