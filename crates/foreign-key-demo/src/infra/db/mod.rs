//! Database schema.

pub mod migrations;

use api_kit::infra::Database;

/// Database handle bound to this crate's migrations.
pub type AppDatabase = Database<migrations::Migrator>;
