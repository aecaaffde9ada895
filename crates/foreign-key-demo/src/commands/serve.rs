//! Serve command - Starts the HTTP server.

use api_kit::{AppResult, Config, Host};

use crate::cli::args::ServeArgs;
use crate::infra::db::AppDatabase;
use crate::ForeignKeyStartup;

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    args.apply(&mut config);

    // Initialize database and apply pending migrations
    let db = AppDatabase::connect(&config).await?;

    Host::new(ForeignKeyStartup, config)
        .serve(db.get_connection())
        .await
}
