//! Database initialization handler

use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::cli::output::print_warning;
use crate::database::Database;
use crate::database::REQUIRED_TABLES;
use crate::AppConfig;
use crate::Result;

/// Handle database initialization command
pub async fn handle_init_command(config: &AppConfig, force: bool) -> Result<()> {
    if !force {
        print_warning("This will create the profile tables if they do not exist.");
        print_warning("This operation is safe - it uses CREATE TABLE IF NOT EXISTS.");
        println!("\nUse --force to proceed.");
        return Ok(());
    }

    let database = Database::from_config(config).await?;

    if database.is_schema_initialized().await? {
        print_info("Schema already present, re-running idempotent setup");
    }

    database.init_schema().await?;
    print_success(&format!("Tables ready: {}", REQUIRED_TABLES.join(", ")));
    print_info("To index the resume for semantic search, run:");
    println!("   resume-rag sync");

    Ok(())
}
