//! Vector index sync handler

use std::path::Path;

use super::open_profile_store;
use crate::cli::output::print_info;
use crate::cli::output::print_sync_report;
use crate::rag::RagService;
use crate::AppConfig;
use crate::Result;

pub async fn handle_sync_command(config: &AppConfig, profile_file: Option<&Path>) -> Result<()> {
    let store = open_profile_store(config, profile_file)?;
    let rag = RagService::from_config(config, store)?;

    print_info(&format!(
        "Syncing resume into '{}' ({})",
        config.vector_index.index_name, config.vector_index.provider
    ));
    let report = rag.sync_vector_db().await?;
    print_sync_report(&report);
    Ok(())
}
