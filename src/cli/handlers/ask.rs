//! One-off question handler

use std::path::Path;

use super::open_profile_store;
use crate::cli::output::print_answer;
use crate::rag::MatchType;
use crate::rag::RagService;
use crate::AppConfig;
use crate::Result;

pub async fn handle_ask_command(config: &AppConfig, query: &str, profile_file: Option<&Path>) -> Result<()> {
    let store = open_profile_store(config, profile_file)?;
    let rag = RagService::from_config(config, store)?;

    let response = rag.answer_query(query).await?;
    let mode = match response.match_type {
        Some(MatchType::Semantic) => "semantic search",
        Some(MatchType::Keyword) => "keyword fallback",
        None => "no match",
    };
    tracing::debug!("Answered via {}", mode);

    print_answer(&response.answer, &response.sources);
    Ok(())
}
