//! Resume question answering
//!
//! - Semantic retrieval over embedded profile chunks
//! - Optional reranking of the retrieved chunks
//! - Answer phrasing with an LLM, or a template when none is available
//! - Keyword matching over the live profile when any of the above is missing
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use resume_rag::config::AppConfig;
//! use resume_rag::database::StaticProfileStore;
//! use resume_rag::rag::RagService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let store = Arc::new(StaticProfileStore::from_json_file("data/profile.example.json")?);
//!     let service = RagService::from_config(&config, store)?;
//!
//!     let response = service.answer_query("What programming languages do you know?").await?;
//!     println!("{}", response.answer);
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod documents;
pub mod keyword;
pub mod pipeline;

pub use context::ContextAssembler;
pub use documents::build_documents;
pub use documents::ProfileDocument;
pub use pipeline::RagOptions;
pub use pipeline::RagResponse;
pub use pipeline::RagService;
pub use pipeline::SyncReport;

use crate::models::SourceType;

/// A retrieved record with its relevance score
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub source_type: SourceType,
    pub source_id: i32,
    pub title: String,
    pub text: String,
    pub score: f32,
    pub match_type: MatchType,
}

/// How a result was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// Vector similarity, possibly reranked
    Semantic,
    /// Query-term overlap with the profile
    Keyword,
}
