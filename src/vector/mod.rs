//! Vector index clients
//!
//! Profile chunks are stored as [`VectorRecord`]s whose IDs are derived from
//! the originating record, so re-running a sync overwrites instead of
//! duplicating.

pub mod memory;
pub mod pinecone;

use std::sync::Arc;

use async_trait::async_trait;
pub use memory::MemoryVectorIndex;
pub use pinecone::PineconeIndex;
use serde::Deserialize;
use serde::Serialize;

use crate::config::AppConfig;
use crate::errors::ResumeRagError;
use crate::errors::Result;
use crate::models::SourceType;

/// Metadata stored alongside every vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMetadata {
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub source_id: i32,
    pub title: String,
    pub chunk_index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: VectorMetadata,
}

impl VectorRecord {
    pub fn new(values: Vec<f32>, metadata: VectorMetadata) -> Self {
        Self {
            id: Self::make_id(metadata.source_type, metadata.source_id, metadata.chunk_index),
            values,
            metadata,
        }
    }

    /// Deterministic ID: `{type}_{source_id}_{chunk_index}`
    pub fn make_id(source_type: SourceType, source_id: i32, chunk_index: usize) -> String {
        format!("{source_type}_{source_id}_{chunk_index}")
    }
}

/// A nearest-neighbour hit
#[derive(Debug, Clone, PartialEq)]
pub struct VectorMatch {
    pub id: String,
    pub score: f32,
    pub metadata: VectorMetadata,
}

#[async_trait]
pub trait VectorIndexProvider: Send + Sync {
    /// Make sure the index exists and can hold vectors of `dimension`
    async fn ensure_index(&self, _dimension: usize) -> Result<()> {
        Ok(())
    }

    /// Insert or overwrite records by ID, returning how many were written
    async fn upsert(&self, records: &[VectorRecord]) -> Result<usize>;

    /// Nearest records to `vector`, best first
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<VectorMatch>>;

    fn name(&self) -> &str;
}

/// Build the configured vector index, or `None` when it lacks credentials.
pub fn from_config(config: &AppConfig) -> Result<Option<Arc<dyn VectorIndexProvider>>> {
    match config.vector_index.provider.to_ascii_lowercase().as_str() {
        "memory" => {
            tracing::info!("Using in-memory vector index");
            Ok(Some(Arc::new(MemoryVectorIndex::new())))
        }
        "pinecone" => {
            if !config.vector_index_configured() {
                tracing::info!("Pinecone API key not set; semantic search disabled");
                return Ok(None);
            }
            let index = PineconeIndex::from_config(&config.vector_index)?;
            tracing::info!("Using Pinecone index '{}'", config.vector_index.index_name);
            Ok(Some(Arc::new(index)))
        }
        other => Err(ResumeRagError::Config(format!(
            "Unknown vector index provider: {other}"
        ))),
    }
}
