//! Embeddings generation module
//!
//! Turns profile chunks and user queries into dense vectors. Two backends are
//! supported:
//! - OpenAI (`text-embedding-3-small`, 1536 dimensions by default)
//! - Ollama (local models)
//!
//! The query pipeline only sees the [`EmbeddingProvider`] trait, so tests can
//! swap in deterministic fakes.

pub mod client;
pub mod text_preprocessing;

use std::sync::Arc;

use async_trait::async_trait;
pub use client::EmbeddingBackend;
pub use client::EmbeddingClient;
pub use text_preprocessing::chunk_text;
pub use text_preprocessing::preprocess_text_for_embedding;

use crate::config::AppConfig;
use crate::errors::Result;

/// Default embedding dimension for `text-embedding-3-small`
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

/// Maximum number of inputs sent in one embeddings request
pub const MAX_BATCH_SIZE: usize = 100;

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed several texts, preserving input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    fn dimension(&self) -> usize;

    fn model_name(&self) -> &str;
}

/// Build the configured embedding provider, or `None` when it lacks credentials.
///
/// # Errors
/// Fails only when the provider name is unknown or the HTTP client cannot be built.
pub fn from_config(config: &AppConfig) -> Result<Option<Arc<dyn EmbeddingProvider>>> {
    if !config.embeddings_configured() {
        tracing::info!("Embeddings not configured; semantic search disabled");
        return Ok(None);
    }

    let client =
        EmbeddingClient::from_config(&config.embeddings)?.with_concurrency(config.rag.embed_concurrency);
    tracing::info!(
        "Embedding provider ready: {:?} ({}, {} dims)",
        client.backend(),
        client.model_name(),
        client.dimension()
    );
    Ok(Some(Arc::new(client)))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LengthEmbedder;

    #[async_trait]
    impl EmbeddingProvider for LengthEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            #[allow(clippy::cast_precision_loss)]
            Ok(vec![text.len() as f32, 1.0])
        }

        fn dimension(&self) -> usize {
            2
        }

        fn model_name(&self) -> &str {
            "length"
        }
    }

    #[tokio::test]
    async fn test_default_embed_batch_keeps_order() {
        let texts = vec!["a".to_string(), "abc".to_string(), "ab".to_string()];
        let vectors = LengthEmbedder.embed_batch(&texts).await.unwrap();

        let lengths: Vec<f32> = vectors.iter().map(|v| v[0]).collect();
        assert_eq!(lengths, vec![1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_from_config_without_key_is_none() {
        let config = AppConfig::default();
        assert!(from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_from_config_with_key() {
        let mut config = AppConfig::default();
        config.embeddings.api_key = Some("sk-test".to_string());

        let provider = from_config(&config).unwrap().unwrap();
        assert_eq!(provider.dimension(), DEFAULT_EMBEDDING_DIM);
        assert_eq!(provider.model_name(), "text-embedding-3-small");
    }

    #[test]
    fn test_from_config_ollama_needs_no_key() {
        let mut config = AppConfig::default();
        config.embeddings.provider = "ollama".to_string();
        config.embeddings.endpoint = "http://localhost:11434".to_string();

        assert!(from_config(&config).unwrap().is_some());
    }
}
