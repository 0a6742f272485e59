//! Second-stage relevance reranking of retrieved chunks

pub mod cohere;

use std::sync::Arc;

use async_trait::async_trait;
pub use cohere::CohereReranker;

use crate::config::AppConfig;
use crate::errors::Result;

/// Result of reranking a single document.
#[derive(Debug, Clone, PartialEq)]
pub struct RerankResult {
    /// Index into the original documents slice.
    pub index: usize,
    /// Relevance score in 0.0 - 1.0.
    pub score: f32,
}

#[async_trait]
pub trait RerankProvider: Send + Sync {
    /// Rerank `documents` against `query`, returning at most `top_n` results
    /// sorted by score descending.
    async fn rerank(&self, query: &str, documents: &[String], top_n: usize) -> Result<Vec<RerankResult>>;
}

pub fn from_config(config: &AppConfig) -> Result<Option<Arc<dyn RerankProvider>>> {
    if !config.reranker_configured() {
        tracing::info!("Reranker not configured; vector order is kept");
        return Ok(None);
    }
    Ok(Some(Arc::new(CohereReranker::from_config(&config.reranker)?)))
}

/// Sort by score descending and keep `top_n`, dropping indices outside `0..len`.
pub(crate) fn finalize_results(mut results: Vec<RerankResult>, len: usize, top_n: usize) -> Vec<RerankResult> {
    results.retain(|r| r.index < len);
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(top_n);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_sorts_and_truncates() {
        let results = vec![
            RerankResult { index: 0, score: 0.2 },
            RerankResult { index: 1, score: 0.9 },
            RerankResult { index: 2, score: 0.5 },
            RerankResult { index: 9, score: 1.0 },
        ];
        let finalized = finalize_results(results, 3, 2);

        let indices: Vec<usize> = finalized.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn test_from_config_requires_key() {
        let mut config = AppConfig::default();
        assert!(from_config(&config).unwrap().is_none());

        config.reranker.api_key = Some("co-test".to_string());
        assert!(from_config(&config).unwrap().is_some());
    }
}
