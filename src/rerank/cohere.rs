//! Cohere `/rerank` client.
//!
//! Sends every query-document pair in one request.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use super::finalize_results;
use super::RerankProvider;
use super::RerankResult;
use crate::config::RerankerConfig;
use crate::errors::ResumeRagError;
use crate::errors::Result;

pub struct CohereReranker {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct RerankRequest<'a> {
    model: &'a str,
    query: &'a str,
    documents: &'a [String],
    top_n: usize,
}

#[derive(Deserialize)]
struct RerankResponse {
    results: Vec<RerankResultRaw>,
}

#[derive(Deserialize)]
struct RerankResultRaw {
    index: usize,
    relevance_score: f32,
}

impl CohereReranker {
    pub fn from_config(config: &RerankerConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ResumeRagError::Config("Cohere API key not provided".to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ResumeRagError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl RerankProvider for CohereReranker {
    async fn rerank(&self, query: &str, documents: &[String], top_n: usize) -> Result<Vec<RerankResult>> {
        if documents.is_empty() || top_n == 0 {
            return Ok(Vec::new());
        }

        let url = format!("{}/rerank", self.endpoint);
        let top_n = top_n.min(documents.len());
        let request = RerankRequest {
            model: &self.model,
            query,
            documents,
            top_n,
        };

        tracing::debug!("Reranking {} documents via {}", documents.len(), url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ResumeRagError::Rerank(format!("Reranker returned {status}: {body}")));
        }

        let body: RerankResponse = resp
            .json()
            .await
            .map_err(|e| ResumeRagError::Rerank(format!("Failed to parse reranker response: {e}")))?;

        let results = body
            .results
            .into_iter()
            .map(|r| RerankResult {
                index: r.index,
                score: r.relevance_score.clamp(0.0, 1.0),
            })
            .collect();

        Ok(finalize_results(results, documents.len(), top_n))
    }
}
