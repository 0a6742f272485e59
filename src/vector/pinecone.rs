//! Pinecone REST client
//!
//! The control plane (`/indexes`) resolves an index name to its data-plane
//! host and creates the index when it is missing. Vectors are then written
//! and queried against that host.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;
use tokio::sync::OnceCell;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::VectorIndexProvider;
use super::VectorMatch;
use super::VectorMetadata;
use super::VectorRecord;
use crate::config::VectorIndexConfig;
use crate::errors::ResumeRagError;
use crate::errors::Result;
use crate::models::SourceType;

const READY_POLL_ATTEMPTS: u32 = 30;
const READY_POLL_INTERVAL: Duration = Duration::from_secs(2);

pub struct PineconeIndex {
    client: Client,
    api_key: String,
    index_name: String,
    control_plane_url: String,
    cloud: String,
    region: String,
    namespace: String,
    host: OnceCell<String>,
}

#[derive(Debug, Deserialize)]
struct IndexDescription {
    #[serde(default)]
    host: String,
    #[serde(default)]
    dimension: Option<usize>,
    #[serde(default)]
    status: IndexStatus,
}

#[derive(Debug, Default, Deserialize)]
struct IndexStatus {
    #[serde(default)]
    ready: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    namespace: &'a str,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<RawMatch>,
}

#[derive(Deserialize)]
struct RawMatch {
    id: String,
    #[serde(default)]
    score: f32,
    metadata: Option<RawMetadata>,
}

/// Pinecone hands numeric metadata back as floats
#[derive(Deserialize)]
struct RawMetadata {
    #[serde(rename = "type")]
    source_type: String,
    #[serde(default)]
    source_id: f64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    chunk_index: f64,
    #[serde(default)]
    text: String,
}

impl RawMetadata {
    fn into_metadata(self) -> Option<VectorMetadata> {
        Some(VectorMetadata {
            source_type: SourceType::parse(&self.source_type)?,
            source_id: self.source_id as i32,
            title: self.title,
            chunk_index: self.chunk_index.max(0.0) as usize,
            text: self.text,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    #[serde(default)]
    upserted_count: usize,
}

impl PineconeIndex {
    pub fn from_config(config: &VectorIndexConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ResumeRagError::Config("Pinecone API key not provided".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ResumeRagError::Http(e.to_string()))?;

        let host = config
            .host
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .map(normalize_host);

        Ok(Self {
            client,
            api_key,
            index_name: config.index_name.clone(),
            control_plane_url: config.control_plane_url.trim_end_matches('/').to_string(),
            cloud: config.cloud.clone(),
            region: config.region.clone(),
            namespace: config.namespace.clone(),
            host: OnceCell::new_with(host),
        })
    }

    /// Data-plane host, looked up once per process
    async fn host(&self) -> Result<&str> {
        let host = self
            .host
            .get_or_try_init(|| async {
                let description = self.describe_index().await?.ok_or_else(|| {
                    ResumeRagError::VectorIndex(format!(
                        "Index '{}' does not exist; run a sync first",
                        self.index_name
                    ))
                })?;
                Ok::<_, ResumeRagError>(normalize_host(&description.host))
            })
            .await?;
        Ok(host.as_str())
    }

    async fn describe_index(&self) -> Result<Option<IndexDescription>> {
        let url = format!("{}/indexes/{}", self.control_plane_url, self.index_name);
        debug!("Describing Pinecone index: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Api-Key", &self.api_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response, "describe index").await?;
        let description = response
            .json::<IndexDescription>()
            .await
            .map_err(|e| ResumeRagError::VectorIndex(format!("Failed to parse index description: {e}")))?;
        Ok(Some(description))
    }

    async fn create_index(&self, dimension: usize) -> Result<()> {
        let url = format!("{}/indexes", self.control_plane_url);
        info!(
            "Creating Pinecone index '{}' ({} dims, {}/{})",
            self.index_name, dimension, self.cloud, self.region
        );

        let body = json!({
            "name": self.index_name,
            "dimension": dimension,
            "metric": "cosine",
            "spec": {
                "serverless": {
                    "cloud": self.cloud,
                    "region": self.region,
                }
            }
        });

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        // Another process may have created it in the meantime
        if response.status() == StatusCode::CONFLICT {
            return Ok(());
        }
        check_status(response, "create index").await?;
        Ok(())
    }

    async fn data_plane_post<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<reqwest::Response> {
        let url = format!("{}/{}", self.host().await?, path);
        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(body)
            .send()
            .await?;
        check_status(response, path).await
    }
}

#[async_trait]
impl VectorIndexProvider for PineconeIndex {
    async fn ensure_index(&self, dimension: usize) -> Result<()> {
        let mut description = match self.describe_index().await? {
            Some(description) => description,
            None => {
                self.create_index(dimension).await?;
                self.describe_index().await?.ok_or_else(|| {
                    ResumeRagError::VectorIndex("Index missing right after creation".to_string())
                })?
            }
        };

        if let Some(existing) = description.dimension {
            if existing != dimension {
                return Err(ResumeRagError::VectorIndex(format!(
                    "Index '{}' has dimension {existing}, embeddings have {dimension}",
                    self.index_name
                )));
            }
        }

        let mut attempts = 0;
        while !description.status.ready {
            attempts += 1;
            if attempts > READY_POLL_ATTEMPTS {
                return Err(ResumeRagError::VectorIndex(format!(
                    "Index '{}' did not become ready",
                    self.index_name
                )));
            }
            debug!("Waiting for index '{}' to become ready", self.index_name);
            tokio::time::sleep(READY_POLL_INTERVAL).await;
            description = self.describe_index().await?.ok_or_else(|| {
                ResumeRagError::VectorIndex(format!("Index '{}' disappeared", self.index_name))
            })?;
        }

        if !description.host.is_empty() {
            let _ = self.host.set(normalize_host(&description.host));
        }
        Ok(())
    }

    async fn upsert(&self, records: &[VectorRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let body = json!({
            "vectors": records,
            "namespace": self.namespace,
        });
        let response = self.data_plane_post("vectors/upsert", &body).await?;
        let result: UpsertResponse = response
            .json()
            .await
            .map_err(|e| ResumeRagError::VectorIndex(format!("Failed to parse upsert response: {e}")))?;

        debug!("Pinecone upserted {} vectors", result.upserted_count);
        Ok(result.upserted_count)
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<VectorMatch>> {
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
            namespace: &self.namespace,
        };
        let response = self.data_plane_post("query", &request).await?;
        let result: QueryResponse = response
            .json()
            .await
            .map_err(|e| ResumeRagError::VectorIndex(format!("Failed to parse query response: {e}")))?;

        let matches = result
            .matches
            .into_iter()
            .filter_map(|m| {
                let metadata = m.metadata.and_then(RawMetadata::into_metadata);
                if metadata.is_none() {
                    warn!("Skipping match {} without usable metadata", m.id);
                }
                metadata.map(|metadata| VectorMatch {
                    id: m.id,
                    score: m.score,
                    metadata,
                })
            })
            .collect();
        Ok(matches)
    }

    fn name(&self) -> &str {
        "pinecone"
    }
}

fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

async fn check_status(response: reqwest::Response, operation: &str) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ResumeRagError::VectorIndex(format!(
        "Pinecone {operation} failed ({status}): {error_text}"
    )))
}
