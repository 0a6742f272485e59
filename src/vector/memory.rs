use async_trait::async_trait;
use dashmap::DashMap;

use super::VectorIndexProvider;
use super::VectorMatch;
use super::VectorRecord;
use crate::errors::ResumeRagError;
use crate::errors::Result;

/// Process-local cosine index. Contents vanish on restart.
#[derive(Debug, Default)]
pub struct MemoryVectorIndex {
    records: DashMap<String, VectorRecord>,
}

impl MemoryVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[async_trait]
impl VectorIndexProvider for MemoryVectorIndex {
    async fn upsert(&self, records: &[VectorRecord]) -> Result<usize> {
        for record in records {
            if record.values.is_empty() {
                return Err(ResumeRagError::VectorIndex(format!(
                    "Vector {} has no values",
                    record.id
                )));
            }
            self.records.insert(record.id.clone(), record.clone());
        }
        tracing::debug!(
            "Upserted {} vectors into memory index ({} total)",
            records.len(),
            self.records.len()
        );
        Ok(records.len())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<VectorMatch>> {
        let mut matches: Vec<VectorMatch> = self
            .records
            .iter()
            .filter(|entry| entry.values.len() == vector.len())
            .map(|entry| VectorMatch {
                id: entry.id.clone(),
                score: cosine_similarity(&entry.values, vector),
                metadata: entry.metadata.clone(),
            })
            .collect();

        // Ties broken by ID so results do not depend on map iteration order
        matches.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        matches.truncate(top_k);
        Ok(matches)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceType;
    use crate::vector::VectorMetadata;

    fn record(source_id: i32, values: Vec<f32>) -> VectorRecord {
        VectorRecord::new(
            values,
            VectorMetadata {
                source_type: SourceType::Project,
                source_id,
                title: format!("Project {source_id}"),
                chunk_index: 0,
                text: String::new(),
            },
        )
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn test_query_orders_by_similarity() {
        let index = MemoryVectorIndex::new();
        index
            .upsert(&[
                record(1, vec![1.0, 0.0]),
                record(2, vec![0.7, 0.7]),
                record(3, vec![0.0, 1.0]),
            ])
            .await
            .unwrap();

        let matches = index.query(&[1.0, 0.1], 2).await.unwrap();
        let ids: Vec<&str> = matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["project_1_0", "project_2_0"]);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_same_id() {
        let index = MemoryVectorIndex::new();
        index.upsert(&[record(1, vec![1.0, 0.0])]).await.unwrap();
        index.upsert(&[record(1, vec![0.0, 1.0])]).await.unwrap();

        assert_eq!(index.len(), 1);
        let matches = index.query(&[0.0, 1.0], 5).await.unwrap();
        assert!((matches[0].score - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_empty_index_returns_no_matches() {
        let index = MemoryVectorIndex::new();
        assert!(index.query(&[1.0], 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_empty_vectors() {
        let index = MemoryVectorIndex::new();
        assert!(index.upsert(&[record(1, Vec::new())]).await.is_err());
    }
}
