//! Query pipeline: Embed -> Retrieve -> Rerank -> Generate, with keyword fallback

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::documents::build_documents;
use super::keyword::rank_documents;
use super::ContextAssembler;
use super::MatchType;
use super::SearchResult;
use crate::config::AppConfig;
use crate::database::ProfileStore;
use crate::embeddings::chunk_text;
use crate::embeddings::EmbeddingProvider;
use crate::errors::ResumeRagError;
use crate::errors::Result;
use crate::llm::prompts::ResumePrompts;
use crate::llm::TextGenerator;
use crate::models::SourceCitation;
use crate::models::SourceType;
use crate::rerank::RerankProvider;
use crate::vector::VectorIndexProvider;
use crate::vector::VectorMatch;
use crate::vector::VectorMetadata;
use crate::vector::VectorRecord;

/// Retrieval and sync tuning
#[derive(Debug, Clone)]
pub struct RagOptions {
    /// Nearest chunks fetched from the vector index
    pub top_k: usize,
    /// Chunks kept after reranking
    pub rerank_top_n: usize,
    /// Sources cited on the keyword path
    pub max_sources: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub upsert_batch_size: usize,
}

impl Default for RagOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            rerank_top_n: 2,
            max_sources: 3,
            chunk_size: 1000,
            chunk_overlap: 150,
            upsert_batch_size: 100,
        }
    }
}

impl RagOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            top_k: config.vector_index.top_k,
            rerank_top_n: config.reranker.top_n,
            max_sources: config.rag.max_sources,
            chunk_size: config.rag.chunk_size,
            chunk_overlap: config.rag.chunk_overlap,
            upsert_batch_size: config.rag.upsert_batch_size,
        }
    }
}

/// Answer to a resume question
#[derive(Debug, Clone, PartialEq)]
pub struct RagResponse {
    pub answer: String,
    pub sources: Vec<SourceCitation>,
    /// `None` when nothing in the resume matched
    pub match_type: Option<MatchType>,
}

/// Outcome of a vector sync
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SyncReport {
    Success {
        documents_processed: usize,
        vectors_upserted: usize,
    },
    Skipped {
        reason: String,
    },
}

/// Keyword citation before the source limit is applied
#[derive(Debug, Clone)]
struct Candidate {
    /// Position of the originating match, best first
    rank: usize,
    citation: SourceCitation,
    /// Cites a skill the query named outright
    names_skill: bool,
}

/// Chunk waiting to be embedded
struct PendingChunk {
    embed_text: String,
    metadata: VectorMetadata,
}

/// Resume question answering over an optional set of hosted services
pub struct RagService {
    store: Arc<dyn ProfileStore>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    vector_index: Option<Arc<dyn VectorIndexProvider>>,
    reranker: Option<Arc<dyn RerankProvider>>,
    generator: Option<Arc<dyn TextGenerator>>,
    context_assembler: ContextAssembler,
    options: RagOptions,
}

impl RagService {
    /// Keyword-only service; attach providers with the `with_*` methods
    pub fn new(store: Arc<dyn ProfileStore>, options: RagOptions) -> Self {
        Self {
            store,
            embedder: None,
            vector_index: None,
            reranker: None,
            generator: None,
            context_assembler: ContextAssembler::default(),
            options,
        }
    }

    /// Build every provider the configuration has credentials for
    ///
    /// # Errors
    /// - Unknown provider names
    /// - HTTP client construction failures
    pub fn from_config(config: &AppConfig, store: Arc<dyn ProfileStore>) -> Result<Self> {
        let mut service = Self::new(store, RagOptions::from_config(config));
        service.embedder = crate::embeddings::from_config(config)?;
        service.vector_index = crate::vector::from_config(config)?;
        service.reranker = crate::rerank::from_config(config)?;
        service.generator = crate::llm::from_config(config)?;
        Ok(service)
    }

    #[must_use]
    pub fn with_embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    #[must_use]
    pub fn with_vector_index(mut self, index: Arc<dyn VectorIndexProvider>) -> Self {
        self.vector_index = Some(index);
        self
    }

    #[must_use]
    pub fn with_reranker(mut self, reranker: Arc<dyn RerankProvider>) -> Self {
        self.reranker = Some(reranker);
        self
    }

    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Both halves of semantic search are available
    pub fn semantic_enabled(&self) -> bool {
        self.embedder.is_some() && self.vector_index.is_some()
    }

    pub fn store(&self) -> &Arc<dyn ProfileStore> {
        &self.store
    }

    /// Answer a question about the resume.
    ///
    /// Hosted-service failures are logged and answered from the keyword
    /// fallback instead; only profile store failures are returned.
    ///
    /// # Errors
    /// - `Validation` for an empty or blank query
    /// - `Database` (or other store errors) when the fallback cannot load the profile
    pub async fn answer_query(&self, query: &str) -> Result<RagResponse> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ResumeRagError::Validation("Query must not be empty".to_string()));
        }
        info!("Processing resume query: {}", query);

        if let (Some(embedder), Some(index)) = (&self.embedder, &self.vector_index) {
            match self.semantic_answer(query, embedder.as_ref(), index.as_ref()).await {
                Ok(Some(response)) => return Ok(response),
                Ok(None) => info!("Vector index returned no matches, using keyword fallback"),
                Err(e) => warn!("Semantic search failed, using keyword fallback: {}", e),
            }
        } else {
            debug!("Semantic search not configured, using keyword fallback");
        }

        self.keyword_answer(query).await
    }

    async fn semantic_answer(
        &self,
        query: &str,
        embedder: &dyn EmbeddingProvider,
        index: &dyn VectorIndexProvider,
    ) -> Result<Option<RagResponse>> {
        debug!("Step 1: Embedding query");
        let query_vector = embedder.embed(query).await?;

        debug!("Step 2: Querying {} for top {}", index.name(), self.options.top_k);
        let matches = index.query(&query_vector, self.options.top_k).await?;
        if matches.is_empty() {
            return Ok(None);
        }

        debug!("Step 3: Reranking {} matches", matches.len());
        let results = self.rerank_matches(query, matches).await;

        debug!("Step 4: Composing answer from {} chunks", results.len());
        let answer = self.compose_answer(query, &results).await;

        Ok(Some(RagResponse {
            answer,
            sources: cite_unique(&results),
            match_type: Some(MatchType::Semantic),
        }))
    }

    /// Reorder by reranker relevance. Without a reranker the vector order is
    /// kept as is; when the reranker fails it is kept but cut to `rerank_top_n`.
    async fn rerank_matches(&self, query: &str, matches: Vec<VectorMatch>) -> Vec<SearchResult> {
        let results: Vec<SearchResult> = matches.into_iter().map(semantic_result).collect();

        let Some(reranker) = &self.reranker else {
            return results;
        };

        let documents: Vec<String> = results.iter().map(|r| r.text.clone()).collect();
        match reranker.rerank(query, &documents, self.options.rerank_top_n).await {
            Ok(ranked) if !ranked.is_empty() => ranked
                .into_iter()
                .filter_map(|r| {
                    results.get(r.index).map(|result| SearchResult {
                        score: r.score,
                        ..result.clone()
                    })
                })
                .collect(),
            Ok(_) => {
                warn!("Reranker returned no results, keeping vector order");
                truncated(results, self.options.rerank_top_n)
            }
            Err(e) => {
                warn!("Reranking failed, keeping vector order: {}", e);
                truncated(results, self.options.rerank_top_n)
            }
        }
    }

    async fn compose_answer(&self, query: &str, results: &[SearchResult]) -> String {
        let Some(generator) = &self.generator else {
            return self.context_assembler.templated_answer(results);
        };

        let context = self.context_assembler.assemble(results);
        let messages = ResumePrompts::answer_messages(query, &context);
        match generator.generate(&messages).await {
            Ok(answer) => answer.trim().to_string(),
            Err(e) => {
                warn!("Answer generation failed, using template: {}", e);
                self.context_assembler.templated_answer(results)
            }
        }
    }

    async fn keyword_answer(&self, query: &str) -> Result<RagResponse> {
        let profile = self.store.load_profile().await?;
        let documents = build_documents(&profile);
        let matches = rank_documents(query, &documents);

        if matches.is_empty() {
            info!("No keyword matches for query");
            return Ok(RagResponse {
                answer: self.context_assembler.no_match_answer(),
                sources: Vec::new(),
                match_type: None,
            });
        }

        let mut candidates = Vec::new();
        for (rank, m) in matches.iter().enumerate() {
            let document = &documents[m.document_index];
            let score = m.relevance();

            if m.matched_skills.is_empty() {
                candidates.push(Candidate {
                    rank,
                    citation: SourceCitation::new(document.title.clone(), document.source_type, score),
                    names_skill: false,
                });
            } else {
                candidates.extend(m.matched_skills.iter().map(|name| Candidate {
                    rank,
                    citation: SourceCitation::new(name.clone(), SourceType::Skill, score),
                    names_skill: true,
                }));
            }
        }
        let kept = select_citations(candidates, self.options.max_sources.max(1));

        let mut results: Vec<SearchResult> = Vec::new();
        let mut cited_ranks: Vec<usize> = Vec::new();
        for candidate in &kept {
            if cited_ranks.contains(&candidate.rank) {
                continue;
            }
            cited_ranks.push(candidate.rank);
            let document = &documents[matches[candidate.rank].document_index];
            results.push(SearchResult {
                source_type: document.source_type,
                source_id: document.source_id,
                title: document.title.clone(),
                text: document.text.clone(),
                score: matches[candidate.rank].relevance(),
                match_type: MatchType::Keyword,
            });
        }
        let sources: Vec<SourceCitation> = kept.into_iter().map(|c| c.citation).collect();

        info!("Keyword fallback matched {} records", results.len());
        Ok(RagResponse {
            answer: self.context_assembler.fallback_answer(&results),
            sources,
            match_type: Some(MatchType::Keyword),
        })
    }

    /// Re-embed the whole profile and upsert it into the vector index.
    ///
    /// Vector IDs are derived from the source records, so running this twice
    /// overwrites the same vectors.
    ///
    /// # Errors
    /// - Profile store failures
    /// - Embedding or vector index failures
    pub async fn sync_vector_db(&self) -> Result<SyncReport> {
        let (Some(embedder), Some(index)) = (&self.embedder, &self.vector_index) else {
            let reason = match (self.embedder.is_some(), self.vector_index.is_some()) {
                (false, false) => "embedding service and vector index are not configured",
                (false, true) => "embedding service is not configured",
                _ => "vector index is not configured",
            };
            info!("Vector sync skipped: {}", reason);
            return Ok(SyncReport::Skipped {
                reason: reason.to_string(),
            });
        };

        let profile = self.store.load_profile().await?;
        let documents = build_documents(&profile);
        let pending = self.chunk_documents(&documents);
        info!(
            "Syncing {} documents as {} chunks to {}",
            documents.len(),
            pending.len(),
            index.name()
        );

        if pending.is_empty() {
            return Ok(SyncReport::Success {
                documents_processed: 0,
                vectors_upserted: 0,
            });
        }

        // Batches go one at a time; the provider bounds its own request fan-out.
        let batch_size = self.options.upsert_batch_size.max(1);
        let mut batches: Vec<Vec<VectorRecord>> = Vec::new();
        for batch in pending.chunks(batch_size) {
            batches.push(embed_batch(embedder.as_ref(), batch).await?);
        }

        let dimension = batches
            .iter()
            .flatten()
            .next()
            .map_or_else(|| embedder.dimension(), |r| r.values.len());
        index.ensure_index(dimension).await?;

        let mut vectors_upserted = 0;
        for batch in &batches {
            vectors_upserted += index.upsert(batch).await?;
        }

        info!(
            "Vector sync complete: {} documents, {} vectors",
            documents.len(),
            vectors_upserted
        );
        Ok(SyncReport::Success {
            documents_processed: documents.len(),
            vectors_upserted,
        })
    }

    fn chunk_documents(&self, documents: &[super::ProfileDocument]) -> Vec<PendingChunk> {
        documents
            .iter()
            .flat_map(|document| {
                chunk_text(&document.text, self.options.chunk_size, self.options.chunk_overlap)
                    .into_iter()
                    .enumerate()
                    .map(|(chunk_index, chunk)| PendingChunk {
                        embed_text: format!("{}\n{}", document.title, chunk),
                        metadata: VectorMetadata {
                            source_type: document.source_type,
                            source_id: document.source_id,
                            title: document.title.clone(),
                            chunk_index,
                            text: chunk,
                        },
                    })
            })
            .collect()
    }
}

async fn embed_batch(embedder: &dyn EmbeddingProvider, batch: &[PendingChunk]) -> Result<Vec<VectorRecord>> {
    let texts: Vec<String> = batch.iter().map(|c| c.embed_text.clone()).collect();
    let vectors = embedder.embed_batch(&texts).await?;
    if vectors.len() != batch.len() {
        return Err(ResumeRagError::Embedding(format!(
            "Expected {} embeddings, got {}",
            batch.len(),
            vectors.len()
        )));
    }

    Ok(vectors
        .into_iter()
        .zip(batch)
        .map(|(values, chunk)| VectorRecord::new(values, chunk.metadata.clone()))
        .collect())
}

/// Pick at most `max` citations in rank order. Skills the query named get
/// their slots first, so higher-ranked projects cannot crowd them out.
fn select_citations(candidates: Vec<Candidate>, max: usize) -> Vec<Candidate> {
    let mut named_slots = candidates.iter().filter(|c| c.names_skill).count().min(max);
    let mut other_slots = max - named_slots;

    candidates
        .into_iter()
        .filter(|candidate| {
            let slots = if candidate.names_skill {
                &mut named_slots
            } else {
                &mut other_slots
            };
            if *slots == 0 {
                return false;
            }
            *slots -= 1;
            true
        })
        .collect()
}

fn semantic_result(m: VectorMatch) -> SearchResult {
    SearchResult {
        source_type: m.metadata.source_type,
        source_id: m.metadata.source_id,
        title: m.metadata.title,
        text: m.metadata.text,
        score: m.score,
        match_type: MatchType::Semantic,
    }
}

fn truncated(mut results: Vec<SearchResult>, n: usize) -> Vec<SearchResult> {
    results.truncate(n.max(1));
    results
}

/// One citation per source record, keeping its best-ranked chunk
fn cite_unique(results: &[SearchResult]) -> Vec<SourceCitation> {
    let mut seen: Vec<(SourceType, i32)> = Vec::new();
    let mut sources = Vec::new();
    for result in results {
        let key = (result.source_type, result.source_id);
        if !seen.contains(&key) {
            seen.push(key);
            sources.push(SourceCitation::new(result.title.clone(), result.source_type, result.score));
        }
    }
    sources
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
