//! CLI output formatting utilities

use crate::models::SourceCitation;
use crate::rag::SyncReport;
use crate::AppConfig;

/// Print an answer and the records it cites
pub fn print_answer(answer: &str, sources: &[SourceCitation]) {
    println!("{answer}");
    if sources.is_empty() {
        return;
    }
    println!();
    println!("Sources:");
    for source in sources {
        println!(
            "  - {} [{}] (score {:.2})",
            source.title, source.source_type, source.score
        );
    }
}

pub fn print_sync_report(report: &SyncReport) {
    match report {
        SyncReport::Success {
            documents_processed,
            vectors_upserted,
        } => print_success(&format!(
            "Synced {documents_processed} documents ({vectors_upserted} vectors)"
        )),
        SyncReport::Skipped { reason } => print_warning(&format!("Sync skipped: {reason}")),
    }
}

/// Print configuration
pub fn print_config(config: &AppConfig) {
    let masked = config.masked();

    println!("Resume RAG configuration:");
    println!();

    println!("Server:");
    println!("  Address: {}:{}", masked.server.host, masked.server.port);
    println!("  CORS: {}", masked.server.enable_cors);
    println!(
        "  Limits: {}s timeout, {} concurrent requests per route",
        masked.server.request_timeout_secs, masked.server.max_concurrent_requests
    );
    println!();

    println!("Database:");
    println!("  URL: {}", masked.database_url());
    println!("  Max connections: {}", masked.max_connections());
    println!("  Min connections: {}", masked.min_connections());
    println!("  Connection timeout: {}s", masked.connection_timeout());
    println!();

    println!("Logging:");
    println!("  Level: {}", masked.logging.level);
    println!();

    println!("Embeddings ({}):", configured(config.embeddings_configured()));
    println!("  Provider: {}", masked.embeddings.provider);
    println!("  Model: {} ({} dims)", masked.embeddings.model, masked.embeddings.dimension);
    println!("  Endpoint: {}", masked.embeddings.endpoint);
    println!("  Key: {}", key_or_none(masked.embeddings.api_key.as_deref()));
    println!();

    println!("Vector index ({}):", configured(config.vector_index_configured()));
    println!("  Provider: {}", masked.vector_index.provider);
    println!("  Index: {}", masked.vector_index.index_name);
    println!("  Region: {}/{}", masked.vector_index.cloud, masked.vector_index.region);
    println!("  Top K: {}", masked.vector_index.top_k);
    println!("  Key: {}", key_or_none(masked.vector_index.api_key.as_deref()));
    println!();

    println!("Reranker ({}):", configured(config.reranker_configured()));
    println!("  Model: {}", masked.reranker.model);
    println!("  Top N: {}", masked.reranker.top_n);
    println!("  Key: {}", key_or_none(masked.reranker.api_key.as_deref()));
    println!();

    println!("LLM ({}):", configured(config.llm_configured()));
    println!("  Provider: {}", masked.llm.provider);
    println!("  Model: {}", masked.llm.model);
    println!("  Endpoint: {}", masked.llm.endpoint);
    println!("  Key: {}", key_or_none(masked.llm.api_key.as_deref()));
    println!();

    println!("Chunking:");
    println!("  Size: {} chars, overlap {}", masked.rag.chunk_size, masked.rag.chunk_overlap);
    println!("  Upsert batch: {}", masked.rag.upsert_batch_size);
}

fn configured(flag: bool) -> &'static str {
    if flag {
        "configured"
    } else {
        "not configured"
    }
}

fn key_or_none(key: Option<&str>) -> &str {
    key.unwrap_or("(none)")
}

pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}
