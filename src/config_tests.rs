//! Unit tests for configuration module
//!
//! These tests validate configuration parsing, defaults, and validation.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::config::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    // ====== Default Value Tests ======

    #[test]
    fn test_defaults_match_hosted_services() {
        let config = AppConfig::default();
        assert_eq!(config.embeddings.model, "text-embedding-3-small");
        assert_eq!(config.embeddings.dimension, 1536);
        assert_eq!(config.vector_index.index_name, "resume-index");
        assert_eq!(config.vector_index.top_k, 5);
        assert_eq!(config.reranker.top_n, 2);
        assert_eq!(config.rag.chunk_size, 1000);
        assert_eq!(config.rag.chunk_overlap, 150);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_default_has_no_optional_services() {
        let config = AppConfig::default();
        assert!(!config.embeddings_configured());
        assert!(!config.vector_index_configured());
        assert!(!config.reranker_configured());
        assert!(!config.llm_configured());
        assert!(config.validate().is_ok());
    }

    // ====== TOML Parsing Tests ======

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [database]
            url = "postgresql://resume:secret@db:5432/resume"

            [vector_index]
            provider = "memory"
            top_k = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.database.url, "postgresql://resume:secret@db:5432/resume");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.vector_index.top_k, 8);
        assert!(config.vector_index_configured());
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9100\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.server.port, 9100);
    }

    // ====== Environment Override Tests ======

    #[test]
    fn test_env_overrides_apply() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[
            ("DATABASE_URL", "postgresql://u:p@h:5432/d"),
            ("OPENAI_API_KEY", "sk-test"),
            ("PINECONE_API_KEY", "pc-test"),
            ("PINECONE_INDEX_NAME", "my-resume"),
            ("PINECONE_ENVIRONMENT", "eu-west-1"),
            ("COHERE_API_KEY", "co-test"),
            ("RESUME_RAG_PORT", "9000"),
        ]));

        assert_eq!(config.database.url, "postgresql://u:p@h:5432/d");
        assert_eq!(config.embeddings.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.vector_index.index_name, "my-resume");
        assert_eq!(config.vector_index.region, "eu-west-1");
        assert_eq!(config.server.port, 9000);
        assert!(config.embeddings_configured());
        assert!(config.vector_index_configured());
        assert!(config.reranker_configured());
        assert!(config.llm_configured());
    }

    #[test]
    fn test_env_does_not_replace_file_key() {
        let mut config = AppConfig::default();
        config.embeddings.api_key = Some("from-file".to_string());
        config.apply_env_overrides(env(&[("OPENAI_API_KEY", "from-env")]));

        assert_eq!(config.embeddings.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.llm.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[("COHERE_API_KEY", "   "), ("RESUME_RAG_PORT", "nope")]));

        assert!(!config.reranker_configured());
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_provider_names_ignore_case() {
        let mut config = AppConfig::default();
        config.embeddings.provider = "Ollama".to_string();
        config.vector_index.provider = "MEMORY".to_string();
        config.llm.provider = "Ollama".to_string();

        assert!(config.embeddings_configured());
        assert!(config.vector_index_configured());
        assert!(config.llm_configured());
        assert!(crate::embeddings::from_config(&config).unwrap().is_some());
        assert!(crate::vector::from_config(&config).unwrap().is_some());
    }

    // ====== Validation Tests ======

    #[test]
    fn test_request_limits_must_be_positive() {
        let mut config = AppConfig::default();
        assert_eq!(config.server.request_timeout_secs, 120);
        config.server.max_concurrent_requests = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overlap_must_be_smaller_than_chunk() {
        let mut config = AppConfig::default();
        config.rag.chunk_overlap = config.rag.chunk_size;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let mut config = AppConfig::default();
        config.reranker.endpoint = "not a url".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("reranker.endpoint"));
    }

    // ====== Masking Tests ======

    #[test]
    fn test_masked_hides_secrets() {
        let mut config = AppConfig::default();
        config.database.url = "postgresql://resume:hunter2@db:5432/resume".to_string();
        config.reranker.api_key = Some("co-abcdefgh".to_string());

        let masked = config.masked();
        assert!(!masked.database.url.contains("hunter2"));
        assert_eq!(masked.reranker.api_key.as_deref(), Some("co-a****"));
        assert_eq!(config.reranker.api_key.as_deref(), Some("co-abcdefgh"));
    }
}
