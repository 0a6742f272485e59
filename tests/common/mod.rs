#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use chrono::NaiveDate;
use resume_rag::api::build_app;
use resume_rag::api::AppState;
use resume_rag::config::ServerConfig;
use resume_rag::database::StaticProfileStore;
use resume_rag::embeddings::EmbeddingProvider;
use resume_rag::models::*;
use resume_rag::rag::RagOptions;
use resume_rag::rag::RagService;
use resume_rag::vector::VectorIndexProvider;
use resume_rag::vector::VectorMatch;
use resume_rag::vector::VectorRecord;
use resume_rag::ResumeRagError;
use resume_rag::Result;
use tower::ServiceExt;

pub fn sample_profile() -> Profile {
    Profile {
        projects: vec![Project {
            id: 1,
            title: "Resume API".to_string(),
            description: "REST API that answers questions about my career".to_string(),
            repo_url: Some("https://github.com/example/resume-api".to_string()),
            tech_stack: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        }],
        experiences: vec![Experience {
            id: 1,
            role: "Software Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            start_date: NaiveDate::from_ymd_opt(2021, 4, 1),
            end_date: None,
            description: vec!["Owned the payments service".to_string()],
        }],
        skills: vec![
            Skill {
                id: 1,
                name: "Python".to_string(),
                category: "Programming Language".to_string(),
            },
            Skill {
                id: 2,
                name: "Kubernetes".to_string(),
                category: "DevOps".to_string(),
            },
        ],
        education: vec![Education {
            id: 1,
            institution: "State University".to_string(),
            degree: "BSc Computer Science".to_string(),
            location: "Springfield".to_string(),
            start_date: NaiveDate::from_ymd_opt(2015, 9, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2019, 6, 1),
            description: Vec::new(),
        }],
        certificates: Vec::new(),
    }
}

/// Character histogram over a-z, never all zeros
pub struct HistogramEmbedder;

#[async_trait]
impl EmbeddingProvider for HistogramEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0_f32; 27];
        for c in text.to_lowercase().chars() {
            if c.is_ascii_lowercase() {
                vector[(c as u8 - b'a') as usize] += 1.0;
            }
        }
        vector[26] = 1.0;
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        27
    }

    fn model_name(&self) -> &str {
        "histogram"
    }
}

pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(ResumeRagError::Embedding("service unavailable".to_string()))
    }

    fn dimension(&self) -> usize {
        27
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

pub struct FailingIndex;

#[async_trait]
impl VectorIndexProvider for FailingIndex {
    async fn upsert(&self, _records: &[VectorRecord]) -> Result<usize> {
        Err(ResumeRagError::VectorIndex("index unreachable".to_string()))
    }

    async fn query(&self, _vector: &[f32], _top_k: usize) -> Result<Vec<VectorMatch>> {
        Err(ResumeRagError::VectorIndex("index unreachable".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

pub fn keyword_service() -> RagService {
    RagService::new(
        Arc::new(StaticProfileStore::new(sample_profile())),
        RagOptions::default(),
    )
}

pub fn app(service: RagService) -> Router {
    let config = ServerConfig {
        enable_cors: false,
        ..ServerConfig::default()
    };
    build_app(AppState::new(service), &config)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
