pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod embeddings;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod models;
pub mod rag;
pub mod rerank;
pub mod vector;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod models_tests;

pub use config::AppConfig;
pub use errors::*;
