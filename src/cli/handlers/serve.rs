//! API server handler

use std::path::Path;

use super::open_profile_store;
use crate::api::serve_api;
use crate::api::AppState;
use crate::rag::RagService;
use crate::AppConfig;
use crate::Result;

pub async fn handle_serve_api(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
    cors: Option<bool>,
    profile_file: Option<&Path>,
) -> Result<()> {
    let mut server = config.server.clone();
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }
    if let Some(cors) = cors {
        server.enable_cors = cors;
    }

    println!("Starting resume API server");
    println!("  Host: {}", server.host);
    println!("  Port: {}", server.port);
    println!("  CORS: {}", if server.enable_cors { "Enabled" } else { "Disabled" });
    println!("  Timeout: {}s", server.request_timeout_secs);
    match profile_file {
        Some(path) => println!("  Profile: {}", path.display()),
        None => println!("  Profile: PostgreSQL"),
    }
    println!();

    let store = open_profile_store(config, profile_file)?;
    let rag = RagService::from_config(config, store)?;
    serve_api(AppState::new(rag), &server).await
}
