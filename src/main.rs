use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use courseqa::config::Config;
use courseqa::ingest::{self, ChunkingConfig};
use courseqa::llm::claude::ClaudeClient;
use courseqa::llm::tools::ToolRegistry;
use courseqa::rag::RagSystem;
use courseqa::routes::configure_routes;
use courseqa::search::index::CourseIndex;
use courseqa::search::tools::{register_search_tools, SourceTracker};
use courseqa::session::SessionManager;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let index = Arc::new(CourseIndex::new(config.max_results));
    let loaded = ingest::load_course_directory(
        Path::new(&config.docs_path),
        &index,
        ChunkingConfig {
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
        },
    )?;
    info!(
        courses = loaded,
        chunks = index.chunk_count(),
        "course index ready"
    );

    let sources = Arc::new(SourceTracker::new());
    let mut registry = ToolRegistry::new();
    register_search_tools(&mut registry, Arc::clone(&index), Arc::clone(&sources));

    let provider = ClaudeClient::new(
        config.anthropic_api_key.clone(),
        config.anthropic_model.clone(),
    )?;
    let sessions = Arc::new(SessionManager::new(config.max_history));

    let rag = Arc::new(RagSystem::new(
        Box::new(provider),
        registry,
        sessions,
        index,
        sources,
    ));

    let routes = configure_routes(rag);

    info!(port = config.port, "starting server");
    warp::serve(routes).run(([127, 0, 0, 1], config.port)).await;

    Ok(())
}
