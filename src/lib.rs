// HTTP server modules
pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;

// Query pipeline
pub mod ingest;
pub mod rag;
pub mod search;
pub mod session;

// LLM abstraction layer
pub mod llm;
