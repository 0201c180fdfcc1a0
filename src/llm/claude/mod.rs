//! Anthropic Claude provider
//!
//! Non-streaming client for the Messages API plus the mapping between the
//! crate's abstraction types and Claude's wire format.

pub mod client;
pub mod mapper;
pub mod types;

pub use client::ClaudeClient;
