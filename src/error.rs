//! Error types for kbchat
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for kbchat operations
///
/// This enum encompasses all possible errors that can occur while loading
/// configuration, resolving identifiers from the parameter store, talking to
/// the knowledge-base endpoints, or listing objects in the backing bucket.
#[derive(Error, Debug)]
pub enum KbChatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parameter store errors (missing keys, unreachable store)
    #[error("Parameter store error: {0}")]
    ParameterStore(String),

    /// Knowledge base errors (describe or retrieve-and-generate calls)
    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),

    /// Object storage errors (bucket listing)
    #[error("Object storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for kbchat operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
