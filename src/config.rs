//! Configuration management for kbchat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files and environment variables.

use crate::error::{KbChatError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Main configuration structure for kbchat
///
/// Holds the endpoints of the three external services plus the query
/// settings used when talking to the knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// External service endpoints
    #[serde(default)]
    pub services: ServicesConfig,

    /// Knowledge-base query settings
    #[serde(default)]
    pub query: QueryConfig,
}

/// Endpoints for the external services the console depends on
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServicesConfig {
    /// Parameter store endpoint
    #[serde(default)]
    pub parameter_store: ServiceConfig,

    /// Knowledge base endpoint (describe and retrieve-and-generate)
    #[serde(default)]
    pub knowledge_base: ServiceConfig,

    /// Object store endpoint (bucket listing)
    #[serde(default)]
    pub object_store: ServiceConfig,
}

/// Connection settings for a single external service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// HTTP client timeout (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_endpoint() -> String {
    "http://localhost:4566".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Knowledge-base query settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Namespace prefix for parameter-store key names
    /// (keys look like `/<namespace>/<environment>/KnowledgeBaseId`)
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Foundation-model reference passed to the retrieve-and-generate call
    #[serde(default = "default_model_arn")]
    pub model_arn: String,
}

fn default_namespace() -> String {
    "kbchat".to_string()
}

fn default_model_arn() -> String {
    "arn:aws:bedrock:us-east-1::foundation-model/anthropic.claude-3-sonnet-20240229-v1:0"
        .to_string()
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            model_arn: default_model_arn(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment variable overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| KbChatError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| KbChatError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(endpoint) = std::env::var("KBCHAT_PARAMETER_STORE_ENDPOINT") {
            self.services.parameter_store.endpoint = endpoint;
        }

        if let Ok(endpoint) = std::env::var("KBCHAT_KNOWLEDGE_BASE_ENDPOINT") {
            self.services.knowledge_base.endpoint = endpoint;
        }

        if let Ok(endpoint) = std::env::var("KBCHAT_OBJECT_STORE_ENDPOINT") {
            self.services.object_store.endpoint = endpoint;
        }

        if let Ok(namespace) = std::env::var("KBCHAT_NAMESPACE") {
            self.query.namespace = namespace;
        }

        if let Ok(model_arn) = std::env::var("KBCHAT_MODEL_ARN") {
            self.query.model_arn = model_arn;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if an endpoint is not a valid URL, or if the namespace
    /// or model reference is empty
    pub fn validate(&self) -> Result<()> {
        for (name, service) in [
            ("parameter_store", &self.services.parameter_store),
            ("knowledge_base", &self.services.knowledge_base),
            ("object_store", &self.services.object_store),
        ] {
            Url::parse(&service.endpoint).map_err(|e| {
                KbChatError::Config(format!(
                    "Invalid {} endpoint '{}': {}",
                    name, service.endpoint, e
                ))
            })?;

            if service.timeout_seconds == 0 {
                return Err(KbChatError::Config(format!(
                    "Timeout for {} must be greater than zero",
                    name
                ))
                .into());
            }
        }

        if self.query.namespace.is_empty() {
            return Err(KbChatError::Config("Namespace must not be empty".to_string()).into());
        }

        if self.query.model_arn.is_empty() {
            return Err(
                KbChatError::Config("Model reference must not be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}
