//! Knowledge base client
//!
//! Two calls against the managed knowledge-base service: describing a data
//! source (to find the bucket behind it) and the retrieve-and-generate query
//! that produces an answer with citations.

use crate::config::ServiceConfig;
use crate::error::{KbChatError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct DescribeDataSourceRequest {
    data_source_id: String,
    knowledge_base_id: String,
}

#[derive(Debug, Deserialize)]
struct DescribeDataSourceResponse {
    data_source: DataSourceDescription,
}

/// Metadata describing a data source
#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceDescription {
    /// Data-source identifier as echoed by the service
    #[serde(default)]
    pub id: String,
    /// Resource locator of the bucket the data source ingests from
    pub bucket_arn: String,
}

#[derive(Debug, Serialize)]
struct RetrieveAndGenerateRequest {
    input: QueryInput,
    knowledge_base_id: String,
    model_arn: String,
}

#[derive(Debug, Serialize)]
struct QueryInput {
    text: String,
}

/// Response from the retrieve-and-generate call
///
/// The citation list may be empty, and any of the nested reference fields
/// may be absent; consumers must not assume the full shape is present.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrieveAndGenerateResponse {
    /// The generated answer
    pub output: GeneratedOutput,
    /// Citations supporting the answer, in service order
    #[serde(default)]
    pub citations: Vec<Citation>,
}

/// Generated answer text
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedOutput {
    /// The answer text to display
    pub text: String,
}

/// One citation entry, grouping the references retrieved for a span of the answer
#[derive(Debug, Clone, Deserialize)]
pub struct Citation {
    /// Source documents retrieved for this citation
    #[serde(default)]
    pub retrieved_references: Vec<RetrievedReference>,
}

/// A retrieved source-document reference
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievedReference {
    /// Excerpt of the source content the answer drew on
    #[serde(default)]
    pub content: Option<ReferenceContent>,
    /// Where the source document lives
    #[serde(default)]
    pub location: Option<ReferenceLocation>,
}

/// Source content excerpt
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceContent {
    /// The excerpt text
    #[serde(default)]
    pub text: Option<String>,
}

/// Source document location
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceLocation {
    /// URI of the source document
    #[serde(default)]
    pub uri: Option<String>,
}

/// Client for the managed knowledge-base service
pub struct KnowledgeBaseClient {
    client: Client,
    endpoint: String,
}

impl KnowledgeBaseClient {
    /// Create a new knowledge base client
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("kbchat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                KbChatError::KnowledgeBase(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the metadata of a data source
    ///
    /// # Errors
    ///
    /// Returns error if the service is unreachable, rejects the identifiers,
    /// or returns an unparseable body
    pub async fn describe_data_source(
        &self,
        data_source_id: &str,
        knowledge_base_id: &str,
    ) -> Result<DataSourceDescription> {
        let url = format!("{}/v1/datasources/describe", self.endpoint);
        tracing::debug!(
            "Describing data source {} in knowledge base {}",
            data_source_id,
            knowledge_base_id
        );

        let response = self
            .client
            .post(&url)
            .json(&DescribeDataSourceRequest {
                data_source_id: data_source_id.to_string(),
                knowledge_base_id: knowledge_base_id.to_string(),
            })
            .send()
            .await
            .map_err(|e| {
                KbChatError::KnowledgeBase(format!(
                    "Failed to reach knowledge base at {}: {}",
                    url, e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KbChatError::KnowledgeBase(format!(
                "Describe data source failed ({}): {}",
                status, body
            ))
            .into());
        }

        let parsed: DescribeDataSourceResponse = response.json().await.map_err(|e| {
            KbChatError::KnowledgeBase(format!("Failed to parse describe response: {}", e))
        })?;

        Ok(parsed.data_source)
    }

    /// Submit a question to the retrieve-and-generate endpoint
    ///
    /// The question is forwarded unmodified. One synchronous call per
    /// question; transient failures propagate to the caller unretried.
    ///
    /// # Errors
    ///
    /// Returns error if the service is unreachable, returns a non-success
    /// status, or produces an unparseable body
    pub async fn retrieve_and_generate(
        &self,
        question: &str,
        knowledge_base_id: &str,
        model_arn: &str,
    ) -> Result<RetrieveAndGenerateResponse> {
        let url = format!("{}/v1/retrieve-and-generate", self.endpoint);
        tracing::debug!("Querying knowledge base {}", knowledge_base_id);

        let response = self
            .client
            .post(&url)
            .json(&RetrieveAndGenerateRequest {
                input: QueryInput {
                    text: question.to_string(),
                },
                knowledge_base_id: knowledge_base_id.to_string(),
                model_arn: model_arn.to_string(),
            })
            .send()
            .await
            .map_err(|e| {
                KbChatError::KnowledgeBase(format!(
                    "Failed to reach knowledge base at {}: {}",
                    url, e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KbChatError::KnowledgeBase(format!(
                "Retrieve-and-generate failed ({}): {}",
                status, body
            ))
            .into());
        }

        let parsed: RetrieveAndGenerateResponse = response.json().await.map_err(|e| {
            KbChatError::KnowledgeBase(format!("Failed to parse query response: {}", e))
        })?;

        tracing::debug!(
            "Received answer with {} citation entries",
            parsed.citations.len()
        );

        Ok(parsed)
    }
}
