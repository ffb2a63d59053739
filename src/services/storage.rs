//! Object store listing client
//!
//! Lists every object key in a bucket, following continuation tokens until
//! the listing is exhausted so callers never see a page boundary.

use crate::config::ServiceConfig;
use crate::error::{KbChatError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Extracts a bucket name from a resource locator
///
/// The bucket name is the substring after the last colon. The locator's
/// structure is not validated: an input without the expected
/// `arn:partition:service:region:account:bucket` shape yields whatever
/// follows its last colon (or the whole string when there is none).
///
/// # Examples
///
/// ```
/// use kbchat::services::storage::bucket_from_arn;
///
/// assert_eq!(bucket_from_arn("arn:aws:s3:::kb-docs"), "kb-docs");
/// ```
pub fn bucket_from_arn(arn: &str) -> &str {
    arn.rsplit(':').next().unwrap_or(arn)
}

#[derive(Debug, Deserialize)]
struct ListObjectsResponse {
    #[serde(default)]
    objects: Vec<ObjectEntry>,
    #[serde(default)]
    next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectEntry {
    key: String,
}

/// Client for the external object store
pub struct ObjectStoreClient {
    client: Client,
    endpoint: String,
}

impl ObjectStoreClient {
    /// Create a new object store client
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("kbchat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| KbChatError::Storage(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// List every object key in a bucket
    ///
    /// Pages through the listing transparently; the returned keys are in
    /// service order across all pages.
    ///
    /// # Errors
    ///
    /// Returns error if any page request fails or cannot be parsed
    pub async fn list_all(&self, bucket: &str) -> Result<Vec<String>> {
        let url = format!("{}/v1/buckets/{}/objects", self.endpoint, bucket);
        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self.client.get(&url);
            if let Some(token) = &continuation {
                request = request.query(&[("continuation-token", token.as_str())]);
            }

            let response = request.send().await.map_err(|e| {
                KbChatError::Storage(format!("Failed to reach object store at {}: {}", url, e))
            })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(KbChatError::Storage(format!(
                    "Listing bucket {} failed ({}): {}",
                    bucket, status, body
                ))
                .into());
            }

            let page: ListObjectsResponse = response.json().await.map_err(|e| {
                KbChatError::Storage(format!("Failed to parse listing response: {}", e))
            })?;

            keys.extend(page.objects.into_iter().map(|o| o.key));

            match page.next_token {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        tracing::debug!("Listed {} objects in bucket {}", keys.len(), bucket);
        Ok(keys)
    }
}
