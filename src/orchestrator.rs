//! Conversation orchestration
//!
//! Owns the session: resolves the knowledge-base identifiers at startup,
//! inspects the backing bucket once to build the file list, and runs each
//! question/answer exchange against the remote services while keeping the
//! chat history current.

use crate::citation::CitationOutcome;
use crate::config::Config;
use crate::error::Result;
use crate::services::params::{parameter_key, KNOWLEDGE_BASE_ID_PARAM};
use crate::services::{
    bucket_from_arn, KnowledgeBaseClient, KnowledgeBaseRef, ObjectStoreClient,
    ParameterStoreClient,
};
use crate::session::ChatHistory;

/// Result of one completed question/answer exchange
#[derive(Debug, Clone)]
pub struct Exchange {
    /// The generated answer text
    pub answer: String,
    /// Citation extracted from the response
    pub citation: CitationOutcome,
}

/// Session orchestrator
///
/// Created once per session via [`Orchestrator::start`], which runs the
/// startup sequence: resolve the identifiers from the parameter store
/// (fatal on failure), then inspect the data source's bucket to populate
/// the file list (degrades to an empty list on failure).
pub struct Orchestrator {
    params: ParameterStoreClient,
    knowledge_base: KnowledgeBaseClient,
    namespace: String,
    environment: String,
    model_arn: String,
    kb_ref: KnowledgeBaseRef,
    files: Vec<String>,
    history: ChatHistory,
}

impl Orchestrator {
    /// Run the startup sequence and return a ready session
    ///
    /// # Errors
    ///
    /// Returns error if the identifiers cannot be resolved from the
    /// parameter store; the session has no valid behavior without them.
    /// Bucket inspection failures are logged and leave the file list empty.
    pub async fn start(config: &Config, environment: &str) -> Result<Self> {
        let params = ParameterStoreClient::new(&config.services.parameter_store)?;
        let knowledge_base = KnowledgeBaseClient::new(&config.services.knowledge_base)?;
        let object_store = ObjectStoreClient::new(&config.services.object_store)?;

        let kb_ref = params.resolve(&config.query.namespace, environment).await?;

        let files = match Self::inspect_bucket(&knowledge_base, &object_store, &kb_ref).await {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!("Bucket inspection failed, continuing without a file list: {}", e);
                Vec::new()
            }
        };

        Ok(Self {
            params,
            knowledge_base,
            namespace: config.query.namespace.clone(),
            environment: environment.to_string(),
            model_arn: config.query.model_arn.clone(),
            kb_ref,
            files,
            history: ChatHistory::new(),
        })
    }

    /// Describe the data source and list the bucket behind it
    async fn inspect_bucket(
        knowledge_base: &KnowledgeBaseClient,
        object_store: &ObjectStoreClient,
        kb_ref: &KnowledgeBaseRef,
    ) -> Result<Vec<String>> {
        let description = knowledge_base
            .describe_data_source(&kb_ref.data_source_id, &kb_ref.knowledge_base_id)
            .await?;

        let bucket = bucket_from_arn(&description.bucket_arn);
        tracing::info!("Data source bucket: {}", bucket);

        object_store.list_all(bucket).await
    }

    /// Submit one question and record the exchange in the history
    ///
    /// The knowledge-base identifier is looked up again from the parameter
    /// store for every question rather than reused from startup. The user
    /// turn is appended before the remote call; if the call fails the error
    /// propagates and the assistant turn is not recorded.
    ///
    /// # Errors
    ///
    /// Returns error if the identifier lookup or the retrieve-and-generate
    /// call fails; no retry is attempted
    pub async fn ask(&mut self, question: &str) -> Result<Exchange> {
        self.history.push_user(question);

        let key = parameter_key(&self.namespace, &self.environment, KNOWLEDGE_BASE_ID_PARAM);
        let knowledge_base_id = self.params.get_parameter(&key).await?;

        let response = self
            .knowledge_base
            .retrieve_and_generate(question, &knowledge_base_id, &self.model_arn)
            .await?;

        let answer = response.output.text.clone();
        self.history.push_assistant(&answer);

        let citation = CitationOutcome::from_response(&response);

        Ok(Exchange { answer, citation })
    }

    /// Identifiers resolved at session start
    pub fn knowledge_base_ref(&self) -> &KnowledgeBaseRef {
        &self.kb_ref
    }

    /// Object keys found behind the data source at session start
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// The session's chat history
    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    /// Environment this session was started for
    pub fn environment(&self) -> &str {
        &self.environment
    }
}
