//! Clients for the external managed services
//!
//! Each client wraps one remote HTTP/JSON API behind a typed interface:
//!
//! - `params`: parameter store lookups
//! - `knowledge_base`: data-source describe and retrieve-and-generate calls
//! - `storage`: paginated bucket listing

pub mod knowledge_base;
pub mod params;
pub mod storage;

pub use knowledge_base::{
    Citation, DataSourceDescription, KnowledgeBaseClient, RetrieveAndGenerateResponse,
    RetrievedReference,
};
pub use params::{KnowledgeBaseRef, ParameterStoreClient};
pub use storage::{bucket_from_arn, ObjectStoreClient};
