//! kbchat - Terminal chat console library
//!
//! This library provides the core functionality for the kbchat console,
//! including session orchestration, external service clients, citation
//! extraction, and configuration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `orchestrator`: Session startup and the question/answer loop
//! - `services`: Clients for the parameter store, knowledge base, and object store
//! - `session`: Append-only chat history for one session
//! - `citation`: Citation extraction from query responses
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use kbchat::{Config, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml")?;
//!     config.validate()?;
//!
//!     let mut session = Orchestrator::start(&config, "dev").await?;
//!     let exchange = session.ask("What is S3?").await?;
//!     println!("{}", exchange.answer);
//!     Ok(())
//! }
//! ```

pub mod citation;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod services;
pub mod session;

// Re-export commonly used types
pub use citation::CitationOutcome;
pub use config::Config;
pub use error::{KbChatError, Result};
pub use orchestrator::{Exchange, Orchestrator};
pub use services::{KnowledgeBaseRef, ParameterStoreClient};
pub use session::{ChatHistory, ChatTurn, Role};
