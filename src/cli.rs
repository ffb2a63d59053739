//! Command-line interface definition for kbchat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, one-shot questions, and
//! listing the files behind the knowledge base.

use clap::{Parser, Subcommand};

/// kbchat - Terminal chat console for a managed knowledge base
///
/// Ask questions against a remote knowledge base and see the source
/// document each answer was grounded in.
#[derive(Parser, Debug, Clone)]
#[command(name = "kbchat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for kbchat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Deployment environment used to build parameter-store key names
        #[arg(short, long, env = "KBCHAT_ENVIRONMENT")]
        environment: String,

        /// Bucket holding the deployment templates; only used to print a
        /// setup link in the welcome banner
        #[arg(long)]
        code_bucket: Option<String>,
    },

    /// Ask a single question and exit
    Ask {
        /// Deployment environment used to build parameter-store key names
        #[arg(short, long, env = "KBCHAT_ENVIRONMENT")]
        environment: String,

        /// Question text
        question: String,
    },

    /// List the files indexed behind the knowledge base
    Files {
        /// Deployment environment used to build parameter-store key names
        #[arg(short, long, env = "KBCHAT_ENVIRONMENT")]
        environment: String,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_chat_command() {
        let cli = Cli::try_parse_from(["kbchat", "chat", "--environment", "dev"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Chat {
            environment,
            code_bucket,
        } = cli.command
        {
            assert_eq!(environment, "dev");
            assert!(code_bucket.is_none());
        } else {
            panic!("Expected Chat command");
        }
    }

    #[test]
    fn test_cli_parse_chat_with_code_bucket() {
        let cli = Cli::try_parse_from([
            "kbchat",
            "chat",
            "--environment",
            "prod",
            "--code-bucket",
            "deploy-templates",
        ])
        .unwrap();
        if let Commands::Chat { code_bucket, .. } = cli.command {
            assert_eq!(code_bucket, Some("deploy-templates".to_string()));
        } else {
            panic!("Expected Chat command");
        }
    }

    #[test]
    fn test_cli_parse_ask_command() {
        let cli =
            Cli::try_parse_from(["kbchat", "ask", "--environment", "dev", "What is S3?"]).unwrap();
        if let Commands::Ask {
            environment,
            question,
        } = cli.command
        {
            assert_eq!(environment, "dev");
            assert_eq!(question, "What is S3?");
        } else {
            panic!("Expected Ask command");
        }
    }

    #[test]
    fn test_cli_parse_files_command() {
        let cli = Cli::try_parse_from(["kbchat", "files", "--environment", "dev"]).unwrap();
        assert!(matches!(cli.command, Commands::Files { .. }));
    }

    #[test]
    fn test_cli_chat_requires_environment() {
        // No --environment and no KBCHAT_ENVIRONMENT in a clean parse
        if std::env::var("KBCHAT_ENVIRONMENT").is_ok() {
            return;
        }
        let cli = Cli::try_parse_from(["kbchat", "chat"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_custom_config_path() {
        let cli =
            Cli::try_parse_from(["kbchat", "-c", "alt.yaml", "files", "--environment", "dev"])
                .unwrap();
        assert_eq!(cli.config, Some("alt.yaml".to_string()));
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli =
            Cli::try_parse_from(["kbchat", "--verbose", "files", "--environment", "dev"]).unwrap();
        assert!(cli.verbose);
    }
}
