/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three top-level command modules:

- `chat`  — Interactive chat session
- `ask`   — Submit a single question and exit
- `files` — Print the files indexed behind the knowledge base

These handlers are intentionally small and use the library components:
the session orchestrator, the service clients, and citation extraction.
*/

use crate::citation::CitationOutcome;
use crate::orchestrator::Exchange;
use crate::session::{ChatHistory, Role};
use colored::Colorize;

// Special commands parser for the chat prompt
pub mod special_commands;

/// Fixed indicator shown when no citation can be displayed
const NO_CITATION_MESSAGE: &str = "Information is not present in the files";

/// Print the indexed file list, or a placeholder when it is empty
fn print_file_list(files: &[String]) {
    if files.is_empty() {
        println!("{}", "No files are present".yellow());
        return;
    }

    println!("{}", format!("Files ({}):", files.len()).bold());
    for key in files {
        println!("  {}", key);
    }
}

/// Print a completed exchange: the answer, then the citation line
fn print_exchange(exchange: &Exchange) {
    println!("{}", exchange.answer);
    match &exchange.citation {
        CitationOutcome::Found { uri, .. } => {
            println!("{} {}", "Source document:".yellow(), uri);
        }
        CitationOutcome::Empty | CitationOutcome::Malformed => {
            println!("{}", NO_CITATION_MESSAGE.blue());
        }
    }
}

/// Print the session history, oldest turn first
fn print_history(history: &ChatHistory) {
    if history.is_empty() {
        println!("No questions asked yet");
        return;
    }

    println!(
        "{}",
        format!(
            "Session started {} ({} turns)",
            history.started_at().format("%Y-%m-%d %H:%M:%S UTC"),
            history.len()
        )
        .dimmed()
    );
    for turn in history.turns() {
        let label = match turn.role {
            Role::User => "you".cyan(),
            Role::Assistant => "assistant".green(),
        };
        println!("{}: {}", label, turn.text);
    }
}

// Interactive chat session handler
pub mod chat {
    //! Interactive chat session.
    //!
    //! Starts the session orchestrator, prints the welcome banner with the
    //! indexed file list, and runs a readline loop that submits user input
    //! as questions and dispatches `/` commands locally.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use crate::config::Config;
    use crate::error::Result;
    use crate::orchestrator::Orchestrator;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start an interactive chat session
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `environment` - Deployment environment for parameter-store keys
    /// * `code_bucket` - Optional bucket holding deployment templates,
    ///   used only for the setup link in the banner
    pub async fn run_chat(
        config: Config,
        environment: String,
        code_bucket: Option<String>,
    ) -> Result<()> {
        let mut orchestrator = Orchestrator::start(&config, &environment).await?;

        print_welcome_banner(&orchestrator, code_bucket.as_deref());

        let mut rl = DefaultEditor::new()?;
        let prompt = format!("[{}] >> ", environment);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    match parse_special_command(trimmed) {
                        SpecialCommand::Files => {
                            print_file_list(orchestrator.files());
                            continue;
                        }
                        SpecialCommand::History => {
                            print_history(orchestrator.history());
                            continue;
                        }
                        SpecialCommand::Help => {
                            print_help();
                            continue;
                        }
                        SpecialCommand::Exit => break,
                        SpecialCommand::Unknown(command) => {
                            println!(
                                "Unknown command: {}\nType '/help' to see available commands",
                                command
                            );
                            continue;
                        }
                        SpecialCommand::None => {
                            // Regular question
                        }
                    }

                    rl.add_history_entry(trimmed)?;

                    match orchestrator.ask(trimmed).await {
                        Ok(exchange) => print_exchange(&exchange),
                        Err(e) => {
                            eprintln!("{}", format!("Question failed: {:#}", e).red());
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }

        println!("Goodbye");
        Ok(())
    }

    /// Display the welcome banner with the file list and setup hints
    fn print_welcome_banner(orchestrator: &Orchestrator, code_bucket: Option<&str>) {
        println!("{}", "Chat with your on-premises documents".bold());
        println!(
            "{}",
            format!(
                "Environment: {} | Knowledge base: {}",
                orchestrator.environment(),
                orchestrator.knowledge_base_ref().knowledge_base_id
            )
            .dimmed()
        );
        println!();

        print_file_list(orchestrator.files());
        if orchestrator.files().is_empty() {
            println!(
                "{}",
                "Questions will not find relevant answers until files are loaded; \
                 a fresh load can take a few minutes to index."
                    .dimmed()
            );
        }

        if let Some(bucket) = code_bucket {
            println!(
                "{} https://{}.s3.amazonaws.com/templates/main.yaml",
                "Deployment templates:".dimmed(),
                bucket
            );
        }

        println!();
        println!("Type '/help' for commands, '/exit' to leave");
        println!();
    }
}

// One-shot question handler
pub mod ask {
    //! Submit a single question and exit.
    //!
    //! Runs the same startup sequence as the chat session, asks once, and
    //! prints the answer and citation line. A failed query propagates so
    //! the process exits non-zero.

    use super::*;
    use crate::config::Config;
    use crate::error::Result;
    use crate::orchestrator::Orchestrator;

    /// Ask a single question
    pub async fn run_ask(config: Config, environment: String, question: String) -> Result<()> {
        let mut orchestrator = Orchestrator::start(&config, &environment).await?;
        let exchange = orchestrator.ask(&question).await?;
        print_exchange(&exchange);
        Ok(())
    }
}

// File listing handler
pub mod files {
    //! Print the files indexed behind the knowledge base.

    use super::*;
    use crate::config::Config;
    use crate::error::Result;
    use crate::orchestrator::Orchestrator;

    /// List the indexed files
    pub async fn run_files(config: Config, environment: String) -> Result<()> {
        let orchestrator = Orchestrator::start(&config, &environment).await?;
        print_file_list(orchestrator.files());
        Ok(())
    }
}
