//! Special commands parser for interactive chat mode
//!
//! Special commands are entered at the chat prompt to inspect the session
//! instead of asking a question. Commands are prefixed with `/` and are
//! case-insensitive.

use colored::Colorize;

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Show the files indexed behind the knowledge base
    Files,

    /// Show the session's chat history
    History,

    /// Display help information
    Help,

    /// Exit the session
    Exit,

    /// An unrecognized `/` command
    Unknown(String),

    /// Not a special command; treat as a question
    None,
}

/// Parse a line of chat input into a special command
///
/// # Examples
///
/// ```
/// use kbchat::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/files"), SpecialCommand::Files);
/// assert_eq!(parse_special_command("What is S3?"), SpecialCommand::None);
/// ```
pub fn parse_special_command(input: &str) -> SpecialCommand {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return SpecialCommand::None;
    }

    match trimmed.to_lowercase().as_str() {
        "/files" => SpecialCommand::Files,
        "/history" => SpecialCommand::History,
        "/help" => SpecialCommand::Help,
        "/exit" | "/quit" => SpecialCommand::Exit,
        _ => SpecialCommand::Unknown(trimmed.to_string()),
    }
}

/// Print help for the special commands
pub fn print_help() {
    println!("{}", "Available commands:".bold());
    println!("  /files    Show the files available to ask questions about");
    println!("  /history  Show this session's questions and answers");
    println!("  /help     Show this help");
    println!("  /exit     Leave the session (alias: /quit)");
    println!();
    println!("Anything else is sent to the knowledge base as a question.");
}
