//! CLI interface for the resume critiquer

use crate::config::{FeedbackMode, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-critiquer")]
#[command(about = "Upload your resume and get ATS scoring plus professional feedback")]
#[command(long_about = "Score a resume against the keywords of a target job role and get feedback, either canned (demo mode) or from Google Gemini")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a single resume
    Analyze {
        /// Path to resume file (PDF or TXT)
        #[arg(short, long)]
        resume: PathBuf,

        /// Job role you are targeting
        #[arg(short = 'j', long)]
        role: Option<String>,

        /// Feedback mode: demo, gemini
        #[arg(short, long)]
        mode: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show matched keywords and timing
        #[arg(short, long)]
        detailed: bool,
    },

    /// Interactive session: several analyses sharing rate limit and cache
    Session {
        /// Feedback mode: demo, gemini
        #[arg(short, long)]
        mode: Option<String>,

        /// Job role to start with
        #[arg(short = 'j', long)]
        role: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Parse and validate feedback mode
pub fn parse_feedback_mode(mode: &str) -> Result<FeedbackMode, String> {
    match mode.to_lowercase().as_str() {
        "demo" => Ok(FeedbackMode::Demo),
        "gemini" | "ai" => Ok(FeedbackMode::Gemini),
        _ => Err(format!("Invalid mode: {}. Supported: demo, gemini", mode)),
    }
}

/// A line typed into an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Analyze(Option<PathBuf>),
    Role(Option<String>),
    Mode(FeedbackMode),
    Status,
    Reset,
    Help,
    Quit,
}

pub const SESSION_HELP: &str = "Commands:
  analyze <file>     analyze a .pdf or .txt resume
  role [text]        set the target job role (no text clears it)
  mode <demo|gemini> switch feedback mode
  status             show session state
  reset              clear rate limit and cached feedback
  help               show this help
  quit               leave the session";

pub fn parse_session_command(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let argument = (!rest.is_empty()).then(|| rest.to_string());

    match command.to_lowercase().as_str() {
        "analyze" | "a" => Ok(SessionCommand::Analyze(argument.map(PathBuf::from))),
        "role" => Ok(SessionCommand::Role(argument)),
        "mode" => match argument {
            Some(mode) => parse_feedback_mode(&mode).map(SessionCommand::Mode),
            None => Err("Usage: mode <demo|gemini>".to_string()),
        },
        "status" => Ok(SessionCommand::Status),
        "reset" => Ok(SessionCommand::Reset),
        "help" | "?" => Ok(SessionCommand::Help),
        "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
        "" => Err(String::new()),
        other => Err(format!("Unknown command: {}. Type 'help' for commands", other)),
    }
}
