//! Resume critiquer: ATS keyword scoring and resume feedback from the command line

mod cli;
mod config;
mod error;
mod input;
mod llm;
mod output;
mod processing;
mod session;

use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands, ConfigAction, SessionCommand, SESSION_HELP};
use config::{Config, FeedbackMode, OutputFormat};
use error::{CritiqueError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use input::UploadedDocument;
use llm::FeedbackGenerator;
use log::{error, info};
use output::formatter::{save_report_to_file, suggest_filename};
use output::ReportGenerator;
use processing::analyzer::{run_guarded, AnalysisOutcome, Analyzer};
use session::gate::short_hash;
use session::SessionState;
use std::io::Write;
use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // .env is optional
    dotenvy::dotenv().ok();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        eprintln!("{}", ReportGenerator::new().format_error(&e));
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            role,
            mode,
            output,
            save,
            detailed,
        } => {
            let mode = resolve_mode(mode.as_deref(), &config)?;
            let format = match output.as_deref() {
                Some(format) => cli::parse_output_format(format).map_err(CritiqueError::Configuration)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            let analyzer = Arc::new(build_analyzer(mode, &config)?);
            analyzer.ensure_available()?;
            info!("Analyzing {} with {}", resume.display(), analyzer.provider_name());
            let document = UploadedDocument::from_path(&resume).await?;

            let spinner = (format == OutputFormat::Console).then(analysis_spinner);
            let (_, result) = run_guarded(analyzer, SessionState::new(), Some(document), role, Utc::now()).await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            let outcome = result?;

            let generator = ReportGenerator::with_options(config.output.color_output && save.is_none(), detailed);
            let rendered = generator.generate(&outcome, format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(format, &resume.to_string_lossy()))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)?;
                    println!("💾 Saved analysis to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Session { mode, role } => {
            let mode = resolve_mode(mode.as_deref(), &config)?;
            run_session(config, mode, role).await?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Config File: {}", config_path.display());
                println!("Default Mode: {}", config.provider.default_mode);
                println!("Gemini Model: {}", config.provider.gemini_model);
                println!("API Base URL: {}", config.provider.api_base_url);
                println!("Provider Timeout: {}s", config.provider.timeout_secs);
                println!(
                    "API Key ({}): {}",
                    config.provider.api_key_env,
                    if config.api_key().is_some() { "set" } else { "not set" }
                );
                println!("Minimum Interval: {}s", config.gate.min_interval_secs);
                println!("Output Format: {:?}", config.output.format);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

fn resolve_mode(mode: Option<&str>, config: &Config) -> Result<FeedbackMode> {
    match mode {
        Some(mode) => cli::parse_feedback_mode(mode).map_err(CritiqueError::Configuration),
        None => Ok(config.provider.default_mode),
    }
}

fn build_analyzer(mode: FeedbackMode, config: &Config) -> Result<Analyzer> {
    let provider = llm::provider_for(mode, config)?;
    Ok(Analyzer::from_config(config, FeedbackGenerator::new(provider)))
}

fn analysis_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Analyzing your resume...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

async fn run_session(config: Config, mode: FeedbackMode, role: Option<String>) -> Result<()> {
    let reports = ReportGenerator::with_options(config.output.color_output, config.output.detailed);
    let mut mode = mode;
    let mut role = role;
    let mut analyzer = Arc::new(build_analyzer(mode, &config)?);
    let mut state = SessionState::new();

    println!("📃 Resume Critiquer session ({})", mode);
    println!("{}", SESSION_HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match cli::parse_session_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            SessionCommand::Analyze(path) => {
                let document = match load_document(path.as_deref()).await {
                    Ok(document) => document,
                    Err(e) => {
                        println!("{}", reports.format_error(&e));
                        continue;
                    }
                };

                let spinner = analysis_spinner();
                let (next_state, result) =
                    run_guarded(analyzer.clone(), state, document, role.clone(), Utc::now()).await;
                spinner.finish_and_clear();
                state = next_state;

                match result.and_then(|outcome: AnalysisOutcome| reports.generate(&outcome, OutputFormat::Console)) {
                    Ok(rendered) => println!("{}", rendered),
                    Err(e) => println!("{}", reports.format_error(&e)),
                }
            }

            SessionCommand::Role(new_role) => {
                match &new_role {
                    Some(text) => println!("🎯 Target role: {}", text),
                    None => println!("🎯 Target role cleared"),
                }
                role = new_role;
            }

            SessionCommand::Mode(new_mode) => {
                let rebuilt = build_analyzer(new_mode, &config).and_then(|rebuilt| {
                    rebuilt.ensure_available()?;
                    Ok(rebuilt)
                });
                match rebuilt {
                    Ok(rebuilt) => {
                        analyzer = Arc::new(rebuilt);
                        mode = new_mode;
                        println!("⚙️  Mode: {}", mode);
                    }
                    Err(e) => println!("{}", reports.format_error(&e)),
                }
            }

            SessionCommand::Status => {
                println!("Mode: {}", mode);
                println!("Role: {}", role.as_deref().unwrap_or("(none)"));
                match state.last_request_time() {
                    Some(time) => println!("Last accepted request: {}", time.format("%H:%M:%S UTC")),
                    None => println!("Last accepted request: (none)"),
                }
                match state.cache() {
                    Some(entry) => println!("Cached feedback for: {}", short_hash(&entry.content_hash)),
                    None => println!("Cached feedback for: (none)"),
                }
            }

            SessionCommand::Reset => {
                state.reset();
                println!("🔄 Session cleared");
            }

            SessionCommand::Help => println!("{}", SESSION_HELP),

            SessionCommand::Quit => break,
        }
    }

    println!("👋 Session ended");
    Ok(())
}

/// `None` when no path was given, so the analyzer reports the missing file
async fn load_document(path: Option<&Path>) -> Result<Option<UploadedDocument>> {
    match path {
        Some(path) => Ok(Some(UploadedDocument::from_path(path).await?)),
        None => Ok(None),
    }
}
