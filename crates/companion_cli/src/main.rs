//! Code Companion CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Missing API key
//! - 3: Import failure

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use companion_chat::{ChatError, ChatSession, GeminiClient};
use companion_import::DirectoryWalker;

mod repl;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const MISSING_API_KEY: u8 = 2;
    pub const IMPORT_FAILURE: u8 = 3;
}

/// AI coding assistant with an in-memory project workspace
#[derive(Parser, Debug)]
#[command(name = "companion", version, about)]
struct Cli {
    /// Directory to import as the initial project
    #[arg(value_name = "PROJECT_DIR")]
    project: Option<PathBuf>,

    /// Gemini model to use
    #[arg(long)]
    model: Option<String>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive("companion=info".parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let cli = Cli::parse();

    let client = match GeminiClient::new(cli.api_key.unwrap_or_default(), cli.model) {
        Ok(client) => client,
        Err(e @ ChatError::ApiKeyMissing) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(ExitCodes::MISSING_API_KEY);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(ExitCodes::GENERAL_ERROR);
        }
    };

    let mut session = ChatSession::new(Arc::new(client));

    if let Some(project) = cli.project {
        let walker = match DirectoryWalker::open(&project) {
            Ok(walker) => walker,
            Err(e) => {
                eprintln!("Error: failed to import {}: {}", project.display(), e);
                return ExitCode::from(ExitCodes::IMPORT_FAILURE);
            }
        };
        match session.import_directory(walker) {
            Ok(report) => {
                println!(
                    "Imported {} files and {} folders ({} skipped)",
                    report.files,
                    report.folders,
                    report.total_skipped()
                );
            }
            Err(e) => {
                eprintln!("Error: failed to import {}: {}", project.display(), e);
                return ExitCode::from(ExitCodes::IMPORT_FAILURE);
            }
        }
    }

    match repl::run(&mut session).await {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(ExitCodes::GENERAL_ERROR)
        }
    }
}
