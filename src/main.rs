//! identity-schemas - Command-line entry point
//!
//! Reads a JSON payload from a file or stdin, runs it through one of the
//! schemas and prints the normalized result or a JSON error body.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use identity_schemas::{
    AppError, AppResult, Config, LinkService, UserRecord, build_response,
    config::{LogConfig, LogFormat},
    validate_base, validate_creation, validate_login, validate_update,
};

#[derive(Debug, Parser)]
#[command(name = "identity-schemas", version, about = "Validate user identity payloads")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a payload and print its normalized form
    Validate {
        /// Schema to validate against
        #[arg(value_enum)]
        schema: SchemaKind,

        /// Read the payload from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Validate a creation payload and print the public user it would produce
    Preview {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SchemaKind {
    Base,
    Create,
    Update,
    Login,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Config failures are reported like any other error, before tracing exists
    let outcome = Config::from_env()
        .map_err(AppError::from)
        .and_then(|config| {
            init_tracing(&config.log);
            run(cli.command, &config)
        });

    match outcome {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::debug!(code = err.error_code(), "request rejected");
            println!("{}", error_body(&err)?);
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}

fn error_body(err: &AppError) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&err.to_response())
}

fn init_tracing(log: &LogConfig) {
    // stdout carries the JSON result, so logs go to stderr
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| log.rust_log.clone().into());
    let registry = tracing_subscriber::registry().with(filter);

    match log.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}

fn run(command: Command, config: &Config) -> AppResult<String> {
    match command {
        Command::Validate { schema, input } => {
            let raw = read_input(input.as_deref())?;
            let normalized = validate_as(schema, &raw)?;
            Ok(serde_json::to_string_pretty(&normalized)?)
        }
        Command::Preview { input } => {
            let raw = read_input(input.as_deref())?;
            let created = validate_creation(&raw)?;

            let record = UserRecord::admit(Uuid::new_v4(), created.base(), Utc::now());
            let links = LinkService::from_config(&config.links).user_links(record.id);
            tracing::info!(user_id = %record.id, "previewed new user");

            Ok(serde_json::to_string_pretty(&build_response(&record, links))?)
        }
    }
}

fn validate_as(schema: SchemaKind, raw: &Value) -> AppResult<Value> {
    let normalized = match schema {
        SchemaKind::Base => serde_json::to_value(validate_base(raw)?)?,
        SchemaKind::Create => serde_json::to_value(validate_creation(raw)?)?,
        SchemaKind::Update => serde_json::to_value(validate_update(raw)?)?,
        SchemaKind::Login => serde_json::to_value(validate_login(raw)?)?,
    };
    Ok(normalized)
}

/// Parse the payload from `path`, or from stdin when no path is given
fn read_input(path: Option<&Path>) -> AppResult<Value> {
    let text = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&text)?)
}
