//! quill - run playground actions against a live relay from the
//! terminal.
//!
//! Examples:
//! - `quill check Main.idr`
//! - `quill typeof Main.idr --line 2 --col 1`
//! - `quill add-clause Main.idr --line 1 --col 0`
//! - `quill case-split Main.idr --line 2 --col 6`
//!
//! Edit actions print the mutated buffer to stdout; text actions print
//! the panel contents.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use inkproto::DEFAULT_FILE;
use quill::{apply, apply_failure, build_command, ActionKind, Buffer, Panel, RelayClient};

/// Editor-side client for the inkwell playground relay
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(version, about)]
struct Cli {
    /// Config file (replaces the local inkwell.toml override)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Relay endpoint, e.g. http://127.0.0.1:8090/run
    #[arg(long)]
    relay: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Typecheck the file
    Check {
        /// Source file to upload
        file: PathBuf,
    },
    /// Type of the identifier under the cursor
    Typeof {
        file: PathBuf,
        /// 1-based cursor line
        #[arg(long)]
        line: u32,
        /// 0-based cursor column
        #[arg(long)]
        col: usize,
    },
    /// Generate an initial clause for the function under the cursor
    AddClause {
        file: PathBuf,
        #[arg(long)]
        line: u32,
        #[arg(long)]
        col: usize,
    },
    /// Case split on the variable under the cursor
    CaseSplit {
        file: PathBuf,
        #[arg(long)]
        line: u32,
        #[arg(long)]
        col: usize,
    },
}

impl Commands {
    fn parts(&self) -> (ActionKind, &PathBuf, Option<(u32, usize)>) {
        match self {
            Commands::Check { file } => (ActionKind::Check, file, None),
            Commands::Typeof { file, line, col } => (ActionKind::Typeof, file, Some((*line, *col))),
            Commands::AddClause { file, line, col } => {
                (ActionKind::AddClause, file, Some((*line, *col)))
            }
            Commands::CaseSplit { file, line, col } => {
                (ActionKind::CaseSplit, file, Some((*line, *col)))
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = inkconf::InkConfig::load_with_override(cli.config.as_deref())
        .context("failed to load configuration")?;
    let relay_url = cli.relay.unwrap_or(config.client.relay_url);
    let timeout = Duration::from_secs(
        cli.timeout_secs.unwrap_or(config.client.request_timeout_secs),
    );

    let (kind, path, cursor) = cli.command.parts();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut buffer = Buffer::from_text(&source);
    if let Some((line, col)) = cursor {
        buffer.set_cursor(line, col);
    }

    // The upload keeps the on-disk name; a bare buffer would go up as
    // the default single-file name.
    let upload_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_FILE.to_string());

    let Some(command) = build_command(kind, &buffer, &upload_name) else {
        // Same as the editor: no identifier under the cursor, no request.
        eprintln!("no identifier under the cursor; nothing sent");
        return Ok(());
    };

    let client = RelayClient::new(relay_url, timeout);
    let mut panel = Panel::Busy;

    match client.submit(&upload_name, &buffer.text(), &command).await {
        Ok(action) => apply(&mut buffer, &mut panel, &action),
        Err(err) => apply_failure(&mut panel, &err.to_string()),
    }

    match panel {
        Panel::Hidden => {
            // The buffer was edited; show the result.
            println!("{}", buffer.text());
        }
        Panel::Text(text) => println!("{text}"),
        Panel::Busy => unreachable!("request completed"),
    }
    Ok(())
}
