// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Folio — manuscript formatter for Kindle, Google Books, and print.
//
// Entry point. Initialises logging and configuration, runs the formatting
// pipeline in the background, and writes the assembled document to stdout.

mod services;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use folio_core::error::{FolioError, Result};
use folio_core::human_errors::humanize_error;
use folio_document::chapters_to_text;
use folio_text::TextStats;
use serde_json::json;

use services::config_store::{load_config, persist_config};
use services::data_dir;
use services::format_service::{FormatEvent, FormatRequest, FormatService};

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version, about = "Format a plain-text manuscript for Kindle, Google Books, or print")]
#[command(after_help = "EXAMPLES:
    folio novel.txt                        Block list for the default platform
    folio novel.txt -p Print -c cover.jpg  Print layout with a cover page
    folio novel.txt -p Kindle --text       Reflowed chapters as plain text")]
struct Cli {
    /// Manuscript file (UTF-8 text)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Target platform: Kindle, GoogleBooks, or Print
    #[arg(short, long, value_name = "PLATFORM")]
    platform: Option<String>,

    /// Cover image (JPEG, PNG, ...)
    #[arg(short, long, value_name = "IMAGE")]
    cover: Option<PathBuf>,

    /// Write detected chapters as plain text instead of JSON blocks
    #[arg(long)]
    text: bool,

    /// Print word, character, and line counts to stderr
    #[arg(long)]
    stats: bool,

    /// Save PLATFORM as the default for future runs
    #[arg(long, value_name = "PLATFORM")]
    set_default_platform: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "folio starting");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "formatting failed");
            let human = humanize_error(&err);
            eprintln!("{}: {}", human.severity.status_kind(), human.message);
            eprintln!("  {}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let dir = data_dir::data_dir();
    let mut config = load_config(&dir);
    if let Some(id) = cli.set_default_platform.as_deref() {
        config.default_platform = id.parse()?;
        persist_config(&dir, &config)?;
    }

    let source = tokio::fs::read_to_string(&cli.input).await?;
    if cli.stats {
        eprintln!("{}", TextStats::of(&source));
    }

    let cover = match cli.cover {
        Some(path) => {
            let bytes = tokio::fs::read(&path).await.map_err(|err| {
                FolioError::ImageLoadFailure(format!("failed to open {}: {err}", path.display()))
            })?;
            Some((path, bytes))
        }
        None => None,
    };

    let (service, mut events) = FormatService::new(config);
    tracing::info!(
        input = %cli.input.display(),
        default_platform = %service.config().default_platform,
        "formatting manuscript"
    );
    let task = service.submit(FormatRequest {
        source,
        platform: cli.platform,
        cover,
    });
    let document = task.wait().await?;

    if let Ok(FormatEvent::Completed { blocks, .. }) = events.try_recv() {
        tracing::info!(blocks, "document assembled");
    }

    if cli.text {
        print!("{}", chapters_to_text(document.chapters()));
    } else {
        let output = json!({
            "document": document.id(),
            "fingerprint": document.fingerprint(),
            "created_at": document.created_at(),
            "platform": document.platform(),
            "preset": document.preset(),
            "blocks": document.blocks(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}
