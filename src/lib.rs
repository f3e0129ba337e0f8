pub mod cli;
pub mod commands;
pub mod core;

use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::commands::PipelineContext;
use crate::core::config::DollpackConfig;
use crate::core::error::PackResult;
use crate::core::layout::{validate_player_id, PackLayout};

pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "debug"
    } else {
        "info,dollpack=debug"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();
}

/// Entry point shared by the binary: load config, dispatch, report.
pub async fn run(cli: Cli) -> ExitCode {
    init_tracing(cli.verbose);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let layout = PackLayout::from_config(&config);
    info!("Resource pack root: {:?}", layout.pack_root);
    if let Err(e) = layout.ensure_skeleton() {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    match cli.command.unwrap_or(Command::Run { name: None }) {
        Command::Run { name } => run_full(&config, name).await,
        Command::Docs { name } => match commands::generate_documents(&layout, &name).await {
            Ok(docs) => {
                info!("Item document: {:?}", docs.item_path);
                match &docs.model {
                    Ok(path) => info!("Model document: {:?}", path),
                    Err(e) if e.is_recoverable() => warn!("Model document not created: {}", e),
                    Err(e) => error!("Model document failed: {}", e),
                }
                if docs.succeeded() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            }
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        },
        Command::Pack => match commands::package(&layout).await {
            Ok(digest) => {
                println!("{}", digest.sha1_hex);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Packaging failed: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn run_full(config: &DollpackConfig, name: Option<String>) -> ExitCode {
    let raw = match name {
        Some(name) => name,
        None => match prompt_player_name().await {
            Ok(name) => name,
            Err(e) => {
                error!("Could not read player name: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };
    let player_id = match validate_player_id(&raw) {
        Ok(player_id) => player_id,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let ctx = match PipelineContext::from_config(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = commands::run_doll(&ctx, &player_id).await;
    report.log_summary();

    if !report.succeeded() {
        return ExitCode::FAILURE;
    }
    if let Ok(digest) = &report.package {
        println!("{}", digest.sha1_hex);
    }
    ExitCode::SUCCESS
}

fn load_config(cli: &Cli) -> PackResult<DollpackConfig> {
    let mut config = DollpackConfig::load(cli.config.as_deref())?;
    if let Some(root) = &cli.pack_root {
        config.pack_root = root.clone();
    }
    if let Some(name) = &cli.pack_name {
        config.pack_name = name.clone();
    }
    Ok(config)
}

async fn prompt_player_name() -> std::io::Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Minecraft player name: ").await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line)
}
