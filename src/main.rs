//! segment-router command line.
//!
//! # Architecture Overview
//!
//! ```text
//!     router.toml ──▶ config (load + validate) ──▶ Router::from_config
//!                                                       │
//!                                                       ▼
//!     match <PATH> ───────────────────────────▶ CompiledRouter::match_path
//!     url k=v ... ────────────────────────────▶ CompiledRouter::build_url
//!     routes ─────────────────────────────────▶ RouteIndex buckets
//!     check ──────────────────────────────────▶ validation report
//!     watch ──▶ stdin paths ──▶ RouterStore ◀── ConfigWatcher (hot reload)
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use segment_router::config::watcher::ConfigWatcher;
use segment_router::config::{load_config, ConfigError, ObservabilityConfig};
use segment_router::observability::logging::init_logging;
use segment_router::routing::{CompiledRouter, ParamValue, Params, RouterStore};
use segment_router::Router;

#[derive(Parser)]
#[command(name = "segment-router")]
#[command(about = "Match paths and build URLs from a route table", long_about = None)]
struct Cli {
    /// Route table configuration file.
    #[arg(short, long, default_value = "router.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match a path and print the target and bound parameters
    Match { path: String },
    /// Build the best URL for the given parameters (`route=<pattern>` selects one)
    Url {
        #[arg(value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
    /// List routes grouped by segment count
    Routes,
    /// Validate the configuration file
    Check,
    /// Match paths read from stdin, reloading the config when it changes
    Watch,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
    Ok((key.to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Commands::Check = cli.command {
        init_logging(&ObservabilityConfig::default());
        return Ok(check(&cli.config));
    }

    let config = load_config(&cli.config)?;
    init_logging(&config.observability);
    tracing::info!(
        path = %cli.config.display(),
        routes = config.routes.len(),
        params = config.params.len(),
        "Configuration loaded"
    );

    let compiled = Router::from_config(&config)?.compile()?;

    match cli.command {
        Commands::Match { path } => Ok(print_match(&compiled, &path)?),
        Commands::Url { params } => {
            let params: Params = params
                .into_iter()
                .map(|(k, v)| (k, ParamValue::from(v)))
                .collect();
            match compiled.build_url(&params) {
                Ok(url) => {
                    println!("{url}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("{e}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Routes => {
            for (count, routes) in compiled.index().buckets() {
                println!("[{count} segments]");
                for route in routes {
                    println!("  {:<32} {}#{}", route.pattern, route.target.handler, route.target.action);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Watch => watch(&cli.config, compiled).await,
        Commands::Check => unreachable!("handled before loading"),
    }
}

fn check(path: &Path) -> ExitCode {
    match load_config(path) {
        Ok(config) => match Router::from_config(&config).and_then(|r| r.compile()) {
            Ok(compiled) => {
                println!("{}: ok ({} routes)", path.display(), compiled.index().len());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                ExitCode::FAILURE
            }
        },
        Err(ConfigError::Validation(errors)) => {
            for error in errors {
                eprintln!("{}: {error}", path.display());
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn print_match(router: &CompiledRouter, path: &str) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match router.match_path(path) {
        Ok(matched) => {
            println!("{}", serde_json::to_string_pretty(&matched)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_not_found() => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

async fn watch(path: &Path, initial: CompiledRouter) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let store = Arc::new(RouterStore::new(initial));
    // Dropping the watcher stops reloads
    let _watcher = ConfigWatcher::new(path, Arc::clone(&store)).run()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                print_match(&store.load(), line)?;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupt received, stopping");
                break;
            }
        }
    }

    tracing::info!(generation = store.generation(), "Watch stopped");
    Ok(ExitCode::SUCCESS)
}
