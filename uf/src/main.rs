use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use unifind::cli::{Cli, RunError, normalize_args};
use unifind::config::Config;
use unifind::{DocumentProvider, Finder, HttpFetcher, Sources, has_output, render};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > default (WARN, so parse diagnostics show)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to WARN", s);
                tracing::Level::WARN
            }
        },
        None => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    debug!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn run(cli: &Cli, bare: bool) -> Result<()> {
    if bare {
        return Err(RunError::MissingQuery.into());
    }

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    let fetcher = HttpFetcher::new(config.timeout());
    let provider = match cli.cache_dir.as_ref().or(config.cache_dir.as_ref()) {
        Some(dir) => DocumentProvider::new(dir, fetcher),
        None => DocumentProvider::from_user_cache_dir(fetcher)?,
    };
    let finder = Finder::new(
        provider,
        Sources {
            names_list_url: config.names_list_url.clone(),
            index_url: config.index_url.clone(),
        },
    );

    let query = cli.query();
    let outcome = if cli.index {
        finder.search_index(&query)
    } else {
        finder.search(&query)
    }
    .context("Search failed")?;

    info!(
        matches = outcome.records.len(),
        diagnostics = outcome.diagnostics.len(),
        "Search complete"
    );

    let mode = cli.output_mode();
    let mut out = io::stdout().lock();
    render(&mut out, &outcome.records, mode).context("Failed to write results")?;
    out.flush().context("Failed to write results")?;

    // Index records carry no category, so --cats can come out empty
    if !has_output(&outcome.records, mode) {
        return Err(RunError::NoMatches.into());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().collect();
    let bare = args.len() <= 1;
    let cli = Cli::parse_from(normalize_args(args));

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    if let Err(e) = setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()) {
        eprintln!("{} {:#}", "error:".red(), e);
        return ExitCode::from(2);
    }

    debug!(?cli, "main: parsed arguments");
    match run(&cli, bare) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("{} {:#}", "error:".red(), report);
            let code = report.downcast_ref::<RunError>().map(RunError::exit_code).unwrap_or(2);
            ExitCode::from(code)
        }
    }
}
