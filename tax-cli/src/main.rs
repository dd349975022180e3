use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use tax_cli::{Config, TaxCalculator, app, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Progressive income tax calculator.
///
/// Fetches the bracket schedule for the requested year, applies it to the
/// income and prints the tax owed per band. Without `--income` it prompts
/// for input until a blank line.
#[derive(Debug, Parser)]
#[command(name = "tax-calc", version, about)]
struct Cli {
    /// Annual income, e.g. `100000` or `"85,000.50"`.
    #[arg(long, allow_hyphen_values = true)]
    income: Option<String>,

    /// Tax year; defaults to the latest supported year.
    #[arg(long, allow_hyphen_values = true)]
    year: Option<String>,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bracket backend (`http` or `csv`); overrides the config file.
    #[arg(long)]
    backend: Option<String>,

    /// Backend location: a base URL for `http`, a file path for `csv`.
    #[arg(long)]
    source: Option<String>,

    /// Print the result as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Log level or `EnvFilter` directive; overrides the config file.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(backend) = &self.backend {
            config.source.backend = backend.clone();
        }
        if let Some(location) = &self.source {
            config.source.location = location.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    logging::init_logging(&config.logging)?;
    debug!(?config, "configuration loaded");

    let source = app::build_registry()
        .create(&config.source)
        .await
        .with_context(|| format!("cannot open '{}' bracket source", config.source.backend))?;
    info!(source = %source.describe(), "bracket source ready");

    let calculator = TaxCalculator::new(Arc::from(source), config.supported_years.clone());

    let default_year = config.default_year();
    let succeeded = match &cli.income {
        Some(income) => {
            let year = cli.year.clone().unwrap_or_else(|| default_year.to_string());
            app::run_once(&calculator, income, &year, cli.json).await?
        }
        None => app::run_interactive(&calculator, default_year, cli.json).await?,
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
