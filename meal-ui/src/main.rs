use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::{debug, info, warn};

use meal_ui::config::{AppConfig, ConfigOverrides};
use meal_ui::{Session, app, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Meali: healthy food recommendations from your budget and location.
///
/// Walks through the wizard one command per line. Type `help` for the list
/// of commands.
#[derive(Debug, Parser)]
struct Cli {
    /// TOML configuration file. Defaults to `meali.toml` when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replay commands from a file instead of reading stdin.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Simulated latency of the recommendation fetch, in milliseconds.
    #[arg(long)]
    fetch_delay_ms: Option<u64>,

    /// Recommendation backend (`mock` or `csv`).
    #[arg(long)]
    backend: Option<String>,

    /// Catalog directory for the `csv` backend.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Reject non-numeric amounts and unknown locations.
    #[arg(long)]
    strict: bool,

    /// Hide log output on the console.
    #[arg(long, short)]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            fetch_delay_ms: self.fetch_delay_ms,
            backend: self.backend.clone(),
            catalog: self.catalog.clone(),
            strict: self.strict,
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_default_logging();

    let cli = Cli::parse();
    if cli.quiet {
        logging::set_console_enabled(false)?;
    }

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply(cli.overrides());
    debug!(?config, "effective configuration");

    if let Some(level) = &config.log_level {
        if let Err(error) = logging::set_log_level(level) {
            warn!(%error, "ignoring configured log level");
        }
    }
    if let Some(path) = &config.log_file {
        logging::enable_file_logging(path)?;
    }

    let controller = app::build_controller(&config).await?;
    let mut session = Session::new(controller, std::io::stdout());

    match &cli.script {
        Some(path) => {
            info!(script = %path.display(), "replaying script");
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("cannot open script '{}'", path.display()))?;
            session.run_script(BufReader::new(file)).await?;
        }
        None => {
            session
                .run_interactive(BufReader::new(tokio::io::stdin()))
                .await?;
        }
    }

    info!("bye");
    Ok(())
}
