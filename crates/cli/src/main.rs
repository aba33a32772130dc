mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use digidash_core::{env_parse_with_default, PANEL_LAST_YEAR};
use digidash_storage::IngestSources;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_PANEL_CSV: &str = "data_1999_2023.csv";
const DEFAULT_INDUSTRY_CSV: &str = "industry_classification.csv";

#[derive(Parser)]
#[command(name = "digidash")]
#[command(
    about = "Digital transformation index dashboard for listed firms",
    long_about = None
)]
struct Cli {
    /// Database file (defaults to the user data directory)
    #[arg(long, env = "DIGIDASH_DB_PATH", global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Where the firm-year table is built from
#[derive(Args, Debug, Clone)]
pub(crate) struct SourceArgs {
    /// Firm-year index panel CSV
    #[arg(long, env = "DIGIDASH_PANEL_CSV", default_value = DEFAULT_PANEL_CSV)]
    panel_csv: PathBuf,

    /// Industry classification CSV
    #[arg(long, env = "DIGIDASH_INDUSTRY_CSV", default_value = DEFAULT_INDUSTRY_CSV)]
    industry_csv: PathBuf,

    /// Last year the latest classification is carried forward to
    /// [env: DIGIDASH_BACKFILL_THROUGH]
    #[arg(long)]
    backfill_through: Option<i32>,
}

impl SourceArgs {
    pub(crate) fn sources(&self) -> IngestSources {
        let through = self
            .backfill_through
            .unwrap_or_else(|| env_parse_with_default("DIGIDASH_BACKFILL_THROUGH", PANEL_LAST_YEAR));
        IngestSources::new(&self.panel_csv, &self.industry_csv).backfill_through(through)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the table if needed and serve the dashboard
    Serve {
        #[arg(short, long, default_value = "5000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        #[command(flatten)]
        sources: SourceArgs,
    },
    /// Build the firm-year table from the source files
    Ingest {
        /// Rebuild even if the table already holds data
        #[arg(long)]
        force: bool,
        #[command(flatten)]
        sources: SourceArgs,
    },
    /// Print matching rows as JSON
    Query {
        #[arg(short, long)]
        code: Option<String>,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(long)]
        ind_code: Option<String>,
        #[arg(long)]
        ind_name: Option<String>,
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Print table statistics as JSON
    Stats,
}

pub(crate) fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("digidash")
        .join("digi.db")
}

pub(crate) fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = cli.db.unwrap_or_else(default_db_path);

    match cli.command {
        Commands::Serve { port, host, sources } => {
            commands::serve::run(&db_path, &sources.sources(), port, host).await?;
        },
        Commands::Ingest { force, sources } => {
            commands::ingest::run(&db_path, &sources.sources(), force)?;
        },
        Commands::Query { code, name, year, ind_code, ind_name, limit } => {
            let filter = digidash_core::RecordFilter::default()
                .firm_code(code.as_deref())
                .firm_name(name.as_deref())
                .year(year)
                .industry_code(ind_code.as_deref())
                .industry_name(ind_name.as_deref());
            commands::query::run_query(&db_path, &filter, limit)?;
        },
        Commands::Stats => {
            commands::query::run_stats(&db_path)?;
        },
    }

    Ok(())
}
