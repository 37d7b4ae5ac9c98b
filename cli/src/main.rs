mod table;
mod tui;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use cellar_core::{
    apply_metrics, current_year, parse_args, parse_year, DisplayMode, FileBlobStore, LoadOrigin,
    ReportStore, StoreConfig, Unit, YearMonth,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cellar")]
#[command(about = "Monthly wine sales dashboard for the restaurant group", long_about = None)]
struct Cli {
    /// Directory holding the stored reports (defaults to ~/.cellar)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the dashboard series and totals
    Show {
        /// Group totals per month instead of sales per unit
        #[arg(long)]
        annual: bool,
        /// Year for the annual view (defaults to the current year)
        #[arg(long)]
        year: Option<String>,
    },
    /// List stored reports
    List,
    /// Record metrics for a unit (usage: record 2025-02 BRIQUE sales:8500 bottles:40)
    Record {
        /// Month, unit and key:value metrics
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Set the notes of a month (usage: note 2025-02 Carnaval week)
    Note {
        month: String,
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Open the Terminal User Interface
    Tui,
}

fn init_logging() {
    // Logs go to stderr so they never mix with tables or the TUI screen.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = StoreConfig::new(cli.data_dir)?;
    let blobs = FileBlobStore::new(config.data_dir.clone())?;
    let mut store = ReportStore::load(blobs, &config.storage_key, current_year())?;
    debug!(origin = ?store.origin(), reports = store.collection().len(), "loaded reports");

    if store.origin() == LoadOrigin::Recovered {
        eprintln!(
            "Warning: stored reports could not be read; showing default data (a copy was kept as {}.corrupt)",
            config.storage_key
        );
    }

    match cli.command {
        Some(Commands::Show { annual, year }) => {
            let year = match year {
                Some(y) => parse_year(&y)?,
                None => current_year(),
            };
            let mode = if annual { DisplayMode::Annual } else { DisplayMode::Monthly };
            table::show_dashboard(&store, mode, year)?;
        }
        Some(Commands::List) => {
            table::show_reports(store.collection());
        }
        Some(Commands::Record { args }) => {
            let parsed = parse_args(&args);
            let [month, unit] = parsed.words.as_slice() else {
                return Err(anyhow!("Expected a month and a unit, e.g. record 2025-02 BRIQUE sales:8500"));
            };
            if parsed.metadata.is_empty() {
                return Err(anyhow!("Nothing to record: pass at least one key:value metric"));
            }
            let month: YearMonth = month.parse()?;
            let unit: Unit = unit.parse()?;

            let existing = store
                .collection()
                .find(month)
                .and_then(|r| r.restaurants.get(&unit))
                .cloned()
                .unwrap_or_default();
            let metrics = apply_metrics(existing, &parsed.metadata)?;
            store.record_metrics(month, unit, metrics)?;
            println!("Recorded {} for {}", unit, month);
        }
        Some(Commands::Note { month, text }) => {
            let month: YearMonth = month.parse()?;
            let text = text.join(" ");
            let notes = if text.trim().is_empty() { None } else { Some(text) };
            store.set_notes(month, notes)?;
            println!("Notes updated for {}", month);
        }
        Some(Commands::Tui) | None => {
            tui::run(&store, current_year())?;
        }
    }
    Ok(())
}
