mod summary;

use clap::{Parser, ValueEnum};
use cowdash_core::{config::Config, export, normalizer::Normalizer};
use cowdash_feeds::{load_snapshot, FileSource, SheetSource, TicketSource};
use std::path::PathBuf;
use std::time::Duration;

const DEBUG_LOG: &str = "/tmp/cowdash-debug.log";

#[derive(Parser)]
#[command(name = "cowdash", about = "COW site ticket dashboard for a published Google Sheet")]
struct Cli {
    /// Write debug logs to /tmp/cowdash-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Config file to use instead of ~/.config/cowdash/config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// CSV export URL of the sheet.
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Read tickets from a local CSV file instead of the sheet.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Seconds between refreshes.
    #[arg(long, value_name = "SECS")]
    interval: Option<u64>,

    /// Fetch once, print a summary and exit.
    #[arg(long)]
    headless: bool,

    /// Summary format for --headless.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write snapshot.json and the chart SVGs into DIR. Without --headless
    /// this sets the directory used by the `e` key.
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "cannot load config, using defaults");
            Config::defaults()
        }),
    };
    if let Some(url) = &cli.url {
        config.feed.url = url.clone();
    }
    if let Some(secs) = cli.interval {
        config.feed.refresh_secs = secs;
    }
    if let Some(dir) = &cli.export {
        config.export.dir = dir.clone();
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let _guard = runtime.enter();

    match &cli.file {
        Some(path) => start(&cli, config, FileSource::new(path), &runtime),
        None => {
            let timeout = Duration::from_secs(config.feed.timeout_secs);
            let source = SheetSource::new(config.feed.url.clone(), timeout)?;
            start(&cli, config, source, &runtime)
        }
    }
}

fn start<S: TicketSource>(
    cli: &Cli,
    config: Config,
    source: S,
    runtime: &tokio::runtime::Runtime,
) -> anyhow::Result<()> {
    if !cli.headless {
        let interval = Duration::from_secs(config.feed.refresh_secs);
        return cowdash_tui::run(config, source, interval);
    }

    let normalizer = Normalizer::from_config(&config);
    let snapshot = runtime.block_on(load_snapshot(&source, &normalizer));
    let label = source.describe();
    let report = summary::Report::new(&label, &snapshot);

    match cli.format {
        Format::Text => print!("{}", report.to_text()),
        Format::Json => println!("{}", report.to_json()?),
    }

    if cli.export.is_some() {
        let written = export::write_snapshot(&config.export.dir, &snapshot)?;
        tracing::info!(files = written.len(), "headless export done");
    }
    Ok(())
}

/// File logging under `--debug`; otherwise headless runs report warnings on
/// stderr and the TUI stays silent.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let filter = |default: &str| {
        tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default))
    };

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(DEBUG_LOG)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(filter("debug"))
            .init();
        tracing::info!("cowdash debug log started — tail -f {DEBUG_LOG}");
    } else if cli.headless {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter("warn"))
            .init();
    }
    Ok(())
}
