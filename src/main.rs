use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};

use release_notifier::config::{CheckerConfig, data_dir, db_path, log_path};
use release_notifier::logging;
use release_notifier::package::header::HeaderFileSource;
use release_notifier::package::metadata::PackageMetadata;
use release_notifier::package::types::{PackageKind, PackageRef};
use release_notifier::release::cache::SqliteReleaseCache;
use release_notifier::release::checker::UpdateChecker;
use release_notifier::release::fetchers::HttpReleaseFetcher;

#[derive(Parser)]
#[command(name = "release-notifier")]
#[command(version, about = "Check installed plugins and themes for available updates")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the normalized release record as JSON
    Release(PackageArgs),
    /// Report whether a newer version is available
    Check(PackageArgs),
}

#[derive(Args)]
struct PackageArgs {
    /// Package kind: plugin or theme
    #[arg(long, value_parser = parse_kind)]
    kind: PackageKind,

    /// Plugin main file, or theme directory / style.css
    #[arg(long)]
    path: PathBuf,

    /// Release endpoint (overrides the config file)
    #[arg(long)]
    url: Option<String>,

    /// JSON config file with url, cacheTtl, dataMap and dataOverrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cache lifetime in milliseconds (overrides the config file)
    #[arg(long)]
    ttl_ms: Option<i64>,

    /// Drop the cached release before looking it up
    #[arg(long)]
    refresh: bool,
}

fn parse_kind(value: &str) -> Result<PackageKind, String> {
    value
        .parse()
        .map_err(|_| format!("unknown package kind '{}', expected plugin or theme", value))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(&log_path())?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command))
}

async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Release(args) => {
            let checker = build_checker(&args)?;
            let release = checker.get_release().await;
            println!("{}", serde_json::to_string_pretty(&release)?);
        }
        Command::Check(args) => {
            let checker = build_checker(&args)?;
            let release = checker.get_release().await;
            let installed = checker.metadata().version();

            if release.is_empty() {
                println!("no release information available");
            } else if checker.is_update(&release) {
                println!(
                    "update available: {} -> {}",
                    installed,
                    release.version().unwrap_or_default()
                );
            } else {
                println!("up to date ({})", installed);
            }
        }
    }

    Ok(())
}

fn build_checker(args: &PackageArgs) -> anyhow::Result<UpdateChecker> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => CheckerConfig::default(),
    };
    if let Some(url) = &args.url {
        config = config.with_url(url.clone());
    }
    if let Some(ttl) = args.ttl_ms {
        config = config.with_cache_ttl(ttl);
    }
    if config.url.is_empty() {
        bail!("no release URL: pass --url or set \"url\" in the config file");
    }

    let package = PackageRef::new(args.kind, args.path.clone());
    let metadata = PackageMetadata::new(package, Arc::new(HeaderFileSource::new()));

    std::fs::create_dir_all(data_dir()).context("failed to create data directory")?;
    let store = SqliteReleaseCache::new(&db_path())?;
    let fetcher = HttpReleaseFetcher::new()?;

    let checker = UpdateChecker::new(metadata, config, Arc::new(fetcher), Arc::new(store));
    if args.refresh {
        checker.clear_cache()?;
    }

    Ok(checker)
}

fn load_config(path: &Path) -> anyhow::Result<CheckerConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("invalid config {}", path.display()))
}
