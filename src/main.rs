use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use peer_compat::compat::cache::CompatCache;
use peer_compat::compat::lookup::CompatLookup;
use peer_compat::compat::resolver::{BatchResolution, BatchResolver};
use peer_compat::compat::sources::NpmPeerSource;
use peer_compat::compat::types::ResolvedTarget;
use peer_compat::config::{self, Config};
use peer_compat::{logging, manifest};

#[derive(Parser)]
#[command(name = "peer-compat")]
#[command(
    version,
    about = "Find versions of new packages compatible with every declared dependency"
)]
struct Cli {
    /// Packages to resolve
    #[arg(required = true)]
    targets: Vec<String>,

    /// Manifest holding the declared packages
    #[arg(long, default_value = "package.json")]
    manifest: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the compatibility service base URL
    #[arg(long)]
    service_url: Option<String>,

    /// Resolve at most N targets at once
    #[arg(long, value_name = "N")]
    max_concurrent: Option<usize>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Also write logs to the data directory
    #[arg(long)]
    log_file: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn render_text(resolved: &[ResolvedTarget]) -> String {
    resolved
        .iter()
        .map(|target| {
            format!(
                "{} {} - {} ({})",
                target.name,
                target.version.oldest,
                target.version.latest,
                target.adopted().version
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fail when any target could not be looked up, listing each failure
fn ensure_complete(batch: &BatchResolution) -> anyhow::Result<()> {
    if batch.is_complete() {
        return Ok(());
    }

    let details = batch
        .failed
        .iter()
        .map(|failure| format!("  {}: {}", failure.target, failure.error))
        .collect::<Vec<_>>()
        .join("\n");

    anyhow::bail!(
        "Failed to resolve {} target(s):\n{}",
        batch.failed.len(),
        details
    )
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(url) = cli.service_url {
        config.service.base_url = url;
    }
    if cli.max_concurrent.is_some() {
        config.resolver.max_concurrent_targets = cli.max_concurrent;
    }

    let packages = manifest::load_manifest(&cli.manifest)?;

    let source = NpmPeerSource::from_config(&config.service);
    let lookup = CompatLookup::new(Arc::new(source), Arc::new(CompatCache::new()));
    let resolver =
        BatchResolver::new(lookup).with_max_concurrent_targets(config.resolver.max_concurrent_targets);

    let batch = resolver
        .resolve_all(Some(&packages), Some(cli.targets.as_slice()))
        .await
        .context("Failed to resolve compatible versions")?;
    let resolved = &batch.resolved;

    match cli.format {
        Format::Text => {
            if !resolved.is_empty() {
                println!("{}", render_text(resolved));
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(resolved)?),
    }

    ensure_complete(&batch)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.then(config::log_path);
    let _guard = logging::init(cli.verbose, log_path.as_deref())
        .inspect_err(|e| eprintln!("Failed to install logger: {e}"))
        .ok()
        .flatten();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}
