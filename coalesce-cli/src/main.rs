//! CLI binary for one-shot record coalescing.
//!
//! Reads a merge policy, a template and a set of tagged item documents, runs a single
//! merge and prints the reconciled record as pretty JSON on stdout.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use coalesce::conversions::json::{record_from_json, record_into_json};
use coalesce::error::{CoalesceResult, ErrorKind};
use coalesce::prelude::*;
use coalesce::{bail, coalesce_error};
use coalesce_config::load::{LoadConfigError, load_config};
use coalesce_config::shared::MergePolicyConfig;
use coalesce_telemetry::tracing::init_tracing;
use tracing::{error, info};

/// Reconciles multiple partial records into one canonical record.
#[derive(Parser, Debug)]
#[command(name = "coalesce")]
#[command(about = "Merges tagged partial records using a declarative precedence policy")]
struct Args {
    /// Merge policy JSON document; falls back to the hierarchical `configuration/`
    /// directory, then to all defaults
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Template JSON object defining the canonical field set and defaults
    #[arg(long)]
    template: PathBuf,

    /// Item documents, each either `SOURCE=path.json` (tagged with a strategy id)
    /// or a bare path (tagged with a random id)
    #[arg(required = true)]
    items: Vec<String>,
}

fn main() {
    init_tracing("coalesce=info,coalesce_cli=info");

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> CoalesceResult<()> {
    let args = Args::parse();

    let policy = load_policy(args.policy.as_deref())?;
    let template = read_record(&args.template)?;

    let coalescer = Coalescer::new(policy, template);

    let mut items = Vec::with_capacity(args.items.len());
    for entry in &args.items {
        items.push(read_item(&coalescer, entry)?);
    }

    info!(items = items.len(), "merging item documents");

    let mut merged = None;
    coalescer.merge(&items, |result| merged = Some(result));

    let Some(merged) = merged else {
        // The engine always invokes the completion callback; this guards the contract.
        bail!(ErrorKind::Unknown, "Merge completed without delivering a result");
    };

    let rendered = serde_json::to_string_pretty(&record_into_json(merged?))?;
    println!("{rendered}");

    Ok(())
}

/// Loads the merge policy from the explicit file, the `configuration/` directory, or
/// defaults, in that order.
fn load_policy(path: Option<&std::path::Path>) -> CoalesceResult<MergePolicyConfig> {
    if let Some(path) = path {
        let raw = fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&raw)?);
    }

    match load_config::<MergePolicyConfig>() {
        Ok(policy) => Ok(policy),
        Err(LoadConfigError::MissingConfigurationDirectory(_)) => {
            info!("no policy supplied, merging with all-default strategy rules");

            Ok(MergePolicyConfig::default())
        }
        Err(e) => Err(coalesce_error!(
            ErrorKind::ConfigError,
            "Failed to load merge policy",
            detail = e.to_string(),
            source: e
        )),
    }
}

/// Reads one item document, honoring the optional `SOURCE=` strategy tag.
fn read_item(coalescer: &Coalescer, entry: &str) -> CoalesceResult<Item> {
    match entry.split_once('=') {
        Some((source, path)) if !source.is_empty() => {
            let payload = read_record(path.as_ref())?;
            Ok(coalescer.create_item(source, payload))
        }
        _ => {
            let payload = read_record(entry.as_ref())?;
            Ok(coalescer.create_untagged_item(payload))
        }
    }
}

/// Reads a JSON object document into a [`Record`].
fn read_record(path: &std::path::Path) -> CoalesceResult<Record> {
    let raw = fs::read_to_string(path)?;
    let document: serde_json::Value = serde_json::from_str(&raw)?;

    record_from_json(document)
}
