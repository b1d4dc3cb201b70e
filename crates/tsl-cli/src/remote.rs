//! # Remote Subcommands
//!
//! `fetch` and `aggregation` go through the same client the API uses, so
//! the tri-state outcome here matches what the HTTP routes would answer.
//! Client settings come from the `STATUS_LIST_*` environment variables,
//! overridden by `--base-url`.

use anyhow::{Context, Result};
use clap::Args;
use url::Url;

use tsl_client::{StatusClient, StatusClientConfig};
use tsl_core::{AggregationDocument, QueryOutcome, StatusListDocument};

/// Arguments for `tsl fetch`.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Status list URL, or an identifier resolved against `--base-url`.
    #[arg(value_name = "REFERENCE")]
    pub reference: String,

    /// Print only the entry at this index.
    #[arg(long)]
    pub index: Option<u32>,

    /// Base URL for identifiers (overrides `STATUS_LIST_BASE_URL`).
    #[arg(long)]
    pub base_url: Option<Url>,
}

/// Arguments for `tsl aggregation`.
#[derive(Args, Debug)]
pub struct AggregationArgs {
    /// Pool identifier (default: `STATUS_LIST_POOL_ID`).
    #[arg(value_name = "POOL")]
    pub pool: Option<String>,

    /// Aggregation service base URL (overrides `STATUS_LIST_AGGREGATION_URL`).
    #[arg(long)]
    pub base_url: Option<Url>,
}

/// Execute `tsl fetch`.
pub fn run_fetch(args: &FetchArgs) -> Result<u8> {
    fetch_with(StatusClientConfig::from_env()?, args)
}

/// Execute `tsl aggregation`.
pub fn run_aggregation(args: &AggregationArgs) -> Result<u8> {
    aggregation_with(StatusClientConfig::from_env()?, args)
}

fn fetch_with(mut config: StatusClientConfig, args: &FetchArgs) -> Result<u8> {
    if let Some(base_url) = &args.base_url {
        config.status_list_base_url = Some(base_url.clone());
    }
    let outcome = block_on(fetch(config, &args.reference))?;
    report(outcome, |document: StatusListDocument| match args.index {
        Some(index) => match document.status(index) {
            Some(value) => Ok(value.to_string()),
            None => anyhow::bail!(
                "index {index} is outside the list of {} entries",
                document.total_entries
            ),
        },
        None => Ok(serde_json::to_string_pretty(&document)?),
    })
}

fn aggregation_with(mut config: StatusClientConfig, args: &AggregationArgs) -> Result<u8> {
    if let Some(base_url) = &args.base_url {
        config.aggregation_base_url = Some(base_url.clone());
    }
    let outcome = block_on(aggregation(config, args.pool.as_deref()))?;
    report(outcome, |document: AggregationDocument| {
        Ok(serde_json::to_string_pretty(&document)?)
    })
}

/// Fetch one status list.
pub async fn fetch(config: StatusClientConfig, reference: &str) -> Result<QueryOutcome<StatusListDocument>> {
    let client = StatusClient::new(config)?;
    Ok(client.status_list().query(Some(reference)).await)
}

/// Fetch the aggregation of `pool`, or of the configured default pool.
pub async fn aggregation(
    config: StatusClientConfig,
    pool: Option<&str>,
) -> Result<QueryOutcome<AggregationDocument>> {
    let client = StatusClient::new(config)?;
    Ok(client.aggregation().query(pool).await)
}

/// Drive `future` to completion on a current-thread runtime.
fn block_on<T>(future: impl std::future::Future<Output = Result<T>>) -> Result<T> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(future)
}

/// Print a found value and map the outcome to an exit code.
fn report<T>(outcome: QueryOutcome<T>, render: impl FnOnce(T) -> Result<String>) -> Result<u8> {
    match outcome {
        QueryOutcome::Found(value) => {
            println!("{}", render(value)?);
            Ok(0)
        }
        QueryOutcome::NotFound => {
            eprintln!("NOT FOUND");
            Ok(crate::EXIT_NOT_FOUND)
        }
        QueryOutcome::InvalidState => {
            eprintln!("INVALID: the document could not be fetched or decoded (run with -v for details)");
            Ok(1)
        }
    }
}
