//! One catalog export: fetch, normalize, snapshot, persist.

use std::path::PathBuf;

use anyhow::Context;
use mpsync_core::{AppConfig, EndpointKind, Snapshot};
use mpsync_fetcher::{normalize_all, CatalogClient, Endpoint};

use crate::output::write_snapshot;

/// Per-invocation options layered over [`AppConfig`] by the CLI.
#[derive(Debug, Clone)]
pub(crate) struct SyncOptions {
    pub output_path: PathBuf,
    pub dry_run: bool,
}

/// What a completed export did.
#[derive(Debug)]
pub(crate) struct SyncSummary {
    pub products: usize,
    pub pages: u32,
    pub endpoint: EndpointKind,
    pub output_path: PathBuf,
    pub written: bool,
}

/// Fetches the full catalog and writes it as a snapshot.
///
/// Nothing is written unless every page was fetched and every listing
/// normalized; on any failure the previous snapshot file is left as it was.
/// With `dry_run` set the snapshot is built but not written.
///
/// # Errors
///
/// Returns an error if the endpoint list or HTTP client cannot be built, the
/// catalog fetch fails, a listing cannot be normalized, or the snapshot
/// cannot be written.
pub(crate) async fn run_sync(
    config: &AppConfig,
    options: &SyncOptions,
) -> anyhow::Result<SyncSummary> {
    let endpoints = Endpoint::from_config(config).context("invalid endpoint configuration")?;
    let client = CatalogClient::from_config(config).context("failed to build catalog client")?;

    let fetch = client
        .fetch_all_products(&endpoints, config.page_size, config.inter_page_delay_ms)
        .await
        .context("catalog fetch failed")?;
    let endpoint = fetch.endpoint.kind();
    let pages = fetch.pages;

    let products = normalize_all(fetch.products).context("failed to normalize catalog")?;
    let snapshot = Snapshot::build(products);

    let in_stock = snapshot.products.iter().filter(|p| p.in_stock()).count();
    let discounted = snapshot
        .products
        .iter()
        .filter(|p| p.is_discounted())
        .count();
    tracing::info!(
        %endpoint,
        pages,
        products = snapshot.len(),
        in_stock,
        discounted,
        "catalog normalized"
    );

    if options.dry_run {
        tracing::info!(path = %options.output_path.display(), "dry-run: skipping write");
    } else {
        write_snapshot(&options.output_path, &snapshot).with_context(|| {
            format!(
                "failed to write snapshot to {}",
                options.output_path.display()
            )
        })?;
    }

    Ok(SyncSummary {
        products: snapshot.len(),
        pages,
        endpoint,
        output_path: options.output_path.clone(),
        written: !options.dry_run,
    })
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
