//! crowdnfo: uploads release metadata to the CrowdNFO catalog.

mod args;
mod config;

use anyhow::Context;
use clap::Parser;
use crowdnfo_pipeline::{ProgressEvent, ProgressObserver, process_release};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::args::Args;
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    let quiet = args.quiet;
    let options = args.into_options(config)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        release = %options.release_path.display(),
        "starting crowdnfo"
    );

    let (events_tx, mut events_rx) = mpsc::unbounded_channel::<ProgressEvent>();
    let printer = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            if !quiet {
                println!("[{}] {}: {}", event.stage, event.release_name, event.detail);
            }
        }
    });

    let observer: &dyn ProgressObserver = &events_tx;
    let outcome = process_release(&options, Some(observer)).await;
    drop(events_tx);
    let _ = printer.await;

    let result = outcome.context("release processing failed")?;
    if result.is_clean() {
        tracing::info!("all uploads completed");
    } else {
        for warning in &result.warnings {
            eprintln!("warning: {warning}");
        }
        tracing::warn!(count = result.warnings.len(), "completed with warnings");
    }
    Ok(())
}
