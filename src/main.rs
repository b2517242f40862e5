//! Showroom - fetch and decode a glTF scene, print the response envelope.
//!
//! Plays the caller role from the command line: submit one URL or path to
//! the decode worker and write the resulting JSON to stdout.

use anyhow::{bail, Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use showroom_worker::{DecodeWorker, LoadRequest, WorkerConfig, WorkerResponse};

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let mut args = std::env::args().skip(1);
    let url = match args.next() {
        Some(url) => url,
        None => bail!("usage: showroom <url-or-path> [draco-decoder-path]"),
    };
    let mut request = LoadRequest::new(url);
    if let Some(path) = args.next() {
        request = request.with_decoder_path(path);
    }

    let worker = DecodeWorker::new(WorkerConfig::default())
        .context("Failed to start decode worker")?;
    let response = worker.submit(request).wait();

    match &response {
        WorkerResponse::Success { data } => info!("Decoded {} meshes", data.len()),
        WorkerResponse::Failure { error } => info!("Decode failed: {error}"),
    }
    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
