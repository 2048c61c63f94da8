// src/bin/download_data.rs

use anyhow::Result;
use museumgeo::{config, fetch::download::download_csv};
use reqwest::Client;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let client = Client::new();
    let dest = config::source_csv_path();

    // Failures are reported, never propagated: a failed fetch is a no-op.
    match download_csv(&client, config::SOURCE_URL, &dest).await {
        Ok(bytes) => info!(bytes, dest = %dest.display(), "download successful"),
        Err(e) => error!("an error occurred during the download: {:#}", e),
    }

    Ok(())
}
