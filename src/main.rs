use anyhow::Result;
use museumgeo::{config, process};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) convert ──────────────────────────────────────────────────
    let input = config::source_csv_path();
    let output = config::output_geojson_path();
    info!(input = %input.display(), output = %output.display(), "converting");

    match process::convert_csv_to_geojson(&input, &output) {
        Ok(summary) => info!(
            converted = summary.converted,
            skipped = summary.skipped,
            "done"
        ),
        Err(e) if process::is_not_found(&e) => {
            error!("the file '{}' was not found", input.display())
        }
        Err(e) => error!("an unexpected error occurred: {:#}", e),
    }

    Ok(())
}
