use anyhow::{Context, Result};
use clap::Parser;
use promdruid::cli::Cli;
use promdruid::ingestion::KafkaIngestionSpec;
use promdruid::prometheus_repo::PrometheusRepo;
use promdruid::{labels, output};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the spec, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app_config = cli.load_config()?;

    let repo = PrometheusRepo::connect(&app_config.prometheus)
        .context("create prometheus client")?;
    tracing::info!(
        "querying {} for {}",
        repo.base_url(),
        app_config.prometheus.query
    );
    let outcome = repo
        .query(&app_config.prometheus.query)
        .await
        .context("query prometheus")?;

    let labels = labels::extract_unique_labels(&outcome.result)?;
    tracing::info!("found {} unique labels", labels.len());

    let spec = KafkaIngestionSpec::build(&app_config.druid.ingestion_options(labels));
    let document = output::render(&spec).context("serialize ingestion spec")?;
    output::write(&document, &app_config.output).context("write ingestion spec")?;
    Ok(())
}
