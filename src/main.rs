use std::process::ExitCode;

use chrono::Utc;
use tracing_subscriber::EnvFilter;

use pulsescore::{Config, DashboardSnapshot, Scorer};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pulsescore=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load("pulsescore.toml");
    tracing::debug!("Config: {:?}", config);

    let snapshot_path = std::env::args().nth(1).unwrap_or_else(|| "snapshot.json".to_string());
    let snapshot = match DashboardSnapshot::from_path(&snapshot_path) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let today = snapshot.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let report = Scorer::new(config).report(&snapshot, today);
    tracing::info!(
        "Scored snapshot as of {today}: {} insights, {} tracks",
        report.insights.len(),
        report.tracks.len()
    );

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to serialize report: {e}");
            ExitCode::FAILURE
        }
    }
}
