//! Writes the API document to a file.
//!
//! ```text
//! generate-openapi [OUTPUT]      (default: open-api.json)
//! ```
//!
//! Nothing is written when generation fails.

use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assets_api::config::OpenApiConfig;
use assets_api::openapi::{self, DocumentInfo};
use assets_api::routes::endpoint_specs;

const DEFAULT_OUTPUT: &str = "open-api.json";

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "generate_openapi=info,assets_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run() {
        tracing::error!(error = ?e, "Failed to generate API document");
        return Err(e);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let config = OpenApiConfig::from_env().context("Invalid document configuration")?;
    let document = openapi::generate(&endpoint_specs(), DocumentInfo::from_config(&config))
        .context("Invalid endpoint declarations")?;
    let json = serde_json::to_string_pretty(&document).context("Failed to serialize document")?;

    std::fs::write(&output, json)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!("Created {}", output.display());
    Ok(())
}
