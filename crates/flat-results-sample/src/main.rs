//! # Flat Results Sample
//!
//! Serves a handful of simulated catalog requests concurrently and logs the
//! response bodies.
//!
//! ## 📚 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -p flat-results-sample
//!
//! # Show every mapping edit and conversion
//! RUST_LOG=debug cargo run -p flat-results-sample
//! ```

use flat_results::format::FormatterConfig;
use flat_results::tracing::setup_tracing;
use flat_results::Registry;
use flat_results_sample::catalog::Catalog;
use flat_results_sample::controllers::CatalogApi;
use flat_results_sample::mapping;
use std::sync::Arc;
use tracing::{error, info, Instrument};

const REQUESTS: [&str; 6] = [
    "/products",
    "/products/1?fields=name,category.name",
    "/products/9",
    "/categories",
    "/categories/2?includeRelatedProducts=true",
    "/categories/1?fields=name,description",
];

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting catalog sample");

    let registry = Arc::new(Registry::new());
    mapping::configure(&registry);
    let api = CatalogApi::new(
        Arc::new(Catalog::seeded()),
        registry,
        FormatterConfig::default(),
    );

    let tasks: Vec<_> = REQUESTS
        .iter()
        .map(|&target| {
            let api = api.clone();
            let span = tracing::info_span!("request", path = target);
            tokio::spawn(
                async move {
                    let response = api.handle(target);
                    if response.is_success() {
                        info!(status = response.status, body = %response.body, "Response");
                    } else {
                        error!(status = response.status, body = %response.body, "Response");
                    }
                    response.status
                }
                .instrument(span),
            )
        })
        .collect();

    for task in tasks {
        task.await.map_err(|e| e.to_string())?;
    }

    info!("Sample completed");
    Ok(())
}
