//! # FX Gateway Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Load the currency pair catalog (fatal on failure)
//! - Create the exchange service over the HTTP upstreams
//! - Start the HTTP server

mod config;

use anyhow::Context;
use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fx_hex::{ExchangeService, inbound::HttpServer};
use fx_types::{CatalogSource, PairCatalog};
use fx_upstream::{AwesomeApiClient, HttpCatalogSource, build_http_client};

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking).
    // The endpoint is read from OTEL_EXPORTER_OTLP_ENDPOINT.
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .context("failed to create OTLP span exporter")?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("fx-gateway"), provider))
}

/// Fetches the startup catalog. Any failure aborts startup.
async fn load_catalog(source: &HttpCatalogSource) -> anyhow::Result<PairCatalog> {
    let catalog = source
        .fetch_catalog()
        .await
        .with_context(|| format!("failed to load currency catalog from {}", source.url()))?;

    if catalog.is_empty() {
        tracing::warn!("Currency catalog is empty; every currency pair will be rejected");
    } else {
        tracing::info!("Loaded {} valid currency pairs", catalog.len());
    }

    Ok(catalog)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize OpenTelemetry tracing only when a collector is configured
    let otel = match config.otlp_endpoint {
        Some(_) => Some(init_tracer()?),
        None => None,
    };
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,fx_server=debug,fx_hex=debug,fx_upstream=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!("Starting FX gateway on port {}", config.port);
    tracing::info!("Using rate provider: {}", config.external_api_url);

    let http = build_http_client(config.upstream_timeout)?;

    // Load the pair catalog once; the gate uses this copy for the process lifetime
    let catalog_source = HttpCatalogSource::new(&config.currency_xml_url, http.clone());
    let catalog = load_catalog(&catalog_source).await?;

    let rates = AwesomeApiClient::new(&config.external_api_url, http)
        .with_api_key(config.api_key.clone())
        .with_retries(config.upstream_retries);

    // Create the exchange service
    let service = ExchangeService::new(rates, catalog_source);

    // Create and run the HTTP server
    let server = HttpServer::new(service, catalog);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_unreachable_catalog_aborts_startup() {
        let http = build_http_client(Duration::from_secs(1)).unwrap();
        let source = HttpCatalogSource::new("http://127.0.0.1:9/xml/available", http);

        let err = load_catalog(&source).await.unwrap_err();

        assert!(
            err.to_string()
                .contains("failed to load currency catalog from http://127.0.0.1:9/xml/available")
        );
    }
}
