//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use fx_types::{CatalogSource, PairCatalog, RateProvider};

use super::guard::{GuardChain, PairGate, guard_middleware};
use super::handlers::{self, AppState};
use crate::{ExchangeService, openapi};

/// HTTP Server for the exchange-rate façade.
pub struct HttpServer<P: RateProvider, C: CatalogSource> {
    state: Arc<AppState<P, C>>,
    guards: Arc<GuardChain>,
}

impl<P: RateProvider, C: CatalogSource> HttpServer<P, C> {
    /// Creates a server whose pair gate checks against `catalog`.
    ///
    /// The catalog is the one loaded at startup; it is never refreshed.
    pub fn new(service: ExchangeService<P, C>, catalog: PairCatalog) -> Self {
        let guards = GuardChain::new().with(PairGate::new(Arc::new(catalog)));
        Self::with_guards(service, guards)
    }

    /// Creates a server with a custom guard chain.
    pub fn with_guards(service: ExchangeService<P, C>, guards: GuardChain) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            guards: Arc::new(guards),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health))
            .route("/openapi.json", get(openapi::openapi_json))
            .route(
                "/valid-combinations/",
                get(handlers::valid_combinations::<P, C>),
            )
            .route("/exchange-rate/", get(handlers::exchange_rate::<P, C>))
            .route(
                "/exchange-history/",
                get(handlers::exchange_history::<P, C>),
            )
            .route(
                "/exchange-last-days/",
                get(handlers::exchange_last_days::<P, C>),
            )
            .route(
                "/convert-currency/",
                get(handlers::convert_currency::<P, C>),
            )
            .layer(metrics)
            .layer(middleware::from_fn_with_state(
                self.guards.clone(),
                guard_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serves on an already bound listener with graceful shutdown.
    pub async fn serve(self, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
