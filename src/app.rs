//! Application context and HTTP server wiring.

use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    controller::{monitoring, owl, Routes},
    ontology::{OwlGenerator, TaxonomyHandle},
    Error, Result,
};

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppContext {
    /// Configuration the application was started with.
    pub config: Config,
    /// Builds ontologies out of species names.
    pub generator: OwlGenerator,
}

impl AppContext {
    /// Builds a context talking to the configured taxonomy service.
    pub fn from_config(config: Config) -> Result<Self> {
        let generator = OwlGenerator::from_config(&config.taxonomy, &config.ontology)?;
        Ok(Self { config, generator })
    }

    /// Builds a context around an explicit taxonomy client.
    #[must_use]
    pub fn with_client(config: Config, client: Arc<TaxonomyHandle>) -> Self {
        let generator = OwlGenerator::new(client, config.ontology.clone());
        Self { config, generator }
    }
}

/// Every route the service exposes.
#[must_use]
pub fn routes() -> Routes {
    Routes::new()
        .merge(monitoring::routes())
        .merge(owl::routes())
}

/// Builds the application router: routes, CORS and request tracing.
#[must_use]
pub fn router(ctx: AppContext) -> Router {
    routes()
        .to_router(ctx)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(ctx: AppContext) -> Result<()> {
    let address = format!("{}:{}", ctx.config.server.binding, ctx.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::from)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(err.msg = %err, "failed to install the Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
