//! Liveness routes. These are polled by load balancers and by the frontend
//! before it submits species lists.

use axum::{response::Response, routing::get};
use serde::{Deserialize, Serialize};

use super::{format, Routes};
use crate::Result;

/// Text answered by the root liveness endpoint.
pub const HOME_MESSAGE: &str = "TaxonOWLConverter API is running!";

/// Represents the health status of the application.
#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub ok: bool,
}

/// Root liveness endpoint.
///
/// # Errors
/// This function always returns `Ok` with a fixed text body.
pub async fn home() -> Result<Response> {
    format::text(HOME_MESSAGE)
}

/// Check application ping endpoint
///
/// # Errors
/// This function always returns `Ok` with a JSON response indicating the
/// service is up.
pub async fn ping() -> Result<Response> {
    format::json(Health { ok: true })
}

/// Check application health endpoint
///
/// # Errors
/// This function always returns `Ok` with a JSON response indicating the
/// service is up.
pub async fn health() -> Result<Response> {
    format::json(Health { ok: true })
}

/// Defines and returns the liveness routes.
pub fn routes() -> Routes {
    Routes::new()
        .add("/", get(home))
        .add("/_ping", get(ping))
        .add("/_health", get(health))
}
