use axum::{extract::State, response::Response, routing::post};
use serde::{Deserialize, Serialize};

use crate::{
    app::AppContext,
    controller::{format, Json, Routes},
    Error, Result,
};

/// Message returned when a request carries no usable species name.
pub const NO_SPECIES: &str = "No species provided";

#[derive(Debug, Default, Deserialize)]
pub struct GenerateOwlRequest {
    #[serde(default)]
    pub species: Option<Vec<String>>,
}

impl GenerateOwlRequest {
    /// Trimmed, non-blank species names in request order.
    #[must_use]
    pub fn species_names(&self) -> Vec<&str> {
        self.species
            .iter()
            .flatten()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateOwlResponse {
    pub owl: String,
}

/// Builds the ontology of the posted species list.
///
/// # Errors
/// Returns [`Error::BadRequest`] when the list is missing or holds no name.
/// Unrecognized names never fail the request.
pub async fn generate_owl(
    State(ctx): State<AppContext>,
    Json(payload): Json<GenerateOwlRequest>,
) -> Result<Response> {
    tracing::debug!(species = ?payload.species, "received ontology request");

    let names = payload.species_names();
    if names.is_empty() {
        return Err(Error::BadRequest(NO_SPECIES.to_string()));
    }

    let owl = ctx.generator.generate(&names).await;
    tracing::debug!(bytes = owl.len(), "generated ontology document");

    format::json(GenerateOwlResponse { owl })
}

pub fn routes() -> Routes {
    Routes::new().add("/generate_owl", post(generate_owl))
}
