//! Response helpers shared by controllers.

use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::Result;

/// Returns a JSON response.
///
/// # Errors
///
/// Never fails. The `Result` lets handlers return it directly.
pub fn json<T: Serialize>(t: T) -> Result<Response> {
    Ok(axum::Json(t).into_response())
}

/// Returns a plain text response.
///
/// # Errors
///
/// Never fails.
pub fn text(t: &str) -> Result<Response> {
    Ok(t.to_string().into_response())
}
