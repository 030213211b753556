//! Manage web server routing
//!
//! Controllers expose a [`Routes`] value describing their paths; the
//! application merges them into one [`axum::Router`] in [`crate::app`].
//!
//! # Example
//!
//! ```rust
//! use axum::routing::get;
//! use taxon_owl::controller::{format, Routes};
//! use taxon_owl::Result;
//!
//! async fn hello() -> Result<axum::response::Response> {
//!     format::text("hello")
//! }
//!
//! let routes = Routes::new().add("/hello", get(hello));
//! assert_eq!(routes.uris(), vec!["/hello"]);
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::MethodRouter,
    Router,
};
use serde::{Deserialize, Serialize};

pub use self::extractor::Json;
use crate::{app::AppContext, errors::Error};

mod extractor;
pub mod format;
pub mod monitoring;
pub mod owl;

/// Error payload returned to clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub error: String,
}

impl ErrorDetail {
    #[must_use]
    pub fn new<T: Into<String>>(error: T) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl IntoResponse for Error {
    /// Convert an `Error` into an HTTP response.
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(
                error.msg = %self,
                error.details = ?self,
                "controller_error"
            );
        } else {
            tracing::debug!(error.msg = %self, "request rejected");
        }

        (status, axum::Json(ErrorDetail::new(self.public_message()))).into_response()
    }
}

#[derive(Clone)]
pub struct Handler {
    pub uri: String,
    pub method: MethodRouter<AppContext>,
}

/// A set of routes contributed by one controller.
#[derive(Clone, Default)]
pub struct Routes {
    pub prefix: Option<String>,
    pub handlers: Vec<Handler>,
}

impl Routes {
    /// Creates a new [`Routes`] instance with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a prefix for the routes. Every route added to the instance is
    /// mounted under it.
    #[must_use]
    pub fn prefix(mut self, uri: &str) -> Self {
        self.prefix = Some(uri.to_owned());
        self
    }

    /// Adds a route handler.
    #[must_use]
    pub fn add(mut self, uri: &str, method: MethodRouter<AppContext>) -> Self {
        self.handlers.push(Handler {
            uri: uri.to_owned(),
            method,
        });
        self
    }

    /// Appends the handlers of `other`, keeping its own prefix.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        let prefix = other.prefix.clone();
        self.handlers.extend(other.handlers.into_iter().map(|handler| Handler {
            uri: join_uri(prefix.as_deref(), &handler.uri),
            method: handler.method,
        }));
        self
    }

    /// Full paths of every handler.
    #[must_use]
    pub fn uris(&self) -> Vec<String> {
        self.handlers
            .iter()
            .map(|handler| join_uri(self.prefix.as_deref(), &handler.uri))
            .collect()
    }

    /// Mounts every handler on a router bound to `ctx`.
    pub fn to_router(self, ctx: AppContext) -> Router {
        let prefix = self.prefix.clone();
        self.handlers
            .into_iter()
            .fold(Router::new(), |router, handler| {
                router.route(&join_uri(prefix.as_deref(), &handler.uri), handler.method)
            })
            .with_state(ctx)
    }
}

fn join_uri(prefix: Option<&str>, uri: &str) -> String {
    match prefix {
        None => uri.to_owned(),
        Some(prefix) => {
            let prefix = prefix.trim_end_matches('/');
            if uri == "/" {
                if prefix.is_empty() {
                    "/".to_owned()
                } else {
                    prefix.to_owned()
                }
            } else {
                format!("{prefix}/{}", uri.trim_start_matches('/'))
            }
        }
    }
}
