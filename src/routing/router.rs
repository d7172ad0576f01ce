//! Route classification and dispatch.
//!
//! # Responsibilities
//! - Classify a request by its first path segment
//! - Delegate to the static handler or the forwarder
//! - Answer everything else with 404
//!
//! # Design Decisions
//! - Classification is a pure function of the path; there is no routing table
//! - The router performs no I/O itself

use crate::config::ServerConfig;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::static_files::StaticFiles;
use crate::upstream::Forwarder;

const API_PREFIX: &str = "/api";

/// Where a request goes, derived from its first path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Static,
    Api,
    Other,
}

impl Route {
    /// Classify a path. Anything not slash-prefixed is `Other`.
    pub fn classify(path: &str) -> Self {
        match first_segment(path) {
            Some("static") => Route::Static,
            Some("api") => Route::Api,
            _ => Route::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Static => "static",
            Route::Api => "api",
            Route::Other => "other",
        }
    }
}

/// Text between the leading `/` and the next `/` (or the end).
pub fn first_segment(path: &str) -> Option<&str> {
    let rest = path.strip_prefix('/')?;
    rest.split('/').next()
}

/// Path handed to the backend: the `/api` prefix removed, `/` if nothing remains.
pub fn backend_path(path: &str) -> &str {
    match path.strip_prefix(API_PREFIX) {
        Some("") | None => "/",
        Some(rest) => rest,
    }
}

/// Dispatches requests to the static handler, the forwarder or a 404.
#[derive(Debug, Clone)]
pub struct Router {
    static_files: StaticFiles,
    forwarder: Forwarder,
}

impl Router {
    pub fn new(static_files: StaticFiles, forwarder: Forwarder) -> Self {
        Self {
            static_files,
            forwarder,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(StaticFiles::from_config(config), Forwarder::from_config(config))
    }

    /// Produce exactly one response for `request`.
    pub async fn handle(&self, request: &Request) -> Response {
        let route = Route::classify(&request.path);
        tracing::debug!(route = route.as_str(), path = %request.path, "Route classified");

        match route {
            Route::Static => self.static_files.serve(&request.path).await,
            Route::Api => {
                let path = backend_path(&request.path);
                match self.forwarder.forward(&request.method, path, &request.body).await {
                    Ok(response) => response,
                    Err(e) => {
                        tracing::warn!(method = %request.method, path, error = %e, "Forwarding failed");
                        e.to_response()
                    }
                }
            }
            Route::Other => Response::not_found(),
        }
    }
}
