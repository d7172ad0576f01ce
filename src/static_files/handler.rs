//! Static file serving.
//!
//! # Responsibilities
//! - Join the request path onto the configured root
//! - Map filesystem failures to 403 / 404 / 500
//! - Read up to the file buffer size and return it as a 200
//!
//! # Design Decisions
//! - The whole request path (including `/static`) is joined onto the root
//! - No traversal sanitization beyond what the filesystem enforces
//! - Files larger than the buffer are truncated

use std::io;
use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;

use crate::config::ServerConfig;
use crate::http::response::Response;

/// Serves files from a single root directory.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    buffer_bytes: usize,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>, buffer_bytes: usize) -> Self {
        Self {
            root: root.into(),
            buffer_bytes,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.static_files.root.clone(), config.limits.file_buffer_bytes)
    }

    /// Resolve `request_path` under the root and produce the response.
    pub async fn serve(&self, request_path: &str) -> Response {
        let file_path = match self.resolve(request_path).await {
            Ok(path) => path,
            Err(detail) => {
                tracing::debug!(path = %request_path, detail, "Static path composition failed");
                return Response::new(404, "Not Found", format!("<h1>404 Not Found: {detail}</h1>"));
            }
        };

        let metadata = match tokio::fs::metadata(&file_path).await {
            Ok(m) => m,
            Err(e) => return failure_response(&file_path, &e),
        };
        if metadata.is_dir() {
            return Response::not_found();
        }

        let file = match tokio::fs::File::open(&file_path).await {
            Ok(f) => f,
            Err(e) => return failure_response(&file_path, &e),
        };

        let limit = self.buffer_bytes as u64;
        let mut contents = Vec::with_capacity(self.buffer_bytes.min(metadata.len() as usize));
        if let Err(e) = file.take(limit).read_to_end(&mut contents).await {
            tracing::warn!(file = %file_path.display(), error = %e, "Failed to read static file");
            return Response::internal_error("Failed to Read File");
        }

        if metadata.len() > limit {
            tracing::warn!(
                file = %file_path.display(),
                size = metadata.len(),
                limit,
                "Static file truncated to buffer size"
            );
        }

        Response::ok(contents).with_content_type(content_type_for(&file_path))
    }

    async fn resolve(&self, request_path: &str) -> Result<PathBuf, &'static str> {
        if request_path.contains('\0') {
            return Err("Invalid Path");
        }
        let root = tokio::fs::canonicalize(&self.root)
            .await
            .map_err(|_| "Static Root Unavailable")?;
        Ok(root.join(request_path.trim_start_matches('/')))
    }
}

fn failure_response(path: &Path, err: &io::Error) -> Response {
    tracing::debug!(file = %path.display(), error = %err, "Static file unavailable");
    match err.kind() {
        io::ErrorKind::PermissionDenied => Response::forbidden(),
        _ => Response::not_found(),
    }
}

/// Guess a content type from the file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}
