//! Conditional static file serving.

use std::path::{Path, PathBuf};

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::Response,
};
use percent_encoding::percent_decode_str;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::files::{conditional, listing, path};
use crate::http::response::{
    error_page, AD_AUCTION_ALLOWED, FENCED_FRAME, SUPPORTS_LOADING_MODE, TEXT_HTML, TRUE,
};

const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Serves files beneath a document root with If-Modified-Since support.
#[derive(Debug, Clone)]
pub struct FileServer {
    root: PathBuf,
}

impl FileServer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Answer a GET or HEAD request.
    pub async fn serve(&self, method: &Method, uri: &Uri, headers: &HeaderMap) -> Response {
        let resolved = path::resolve(&self.root, uri.path());
        let mut file_path = resolved.path;

        if tokio::fs::metadata(&file_path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
        {
            if !uri.path().ends_with('/') {
                return redirect_to_directory(uri);
            }
            match find_index(&file_path).await {
                Some(index) => file_path = index,
                None => return self.list_directory(method, uri, &file_path).await,
            }
        } else if resolved.trailing_slash {
            return error_page(method, StatusCode::NOT_FOUND, "File not found");
        }

        // Every early return below drops `file`, closing it.
        let file = match File::open(&file_path).await {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!(path = %file_path.display(), error = %e, "Open failed");
                return error_page(method, StatusCode::NOT_FOUND, "File not found");
            }
        };
        let metadata = match file.metadata().await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(path = %file_path.display(), error = %e, "Stat failed");
                return error_page(method, StatusCode::NOT_FOUND, "File not found");
            }
        };
        let modified = match metadata.modified() {
            Ok(modified) => modified,
            Err(e) => {
                tracing::warn!(path = %file_path.display(), error = %e, "No modification time");
                return error_page(method, StatusCode::NOT_FOUND, "File not found");
            }
        };

        if conditional::is_not_modified(headers, modified) {
            tracing::debug!(path = %file_path.display(), "Not modified");
            return status_only(StatusCode::NOT_MODIFIED);
        }

        let content_type = mime_guess::from_path(&file_path).first_or_octet_stream();
        let last_modified = conditional::format_http_date(modified);

        let body = if method == Method::HEAD {
            drop(file);
            Body::empty()
        } else {
            Body::from_stream(ReaderStream::new(file))
        };

        let mut response = Response::new(body);
        let response_headers = response.headers_mut();
        response_headers.insert(SUPPORTS_LOADING_MODE, FENCED_FRAME);
        if let Ok(value) = HeaderValue::from_str(content_type.essence_str()) {
            response_headers.insert(header::CONTENT_TYPE, value);
        }
        response_headers.insert(header::CONTENT_LENGTH, HeaderValue::from(metadata.len()));
        response_headers.insert(AD_AUCTION_ALLOWED, TRUE);
        if let Ok(value) = HeaderValue::from_str(&last_modified) {
            response_headers.insert(header::LAST_MODIFIED, value);
        }
        response
    }

    async fn list_directory(&self, method: &Method, uri: &Uri, dir: &Path) -> Response {
        let entries = match listing::read_entries(dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "Directory listing failed");
                return error_page(method, StatusCode::NOT_FOUND, "No permission to list directory");
            }
        };

        let display_path = percent_decode_str(uri.path()).decode_utf8_lossy();
        let page = listing::render(&display_path, &entries);
        let length = page.len();

        let body = if method == Method::HEAD {
            Body::empty()
        } else {
            Body::from(page)
        };
        let mut response = Response::new(body);
        response.headers_mut().insert(header::CONTENT_TYPE, TEXT_HTML);
        response
            .headers_mut()
            .insert(header::CONTENT_LENGTH, HeaderValue::from(length));
        response
    }
}

async fn find_index(dir: &Path) -> Option<PathBuf> {
    for name in INDEX_FILES {
        let candidate = dir.join(name);
        if tokio::fs::metadata(&candidate)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
        {
            return Some(candidate);
        }
    }
    None
}

/// 301 to the same path with a trailing slash, keeping the query.
fn redirect_to_directory(uri: &Uri) -> Response {
    let mut location = format!("{}/", uri.path());
    if let Some(query) = uri.query().filter(|q| !q.is_empty()) {
        location.push('?');
        location.push_str(query);
    }

    let mut response = status_only(StatusCode::MOVED_PERMANENTLY);
    if let Ok(value) = HeaderValue::from_str(&location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
        .headers_mut()
        .insert(header::CONTENT_LENGTH, HeaderValue::from(0));
    response
}

fn status_only(status: StatusCode) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}
