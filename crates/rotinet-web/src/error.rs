//! Error responses of the views and the JSON API.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use minijinja::context;
use rotinet_common::RotinetError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::link::NETWORK_PATH;
use crate::templates;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Domain(Arc<RotinetError>),

    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
}

impl From<RotinetError> for ViewError {
    fn from(err: RotinetError) -> Self {
        Self::Domain(Arc::new(err))
    }
}

/// Cached table failures arrive shared.
impl From<Arc<RotinetError>> for ViewError {
    fn from(err: Arc<RotinetError>) -> Self {
        Self::Domain(err)
    }
}

impl ViewError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Domain(err) => status_for(err),
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), "{self}");
        } else {
            warn!(status = status.as_u16(), "{self}");
        }
    }
}

pub fn status_for(err: &RotinetError) -> StatusCode {
    match err {
        RotinetError::MissingResource { .. } | RotinetError::Schema { .. } | RotinetError::EmptyTable => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        RotinetError::UnknownNode(_) => StatusCode::NOT_FOUND,
        RotinetError::NoQueryParameter(_) => StatusCode::BAD_REQUEST,
        RotinetError::Csv(_) | RotinetError::Io(_) | RotinetError::Config(_) | RotinetError::Other(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        let message = self.to_string();
        let page = templates::render(
            "error.html",
            context! {
                title => status.canonical_reason().unwrap_or("Error"),
                status => status.as_u16(),
                message => &message,
                back_url => NETWORK_PATH,
            },
        );
        match page {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                error!("Failed to render error page: {err}");
                (status, message).into_response()
            }
        }
    }
}

/// JSON `{ "error": … }` with the same status mapping as [`ViewError`].
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ViewError> for ApiError {
    fn from(err: ViewError) -> Self {
        err.log();
        Self { status: err.status(), message: err.to_string() }
    }
}

impl From<RotinetError> for ApiError {
    fn from(err: RotinetError) -> Self {
        ViewError::from(err).into()
    }
}

impl From<Arc<RotinetError>> for ApiError {
    fn from(err: Arc<RotinetError>) -> Self {
        ViewError::from(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_status_mapping() {
        let missing = RotinetError::MissingResource { path: PathBuf::from("file.txt") };
        assert_eq!(status_for(&missing), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_for(&RotinetError::EmptyTable), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_for(&RotinetError::UnknownNode("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&RotinetError::NoQueryParameter("node")), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&RotinetError::Config("bad".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_api_error_keeps_message() {
        let err = ApiError::from(RotinetError::UnknownNode("geneZ".into()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Node 'geneZ' not found in data.");
    }

    #[test]
    fn test_view_error_response_status() {
        let response = ViewError::from(RotinetError::NoQueryParameter("node")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
