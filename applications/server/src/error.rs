/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use watchbox_core::WatchboxError;
use watchbox_queue::QueueError;
use watchbox_storage::StorageError;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Missing parameters: {0}")]
    MissingParameters(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("State conflict: {0}")]
    Conflict(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Whether this failure may succeed on retry.
    ///
    /// The command processor consumes a command's retry budget only on
    /// transient failures; deterministic rejections are dropped immediately.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ServerError::Catalog(_)
                | ServerError::Database(_)
                | ServerError::Internal(_)
                | ServerError::Io(_)
        )
    }
}

impl From<WatchboxError> for ServerError {
    fn from(err: WatchboxError) -> Self {
        match err {
            WatchboxError::BoxNotFound(_)
            | WatchboxError::VideoNotFound(_)
            | WatchboxError::ItemNotFound(_)
            | WatchboxError::PlaylistNotFound(_) => ServerError::NotFound(err.to_string()),
            WatchboxError::BoxClosed(_) | WatchboxError::InconsistentQueue(_) => {
                ServerError::Conflict(err.to_string())
            }
            WatchboxError::InvalidInput(msg) => ServerError::BadRequest(msg),
            WatchboxError::Catalog(msg) => ServerError::Catalog(msg),
            WatchboxError::Storage(msg) => ServerError::Database(msg),
            WatchboxError::Io(e) => ServerError::Io(e),
            WatchboxError::Serialization(e) => ServerError::Internal(e.to_string()),
        }
    }
}

impl From<StorageError> for ServerError {
    fn from(err: StorageError) -> Self {
        // Route through the core taxonomy so not-found keeps its meaning
        ServerError::from(WatchboxError::from(err))
    }
}

impl From<QueueError> for ServerError {
    fn from(err: QueueError) -> Self {
        ServerError::from(WatchboxError::from(err))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::MissingParameters(_) => (
                StatusCode::PRECONDITION_FAILED,
                "MISSING_PARAMETERS".to_string(),
            ),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ServerError::Catalog(ref msg) => {
                tracing::error!("Catalog error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Catalog error".to_string())
            }
            ServerError::Database(ref msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
