use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use bindery_engine::StoreError;
use thiserror::Error;

use crate::sync::SyncError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(#[from] StoreError),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("A reconciliation pass is already running")]
    SyncInProgress,
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl From<SyncError> for ServerError {
    fn from(e: SyncError) -> Self {
        match e {
            SyncError::PassInProgress => ServerError::SyncInProgress,
            SyncError::Store(e) => ServerError::BackendError(e),
        }
    }
}

impl ServerError {
    /// The short, human-readable summary that accompanies the error detail in JSON responses.
    fn message(&self) -> &'static str {
        match self {
            Self::InitializeError(_) => "The server could not be initialized",
            Self::BackendError(_) => "The local store reported an error",
            Self::InvalidRequestBody(_) => "The request body could not be used",
            Self::IOError(_) => "An I/O error happened in the server",
            Self::SyncInProgress => "A reconciliation pass is already running. Try again once it has finished",
            Self::Unspecified(_) => "Something went wrong",
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::SyncInProgress => StatusCode::CONFLICT,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "message": self.message(), "error": self.to_string() }).to_string())
    }
}
