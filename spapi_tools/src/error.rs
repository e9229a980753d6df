use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpApiError {
    #[error("Could not initialize the SP-API client: {0}")]
    Initialization(String),
    #[error("Could not refresh the LWA access token: {0}")]
    TokenRefresh(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize the response body: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}
