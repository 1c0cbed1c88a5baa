//! Error types for the GraphQL client.

/// Errors that can occur when executing a query.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The HTTP request failed (network error, timeout, or unreadable/unparseable response).
    #[error("Request failed")]
    RequestFailed,
    /// The endpoint returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The server answered with GraphQL errors and no usable data.
    #[error("GraphQL error: {0}")]
    GraphQl(String),
}
