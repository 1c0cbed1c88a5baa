//! Shared query infrastructure: the [`Query`] trait and request body rendering.

use serde::Serialize;
use serde_json::Value;

/// Trait implemented by all GraphQL operations this client can send.
pub trait Query {
    /// Name of the operation inside [`Query::document`].
    fn operation_name(&self) -> &'static str;

    /// The GraphQL document text.
    fn document(&self) -> &'static str;

    /// Variables bound to the document for this request.
    fn variables(&self) -> Value;

    /// Builds the JSON body POSTed to the endpoint.
    fn to_request_body(&self) -> RequestBody<'_> {
        RequestBody {
            operation_name: self.operation_name(),
            query: self.document(),
            variables: self.variables(),
        }
    }
}

/// Standard GraphQL-over-HTTP request body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody<'a> {
    pub operation_name: &'a str,
    pub query: &'a str,
    pub variables: Value,
}
