use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use std::collections::HashMap;

use crate::error::ApiError;

/// JSON request body with this API's rejection rules: a missing or non-JSON
/// Content-Type and unparseable bodies are 400, bodies that parse but do not
/// fit `T` are 422.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(ApiError::bad_request("Content-Type must be application/json"));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        decode(&bytes).map(JsonBody)
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Deserialize a body, splitting syntax failures from schema failures
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|e| match e.classify() {
        Category::Data => schema_error(&e),
        Category::Syntax | Category::Eof | Category::Io => {
            ApiError::invalid_json(format!("Malformed JSON body: {}", e))
        }
    })
}

/// 422 for a body that is valid JSON but does not match the create schema
pub fn schema_error(err: &serde_json::Error) -> ApiError {
    let mut field_errors = HashMap::new();
    field_errors.insert("body".to_string(), err.to_string());
    ApiError::unprocessable_entity("Request body does not match the expected schema", field_errors)
}
