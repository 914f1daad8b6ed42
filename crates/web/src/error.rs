use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::fmt;
use validator::ValidationErrors;
use workout_storage::error::StorageError;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    /// Storage failure with no domain meaning; never shown to clients
    Storage(StorageError),
    Validation(ValidationErrors),
    InvalidQuery(String),
    /// Body, query string or path that could not be deserialized
    Malformed { field: String, message: String },
    Conflict(String),
    NotFound(String),
    ReferentialIntegrity(String),
}

impl WebError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Storage(_) => "internal_error",
            Self::Validation(_) | Self::InvalidQuery(_) | Self::Malformed { .. } => {
                "validation_error"
            }
            Self::Conflict(_) => "conflict",
            Self::NotFound(_) => "not_found",
            Self::ReferentialIntegrity(_) => "referential_integrity",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) | Self::InvalidQuery(_) | Self::Malformed { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            // 303 for compatibility with existing clients, although 409 is the usual choice
            Self::Conflict(_) => StatusCode::SEE_OTHER,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ReferentialIntegrity(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::InvalidQuery(msg)
            | Self::Malformed { message: msg, .. }
            | Self::Conflict(msg)
            | Self::NotFound(msg)
            | Self::ReferentialIntegrity(msg) => f.write_str(msg),
        }
    }
}

fn validation_details(errors: &ValidationErrors) -> Vec<Value> {
    let mut details: Vec<Value> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                json!({
                    "field": field,
                    "message": e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
        })
        .collect();

    details.sort_by(|a, b| a["field"].as_str().cmp(&b["field"].as_str()));
    details
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let kind = self.kind();

        let body = match &self {
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "kind": kind,
                    "detail": "An internal error occurred"
                })
            }
            Self::Validation(errors) => {
                json!({
                    "kind": kind,
                    "detail": "Validation failed",
                    "errors": validation_details(errors)
                })
            }
            Self::InvalidQuery(msg) => {
                json!({
                    "kind": kind,
                    "detail": msg,
                    "errors": [{ "field": "query", "message": msg }]
                })
            }
            Self::Malformed { field, message } => {
                tracing::debug!(field = %field, "Rejected request: {}", message);
                json!({
                    "kind": kind,
                    "detail": message,
                    "errors": [{ "field": field, "message": message }]
                })
            }
            Self::Conflict(msg) | Self::NotFound(msg) | Self::ReferentialIntegrity(msg) => {
                json!({
                    "kind": kind,
                    "detail": msg
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

/// Field named by a serde error, either as "missing field `x`" or as the
/// `x: ...` path prefix axum adds to JSON data errors.
fn rejected_field(message: &str) -> Option<String> {
    if let Some((_, rest)) = message.split_once("field `") {
        return rest.split_once('`').map(|(field, _)| field.to_string());
    }

    let (_, detail) = message.split_once("target type: ")?;
    let (path, _) = detail.split_once(": ")?;
    let is_path = !path.is_empty()
        && path != "."
        && path
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));

    is_path.then(|| path.to_string())
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        let field = rejected_field(&message).unwrap_or_else(|| "body".to_string());
        Self::Malformed { field, message }
    }
}

impl From<QueryRejection> for WebError {
    fn from(rejection: QueryRejection) -> Self {
        let message = rejection.body_text();
        let field = rejected_field(&message).unwrap_or_else(|| "query".to_string());
        Self::Malformed { field, message }
    }
}

impl From<PathRejection> for WebError {
    fn from(rejection: PathRejection) -> Self {
        Self::Malformed {
            field: "path".to_string(),
            message: rejection.body_text(),
        }
    }
}

pub type WebResult<T> = Result<T, WebError>;
