//! Error responses.
//!
//! # Responsibilities
//! - Render failures as `{"error": "<description>"}` JSON bodies
//! - Flatten an error and its sources into one readable description
//!
//! # Design Decisions
//! - One body shape for every failure; the status code carries the class
//! - The description is never empty

use std::error::Error;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// JSON body returned for failed requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let error = if message.trim().is_empty() {
            "unknown error".to_string()
        } else {
            message
        };
        Self { error }
    }
}

/// Build an error response with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

/// Display text of `err` followed by each source, joined with ": ".
/// Sources whose text is already contained in the previous level are skipped.
pub fn describe(err: &dyn Error) -> String {
    let mut description = err.to_string();
    let mut last = description.clone();
    let mut source = err.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !last.contains(&text) {
            description.push_str(": ");
            description.push_str(&text);
        }
        last = text;
        source = cause.source();
    }

    description
}
