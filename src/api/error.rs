// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::FinError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failure surfaced to HTTP callers as a status code and a plain-text body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }
}

impl From<FinError> for ApiError {
    fn from(e: FinError) -> Self {
        let status = match &e {
            FinError::InvalidType(_) | FinError::InvalidDate(_) => StatusCode::UNPROCESSABLE_ENTITY,
            FinError::UnknownFormat(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %e, "request failed");
        }
        ApiError::new(status, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}
