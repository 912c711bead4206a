//! The response envelope shared by every endpoint.
//!
//! On the wire every body is
//! `{ success, data?, error?, details? }`. In code the two shapes are
//! separate variants so a handler cannot produce a success without data or
//! a failure without a message.

use crate::error::ServiceError;
use crate::schema::ValidationIssue;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Body of every API response.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success(T),
    Failure {
        error: String,
        details: Option<Vec<ValidationIssue>>,
    },
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ApiResponse::Success(data) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
                map.end()
            }
            ApiResponse::Failure { error, details } => {
                let len = if details.is_some() { 3 } else { 2 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                if let Some(details) = details {
                    map.serialize_entry("details", details)?;
                }
                map.end()
            }
        }
    }
}

/// Payload of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedMessage {
    pub message: &'static str,
}

impl DeletedMessage {
    pub fn new() -> Self {
        Self {
            message: "Contact deleted successfully",
        }
    }
}

impl Default for DeletedMessage {
    fn default() -> Self {
        Self::new()
    }
}

/// An envelope paired with its HTTP status.
#[derive(Debug)]
pub struct ApiReply<T> {
    pub status: StatusCode,
    pub body: ApiResponse<T>,
}

impl<T> ApiReply<T> {
    pub fn ok(data: T) -> Self {
        Self::success(StatusCode::OK, data)
    }

    pub fn success(status: StatusCode, data: T) -> Self {
        Self {
            status,
            body: ApiResponse::Success(data),
        }
    }

    pub fn failure(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiResponse::Failure {
                error: error.into(),
                details: None,
            },
        }
    }

    /// Map a service error onto its status code and client-safe message.
    pub fn from_error(err: &ServiceError) -> Self {
        match err {
            ServiceError::Validation(issues) => Self {
                status: StatusCode::BAD_REQUEST,
                body: ApiResponse::Failure {
                    error: err.to_string(),
                    details: Some(issues.clone()),
                },
            },
            ServiceError::InvalidBody(_) => Self::failure(StatusCode::BAD_REQUEST, err.to_string()),
            ServiceError::NotFound => Self::failure(StatusCode::NOT_FOUND, err.to_string()),
            ServiceError::OperationFailed(message) => {
                Self::failure(StatusCode::INTERNAL_SERVER_ERROR, message.clone())
            }
        }
    }
}

impl<T: Serialize> IntoResponse for ApiReply<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
