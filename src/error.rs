use std::fmt;

use axum::{
    http::{header::CACHE_CONTROL, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::config::CACHE_CONTROL_ERROR;
use crate::middleware::RequestId;

/// Which measurement a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    Weight,
    Height,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Weight => write!(f, "weight"),
            Parameter::Height => write!(f, "height"),
        }
    }
}

/// The limit an out-of-range measurement violated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    AtMost { limit: f64, unit: &'static str },
    /// Height so small that weight / height² is not a finite number
    TooSmall,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::AtMost { limit, unit } => write!(f, "must not exceed {} {}", limit, unit),
            Bound::TooSmall => write!(f, "too small to compute a BMI"),
        }
    }
}

/// Reasons a measurement is rejected. Every variant is a client error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required; both weight and height must be provided")]
    MissingParameter(Parameter),

    #[error("{0} must be a number")]
    NonNumericParameter(Parameter),

    #[error("{0} must be greater than 0")]
    NonPositiveValue(Parameter),

    #[error("{parameter} is out of range: {bound}")]
    OutOfRange { parameter: Parameter, bound: Bound },

    #[error("Could not parse the request; check the data format ({0})")]
    MalformedRequestBody(String),
}

impl ValidationError {
    /// Stable machine-readable identifier.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingParameter(_) => "missing_parameter",
            ValidationError::NonNumericParameter(_) => "non_numeric_parameter",
            ValidationError::NonPositiveValue(_) => "non_positive_value",
            ValidationError::OutOfRange { .. } => "out_of_range",
            ValidationError::MalformedRequestBody(_) => "malformed_request_body",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::MissingParameter(_) => "Missing parameters",
            ValidationError::NonNumericParameter(_) | ValidationError::NonPositiveValue(_) => {
                "Invalid values"
            }
            ValidationError::OutOfRange { .. } => "Value out of range",
            ValidationError::MalformedRequestBody(_) => "Invalid request",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No resource at {0}")]
    NotFound(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(e) => e.code(),
            AppError::NotFound(_) => "not_found",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AppError::Validation(e) => e.title(),
            AppError::NotFound(_) => "Not found",
        }
    }
}

/// An `AppError` tagged with the request it belongs to.
#[derive(Debug)]
pub struct AppErrorResponse {
    pub error: AppError,
    pub request_id: Option<Uuid>,
}

impl From<AppError> for AppErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error,
            request_id: None,
        }
    }
}

impl From<ValidationError> for AppErrorResponse {
    fn from(error: ValidationError) -> Self {
        AppError::from(error).into()
    }
}

#[derive(Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: ErrorBody,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    code: &'static str,
    title: &'static str,
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
}

impl IntoResponse for AppErrorResponse {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let envelope = ErrorEnvelope {
            success: false,
            error: ErrorBody {
                code: self.error.code(),
                title: self.error.title(),
                detail: self.error.to_string(),
                request_id: self.request_id.map(|id| id.to_string()),
            },
        };

        (status, [(CACHE_CONTROL, CACHE_CONTROL_ERROR)], Json(envelope)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        AppErrorResponse::from(self).into_response()
    }
}

/// Attach the current request ID to an error on its way out of a handler.
pub trait ResultExt<T> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, AppErrorResponse>;
}

impl<T, E: Into<AppError>> ResultExt<T> for Result<T, E> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, AppErrorResponse> {
        self.map_err(|e| {
            let error = e.into();
            tracing::debug!(
                request_id = %request_id.0,
                code = error.code(),
                detail = %error,
                "Request rejected"
            );
            AppErrorResponse {
                error,
                request_id: Some(request_id.0),
            }
        })
    }
}
