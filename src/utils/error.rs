use crate::domain::model::EntityKind;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Operation not supported for {kind}")]
    Unsupported { kind: EntityKind },

    #[error("PowerOn rejected {action} with status {status}: {errors}")]
    RemoteOperation {
        action: String,
        status: i32,
        errors: TransactionErrors,
    },

    #[error("SOAP fault from {action}: [{code}] {message}")]
    SoapFault {
        action: String,
        code: String,
        message: String,
    },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("PowerOn returned HTTP {status} for {action}")]
    HttpStatus { action: String, status: u16 },

    #[error("XML error: {message}")]
    XmlError { message: String },

    #[error("Malformed response for {action}: {message}")]
    MalformedResponse { action: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, GatewayError>;

impl GatewayError {
    pub fn xml(err: impl std::fmt::Display) -> Self {
        GatewayError::XmlError {
            message: err.to_string(),
        }
    }

    /// Short machine-readable name used in error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Unsupported { .. } => "unsupported_operation",
            GatewayError::RemoteOperation { .. } => "remote_operation_failed",
            GatewayError::SoapFault { .. } => "soap_fault",
            GatewayError::HttpError(_) | GatewayError::HttpStatus { .. } => "transport_error",
            GatewayError::XmlError { .. } | GatewayError::MalformedResponse { .. } => {
                "malformed_response"
            }
            GatewayError::IoError(_) => "internal_error",
            GatewayError::ConfigValidationError { .. }
            | GatewayError::InvalidConfigValueError { .. }
            | GatewayError::MissingConfigError { .. } => "configuration_error",
        }
    }
}

/// Error detail list reported by PowerOn alongside a non-zero status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransactionErrors {
    pub errors: Vec<TransactionError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransactionError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TransactionErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl std::fmt::Display for TransactionErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "no transaction errors reported");
        }
        let rendered: Vec<String> = self
            .errors
            .iter()
            .map(|e| match (&e.code, &e.message) {
                (Some(code), Some(message)) => format!("[{}] {}", code, message),
                (Some(code), None) => format!("[{}]", code),
                (None, Some(message)) => message.clone(),
                (None, None) => "unknown error".to_string(),
            })
            .collect();
        write!(f, "{}", rendered.join("; "))
    }
}

/// A date field that could not be turned into an XML schema date.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Couldn't parse date '{value}': {reason}")]
pub struct DateParseError {
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: u16,
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_errors: Option<TransactionErrors>,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let transaction_errors = match &self {
            GatewayError::RemoteOperation { errors, .. } => Some(errors.clone()),
            _ => None,
        };
        let body = ErrorBody {
            status: status.as_u16(),
            error: self.kind(),
            message: self.to_string(),
            transaction_errors,
        };
        (status, Json(body)).into_response()
    }
}
