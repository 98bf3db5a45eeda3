use std::fmt;
use thiserror::Error;

/// The base error type for the notification workflow.
///
/// This enum covers the failure taxonomy shared across crates: permission
/// problems during registration, store and relay failures during dispatch,
/// and the usual request-validation cases. Crate-specific error enums
/// convert into this type at the HTTP boundary.
#[derive(Error, Debug)]
pub enum NotiflyError {
    /// The user declined the notification permission prompt.
    /// Informational, never fatal, and never written to the store.
    #[error("Notification permission denied")]
    PermissionDenied,

    /// Push-handle acquisition or store-write failure during registration.
    #[error("Registration error: {0}")]
    RegistrationError(String),

    /// Malformed or incomplete dispatch request.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// No registration record exists for the given device identifier.
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// The push relay call failed or returned a non-success status.
    #[error("Relay error: {0}")]
    RelayError(String),

    /// Error occurred while reading from or writing to the registration store.
    #[error("Store error: {0}")]
    StoreError(String),

    /// Error occurred due to missing or invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during an outbound HTTP request.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred due to an internal error.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// Implemented by error types so handlers map failures to responses the
/// same way everywhere.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for NotiflyError {
    fn status_code(&self) -> u16 {
        match self {
            NotiflyError::PermissionDenied => 403,
            NotiflyError::RegistrationError(_) => 500,
            NotiflyError::ValidationError(_) => 400,
            NotiflyError::NotFoundError(_) => 404,
            NotiflyError::RelayError(_) => 500,
            NotiflyError::StoreError(_) => 500,
            NotiflyError::ConfigError(_) => 500,
            NotiflyError::HttpError(_) => 500,
            NotiflyError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for NotiflyError {
    fn from(err: reqwest::Error) -> Self {
        NotiflyError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for NotiflyError {
    fn from(err: serde_json::Error) -> Self {
        NotiflyError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> NotiflyError {
    NotiflyError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> NotiflyError {
    NotiflyError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> NotiflyError {
    NotiflyError::NotFoundError(message.to_string())
}

pub fn relay_error<T: fmt::Display>(message: T) -> NotiflyError {
    NotiflyError::RelayError(message.to_string())
}

pub fn store_error<T: fmt::Display>(message: T) -> NotiflyError {
    NotiflyError::StoreError(message.to_string())
}
