//! Error types for bramble.
//!
//! Configuration mistakes are reported as [`Error`] straight away, before any
//! value is generated. A property failing is not an error: it is the outcome
//! the runner is looking for, and is carried as a [`PropertyError`] inside the
//! check result.

use std::any::Any;
use thiserror::Error;

/// Main error type for bramble.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A numeric range had a non-finite bound or its maximum was below its minimum.
    #[error("Invalid range [{min}, {max}]: {message}")]
    InvalidRange {
        min: String,
        max: String,
        message: String,
    },

    /// Invalid runner or shrink configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Invalid generator construction.
    #[error("Invalid generator: {message}")]
    InvalidGenerator { message: String },
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::InvalidConfig {
            message: message.into(),
        }
    }

    pub(crate) fn generator(message: impl Into<String>) -> Self {
        Error::InvalidGenerator {
            message: message.into(),
        }
    }
}

/// Result type for bramble operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a property evaluation failed, kept verbatim for reporting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// The property panicked; holds the panic message when it was a string.
    #[error("property panicked: {0}")]
    Panicked(String),

    /// The property returned an `Err`; holds its display form.
    #[error("{0}")]
    Returned(String),
}

impl PropertyError {
    /// Recover the message from a caught panic payload.
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<&'static str>() {
            Ok(message) => return PropertyError::Panicked((*message).to_string()),
            Err(payload) => payload,
        };
        match payload.downcast::<String>() {
            Ok(message) => PropertyError::Panicked(*message),
            Err(_) => PropertyError::Panicked("<non-string panic payload>".to_string()),
        }
    }
}
