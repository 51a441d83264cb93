//! Error handling for domain hunting operations.
//!
//! Lookup failures (request errors, timeouts) are represented here too, but
//! they never escape the resolver: the lookup clients turn them into
//! [`Probe::Inconclusive`](crate::Probe) before the checker sees them. Only configuration, input and top-level pipeline
//! errors reach a caller of [`run_hunt`](crate::run_hunt).

use std::time::Duration;
use thiserror::Error;

/// Main error type for domain hunting operations.
#[derive(Debug, Clone, Error)]
pub enum DomainHunterError {
    /// Network-related errors (connection refused, TLS, etc.)
    #[error("Network error: {message}{}", .cause.as_ref().map(|c| format!(" (source: {})", c)).unwrap_or_default())]
    NetworkError {
        message: String,
        cause: Option<String>,
    },

    /// RDAP request failures
    #[error("RDAP error for '{domain}': {message}")]
    RdapError { domain: String, message: String },

    /// Configuration errors (invalid settings, unreadable config file, etc.)
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File I/O errors when reading name lists or writing results
    #[error("File error at '{path}': {message}")]
    FileError { path: String, message: String },

    /// Timeout errors when a lookup takes too long
    #[error("Timeout after {duration:?} during: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// No valid variations could be built from the input names
    #[error("No candidate names to process: {message}")]
    EmptyCorpus { message: String },

    /// Generic internal errors that don't fit other categories
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainHunterError {
    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            cause: Some(source.into()),
        }
    }

    /// Create a new RDAP error.
    pub fn rdap<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::RdapError {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new empty corpus error.
    pub fn empty_corpus<M: Into<String>>(message: M) -> Self {
        Self::EmptyCorpus {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for DomainHunterError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

impl From<csv::Error> for DomainHunterError {
    fn from(err: csv::Error) -> Self {
        Self::Internal {
            message: format!("CSV error: {}", err),
        }
    }
}

impl From<toml::de::Error> for DomainHunterError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: format!("Failed to parse TOML configuration: {}", err),
        }
    }
}
