// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by adapters and propagated unchanged by services.

use thiserror::Error;

/// Error type shared by every port.
///
/// `NotFound` is kept distinct from `Io` so callers can treat a missing
/// key as a recoverable condition.
#[derive(Error, Debug)]
pub enum PortError {
    /// The requested key, object, subject or schema does not exist.
    #[error("Not found: {key}")]
    NotFound { key: String },

    /// A cached entry exists but is older than the requested TTL.
    #[error("Cache entry '{key}' expired")]
    Expired { key: String },

    /// A key or prefix would escape the adapter's root.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The caller supplied something the adapter cannot store.
    #[error("Invalid input: {0}")]
    Invalid(String),

    /// A persisted record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PortError {
    pub fn not_found(key: impl Into<String>) -> Self {
        PortError::NotFound { key: key.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

impl From<serde_json::Error> for PortError {
    fn from(err: serde_json::Error) -> Self {
        PortError::Serialization(err.to_string())
    }
}
