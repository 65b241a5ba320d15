// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for DevSync.

use thiserror::Error;

/// The primary error type shared by the stores, the domain operations and the gateway.
///
/// The first five variants form the client-facing taxonomy and each maps to a
/// distinct HTTP status at the gateway boundary. The remaining variants are
/// infrastructure failures and are never surfaced verbatim to clients.
#[derive(Debug, Error)]
pub enum DevsyncError {
    /// A required field is missing, empty, or malformed.
    #[error("invalid `{field}`: {message}")]
    Validation { field: String, message: String },

    /// A referenced project, task, user or membership does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// No caller identity, or the presented credential is invalid.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but its role fails the policy check.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A unique constraint would be violated (e.g. an already registered email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Storage backend errors (connection failure, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors (invalid TOML, missing secret).
    #[error("configuration error: {0}")]
    Config(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DevsyncError {
    /// Shorthand for a [`DevsyncError::Validation`] on a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`DevsyncError::NotFound`] naming the missing entity.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Shorthand for a [`DevsyncError::Forbidden`].
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }

    /// Wrap any error as a storage failure.
    pub fn storage(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage {
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_names_the_field() {
        let err = DevsyncError::validation("title", "must not be empty");
        assert_eq!(err.to_string(), "invalid `title`: must not be empty");
    }

    #[test]
    fn not_found_reads_naturally() {
        assert_eq!(DevsyncError::not_found("project").to_string(), "project not found");
    }

    #[test]
    fn storage_wraps_source() {
        let err = DevsyncError::storage(std::io::Error::other("disk full"));
        assert!(err.to_string().contains("disk full"));
    }
}
