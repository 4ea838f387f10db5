// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Collectdesk callback engine.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// The primary error type used across the store traits and engine operations.
#[derive(Debug, Error)]
pub enum CollectError {
    /// A required field was missing or malformed on create.
    #[error("validation error on `{field}`: {message}")]
    Validation { field: String, message: String },

    /// An update or delete referenced an id the store does not know.
    #[error("callback not found: {id}")]
    NotFound { id: String },

    /// Transport or infrastructure failure reaching the store.
    #[error("backend unavailable: {source}")]
    BackendUnavailable {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors (invalid TOML, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Payload-free discriminant of [`CollectError`], cheap to copy into events.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    BackendUnavailable,
    Config,
    Internal,
}

impl CollectError {
    /// Shorthand for a [`CollectError::Validation`] on the given field.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`CollectError::NotFound`] on the given id.
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    /// Wraps any transport error as [`CollectError::BackendUnavailable`].
    pub fn backend(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::BackendUnavailable {
            source: source.into(),
        }
    }

    /// Returns the kind of this error for inspection without matching payloads.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::BackendUnavailable { .. } => ErrorKind::BackendUnavailable,
            Self::Config(_) => ErrorKind::Config,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}
