// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Goalscope.

use thiserror::Error;

/// The primary error type used across Goalscope adapters and the query pipeline.
///
/// Malformed record fields, out-of-range retriever indices, and empty result
/// sets are deliberately absent: those are normal outcomes, not errors.
#[derive(Debug, Error)]
pub enum GoalscopeError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The corpus, index, or embedding model could not be loaded.
    ///
    /// Callers should re-provision rather than retry.
    #[error("search index not ready: {message}")]
    NotReady {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Transport-level LLM provider failure (connection refused, DNS, body read).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("provider returned {status}: {message}")]
    ProviderStatus { status: u16, message: String },

    /// Query embedding failed.
    #[error("embedding error: {message}")]
    Embedding {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GoalscopeError {
    /// Shorthand for a [`GoalscopeError::NotReady`] without an underlying cause.
    pub fn not_ready(message: impl Into<String>) -> Self {
        Self::NotReady {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true when the failure means the corpus must be re-provisioned.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady { .. })
    }
}
