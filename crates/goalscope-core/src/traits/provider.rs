// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for text-generation APIs.

use async_trait::async_trait;

use crate::error::GoalscopeError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for an external text-generation API.
///
/// One call per invocation. Retry and model fallback belong to the caller.
/// Implementations must report a non-success HTTP status as
/// [`GoalscopeError::ProviderStatus`] and transport failures as
/// [`GoalscopeError::Provider`] so the caller can tell them apart.
#[async_trait]
pub trait CompletionProvider: PluginAdapter {
    /// Sends a completion request and returns the full response text.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GoalscopeError>;
}
