// SPDX-FileCopyrightText: 2026 Goalscope Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait every external-collaborator adapter implements.

/// Identity shared by the embedder, retriever, and provider adapters.
///
/// `goalscope stats` reports the embedder by this name.
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;
}
