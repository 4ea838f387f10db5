// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Callback store trait for persistence backends.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::CollectError;
use crate::types::{Callback, CallbackId, CallbackInput, CallbackStatus};

/// Durable CRUD for callbacks, scoped by agent.
///
/// Every call is a fallible remote operation. The store holds no cache;
/// callers keeping an in-memory projection must apply successful writes
/// to it themselves.
#[async_trait]
pub trait CallbackStore: Send + Sync + 'static {
    /// Callbacks owned by `agent_id`, ordered by due instant ascending.
    /// An agent with no callbacks yields an empty list, not an error.
    async fn list_by_agent(&self, agent_id: &str) -> Result<Vec<Callback>, CollectError>;

    /// Every callback, ordered by due instant ascending.
    async fn list_all(&self) -> Result<Vec<Callback>, CollectError>;

    /// Number of `pending` callbacks for the agent.
    async fn count_pending_for_agent(&self, agent_id: &str) -> Result<u64, CollectError>;

    /// Number of `pending` or `missed` callbacks for the agent, across all dates.
    async fn count_pending_or_missed_for_agent(&self, agent_id: &str) -> Result<u64, CollectError>;

    /// Validate and insert a callback. The store assigns `id` and `created_at`.
    async fn create(&self, input: CallbackInput) -> Result<Callback, CollectError>;

    /// Set the status of an existing callback. Unknown ids are `NotFound`.
    async fn update_status(
        &self,
        id: &CallbackId,
        status: CallbackStatus,
    ) -> Result<(), CollectError>;

    /// Remove a callback. Unknown ids are `NotFound`, including a repeat delete.
    async fn delete(&self, id: &CallbackId) -> Result<(), CollectError>;

    /// Flip every `pending` callback due strictly before `cutoff` to `missed`.
    /// Returns the number of rows changed.
    async fn mark_missed_before(&self, cutoff: NaiveDateTime) -> Result<u64, CollectError>;
}
