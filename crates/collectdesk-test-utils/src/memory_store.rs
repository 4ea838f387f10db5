// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory callback store for deterministic testing.
//!
//! `MemoryCallbackStore` implements `CallbackStore` over a `Vec`, ordering
//! and counting exactly like the SQLite adapter, and can be told to fail
//! upcoming calls so error paths are testable without a broken database.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::Mutex;

use collectdesk_core::{
    Callback, CallbackId, CallbackInput, CallbackStatus, CallbackStore, Clock, CollectError,
    ErrorKind,
};

/// A callback store held entirely in memory.
///
/// Ids are assigned sequentially (`cb-1`, `cb-2`, ...). Scripted outcomes
/// (`fail_next`, `pass_next`) are consumed one per store call, in FIFO order.
/// A completed row only accepts `completed` again, as in SQLite.
pub struct MemoryCallbackStore {
    clock: Arc<dyn Clock>,
    rows: Mutex<Vec<Callback>>,
    failures: Mutex<VecDeque<Option<ErrorKind>>>,
    next_id: AtomicU64,
    calls: AtomicU64,
}

impl MemoryCallbackStore {
    /// Create an empty store stamping `created_at` from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            rows: Mutex::new(Vec::new()),
            failures: Mutex::new(VecDeque::new()),
            next_id: AtomicU64::new(1),
            calls: AtomicU64::new(0),
        }
    }

    /// Queue a failure of `kind` for the next unscripted store call.
    pub async fn fail_next(&self, kind: ErrorKind) {
        self.failures.lock().await.push_back(Some(kind));
    }

    /// Queue a pass, so a later `fail_next` hits the call after it.
    pub async fn pass_next(&self) {
        self.failures.lock().await.push_back(None);
    }

    /// Snapshot of every stored row, in insertion order.
    pub async fn rows(&self) -> Vec<Callback> {
        self.rows.lock().await.clone()
    }

    /// Number of store calls made so far, including failed ones.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> Result<(), CollectError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failures.lock().await.pop_front().flatten() {
            None => Ok(()),
            Some(kind) => Err(injected(kind)),
        }
    }

    async fn sorted(&self, agent_id: Option<&str>) -> Vec<Callback> {
        let mut out: Vec<Callback> = self
            .rows
            .lock()
            .await
            .iter()
            .filter(|cb| agent_id.is_none_or(|agent| cb.agent_id == agent))
            .cloned()
            .collect();
        out.sort_by(|a, b| {
            a.callback_date
                .cmp(&b.callback_date)
                .then(a.created_at.cmp(&b.created_at))
        });
        out
    }

    async fn count(&self, agent_id: &str, statuses: &[CallbackStatus]) -> u64 {
        self.rows
            .lock()
            .await
            .iter()
            .filter(|cb| cb.agent_id == agent_id && statuses.contains(&cb.status))
            .count() as u64
    }
}

fn injected(kind: ErrorKind) -> CollectError {
    match kind {
        ErrorKind::Validation => CollectError::validation("injected", "injected failure"),
        ErrorKind::NotFound => CollectError::not_found("injected"),
        ErrorKind::BackendUnavailable => CollectError::backend("injected failure"),
        ErrorKind::Config => CollectError::Config("injected failure".into()),
        ErrorKind::Internal => CollectError::Internal("injected failure".into()),
    }
}

#[async_trait]
impl CallbackStore for MemoryCallbackStore {
    async fn list_by_agent(&self, agent_id: &str) -> Result<Vec<Callback>, CollectError> {
        self.enter().await?;
        Ok(self.sorted(Some(agent_id)).await)
    }

    async fn list_all(&self) -> Result<Vec<Callback>, CollectError> {
        self.enter().await?;
        Ok(self.sorted(None).await)
    }

    async fn count_pending_for_agent(&self, agent_id: &str) -> Result<u64, CollectError> {
        self.enter().await?;
        Ok(self.count(agent_id, &[CallbackStatus::Pending]).await)
    }

    async fn count_pending_or_missed_for_agent(&self, agent_id: &str) -> Result<u64, CollectError> {
        self.enter().await?;
        let open = [CallbackStatus::Pending, CallbackStatus::Missed];
        Ok(self.count(agent_id, &open).await)
    }

    async fn create(&self, input: CallbackInput) -> Result<Callback, CollectError> {
        self.enter().await?;
        let new = input.validate()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let callback = Callback {
            id: CallbackId(format!("cb-{n}")),
            agent_id: new.agent_id,
            agent_name: new.agent_name,
            debtor_id: new.debtor_id,
            phone_number: new.phone_number,
            callback_date: new.callback_date,
            notes: new.notes,
            status: CallbackStatus::Pending,
            created_at: self.clock.now(),
        };
        self.rows.lock().await.push(callback.clone());
        Ok(callback)
    }

    async fn update_status(
        &self,
        id: &CallbackId,
        status: CallbackStatus,
    ) -> Result<(), CollectError> {
        self.enter().await?;
        let mut rows = self.rows.lock().await;
        let row = rows
            .iter_mut()
            .find(|cb| &cb.id == id)
            .ok_or_else(|| CollectError::not_found(id))?;
        if row.status == CallbackStatus::Completed && status != CallbackStatus::Completed {
            return Err(CollectError::validation(
                "status",
                format!("callback {id} is completed and cannot become {status}"),
            ));
        }
        row.status = status;
        Ok(())
    }

    async fn delete(&self, id: &CallbackId) -> Result<(), CollectError> {
        self.enter().await?;
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|cb| &cb.id != id);
        if rows.len() == before {
            return Err(CollectError::not_found(id));
        }
        Ok(())
    }

    async fn mark_missed_before(&self, cutoff: NaiveDateTime) -> Result<u64, CollectError> {
        self.enter().await?;
        let mut changed = 0;
        for cb in self.rows.lock().await.iter_mut() {
            if cb.status == CallbackStatus::Pending && cb.callback_date < cutoff {
                cb.status = CallbackStatus::Missed;
                changed += 1;
            }
        }
        Ok(changed)
    }
}
