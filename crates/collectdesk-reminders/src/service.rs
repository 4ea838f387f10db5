// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder mutations and reads over a callback store.
//!
//! `ReminderService` owns the [`ReminderBook`] and is its only writer. Every
//! mutation goes to the store first and touches the book only after the
//! store call succeeded, so a failure leaves in-memory state exactly as it
//! was. Failures are returned to the caller and also published as a
//! [`ReminderEvent::Failed`] notice for whatever is showing notifications.

use std::sync::Arc;

use chrono::NaiveDateTime;
use strum::Display;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, warn};

use collectdesk_config::model::WeekStart;
use collectdesk_core::{
    Callback, CallbackId, CallbackInput, CallbackStatus, CallbackStore, Clock, CollectError,
    ErrorKind,
};

use crate::board::DueBoard;
use crate::book::ReminderBook;
use crate::classifier::BucketProfile;
use crate::metrics::AggregateMetrics;
use crate::projection::project;
use crate::types::Reminder;

/// Capacity of the event channel; slow subscribers see `Lagged`.
const EVENT_CAPACITY: usize = 64;

/// Which callbacks the book holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Agent(String),
    All,
}

impl Scope {
    fn includes(&self, agent_id: &str) -> bool {
        match self {
            Scope::Agent(agent) => agent == agent_id,
            Scope::All => true,
        }
    }
}

/// Outcome of a successful `mark_complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Completed,
    /// The reminder was already completed; no counter moved.
    AlreadyCompleted,
}

/// Service operation names, used in failure notices and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Refresh,
    Schedule,
    Complete,
    Delete,
    Sweep,
}

/// Notices published after each service operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ReminderEvent {
    Refreshed { count: usize },
    Scheduled { reminder: Reminder },
    Completed { id: CallbackId },
    Deleted { id: CallbackId },
    MarkedMissed { count: u64 },
    Failed {
        operation: Operation,
        kind: ErrorKind,
        message: String,
    },
}

struct State {
    book: ReminderBook,
    /// `None` until the first refresh; pushes are then kept unconditionally.
    scope: Option<Scope>,
}

/// Mutation operations and read views over one reminder collection.
pub struct ReminderService {
    store: Arc<dyn CallbackStore>,
    clock: Arc<dyn Clock>,
    state: Mutex<State>,
    events: broadcast::Sender<ReminderEvent>,
}

impl ReminderService {
    pub fn new(
        store: Arc<dyn CallbackStore>,
        clock: Arc<dyn Clock>,
        week_start: WeekStart,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            clock,
            state: Mutex::new(State {
                book: ReminderBook::new(week_start),
                scope: None,
            }),
            events,
        }
    }

    /// Subscribe to operation notices.
    pub fn subscribe(&self) -> broadcast::Receiver<ReminderEvent> {
        self.events.subscribe()
    }

    /// The injected clock's current reading.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Reload the book from the store for `scope`, recomputing all metrics.
    pub async fn refresh(&self, scope: Scope) -> Result<usize, CollectError> {
        let mut state = self.state.lock().await;
        let callbacks = self
            .list(&scope)
            .await
            .map_err(|e| self.fail(Operation::Refresh, e))?;

        let count = callbacks.len();
        state
            .book
            .replace_all(callbacks.iter().map(project).collect(), self.now());
        state.scope = Some(scope);
        debug!(count, "reminder book refreshed");
        self.publish(ReminderEvent::Refreshed { count });
        Ok(count)
    }

    /// Validate and store a new callback, then add its reminder to the book.
    pub async fn schedule_callback(&self, input: CallbackInput) -> Result<Reminder, CollectError> {
        input
            .validate()
            .map_err(|e| self.fail(Operation::Schedule, e))?;

        let mut state = self.state.lock().await;
        let callback = self
            .store
            .create(input)
            .await
            .map_err(|e| self.fail(Operation::Schedule, e))?;

        let reminder = project(&callback);
        if state
            .scope
            .as_ref()
            .is_none_or(|s| s.includes(&callback.agent_id))
        {
            state.book.insert(reminder.clone(), self.now());
        }
        info!(callback_id = %callback.id, agent_id = %callback.agent_id, "callback scheduled");
        self.publish(ReminderEvent::Scheduled {
            reminder: reminder.clone(),
        });
        Ok(reminder)
    }

    /// Mark a callback completed in the store and in the book.
    ///
    /// The store is written even when the book already shows the reminder
    /// completed, so a stale view cannot skip the write.
    pub async fn mark_complete(&self, id: &CallbackId) -> Result<Completion, CollectError> {
        let mut state = self.state.lock().await;
        self.store
            .update_status(id, CallbackStatus::Completed)
            .await
            .map_err(|e| self.fail(Operation::Complete, e))?;

        match state.book.complete(id, self.now()) {
            Some(false) => {
                debug!(callback_id = %id, "callback already completed");
                Ok(Completion::AlreadyCompleted)
            }
            _ => {
                info!(callback_id = %id, "callback completed");
                self.publish(ReminderEvent::Completed { id: id.clone() });
                Ok(Completion::Completed)
            }
        }
    }

    /// Delete a callback from the store and drop its reminder.
    pub async fn delete_reminder(&self, id: &CallbackId) -> Result<(), CollectError> {
        let mut state = self.state.lock().await;
        self.store
            .delete(id)
            .await
            .map_err(|e| self.fail(Operation::Delete, e))?;

        state.book.remove(id, self.now());
        info!(callback_id = %id, "callback deleted");
        self.publish(ReminderEvent::Deleted { id: id.clone() });
        Ok(())
    }

    /// Flip pending callbacks due before `cutoff` to missed, then reload.
    ///
    /// Once the store has applied the flip the call succeeds. A failed reload
    /// afterwards is published as a `Refresh` failure and leaves the book
    /// stale until the next refresh.
    pub async fn mark_missed_before(&self, cutoff: NaiveDateTime) -> Result<u64, CollectError> {
        let mut state = self.state.lock().await;
        let count = self
            .store
            .mark_missed_before(cutoff)
            .await
            .map_err(|e| self.fail(Operation::Sweep, e))?;
        if count == 0 {
            return Ok(0);
        }

        info!(count, %cutoff, "overdue callbacks marked missed");
        self.publish(ReminderEvent::MarkedMissed { count });

        if let Some(scope) = state.scope.clone() {
            match self.list(&scope).await {
                Ok(callbacks) => {
                    let reminders = callbacks.iter().map(project).collect();
                    state.book.replace_all(reminders, self.now());
                }
                Err(e) => {
                    self.fail(Operation::Refresh, e);
                }
            }
        }
        Ok(count)
    }

    /// Pending plus missed callbacks for an agent, regardless of due date.
    pub async fn workload_badge(&self, agent_id: &str) -> Result<u64, CollectError> {
        self.store.count_pending_or_missed_for_agent(agent_id).await
    }

    /// Rollup counters as of now.
    pub async fn metrics(&self) -> AggregateMetrics {
        let now = self.now();
        self.state.lock().await.book.metrics(now)
    }

    /// Copy of the reminders currently held, in due order.
    pub async fn snapshot(&self) -> Vec<Reminder> {
        self.state.lock().await.book.reminders().to_vec()
    }

    /// Classify the held reminders against now.
    pub async fn board(&self, profile: &BucketProfile) -> DueBoard<Reminder> {
        let reminders = self.snapshot().await;
        DueBoard::build(profile, reminders, self.now())
    }

    /// Whether the incrementally maintained metrics match a full recompute.
    pub async fn metrics_consistent(&self) -> bool {
        let now = self.now();
        self.state.lock().await.book.is_consistent(now)
    }

    async fn list(&self, scope: &Scope) -> Result<Vec<Callback>, CollectError> {
        match scope {
            Scope::Agent(agent) => self.store.list_by_agent(agent).await,
            Scope::All => self.store.list_all().await,
        }
    }

    fn publish(&self, event: ReminderEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn fail(&self, operation: Operation, err: CollectError) -> CollectError {
        warn!(%operation, kind = %err.kind(), error = %err, "reminder operation failed");
        self.publish(ReminderEvent::Failed {
            operation,
            kind: err.kind(),
            message: err.to_string(),
        });
        err
    }
}
