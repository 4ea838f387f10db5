// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic re-classification of the reminder book.
//!
//! Buckets depend on "now", so the board is rebuilt on a fixed period and
//! published on a watch channel. The background task stops when the ticker
//! is stopped or dropped, or when the parent token is cancelled.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use collectdesk_config::model::ReminderConfig;

use crate::board::DueBoard;
use crate::classifier::{BucketProfile, CALLBACKS};
use crate::service::ReminderService;
use crate::sweep::MissedSweep;
use crate::types::Reminder;

/// How a [`DueTicker`] runs.
#[derive(Debug, Clone, Copy)]
pub struct TickerSettings {
    pub profile: BucketProfile,
    pub period: Duration,
    /// Run before each rebuild when set.
    pub sweep: Option<MissedSweep>,
}

impl TickerSettings {
    /// Callback view on the configured period, with the configured sweep.
    pub fn from_config(config: &ReminderConfig) -> Self {
        Self {
            profile: CALLBACKS,
            period: Duration::from_secs(config.tick_interval_secs.max(1)),
            sweep: MissedSweep::from_config(config),
        }
    }
}

/// Handle to the running re-classification task.
pub struct DueTicker {
    board: watch::Receiver<DueBoard<Reminder>>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl DueTicker {
    /// Build the first board now and start rebuilding every `settings.period`.
    pub async fn spawn(
        service: Arc<ReminderService>,
        settings: TickerSettings,
        parent: &CancellationToken,
    ) -> Self {
        let initial = service.board(&settings.profile).await;
        let (tx, rx) = watch::channel(initial);
        let cancel = parent.child_token();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(settings.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately; the initial board covers it.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if let Some(sweep) = &settings.sweep
                            && let Err(e) = sweep.run(&service).await
                        {
                            warn!(error = %e, "missed sweep failed (non-fatal)");
                        }
                        let board = service.board(&settings.profile).await;
                        debug!(
                            profile = settings.profile.name,
                            overdue = board.overdue.len(),
                            due_now = board.due_now.len(),
                            upcoming = board.upcoming.len(),
                            "due board rebuilt"
                        );
                        tx.send_replace(board);
                    }
                    _ = token.cancelled() => {
                        debug!("due ticker shutting down");
                        break;
                    }
                }
            }
        });

        Self {
            board: rx,
            cancel,
            handle: Some(handle),
        }
    }

    /// A receiver that sees every rebuilt board.
    pub fn subscribe(&self) -> watch::Receiver<DueBoard<Reminder>> {
        self.board.clone()
    }

    /// The most recently published board.
    pub fn current(&self) -> DueBoard<Reminder> {
        self.board.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the task and wait for it to exit.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take()
            && let Err(e) = handle.await
        {
            warn!(error = %e, "due ticker task ended abnormally");
        }
    }
}

impl Drop for DueTicker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
