// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the CallbackStore trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Timelike};
use tokio::sync::OnceCell;
use tracing::debug;

use collectdesk_config::model::StorageConfig;
use collectdesk_core::{
    Callback, CallbackId, CallbackInput, CallbackStatus, CallbackStore, Clock, CollectError,
};

use crate::database::Database;
use crate::queries;
use crate::queries::callbacks::StatusWrite;

/// SQLite-backed callback store.
///
/// Wraps a [`Database`] handle and delegates to the typed query module. The
/// database is opened on the first call to [`SqliteCallbackStore::initialize`];
/// every store call before that fails with `BackendUnavailable`.
pub struct SqliteCallbackStore {
    config: StorageConfig,
    clock: Arc<dyn Clock>,
    db: OnceCell<Database>,
}

impl SqliteCallbackStore {
    /// Create a store for the configured database file.
    ///
    /// `clock` stamps `created_at` in the deployment zone.
    pub fn new(config: StorageConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            db: OnceCell::new(),
        }
    }

    /// Open the database and apply migrations.
    pub async fn initialize(&self) -> Result<(), CollectError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db
            .set(db)
            .map_err(|_| CollectError::Internal("storage already initialized".into()))?;
        debug!(path = %self.config.database_path, "SQLite callback store initialized");
        Ok(())
    }

    /// Checkpoint the WAL and release the connection.
    pub async fn close(&self) -> Result<(), CollectError> {
        self.db()?.clone().close().await?;
        debug!("callback store closed");
        Ok(())
    }

    fn db(&self) -> Result<&Database, CollectError> {
        self.db.get().ok_or_else(|| {
            CollectError::backend("storage not initialized -- call initialize() first")
        })
    }

    /// Current deployment-local instant, truncated to the stored precision.
    fn now(&self) -> NaiveDateTime {
        let now = self.clock.now();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

#[async_trait]
impl CallbackStore for SqliteCallbackStore {
    async fn list_by_agent(&self, agent_id: &str) -> Result<Vec<Callback>, CollectError> {
        let db = self.db()?;
        let callbacks = queries::callbacks::list_callbacks(db, Some(agent_id)).await?;
        debug!(
            agent_id,
            count = callbacks.len(),
            "listed callbacks for agent"
        );
        Ok(callbacks)
    }

    async fn list_all(&self) -> Result<Vec<Callback>, CollectError> {
        let callbacks = queries::callbacks::list_callbacks(self.db()?, None).await?;
        debug!(count = callbacks.len(), "listed all callbacks");
        Ok(callbacks)
    }

    async fn count_pending_for_agent(&self, agent_id: &str) -> Result<u64, CollectError> {
        let pending = [CallbackStatus::Pending];
        queries::callbacks::count_for_agent(self.db()?, agent_id, &pending).await
    }

    async fn count_pending_or_missed_for_agent(&self, agent_id: &str) -> Result<u64, CollectError> {
        let open = [CallbackStatus::Pending, CallbackStatus::Missed];
        queries::callbacks::count_for_agent(self.db()?, agent_id, &open).await
    }

    async fn create(&self, input: CallbackInput) -> Result<Callback, CollectError> {
        let new = input.validate()?;
        let callback = Callback {
            id: CallbackId(uuid::Uuid::new_v4().to_string()),
            agent_id: new.agent_id,
            agent_name: new.agent_name,
            debtor_id: new.debtor_id,
            phone_number: new.phone_number,
            callback_date: new.callback_date,
            notes: new.notes,
            status: CallbackStatus::Pending,
            created_at: self.now(),
        };
        queries::callbacks::insert_callback(self.db()?, &callback).await?;
        debug!(callback_id = %callback.id, agent_id = %callback.agent_id, "callback created");
        Ok(callback)
    }

    async fn update_status(
        &self,
        id: &CallbackId,
        status: CallbackStatus,
    ) -> Result<(), CollectError> {
        match queries::callbacks::update_status(self.db()?, id, status).await? {
            StatusWrite::Updated => {
                debug!(callback_id = %id, %status, "callback status updated");
                Ok(())
            }
            StatusWrite::Missing => Err(CollectError::not_found(id)),
            StatusWrite::Refused => Err(CollectError::validation(
                "status",
                format!("callback {id} is completed and cannot become {status}"),
            )),
        }
    }

    async fn delete(&self, id: &CallbackId) -> Result<(), CollectError> {
        match queries::callbacks::delete_callback(self.db()?, id).await? {
            0 => Err(CollectError::not_found(id)),
            _ => {
                debug!(callback_id = %id, "callback deleted");
                Ok(())
            }
        }
    }

    async fn mark_missed_before(&self, cutoff: NaiveDateTime) -> Result<u64, CollectError> {
        let changed = queries::callbacks::mark_missed_before(self.db()?, cutoff).await?;
        debug!(%cutoff, changed, "pending callbacks marked missed");
        Ok(changed as u64)
    }
}
