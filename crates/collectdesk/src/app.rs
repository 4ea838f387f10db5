// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring of store, clock, and reminder service from configuration.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use collectdesk_config::CollectdeskConfig;
use collectdesk_core::{Clock, CollectError, SystemClock};
use collectdesk_reminders::{ReminderService, Scope};
use collectdesk_storage::SqliteCallbackStore;

/// An opened store and the service over it.
pub struct App {
    pub service: Arc<ReminderService>,
    store: Arc<SqliteCallbackStore>,
}

impl App {
    /// Open the configured database, creating its directory if needed.
    pub async fn open(config: &CollectdeskConfig) -> Result<Self, CollectError> {
        let path = &config.storage.database_path;
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(CollectError::backend)?;
        }

        let clock: Arc<dyn Clock> = Arc::new(SystemClock::with_offset_minutes(
            config.reminders.utc_offset_minutes,
        ));
        let store = Arc::new(SqliteCallbackStore::new(
            config.storage.clone(),
            clock.clone(),
        ));
        store.initialize().await?;

        let service = Arc::new(ReminderService::new(
            store.clone(),
            clock,
            config.reminders.week_start,
        ));
        debug!(path = %path, "collectdesk opened");
        Ok(Self { service, store })
    }

    /// Open and load the book for `agent`, or for everyone.
    pub async fn open_scoped(
        config: &CollectdeskConfig,
        agent: Option<String>,
    ) -> Result<Self, CollectError> {
        let app = Self::open(config).await?;
        app.service.refresh(scope(agent)).await?;
        Ok(app)
    }

    pub async fn close(self) -> Result<(), CollectError> {
        self.store.close().await
    }
}

pub fn scope(agent: Option<String>) -> Scope {
    agent.map_or(Scope::All, Scope::Agent)
}
