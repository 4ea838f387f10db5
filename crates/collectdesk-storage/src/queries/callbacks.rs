// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Callback CRUD operations against the `callbacks` table.

use std::str::FromStr;

use chrono::NaiveDateTime;
use collectdesk_core::time::DATETIME_FORMAT;
use collectdesk_core::{
    Callback, CallbackId, CallbackStatus, CollectError, DebtorId, format_datetime,
};
use rusqlite::types::Type;
use rusqlite::{Row, params};

use crate::database::{Database, map_tr_err};

const SELECT_COLUMNS: &str = "SELECT id, agent_id, agent_name, debtor_id, phone_number,
        callback_date, notes, status, created_at
 FROM callbacks";

fn parse_instant(idx: usize, raw: String) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_callback(row: &Row<'_>) -> rusqlite::Result<Callback> {
    let status: String = row.get(7)?;
    let status = CallbackStatus::from_str(&status)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e)))?;

    Ok(Callback {
        id: CallbackId(row.get(0)?),
        agent_id: row.get(1)?,
        agent_name: row.get(2)?,
        debtor_id: DebtorId(row.get(3)?),
        phone_number: row.get(4)?,
        callback_date: parse_instant(5, row.get(5)?)?,
        notes: row.get(6)?,
        status,
        created_at: parse_instant(8, row.get(8)?)?,
    })
}

/// Insert a fully-formed callback row.
pub async fn insert_callback(db: &Database, callback: &Callback) -> Result<(), CollectError> {
    let callback = callback.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO callbacks (id, agent_id, agent_name, debtor_id, phone_number,
                                        callback_date, notes, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    callback.id.0,
                    callback.agent_id,
                    callback.agent_name,
                    callback.debtor_id.0,
                    callback.phone_number,
                    format_datetime(&callback.callback_date),
                    callback.notes,
                    callback.status.to_string(),
                    format_datetime(&callback.created_at),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Callbacks for one agent, or every callback when `agent_id` is `None`,
/// ordered by due instant (ties by creation time).
pub async fn list_callbacks(
    db: &Database,
    agent_id: Option<&str>,
) -> Result<Vec<Callback>, CollectError> {
    let agent_id = agent_id.map(str::to_string);
    db.connection()
        .call(move |conn| {
            let order = "ORDER BY callback_date ASC, created_at ASC";
            let callbacks = match &agent_id {
                Some(agent) => {
                    let mut stmt =
                        conn.prepare(&format!("{SELECT_COLUMNS} WHERE agent_id = ?1 {order}"))?;
                    let rows = stmt
                        .query_map(params![agent], row_to_callback)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    rows
                }
                None => {
                    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} {order}"))?;
                    let rows = stmt
                        .query_map([], row_to_callback)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    rows
                }
            };
            Ok(callbacks)
        })
        .await
        .map_err(map_tr_err)
}

/// Exact count of an agent's callbacks whose status is in `statuses`.
pub async fn count_for_agent(
    db: &Database,
    agent_id: &str,
    statuses: &[CallbackStatus],
) -> Result<u64, CollectError> {
    let agent_id = agent_id.to_string();
    let statuses: Vec<String> = statuses.iter().map(ToString::to_string).collect();
    db.connection()
        .call(move |conn| {
            let placeholders = (0..statuses.len())
                .map(|i| format!("?{}", i + 2))
                .collect::<Vec<_>>()
                .join(", ");
            let sql = format!(
                "SELECT COUNT(*) FROM callbacks WHERE agent_id = ?1 AND status IN ({placeholders})"
            );
            let mut values: Vec<&dyn rusqlite::ToSql> = vec![&agent_id];
            values.extend(statuses.iter().map(|s| s as &dyn rusqlite::ToSql));
            let count: i64 = conn.query_row(&sql, values.as_slice(), |row| row.get(0))?;
            Ok(count as u64)
        })
        .await
        .map_err(map_tr_err)
}

/// Result of a guarded status write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusWrite {
    Updated,
    Missing,
    /// The row is completed and the write would move it elsewhere.
    Refused,
}

/// Set the status of one callback.
///
/// A completed callback only accepts `completed` again. The write and the
/// existence check run in one call so they see the same row.
pub async fn update_status(
    db: &Database,
    id: &CallbackId,
    status: CallbackStatus,
) -> Result<StatusWrite, CollectError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE callbacks SET status = ?1
                 WHERE id = ?2 AND (status = ?1 OR status <> 'completed')",
                params![status.to_string(), id],
            )?;
            if changed > 0 {
                return Ok(StatusWrite::Updated);
            }
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM callbacks WHERE id = ?1)",
                params![id],
                |row| row.get(0),
            )?;
            Ok(if exists {
                StatusWrite::Refused
            } else {
                StatusWrite::Missing
            })
        })
        .await
        .map_err(map_tr_err)
}

/// Delete one callback. Returns the number of rows removed (0 or 1).
pub async fn delete_callback(db: &Database, id: &CallbackId) -> Result<usize, CollectError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| {
            let removed = conn.execute("DELETE FROM callbacks WHERE id = ?1", params![id])?;
            Ok(removed)
        })
        .await
        .map_err(map_tr_err)
}

/// Flip pending callbacks due strictly before `cutoff` to `missed`.
///
/// The canonical text format sorts lexicographically in time order, so the
/// comparison happens in SQL.
pub async fn mark_missed_before(
    db: &Database,
    cutoff: NaiveDateTime,
) -> Result<usize, CollectError> {
    let cutoff = format_datetime(&cutoff);
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE callbacks SET status = 'missed'
                 WHERE status = 'pending' AND callback_date < ?1",
                params![cutoff],
            )?;
            Ok(changed)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use collectdesk_core::parse_datetime;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn make_callback(id: &str, agent: &str, due: &str) -> Callback {
        Callback {
            id: CallbackId(id.to_string()),
            agent_id: agent.to_string(),
            agent_name: Some("Dana".to_string()),
            debtor_id: DebtorId::unassigned(),
            phone_number: "+1 555 0100".to_string(),
            callback_date: parse_datetime(due).unwrap(),
            notes: String::new(),
            status: CallbackStatus::Pending,
            created_at: parse_datetime("2025-03-01T09:00:00").unwrap(),
        }
    }

    async fn fetch(db: &Database, id: &str) -> Option<Callback> {
        list_callbacks(db, None)
            .await
            .unwrap()
            .into_iter()
            .find(|cb| cb.id.0 == id)
    }

    async fn status_of(db: &Database, id: &str) -> CallbackStatus {
        fetch(db, id).await.unwrap().status
    }

    #[tokio::test]
    async fn insert_then_list_roundtrips() {
        let (db, _dir) = setup_db().await;
        let cb = make_callback("cb-1", "agent-1", "2025-03-10T10:10:00");
        insert_callback(&db, &cb).await.unwrap();

        assert_eq!(fetch(&db, "cb-1").await, Some(cb));
        assert!(fetch(&db, "nope").await.is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_is_ordered_by_due_instant_and_scoped() {
        let (db, _dir) = setup_db().await;
        for (id, agent, due) in [
            ("late", "a1", "2025-03-12T09:00:00"),
            ("early", "a1", "2025-03-10T08:00:00"),
            ("other", "a2", "2025-03-11T08:00:00"),
        ] {
            insert_callback(&db, &make_callback(id, agent, due))
                .await
                .unwrap();
        }

        let mine = list_callbacks(&db, Some("a1")).await.unwrap();
        let ids: Vec<_> = mine.iter().map(|c| c.id.0.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);

        let all = list_callbacks(&db, None).await.unwrap();
        let ids: Vec<_> = all.iter().map(|c| c.id.0.as_str()).collect();
        assert_eq!(ids, vec!["early", "other", "late"]);

        let nobody = list_callbacks(&db, Some("a3")).await.unwrap();
        assert!(nobody.is_empty());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn counts_filter_by_status() {
        let (db, _dir) = setup_db().await;
        let mut done = make_callback("done", "a1", "2025-03-10T08:00:00");
        done.status = CallbackStatus::Completed;
        let mut missed = make_callback("missed", "a1", "2025-03-09T08:00:00");
        missed.status = CallbackStatus::Missed;
        insert_callback(&db, &done).await.unwrap();
        insert_callback(&db, &missed).await.unwrap();
        for (id, agent) in [("open", "a1"), ("theirs", "a2")] {
            insert_callback(&db, &make_callback(id, agent, "2025-03-11T08:00:00"))
                .await
                .unwrap();
        }

        let pending = count_for_agent(&db, "a1", &[CallbackStatus::Pending])
            .await
            .unwrap();
        assert_eq!(pending, 1);
        let open = [CallbackStatus::Pending, CallbackStatus::Missed];
        let workload = count_for_agent(&db, "a1", &open).await.unwrap();
        assert_eq!(workload, 2);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_and_delete_report_outcome() {
        let (db, _dir) = setup_db().await;
        let cb = make_callback("cb-1", "a1", "2025-03-10T10:10:00");
        insert_callback(&db, &cb).await.unwrap();

        let write = update_status(&db, &cb.id, CallbackStatus::Completed)
            .await
            .unwrap();
        assert_eq!(write, StatusWrite::Updated);
        assert_eq!(status_of(&db, "cb-1").await, CallbackStatus::Completed);

        let ghost = CallbackId("ghost".into());
        let write = update_status(&db, &ghost, CallbackStatus::Completed)
            .await
            .unwrap();
        assert_eq!(write, StatusWrite::Missing);

        assert_eq!(delete_callback(&db, &cb.id).await.unwrap(), 1);
        assert_eq!(delete_callback(&db, &cb.id).await.unwrap(), 0);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn completed_rows_cannot_move_back() {
        let (db, _dir) = setup_db().await;
        let cb = make_callback("cb-1", "a1", "2025-03-10T10:10:00");
        insert_callback(&db, &cb).await.unwrap();
        update_status(&db, &cb.id, CallbackStatus::Completed)
            .await
            .unwrap();

        for status in [CallbackStatus::Pending, CallbackStatus::Missed] {
            let write = update_status(&db, &cb.id, status).await.unwrap();
            assert_eq!(write, StatusWrite::Refused);
        }
        assert_eq!(status_of(&db, "cb-1").await, CallbackStatus::Completed);

        // Completing again is accepted.
        let write = update_status(&db, &cb.id, CallbackStatus::Completed)
            .await
            .unwrap();
        assert_eq!(write, StatusWrite::Updated);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn mark_missed_only_touches_old_pending_rows() {
        let (db, _dir) = setup_db().await;
        let mut old_done = make_callback("old-done", "a1", "2025-03-10T07:00:00");
        old_done.status = CallbackStatus::Completed;
        insert_callback(&db, &old_done).await.unwrap();
        for (id, due) in [
            ("old", "2025-03-10T08:00:00"),
            ("edge", "2025-03-10T09:00:00"),
        ] {
            insert_callback(&db, &make_callback(id, "a1", due))
                .await
                .unwrap();
        }

        let cutoff = parse_datetime("2025-03-10T09:00:00").unwrap();
        assert_eq!(mark_missed_before(&db, cutoff).await.unwrap(), 1);

        assert_eq!(status_of(&db, "old").await, CallbackStatus::Missed);
        assert_eq!(status_of(&db, "edge").await, CallbackStatus::Pending);
        assert_eq!(status_of(&db, "old-done").await, CallbackStatus::Completed);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn schema_rejects_blank_phone() {
        let (db, _dir) = setup_db().await;
        let mut cb = make_callback("blank", "a1", "2025-03-10T08:00:00");
        cb.phone_number = "  ".to_string();
        let err = insert_callback(&db, &cb).await.unwrap_err();
        assert_eq!(err.kind(), collectdesk_core::ErrorKind::BackendUnavailable);
        db.close().await.unwrap();
    }
}
