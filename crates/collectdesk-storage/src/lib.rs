// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Collectdesk callback engine.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, and the typed queries behind the
//! [`CallbackStore`](collectdesk_core::CallbackStore) implementation.
//!
//! All writes are serialized through tokio-rusqlite's one background thread:
//! [`Database`] wraps a single connection and every query module goes through
//! `Database::connection().call()`. Do not open extra connections for writes.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteCallbackStore;
pub use database::Database;
