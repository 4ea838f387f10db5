// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Collectdesk tests.
//!
//! Provides deterministic stand-ins for the engine's collaborators so tests
//! run without a database or a real wall clock.
//!
//! # Components
//!
//! - [`MemoryCallbackStore`] - In-memory callback store with failure injection
//! - [`ManualClock`] - Clock that only moves when told to

pub mod clock;
pub mod memory_store;

pub use clock::ManualClock;
pub use memory_store::MemoryCallbackStore;
