// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the engine and its collaborators.

pub mod clock;
pub mod store;

pub use clock::Clock;
pub use store::CallbackStore;
