// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! zksoak-engine: the per-process session multiplexing engine.
//!
//! One [`Engine`] owns a fixed table of session slots and drives all of them
//! with four thread roles: a creator that ramps sessions up to first
//! readiness, a refresher that re-syncs each client's socket interest with
//! epoll every 10 ms, a poller that turns readiness into work-queue entries,
//! and a pool of workers that run the protocol steps. Session expiry is
//! handled inside the protocol step: the slot's client handle is replaced,
//! its workload context is reset in place, and the session is re-established
//! into the same slot.

pub mod backoff;
pub mod engine;
pub mod error;
pub mod queue;
pub mod record;
pub mod workload;

pub use engine::Engine;
pub use error::EngineError;
pub use workload::{ChildrenWatcher, EphemeralCreator, Workload};
