// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-session connection records.
//!
//! One record per slot, allocated once at engine start and never moved;
//! reconnection reuses the slot. The record mutex serializes every field
//! and every call into the slot's protocol state machine: at most one
//! worker is inside a protocol step per session.

use parking_lot::Mutex;
use std::sync::Arc;
use zksoak_core::IoInterest;

/// A session slot: stable index plus the mutex-guarded mutable state.
pub struct Slot<C, X> {
    pub index: usize,
    pub state: Mutex<SlotState<C, X>>,
}

/// Everything the record mutex protects.
pub struct SlotState<C, X> {
    /// The protocol state machine, absent while no session exists.
    pub client: Option<C>,
    /// Target endpoint, stamped in by the creator.
    pub server: Option<Arc<str>>,
    pub session_timeout_ms: u32,
    /// Readiness observed by the poller, consumed by the next protocol step.
    pub pending: IoInterest,
    /// True iff this slot currently sits in the work queue.
    pub queued: bool,
    /// Workload-private state; reset in place on expiry, never replaced.
    pub ctx: Option<X>,
}

impl<C, X> Slot<C, X> {
    pub fn new(index: usize) -> Self {
        Slot {
            index,
            state: Mutex::new(SlotState {
                client: None,
                server: None,
                session_timeout_ms: 0,
                pending: IoInterest::NONE,
                queued: false,
                ctx: None,
            }),
        }
    }
}
