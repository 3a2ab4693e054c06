// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The pluggable session callback surface.
//!
//! A workload supplies per-session context and the watcher that gives each
//! connected session something to do. The engine owns expiry: by the time
//! `on_event` runs, session-expired events have already been consumed by the
//! trampoline (close, reset context, re-establish), so implementations only
//! see events a live session can act on. `on_event` runs inside the protocol
//! step, under the slot's record mutex; contexts need no locking of their
//! own, and the watcher must not block.

mod children;
mod ephemeral;

pub use children::{ChildrenContext, ChildrenWatcher};
pub use ephemeral::{EphemeralContext, EphemeralCreator};

use zksoak_client::SessionClient;
use zksoak_core::WatchedEvent;

pub trait Workload: Send + Sync + 'static {
    type Context: Send + 'static;

    /// Fresh context for a slot; called once per slot at ramp time.
    fn new_context(&self) -> Self::Context;

    /// Clear the context's flags after session expiry. The context object
    /// itself lives as long as the slot.
    fn reset_context(&self, ctx: &mut Self::Context);

    /// Handle one watch event for a live session.
    fn on_event(
        &self,
        client: &mut dyn SessionClient,
        ctx: &mut Self::Context,
        event: &WatchedEvent,
    );
}
