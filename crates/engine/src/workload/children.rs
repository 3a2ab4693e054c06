// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Children-watcher workload: keep a children watch armed on one path.

use super::Workload;
use std::sync::Arc;
use tracing::{info, warn};
use zksoak_client::{SessionClient, ZkError};
use zksoak_core::WatchedEvent;

pub struct ChildrenWatcher {
    path: Arc<str>,
}

impl ChildrenWatcher {
    pub fn new(path: Arc<str>) -> Self {
        ChildrenWatcher { path }
    }

    fn list(&self, client: &mut dyn SessionClient) -> Result<(), ZkError> {
        client.get_children(
            &self.path,
            true,
            Box::new(|result| {
                if let Ok(children) = result {
                    info!(count = children.len(), "got children");
                }
            }),
        )
    }
}

#[derive(Debug, Default)]
pub struct ChildrenContext {
    /// Set once this session has its watch armed.
    pub following: bool,
}

impl Workload for ChildrenWatcher {
    type Context = ChildrenContext;

    fn new_context(&self) -> ChildrenContext {
        ChildrenContext::default()
    }

    fn reset_context(&self, ctx: &mut ChildrenContext) {
        ctx.following = false;
    }

    fn on_event(
        &self,
        client: &mut dyn SessionClient,
        ctx: &mut ChildrenContext,
        event: &WatchedEvent,
    ) {
        if !event.is_session() {
            info!(kind = ?event.kind, state = ?event.state, path = event.path.as_deref(), "watch fired");
            // Watches are one-shot; re-arm on every delivery.
            if let Err(err) = self.list(client) {
                warn!(%err, "failed to list path");
            }
            return;
        }
        if client.state().is_connected() && !ctx.following {
            match self.list(client) {
                Ok(()) => ctx.following = true,
                Err(err) => warn!(%err, "failed to list path"),
            }
        }
    }
}

#[cfg(test)]
#[path = "children_tests.rs"]
mod tests;
