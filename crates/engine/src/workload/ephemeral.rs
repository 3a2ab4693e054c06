// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ephemeral-creator workload: one ephemeral, sequential node per session.

use super::Workload;
use std::sync::Arc;
use tracing::{info, warn};
use zksoak_client::{Acl, CreateMode, SessionClient};
use zksoak_core::config::CREATE_PAYLOAD;
use zksoak_core::{SessionState, WatchedEvent};

pub struct EphemeralCreator {
    path: Arc<str>,
}

impl EphemeralCreator {
    pub fn new(path: Arc<str>) -> Self {
        EphemeralCreator { path }
    }
}

#[derive(Debug, Default)]
pub struct EphemeralContext {
    /// Set once the create for this session has been submitted.
    pub created: bool,
}

impl Workload for EphemeralCreator {
    type Context = EphemeralContext;

    fn new_context(&self) -> EphemeralContext {
        EphemeralContext::default()
    }

    fn reset_context(&self, ctx: &mut EphemeralContext) {
        ctx.created = false;
    }

    fn on_event(
        &self,
        client: &mut dyn SessionClient,
        ctx: &mut EphemeralContext,
        event: &WatchedEvent,
    ) {
        if !event.is_session() || event.state != SessionState::Connected || ctx.created {
            return;
        }
        let submitted = client.create(
            &self.path,
            CREATE_PAYLOAD,
            &Acl::open_unsafe(),
            CreateMode::EphemeralSequential,
            Box::new(|result| match result {
                Ok(path) => info!(%path, "created"),
                Err(err) => warn!(%err, "create failed"),
            }),
        );
        match submitted {
            Ok(()) => ctx.created = true,
            Err(err) => warn!(%err, "failed to submit create"),
        }
    }
}

#[cfg(test)]
#[path = "ephemeral_tests.rs"]
mod tests;
