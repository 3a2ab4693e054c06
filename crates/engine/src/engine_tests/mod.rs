// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end engine scenarios against the scriptable fake client.
//!
//! Each test drives role iterations directly (`ramp`, `refresh_interest`,
//! `poll_once`, `try_process_next`) so the pipeline is deterministic while
//! still exercising the real epoll path through the fakes' socketpairs.

use super::*;
use crate::workload::ChildrenWatcher;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use zksoak_client::fake::FakeConnector;

mod coalesce;
mod ephemeral;
mod expiry;
mod ramp;
mod refresh;
mod workers;

pub(crate) fn test_config(num_clients: usize, num_workers: usize) -> RunConfig {
    RunConfig {
        server: Arc::from("zk.test:2181"),
        path: Arc::from("/x"),
        num_clients,
        num_workers,
        wait_time_ms: 0,
        ..RunConfig::default()
    }
}

pub(crate) fn children_engine(
    num_clients: usize,
) -> (Arc<Engine<FakeConnector, ChildrenWatcher>>, FakeConnector) {
    let connector = FakeConnector::default();
    let cfg = test_config(num_clients, 2);
    let workload = ChildrenWatcher::new(Arc::clone(&cfg.path));
    let engine = Engine::new(cfg, connector.clone(), workload).unwrap();
    (Arc::new(engine), connector)
}

/// Deliver a watch event to a slot's fake client, marking its FD readable.
pub(crate) fn deliver<W: Workload>(
    engine: &Engine<FakeConnector, W>,
    index: usize,
    event: WatchedEvent,
) {
    let mut st = engine.slot(index).state.lock();
    st.client.as_mut().unwrap().deliver(event);
}

/// Run worker iterations until the queue is empty.
pub(crate) fn drain<W: Workload>(engine: &Engine<FakeConnector, W>) {
    while engine.try_process_next().unwrap() {}
}

/// Workload that tags each context with its creation order so tests can
/// check context identity across session recreation.
pub(crate) struct ProbeWorkload {
    next_id: AtomicU32,
    resets: Arc<Mutex<Vec<u32>>>,
}

pub(crate) struct ProbeContext {
    pub id: u32,
    pub engaged: bool,
}

impl ProbeWorkload {
    pub(crate) fn new() -> (Self, Arc<Mutex<Vec<u32>>>) {
        let resets = Arc::new(Mutex::new(Vec::new()));
        (
            ProbeWorkload {
                next_id: AtomicU32::new(0),
                resets: Arc::clone(&resets),
            },
            resets,
        )
    }
}

impl Workload for ProbeWorkload {
    type Context = ProbeContext;

    fn new_context(&self) -> ProbeContext {
        ProbeContext {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            engaged: false,
        }
    }

    fn reset_context(&self, ctx: &mut ProbeContext) {
        self.resets.lock().push(ctx.id);
        ctx.engaged = false;
    }

    fn on_event(
        &self,
        client: &mut dyn SessionClient,
        ctx: &mut ProbeContext,
        event: &WatchedEvent,
    ) {
        if event.is_session() && client.state().is_connected() {
            ctx.engaged = true;
        }
    }
}
