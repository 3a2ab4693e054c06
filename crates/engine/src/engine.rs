// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-process concurrency engine.
//!
//! Four roles share one `Arc<Engine>`:
//!
//! - `creator` ramps every slot up to a registered FD, optionally paced.
//! - `interests` asks each client state machine what its socket wants every
//!   10 ms and re-syncs the epoll registration (modify, falling back to add
//!   when the client reconnected onto a new FD).
//! - `poller` blocks in `epoll_wait` and turns readiness into work-queue
//!   entries, one per slot at most (the queued flag dedups).
//! - `work[j]` threads run protocol steps under the record mutex and
//!   dispatch the resulting watch events: expiry is handled here by closing
//!   the handle, resetting the workload context in place, and
//!   re-establishing into the same slot.
//!
//! Each role's single iteration is a method, which is what the tests drive.

use crate::backoff::Backoff;
use crate::error::EngineError;
use crate::queue::WorkQueue;
use crate::record::{Slot, SlotState};
use crate::workload::Workload;
use nix::errno::Errno;
use nix::sys::epoll::{Epoll, EpollCreateFlags, EpollEvent, EpollFlags, EpollTimeout};
use parking_lot::MutexGuard;
use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use zksoak_client::{Connector, SessionClient, ZkError};
use zksoak_core::{IoInterest, RunConfig, SessionState, WatchedEvent};

/// Sweep period of the interest refresher.
const REFRESH_TICK: Duration = Duration::from_millis(10);

pub struct Engine<C: Connector, W: Workload> {
    cfg: RunConfig,
    connector: C,
    workload: W,
    epoll: Epoll,
    slots: Vec<Slot<C::Client, W::Context>>,
    queue: WorkQueue,
}

fn epoll_flags(ops: IoInterest) -> EpollFlags {
    let mut flags = EpollFlags::empty();
    if ops.readable() {
        flags |= EpollFlags::EPOLLIN;
    }
    if ops.writable() {
        flags |= EpollFlags::EPOLLOUT;
    }
    flags
}

impl<C: Connector, W: Workload> Engine<C, W> {
    pub fn new(cfg: RunConfig, connector: C, workload: W) -> Result<Self, EngineError> {
        let epoll = Epoll::new(EpollCreateFlags::empty())?;
        let slots = (0..cfg.num_clients).map(Slot::new).collect();
        let queue = WorkQueue::new(cfg.num_clients);
        Ok(Engine {
            cfg,
            connector,
            workload,
            epoll,
            slots,
            queue,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.cfg
    }

    #[cfg(test)]
    pub(crate) fn slot(&self, index: usize) -> &Slot<C::Client, W::Context> {
        &self.slots[index]
    }

    #[cfg(test)]
    pub(crate) fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Bring every slot up to first readiness, in slot order. Pacing, when
    /// configured, applies only to this initial ramp.
    pub fn ramp(&self) -> Result<(), EngineError> {
        for index in 0..self.cfg.num_clients {
            let ctx = self.workload.new_context();
            {
                let mut st = self.slots[index].state.lock();
                st.server = Some(Arc::clone(&self.cfg.server));
                st.session_timeout_ms = self.cfg.session_timeout_ms;
                st.ctx = Some(ctx);
                self.establish(&mut st, index)?;
            }
            if self.cfg.pace_after(index) {
                info!(
                    created = index,
                    secs = self.cfg.sleep_in_between,
                    "sleeping between session batches"
                );
                thread::sleep(Duration::from_secs(self.cfg.sleep_in_between));
            }
        }
        info!("done creating sessions");
        Ok(())
    }

    /// Create a session for `index` and register its FD, retrying with
    /// back-off while the server sheds connections. Called with the slot's
    /// record mutex held.
    fn establish(
        &self,
        st: &mut SlotState<C::Client, W::Context>,
        index: usize,
    ) -> Result<(), EngineError> {
        let server = st
            .server
            .clone()
            .ok_or_else(|| EngineError::Io(io::Error::other("slot has no server address")))?;
        let mut backoff = Backoff::new();
        loop {
            let mut client = self
                .connector
                .connect(&server, st.session_timeout_ms, true)?;
            match client.interest() {
                Ok(Some(interest)) => {
                    {
                        let fd = client.socket_fd().ok_or_else(|| {
                            EngineError::Io(io::Error::other("client has interest but no socket"))
                        })?;
                        self.epoll
                            .add(fd, EpollEvent::new(epoll_flags(interest.ops), index as u64))?;
                    }
                    st.client = Some(client);
                    return Ok(());
                }
                Ok(None) => {
                    return Err(EngineError::Io(io::Error::other(
                        "client has no socket to register",
                    )));
                }
                Err(ZkError::ConnectionLoss) => {
                    // Busy server perhaps? Close and try again.
                    debug!(slot = index, "connection loss during establish, retrying");
                    drop(client);
                    backoff.sleep();
                }
                Err(err) => return Err(EngineError::Client(err)),
            }
        }
    }

    /// One refresher sweep over every slot.
    pub fn refresh_all(&self) -> Result<(), EngineError> {
        for index in 0..self.slots.len() {
            self.refresh_interest(index)?;
        }
        Ok(())
    }

    /// Re-sync one slot's epoll registration with its client's current
    /// interest. The registration is keyed by FD: modify the existing one,
    /// fall back to add when the client moved to a new FD.
    pub fn refresh_interest(&self, index: usize) -> Result<(), EngineError> {
        let mut st = self.slots[index].state.lock();
        let Some(client) = st.client.as_mut() else {
            return Ok(());
        };
        match client.interest() {
            Ok(Some(interest)) => {
                let Some(fd) = client.socket_fd() else {
                    return Ok(());
                };
                let mut event = EpollEvent::new(epoll_flags(interest.ops), index as u64);
                match self.epoll.modify(fd, &mut event) {
                    Ok(()) => Ok(()),
                    Err(Errno::ENOENT) => {
                        // New FD, lets add it.
                        self.epoll
                            .add(fd, EpollEvent::new(epoll_flags(interest.ops), index as u64))?;
                        Ok(())
                    }
                    Err(err) => Err(EngineError::Sys(err)),
                }
            }
            Ok(None) => Ok(()),
            Err(err @ (ZkError::ConnectionLoss | ZkError::InvalidState)) => {
                if let Some(fd) = client.socket_fd() {
                    debug!(slot = index, %err, "dropping stale registration");
                    let _ = self.epoll.delete(fd);
                }
                Ok(())
            }
            Err(err) => {
                debug!(slot = index, %err, "interest query failed");
                Ok(())
            }
        }
    }

    /// One blocking readiness wait. Ready slots are marked pending and
    /// queued unless already queued, in which case the new readiness bits
    /// are merged into the pending mask of the existing entry.
    pub fn poll_once(&self) -> Result<usize, EngineError> {
        let mut events = vec![EpollEvent::empty(); self.cfg.max_events];
        let ready = match self
            .epoll
            .wait(&mut events, EpollTimeout::from(self.cfg.wait_time_ms))
        {
            Ok(n) => n,
            Err(Errno::EINTR) => return Ok(0),
            Err(err) => return Err(EngineError::Sys(err)),
        };
        for event in &events[..ready] {
            let flags = event.events();
            let index = event.data() as usize;
            if flags.intersects(EpollFlags::EPOLLIN | EpollFlags::EPOLLOUT) {
                let mut mask = IoInterest::NONE;
                if flags.contains(EpollFlags::EPOLLIN) {
                    mask = mask | IoInterest::READ;
                }
                if flags.contains(EpollFlags::EPOLLOUT) {
                    mask = mask | IoInterest::WRITE;
                }
                let Some(slot) = self.slots.get(index) else {
                    warn!(index, "readiness for an unknown slot");
                    continue;
                };
                let mut st = slot.state.lock();
                if st.queued {
                    st.pending = st.pending.union(mask);
                } else {
                    st.pending = mask;
                    st.queued = true;
                    if !self.queue.push(index) {
                        st.queued = false;
                        warn!(slot = index, "work queue full, dropping readiness");
                    }
                }
            } else if flags
                .intersects(EpollFlags::EPOLLHUP | EpollFlags::EPOLLERR | EpollFlags::EPOLLRDHUP)
            {
                // Invalid FDs are dropped once the client state machine
                // reports them stale to the refresher.
            } else {
                warn!(?flags, "unknown readiness bits");
            }
        }
        Ok(ready)
    }

    /// Worker iteration: block for a queued slot and run its protocol step.
    pub fn process_next(&self) -> Result<(), EngineError> {
        let index = self.queue.pop();
        self.process_slot(index)
    }

    /// Non-blocking worker iteration; false when the queue is empty.
    pub fn try_process_next(&self) -> Result<bool, EngineError> {
        match self.queue.try_pop() {
            Some(index) => self.process_slot(index).map(|()| true),
            None => Ok(false),
        }
    }

    fn process_slot(&self, index: usize) -> Result<(), EngineError> {
        let mut st = self.slots[index].state.lock();
        st.queued = false;
        let mask = st.pending;
        let events = match st.client.as_mut() {
            Some(client) => match client.process(mask) {
                Ok(events) => events,
                Err(err) => {
                    debug!(slot = index, %err, "protocol step failed");
                    return Ok(());
                }
            },
            None => return Ok(()),
        };
        self.dispatch(st, index, events)
    }

    /// Watcher trampoline: consume expiry, forward everything else.
    fn dispatch(
        &self,
        mut st: MutexGuard<'_, SlotState<C::Client, W::Context>>,
        index: usize,
        events: Vec<WatchedEvent>,
    ) -> Result<(), EngineError> {
        for event in events {
            if event.is_session() && event.state == SessionState::Expired {
                info!(slot = index, "session expired, establishing a new one");
                st.client = None;
                if let Some(ctx) = st.ctx.as_mut() {
                    self.workload.reset_context(ctx);
                }
                self.establish(&mut st, index)?;
                continue;
            }
            let slot = &mut *st;
            if let (Some(client), Some(ctx)) = (slot.client.as_mut(), slot.ctx.as_mut()) {
                self.workload.on_event(client, ctx, &event);
            }
        }
        Ok(())
    }

    /// Spawn the four roles and run until a role hits a fatal error (which
    /// exits the process). Roles are immortal in the happy path.
    pub fn run(self: Arc<Self>) -> Result<(), EngineError> {
        let mut handles = Vec::new();

        let engine = Arc::clone(&self);
        handles.push(thread::Builder::new().name("creator".into()).spawn(move || {
            if let Err(err) = engine.ramp() {
                fatal(&err);
            }
        })?);

        let engine = Arc::clone(&self);
        handles.push(
            thread::Builder::new()
                .name("interests".into())
                .spawn(move || loop {
                    if let Err(err) = engine.refresh_all() {
                        fatal(&err);
                    }
                    thread::sleep(REFRESH_TICK);
                })?,
        );

        let engine = Arc::clone(&self);
        handles.push(
            thread::Builder::new()
                .name("poller".into())
                .spawn(move || loop {
                    if let Err(err) = engine.poll_once() {
                        fatal(&err);
                    }
                })?,
        );

        for worker in 0..self.cfg.num_workers {
            let engine = Arc::clone(&self);
            handles.push(
                thread::Builder::new()
                    .name(format!("work[{worker}]"))
                    .spawn(move || loop {
                        if let Err(err) = engine.process_next() {
                            fatal(&err);
                        }
                    })?,
            );
        }

        for handle in handles {
            let _ = handle.join();
        }
        Ok(())
    }
}

fn fatal(err: &EngineError) -> ! {
    error!(%err, code = err.exit_code(), "engine role failed");
    std::process::exit(err.exit_code())
}

#[cfg(test)]
#[path = "engine_tests/mod.rs"]
mod tests;
