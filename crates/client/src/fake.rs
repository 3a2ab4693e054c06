// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scriptable fake client for engine and workload tests.
//!
//! Each fake session is backed by a real socketpair so the engine's epoll
//! path is exercised for real: [`FakeClient::deliver`] queues a watch event
//! and writes a byte to the peer end, which makes the registered FD readable
//! and lets the poller/worker pipeline pick it up. The shared [`FakeHub`]
//! records connects, closes, and submitted operations for assertions.

use crate::error::ZkError;
use crate::session::{
    Acl, ChildrenCallback, ClientInterest, Connector, CreateCallback, CreateMode, SessionClient,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, RawFd};
use std::os::unix::net::UnixStream;
use std::sync::Arc;
use std::time::Duration;
use zksoak_core::{IoInterest, SessionState, WatchedEvent};

/// A recorded create submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCall {
    pub path: String,
    pub payload: Vec<u8>,
    pub mode: CreateMode,
    pub acl_entries: usize,
}

/// A recorded get-children submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildrenCall {
    pub path: String,
    pub watch: bool,
}

/// Shared recording and scripting state for every client a
/// [`FakeConnector`] hands out.
#[derive(Default)]
pub struct FakeHub {
    pub connects: u32,
    pub closes: u32,
    pub creates: Vec<CreateCall>,
    pub children_calls: Vec<ChildrenCall>,
    interest_error_script: VecDeque<ZkError>,
    fail_next_ops: VecDeque<ZkError>,
}

#[derive(Clone, Default)]
pub struct FakeConnector {
    hub: Arc<Mutex<FakeHub>>,
}

impl FakeConnector {
    pub fn hub(&self) -> Arc<Mutex<FakeHub>> {
        Arc::clone(&self.hub)
    }

    /// The next `n` connections each fail their first interest query with
    /// connection loss (a busy server refusing the session).
    pub fn fail_first_interest(&self, n: u32) {
        let mut hub = self.hub.lock();
        for _ in 0..n {
            hub.interest_error_script.push_back(ZkError::ConnectionLoss);
        }
    }

    /// The next connection fails its first interest query with `err`.
    pub fn fail_interest_with(&self, err: ZkError) {
        self.hub.lock().interest_error_script.push_back(err);
    }

    /// The next async submission (create or get-children) fails with `err`.
    pub fn fail_next_op(&self, err: ZkError) {
        self.hub.lock().fail_next_ops.push_back(err);
    }

    pub fn connects(&self) -> u32 {
        self.hub.lock().connects
    }

    pub fn closes(&self) -> u32 {
        self.hub.lock().closes
    }

    pub fn creates(&self) -> Vec<CreateCall> {
        self.hub.lock().creates.clone()
    }

    pub fn children_calls(&self) -> Vec<ChildrenCall> {
        self.hub.lock().children_calls.clone()
    }
}

impl Connector for FakeConnector {
    type Client = FakeClient;

    fn connect(
        &self,
        _server: &str,
        _session_timeout_ms: u32,
        _read_only: bool,
    ) -> Result<FakeClient, ZkError> {
        let mut interest_errors = VecDeque::new();
        let id = {
            let mut hub = self.hub.lock();
            hub.connects += 1;
            if let Some(err) = hub.interest_error_script.pop_front() {
                interest_errors.push_back(err);
            }
            hub.connects
        };
        let (stream, peer) = UnixStream::pair().map_err(|_| ZkError::ConnectionLoss)?;
        stream
            .set_nonblocking(true)
            .map_err(|_| ZkError::ConnectionLoss)?;
        Ok(FakeClient {
            hub: Arc::clone(&self.hub),
            id,
            stream,
            peer,
            pending_events: Vec::new(),
            state: SessionState::Connecting,
            interest_errors,
            processed: 0,
            last_processed_mask: None,
        })
    }
}

/// One fake session. Tests reach it through the engine's connection table
/// to deliver events or swap its socket.
pub struct FakeClient {
    hub: Arc<Mutex<FakeHub>>,
    /// Connection order, 1-based.
    pub id: u32,
    stream: UnixStream,
    peer: UnixStream,
    pending_events: Vec<WatchedEvent>,
    state: SessionState,
    interest_errors: VecDeque<ZkError>,
    /// Protocol steps taken.
    pub processed: u32,
    /// Readiness mask of the most recent protocol step.
    pub last_processed_mask: Option<IoInterest>,
}

impl FakeClient {
    /// Queue `event` for the next protocol step and mark the FD readable.
    pub fn deliver(&mut self, event: WatchedEvent) {
        if event.is_session() {
            self.state = event.state;
        }
        self.pending_events.push(event);
        let _ = self.peer.write(&[1]);
    }

    /// Replace the socketpair; the next interest query reports a new FD,
    /// as a client that reconnected internally would.
    pub fn swap_socket(&mut self) -> Result<(), ZkError> {
        let (stream, peer) = UnixStream::pair().map_err(|_| ZkError::ConnectionLoss)?;
        stream
            .set_nonblocking(true)
            .map_err(|_| ZkError::ConnectionLoss)?;
        self.stream = stream;
        self.peer = peer;
        Ok(())
    }

    /// Mark the FD readable without queuing an event.
    pub fn mark_readable(&mut self) {
        let _ = self.peer.write(&[1]);
    }

    /// The next interest query on this client fails with `err`.
    pub fn fail_next_interest(&mut self, err: ZkError) {
        self.interest_errors.push_back(err);
    }

    pub fn raw_fd(&self) -> RawFd {
        self.stream.as_raw_fd()
    }
}

impl SessionClient for FakeClient {
    fn interest(&mut self) -> Result<Option<ClientInterest>, ZkError> {
        if let Some(err) = self.interest_errors.pop_front() {
            return Err(err);
        }
        Ok(Some(ClientInterest {
            ops: IoInterest::READ,
            timeout: Duration::from_secs(10),
        }))
    }

    fn socket_fd(&self) -> Option<BorrowedFd<'_>> {
        Some(self.stream.as_fd())
    }

    fn process(&mut self, ready: IoInterest) -> Result<Vec<WatchedEvent>, ZkError> {
        self.processed += 1;
        self.last_processed_mask = Some(ready);
        let mut chunk = [0u8; 64];
        while let Ok(n) = self.stream.read(&mut chunk) {
            if n == 0 {
                break;
            }
        }
        Ok(std::mem::take(&mut self.pending_events))
    }

    fn state(&self) -> SessionState {
        self.state
    }

    fn create(
        &mut self,
        path: &str,
        payload: &[u8],
        acl: &[Acl],
        mode: CreateMode,
        completion: CreateCallback,
    ) -> Result<(), ZkError> {
        let mut hub = self.hub.lock();
        if let Some(err) = hub.fail_next_ops.pop_front() {
            return Err(err);
        }
        hub.creates.push(CreateCall {
            path: path.to_string(),
            payload: payload.to_vec(),
            mode,
            acl_entries: acl.len(),
        });
        drop(hub);
        completion(Ok(format!("{path}0000000001")));
        Ok(())
    }

    fn get_children(
        &mut self,
        path: &str,
        watch: bool,
        completion: ChildrenCallback,
    ) -> Result<(), ZkError> {
        let mut hub = self.hub.lock();
        if let Some(err) = hub.fail_next_ops.pop_front() {
            return Err(err);
        }
        hub.children_calls.push(ChildrenCall {
            path: path.to_string(),
            watch,
        });
        drop(hub);
        completion(Ok(Vec::new()));
        Ok(())
    }
}

impl Drop for FakeClient {
    fn drop(&mut self) {
        self.hub.lock().closes += 1;
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
