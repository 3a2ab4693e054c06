// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The client state-machine interface the engine drives.
//!
//! One [`SessionClient`] is one ZooKeeper session. The engine never performs
//! I/O itself: it asks the client what its socket wants ([`interest`]),
//! registers the bare FD with the readiness primitive, and calls
//! [`process`] when the poller reports the FD ready. Watch events come back
//! as the return value of `process`, so dispatch happens after the protocol
//! step while the caller still holds the per-session lock.
//!
//! [`interest`]: SessionClient::interest
//! [`process`]: SessionClient::process

use crate::error::ZkError;
use std::os::fd::BorrowedFd;
use std::time::Duration;
use zksoak_core::{IoInterest, SessionState, WatchedEvent};

/// Completion for an asynchronous create; carries the server-assigned path
/// (with the sequence suffix for sequential nodes).
pub type CreateCallback = Box<dyn FnOnce(Result<String, ZkError>) + Send>;

/// Completion for an asynchronous get-children.
pub type ChildrenCallback = Box<dyn FnOnce(Result<Vec<String>, ZkError>) + Send>;

/// Answer to an interest query: what the socket wants, and how long the
/// caller may wait before asking again (keep-alive deadline).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientInterest {
    pub ops: IoInterest,
    pub timeout: Duration,
}

/// Node creation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateMode {
    Persistent,
    Ephemeral,
    PersistentSequential,
    EphemeralSequential,
}

impl CreateMode {
    /// Wire flag word for this mode.
    pub fn flags(self) -> i32 {
        match self {
            CreateMode::Persistent => 0,
            CreateMode::Ephemeral => 1,
            CreateMode::PersistentSequential => 2,
            CreateMode::EphemeralSequential => 3,
        }
    }
}

/// One ACL entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acl {
    pub perms: i32,
    pub scheme: String,
    pub id: String,
}

/// All permission bits.
pub const PERM_ALL: i32 = 0x1f;

impl Acl {
    /// The `world:anyone` wide-open ACL (ZOO_OPEN_ACL_UNSAFE).
    pub fn open_unsafe() -> Vec<Acl> {
        vec![Acl {
            perms: PERM_ALL,
            scheme: "world".to_string(),
            id: "anyone".to_string(),
        }]
    }
}

/// A single session's protocol state machine.
///
/// Closing a session is dropping the value; a best-effort close is sent to
/// the server where possible.
pub trait SessionClient: Send {
    /// Current socket interest. `Ok(None)` means the client has no FD right
    /// now. `ConnectionLoss`/`InvalidState` tell the caller the previous FD
    /// (if [`socket_fd`] still returns one) should be dropped from the
    /// readiness primitive.
    ///
    /// [`socket_fd`]: SessionClient::socket_fd
    fn interest(&mut self) -> Result<Option<ClientInterest>, ZkError>;

    /// The bare socket FD, when one exists.
    fn socket_fd(&self) -> Option<BorrowedFd<'_>>;

    /// Drive one protocol step with the readiness mask the poller observed.
    /// Returns the watch events the step produced, in delivery order.
    fn process(&mut self, ready: IoInterest) -> Result<Vec<WatchedEvent>, ZkError>;

    /// Current session state.
    fn state(&self) -> SessionState;

    /// Submit an asynchronous create.
    fn create(
        &mut self,
        path: &str,
        payload: &[u8],
        acl: &[Acl],
        mode: CreateMode,
        completion: CreateCallback,
    ) -> Result<(), ZkError>;

    /// Submit an asynchronous get-children, optionally (re-)arming the
    /// children watch on `path`.
    fn get_children(
        &mut self,
        path: &str,
        watch: bool,
        completion: ChildrenCallback,
    ) -> Result<(), ZkError>;
}

/// Factory for session state machines; the `init` half of the client
/// library interface. Allocation only: I/O starts at the first interest
/// query, which is also where transient connect failures surface.
pub trait Connector: Send + Sync + 'static {
    type Client: SessionClient + 'static;

    fn connect(
        &self,
        server: &str,
        session_timeout_ms: u32,
        read_only: bool,
    ) -> Result<Self::Client, ZkError>;
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
