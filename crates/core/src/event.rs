// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session states and watch events delivered by the client state machine.

/// Connection state of a session as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Socket not yet (or no longer) associated with a live session.
    Connecting,
    Connected,
    /// Connected to a read-only server.
    ConnectedReadOnly,
    /// Terminal: the server dropped the session. The handle must be closed
    /// and a new session established.
    Expired,
    AuthFailed,
}

impl SessionState {
    /// True for the states in which requests can be submitted.
    pub fn is_connected(self) -> bool {
        matches!(self, SessionState::Connected | SessionState::ConnectedReadOnly)
    }
}

/// Kind of a watch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Session state change (connect, disconnect, expiry).
    Session,
    NodeCreated,
    NodeDeleted,
    NodeDataChanged,
    NodeChildrenChanged,
}

/// One event produced by a protocol step, handed to the session callback
/// surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedEvent {
    pub kind: EventKind,
    pub state: SessionState,
    /// Node path for node events; session events carry none.
    pub path: Option<String>,
}

impl WatchedEvent {
    pub fn session(state: SessionState) -> Self {
        WatchedEvent {
            kind: EventKind::Session,
            state,
            path: None,
        }
    }

    pub fn node(kind: EventKind, state: SessionState, path: impl Into<String>) -> Self {
        WatchedEvent {
            kind,
            state,
            path: Some(path.into()),
        }
    }

    pub fn is_session(&self) -> bool {
        self.kind == EventKind::Session
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
