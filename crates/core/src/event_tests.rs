// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    connected = { SessionState::Connected, true },
    read_only = { SessionState::ConnectedReadOnly, true },
    connecting = { SessionState::Connecting, false },
    expired = { SessionState::Expired, false },
    auth_failed = { SessionState::AuthFailed, false },
)]
fn is_connected_covers_both_serving_states(state: SessionState, expected: bool) {
    assert_eq!(state.is_connected(), expected);
}

#[test]
fn session_event_has_no_path() {
    let ev = WatchedEvent::session(SessionState::Connected);
    assert!(ev.is_session());
    assert_eq!(ev.path, None);
}

#[test]
fn node_event_carries_path() {
    let ev = WatchedEvent::node(EventKind::NodeChildrenChanged, SessionState::Connected, "/x");
    assert!(!ev.is_session());
    assert_eq!(ev.path.as_deref(), Some("/x"));
}
