// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use zksoak_client::fake::FakeConnector;
use zksoak_client::Connector;
use zksoak_core::{EventKind, SessionState};
use yare::parameterized;

#[parameterized(
    writable = { SessionState::Connected },
    read_only = { SessionState::ConnectedReadOnly },
)]
fn follows_once_when_connected(state: SessionState) {
    let connector = FakeConnector::default();
    let workload = ChildrenWatcher::new(Arc::from("/x"));
    let mut ctx = workload.new_context();
    let mut client = connector.connect("server", 10_000, true).unwrap();
    client.deliver(WatchedEvent::session(state));

    let event = WatchedEvent::session(state);
    workload.on_event(&mut client, &mut ctx, &event);
    assert!(ctx.following);
    workload.on_event(&mut client, &mut ctx, &event);

    let calls = connector.children_calls();
    assert_eq!(calls.len(), 1, "the following flag gates repeats");
    assert_eq!(calls[0].path, "/x");
    assert!(calls[0].watch);
}

#[test]
fn watch_delivery_rearms_the_watch() {
    let connector = FakeConnector::default();
    let workload = ChildrenWatcher::new(Arc::from("/x"));
    let mut ctx = workload.new_context();
    let mut client = connector.connect("server", 10_000, true).unwrap();
    client.deliver(WatchedEvent::session(SessionState::Connected));
    workload.on_event(
        &mut client,
        &mut ctx,
        &WatchedEvent::session(SessionState::Connected),
    );

    let fired = WatchedEvent::node(EventKind::NodeChildrenChanged, SessionState::Connected, "/x");
    workload.on_event(&mut client, &mut ctx, &fired);
    workload.on_event(&mut client, &mut ctx, &fired);

    // One initial arm plus one re-arm per delivery.
    assert_eq!(connector.children_calls().len(), 3);
    assert!(connector.children_calls().iter().all(|c| c.watch));
}

#[test]
fn not_connected_sessions_do_not_follow() {
    let connector = FakeConnector::default();
    let workload = ChildrenWatcher::new(Arc::from("/x"));
    let mut ctx = workload.new_context();
    let mut client = connector.connect("server", 10_000, true).unwrap();

    workload.on_event(
        &mut client,
        &mut ctx,
        &WatchedEvent::session(SessionState::Connecting),
    );
    assert!(!ctx.following);
    assert!(connector.children_calls().is_empty());
}

#[test]
fn reset_clears_the_following_flag() {
    let connector = FakeConnector::default();
    let workload = ChildrenWatcher::new(Arc::from("/x"));
    let mut ctx = workload.new_context();
    let mut client = connector.connect("server", 10_000, true).unwrap();
    client.deliver(WatchedEvent::session(SessionState::Connected));
    workload.on_event(
        &mut client,
        &mut ctx,
        &WatchedEvent::session(SessionState::Connected),
    );
    assert!(ctx.following);

    workload.reset_context(&mut ctx);
    assert!(!ctx.following);
}
