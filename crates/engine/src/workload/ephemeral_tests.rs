// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use zksoak_client::fake::FakeConnector;
use zksoak_client::{Connector, ZkError};
use zksoak_core::EventKind;

fn connected_client(connector: &FakeConnector) -> zksoak_client::fake::FakeClient {
    let mut client = connector.connect("server", 10_000, true).unwrap();
    client.deliver(WatchedEvent::session(SessionState::Connected));
    client
}

#[test]
fn creates_once_per_session() {
    let connector = FakeConnector::default();
    let workload = EphemeralCreator::new(Arc::from("/z"));
    let mut ctx = workload.new_context();
    let mut client = connected_client(&connector);
    let connected = WatchedEvent::session(SessionState::Connected);

    workload.on_event(&mut client, &mut ctx, &connected);
    assert!(ctx.created);

    // A second connected notification does not create again.
    workload.on_event(&mut client, &mut ctx, &connected);
    let creates = connector.creates();
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].path, "/z");
    assert_eq!(creates[0].payload, b"test");
    assert_eq!(creates[0].mode, CreateMode::EphemeralSequential);
    assert_eq!(creates[0].acl_entries, 1);
}

#[test]
fn reset_allows_the_next_session_to_recreate() {
    let connector = FakeConnector::default();
    let workload = EphemeralCreator::new(Arc::from("/z"));
    let mut ctx = workload.new_context();
    let mut client = connected_client(&connector);
    let connected = WatchedEvent::session(SessionState::Connected);

    workload.on_event(&mut client, &mut ctx, &connected);
    workload.reset_context(&mut ctx);
    assert!(!ctx.created);
    workload.on_event(&mut client, &mut ctx, &connected);
    assert_eq!(connector.creates().len(), 2);
}

#[test]
fn non_session_events_are_ignored() {
    let connector = FakeConnector::default();
    let workload = EphemeralCreator::new(Arc::from("/z"));
    let mut ctx = workload.new_context();
    let mut client = connected_client(&connector);

    let node = WatchedEvent::node(EventKind::NodeCreated, SessionState::Connected, "/z0001");
    workload.on_event(&mut client, &mut ctx, &node);
    assert!(!ctx.created);
    assert!(connector.creates().is_empty());
}

#[test]
fn failed_submission_leaves_the_flag_clear() {
    let connector = FakeConnector::default();
    connector.fail_next_op(ZkError::ConnectionLoss);
    let workload = EphemeralCreator::new(Arc::from("/z"));
    let mut ctx = workload.new_context();
    let mut client = connected_client(&connector);
    let connected = WatchedEvent::session(SessionState::Connected);

    workload.on_event(&mut client, &mut ctx, &connected);
    assert!(!ctx.created, "a dropped submission must be retryable");

    // The next watcher invocation retries.
    workload.on_event(&mut client, &mut ctx, &connected);
    assert!(ctx.created);
    assert_eq!(connector.creates().len(), 1);
}
