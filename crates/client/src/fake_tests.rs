// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use zksoak_core::EventKind;

#[test]
fn deliver_queues_event_and_marks_fd_readable() {
    let connector = FakeConnector::default();
    let mut client = connector.connect("server", 10_000, true).unwrap();

    client.deliver(WatchedEvent::session(SessionState::Connected));
    assert_eq!(client.state(), SessionState::Connected);

    let events = client.process(IoInterest::READ).unwrap();
    assert_eq!(events, vec![WatchedEvent::session(SessionState::Connected)]);
    // Drained: a second step sees nothing.
    assert!(client.process(IoInterest::READ).unwrap().is_empty());
    assert_eq!(client.processed, 2);
}

#[test]
fn scripted_interest_failure_is_consumed_once() {
    let connector = FakeConnector::default();
    connector.fail_first_interest(1);

    let mut first = connector.connect("server", 10_000, true).unwrap();
    assert_eq!(first.interest(), Err(ZkError::ConnectionLoss));
    assert!(first.interest().unwrap().is_some());

    let mut second = connector.connect("server", 10_000, true).unwrap();
    assert!(second.interest().unwrap().is_some());
}

#[test]
fn hub_records_connects_closes_and_ops() {
    let connector = FakeConnector::default();
    let mut client = connector.connect("server", 10_000, true).unwrap();
    client
        .create(
            "/z",
            b"test",
            &Acl::open_unsafe(),
            CreateMode::EphemeralSequential,
            Box::new(|_| {}),
        )
        .unwrap();
    client
        .get_children("/x", true, Box::new(|_| {}))
        .unwrap();
    drop(client);

    assert_eq!(connector.connects(), 1);
    assert_eq!(connector.closes(), 1);
    assert_eq!(
        connector.creates(),
        vec![CreateCall {
            path: "/z".to_string(),
            payload: b"test".to_vec(),
            mode: CreateMode::EphemeralSequential,
            acl_entries: 1,
        }]
    );
    assert_eq!(
        connector.children_calls(),
        vec![ChildrenCall {
            path: "/x".to_string(),
            watch: true,
        }]
    );
}

#[test]
fn scripted_op_failure_is_not_recorded() {
    let connector = FakeConnector::default();
    connector.fail_next_op(ZkError::ConnectionLoss);
    let mut client = connector.connect("server", 10_000, true).unwrap();
    let result = client.get_children("/x", true, Box::new(|_| {}));
    assert_eq!(result, Err(ZkError::ConnectionLoss));
    assert!(connector.children_calls().is_empty());
}

#[test]
fn swap_socket_changes_the_reported_fd() {
    let connector = FakeConnector::default();
    let mut client = connector.connect("server", 10_000, true).unwrap();
    let before = client.raw_fd();
    client.swap_socket().unwrap();
    assert_ne!(client.raw_fd(), before);
    client.deliver(WatchedEvent::node(
        EventKind::NodeChildrenChanged,
        SessionState::Connected,
        "/x",
    ));
    assert_eq!(client.process(IoInterest::READ).unwrap().len(), 1);
}
