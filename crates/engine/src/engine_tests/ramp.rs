// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::error::EXIT_ZOOKEEPER_CALL;

#[test]
fn happy_ramp_arms_every_session() {
    let (engine, connector) = children_engine(4);
    engine.ramp().unwrap();

    // One handle per slot, all registered.
    assert_eq!(connector.connects(), 4);
    for index in 0..4 {
        assert!(engine.slot(index).state.lock().client.is_some());
    }

    for index in 0..4 {
        deliver(&engine, index, WatchedEvent::session(SessionState::Connected));
    }
    // Every registered FD reports readable in one wait.
    assert_eq!(engine.poll_once().unwrap(), 4);
    assert_eq!(engine.queue_len(), 4);
    drain(&engine);

    let calls = connector.children_calls();
    assert_eq!(calls.len(), 4);
    assert!(calls.iter().all(|c| c.path == "/x" && c.watch));
    for index in 0..4 {
        let st = engine.slot(index).state.lock();
        assert!(st.ctx.as_ref().unwrap().following);
        assert!(!st.queued);
    }
}

#[test]
fn connection_loss_during_establish_closes_and_retries() {
    let (engine, connector) = children_engine(2);
    connector.fail_first_interest(1);

    engine.ramp().unwrap();

    // Slot 0 took two init calls and one close; slot 1 connected first try.
    assert_eq!(connector.connects(), 3);
    assert_eq!(connector.closes(), 1);
    assert!(engine.slot(0).state.lock().client.is_some());
    assert!(engine.slot(1).state.lock().client.is_some());
}

#[test]
fn non_transient_establish_failure_is_fatal_with_zookeeper_exit_code() {
    let (engine, connector) = children_engine(1);
    connector.fail_interest_with(ZkError::AuthFailed);

    let err = engine.ramp().unwrap_err();
    assert_eq!(err.exit_code(), EXIT_ZOOKEEPER_CALL);
}

#[test]
fn paced_ramp_still_creates_every_session() {
    let connector = FakeConnector::default();
    let cfg = RunConfig {
        sleep_after_clients: 2,
        sleep_in_between: 0,
        ..test_config(5, 1)
    };
    let workload = ChildrenWatcher::new(Arc::clone(&cfg.path));
    let engine = Engine::new(cfg, connector.clone(), workload).unwrap();

    engine.ramp().unwrap();
    assert_eq!(connector.connects(), 5);
}
