// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn expiry_recreates_the_session_in_place() {
    let connector = FakeConnector::default();
    let (workload, resets) = ProbeWorkload::new();
    let engine = Engine::new(test_config(3, 1), connector.clone(), workload).unwrap();
    engine.ramp().unwrap();
    assert_eq!(connector.connects(), 3);
    let old_client_id = engine.slot(2).state.lock().client.as_ref().unwrap().id;

    deliver(&engine, 2, WatchedEvent::session(SessionState::Expired));
    engine.poll_once().unwrap();
    assert!(engine.try_process_next().unwrap());

    // The old handle was closed exactly once and a new init was issued.
    assert_eq!(connector.closes(), 1);
    assert_eq!(connector.connects(), 4);
    // reset_context ran exactly once, on the same context object.
    assert_eq!(*resets.lock(), vec![2]);
    {
        let st = engine.slot(2).state.lock();
        let ctx = st.ctx.as_ref().unwrap();
        assert_eq!(ctx.id, 2, "context identity survives recreation");
        assert!(!ctx.engaged, "flags are clear right after reset");
        assert_ne!(st.client.as_ref().unwrap().id, old_client_id);
    }

    // The replacement session is registered: readiness flows again.
    deliver(&engine, 2, WatchedEvent::session(SessionState::Connected));
    assert_eq!(engine.poll_once().unwrap(), 1);
    drain(&engine);
    assert!(engine.slot(2).state.lock().ctx.as_ref().unwrap().engaged);
}

#[test]
fn expiry_clears_and_rearms_the_children_watch() {
    let (engine, connector) = children_engine(2);
    engine.ramp().unwrap();

    deliver(&engine, 0, WatchedEvent::session(SessionState::Connected));
    engine.poll_once().unwrap();
    drain(&engine);
    assert!(engine.slot(0).state.lock().ctx.as_ref().unwrap().following);
    assert_eq!(connector.children_calls().len(), 1);

    deliver(&engine, 0, WatchedEvent::session(SessionState::Expired));
    engine.poll_once().unwrap();
    drain(&engine);
    assert!(
        !engine.slot(0).state.lock().ctx.as_ref().unwrap().following,
        "flag is clear immediately after reset"
    );

    deliver(&engine, 0, WatchedEvent::session(SessionState::Connected));
    engine.poll_once().unwrap();
    drain(&engine);
    assert!(engine.slot(0).state.lock().ctx.as_ref().unwrap().following);
    assert_eq!(connector.children_calls().len(), 2);
}

#[test]
fn other_slots_are_untouched_by_a_neighbors_expiry() {
    let connector = FakeConnector::default();
    let (workload, resets) = ProbeWorkload::new();
    let engine = Engine::new(test_config(3, 1), connector.clone(), workload).unwrap();
    engine.ramp().unwrap();
    let ids: Vec<u32> = (0..3)
        .map(|i| engine.slot(i).state.lock().client.as_ref().unwrap().id)
        .collect();

    deliver(&engine, 1, WatchedEvent::session(SessionState::Expired));
    engine.poll_once().unwrap();
    drain(&engine);

    assert_eq!(*resets.lock(), vec![1]);
    let after: Vec<u32> = (0..3)
        .map(|i| engine.slot(i).state.lock().client.as_ref().unwrap().id)
        .collect();
    assert_eq!(after[0], ids[0]);
    assert_eq!(after[2], ids[2]);
    assert_ne!(after[1], ids[1]);
}
