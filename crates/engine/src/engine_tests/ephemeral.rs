// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::workload::EphemeralCreator;
use zksoak_client::CreateMode;

fn ephemeral_engine(
    num_clients: usize,
) -> (Arc<Engine<FakeConnector, EphemeralCreator>>, FakeConnector) {
    let connector = FakeConnector::default();
    let cfg = RunConfig {
        path: Arc::from("/z"),
        ..test_config(num_clients, 1)
    };
    let workload = EphemeralCreator::new(Arc::clone(&cfg.path));
    let engine = Engine::new(cfg, connector.clone(), workload).unwrap();
    (Arc::new(engine), connector)
}

#[test]
fn connected_sessions_create_exactly_one_ephemeral_each() {
    let (engine, connector) = ephemeral_engine(2);
    engine.ramp().unwrap();

    for index in 0..2 {
        deliver(&engine, index, WatchedEvent::session(SessionState::Connected));
    }
    assert_eq!(engine.poll_once().unwrap(), 2);
    drain(&engine);

    let creates = connector.creates();
    assert_eq!(creates.len(), 2);
    for call in &creates {
        assert_eq!(call.path, "/z");
        assert_eq!(call.payload, b"test");
        assert_eq!(call.mode, CreateMode::EphemeralSequential);
        assert_eq!(call.acl_entries, 1, "the wide-open ACL");
    }
    for index in 0..2 {
        assert!(engine.slot(index).state.lock().ctx.as_ref().unwrap().created);
    }

    // Further session traffic while the sessions stay valid creates nothing.
    for index in 0..2 {
        deliver(&engine, index, WatchedEvent::session(SessionState::Connected));
    }
    engine.poll_once().unwrap();
    drain(&engine);
    assert_eq!(connector.creates().len(), 2);
}

#[test]
fn expiry_recreates_the_node_on_the_next_session() {
    let (engine, connector) = ephemeral_engine(2);
    engine.ramp().unwrap();
    deliver(&engine, 0, WatchedEvent::session(SessionState::Connected));
    engine.poll_once().unwrap();
    drain(&engine);
    assert_eq!(connector.creates().len(), 1);

    deliver(&engine, 0, WatchedEvent::session(SessionState::Expired));
    engine.poll_once().unwrap();
    drain(&engine);
    assert!(
        !engine.slot(0).state.lock().ctx.as_ref().unwrap().created,
        "flag is clear right after reset"
    );

    deliver(&engine, 0, WatchedEvent::session(SessionState::Connected));
    engine.poll_once().unwrap();
    drain(&engine);
    assert_eq!(connector.creates().len(), 2);
    assert!(engine.slot(0).state.lock().ctx.as_ref().unwrap().created);
}
