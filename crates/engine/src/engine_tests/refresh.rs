// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn fd_change_falls_back_to_a_fresh_registration() {
    let (engine, _connector) = children_engine(1);
    engine.ramp().unwrap();

    let old_fd = {
        let mut st = engine.slot(0).state.lock();
        let client = st.client.as_mut().unwrap();
        let old_fd = client.raw_fd();
        client.swap_socket().unwrap();
        old_fd
    };

    // Modify on the unknown FD falls back to add; no fatal exit.
    engine.refresh_interest(0).unwrap();
    {
        let st = engine.slot(0).state.lock();
        assert_ne!(st.client.as_ref().unwrap().raw_fd(), old_fd);
    }

    // The new FD is live: readiness flows through it.
    deliver(&engine, 0, WatchedEvent::session(SessionState::Connected));
    assert_eq!(engine.poll_once().unwrap(), 1);
    drain(&engine);
    assert!(engine.slot(0).state.lock().ctx.as_ref().unwrap().following);
}

#[parameterized(
    invalid_state = { ZkError::InvalidState },
    connection_loss = { ZkError::ConnectionLoss },
)]
fn stale_interest_drops_the_registration(err: ZkError) {
    let (engine, _connector) = children_engine(1);
    engine.ramp().unwrap();

    {
        let mut st = engine.slot(0).state.lock();
        let client = st.client.as_mut().unwrap();
        client.mark_readable();
        client.fail_next_interest(err);
    }
    engine.refresh_interest(0).unwrap();

    // Registration is gone: the readable byte no longer surfaces.
    assert_eq!(engine.poll_once().unwrap(), 0);
    assert_eq!(engine.queue_len(), 0);
}

#[test]
fn refresher_skips_slots_without_a_client() {
    let (engine, _connector) = children_engine(3);
    // No ramp: every slot is empty.
    engine.refresh_all().unwrap();
}

#[test]
fn steady_state_refresh_keeps_registrations_valid() {
    let (engine, _connector) = children_engine(2);
    engine.ramp().unwrap();

    // A few refresher sweeps over live clients are a no-op.
    for _ in 0..3 {
        engine.refresh_all().unwrap();
    }
    deliver(&engine, 1, WatchedEvent::session(SessionState::Connected));
    assert_eq!(engine.poll_once().unwrap(), 1);
}
