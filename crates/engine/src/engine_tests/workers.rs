// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::thread;

#[test]
fn parallel_workers_drain_every_queued_slot() {
    let (engine, connector) = children_engine(8);
    engine.ramp().unwrap();
    for index in 0..8 {
        deliver(&engine, index, WatchedEvent::session(SessionState::Connected));
    }
    engine.poll_once().unwrap();
    assert_eq!(engine.queue_len(), 8);

    let workers: Vec<_> = (0..2)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || while engine.try_process_next().unwrap() {})
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(engine.queue_len(), 0);
    assert_eq!(connector.children_calls().len(), 8);
    for index in 0..8 {
        let st = engine.slot(index).state.lock();
        assert!(st.ctx.as_ref().unwrap().following);
        assert_eq!(st.client.as_ref().unwrap().processed, 1, "one step per slot");
    }
}
