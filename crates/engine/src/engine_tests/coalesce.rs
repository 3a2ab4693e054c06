// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn repeat_readiness_collapses_into_one_queue_entry() {
    let (engine, _connector) = children_engine(2);
    engine.ramp().unwrap();

    {
        let mut st = engine.slot(1).state.lock();
        let client = st.client.as_mut().unwrap();
        client.mark_readable();
        client.mark_readable();
    }

    // Two readiness observations before any worker picks the slot up.
    engine.poll_once().unwrap();
    assert_eq!(engine.queue_len(), 1);
    engine.poll_once().unwrap();
    assert_eq!(engine.queue_len(), 1, "still one entry for the slot");
    {
        let st = engine.slot(1).state.lock();
        assert!(st.queued);
        assert!(st.pending.readable(), "entry carries the merged mask");
    }

    // One queue entry means exactly one protocol step.
    drain(&engine);
    let st = engine.slot(1).state.lock();
    assert!(!st.queued);
    assert_eq!(st.client.as_ref().unwrap().processed, 1);
    assert_eq!(engine.queue_len(), 0);
}

#[test]
fn queued_entries_never_exceed_slot_count() {
    let (engine, _connector) = children_engine(4);
    engine.ramp().unwrap();

    for index in 0..4 {
        let mut st = engine.slot(index).state.lock();
        let client = st.client.as_mut().unwrap();
        client.mark_readable();
        client.mark_readable();
    }
    engine.poll_once().unwrap();
    engine.poll_once().unwrap();
    assert!(engine.queue_len() <= 4);
    assert_eq!(engine.queue_len(), 4);
}
