// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn fifo_order() {
    let queue = WorkQueue::new(4);
    assert!(queue.push(0));
    assert!(queue.push(1));
    assert!(queue.push(2));
    assert_eq!(queue.pop(), 0);
    assert_eq!(queue.pop(), 1);
    assert_eq!(queue.pop(), 2);
}

#[test]
fn push_refuses_when_full_and_never_blocks() {
    let queue = WorkQueue::new(2);
    assert!(queue.push(0));
    assert!(queue.push(1));
    assert!(!queue.push(2));
    assert_eq!(queue.len(), 2);
}

#[test]
fn try_pop_on_empty_is_none() {
    let queue = WorkQueue::new(2);
    assert_eq!(queue.try_pop(), None);
    assert!(queue.is_empty());
}

#[test]
fn pop_blocks_until_an_item_arrives() {
    let queue = Arc::new(WorkQueue::new(2));
    let consumer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || queue.pop())
    };
    thread::sleep(Duration::from_millis(20));
    assert!(queue.push(7));
    assert_eq!(consumer.join().unwrap(), 7);
}

#[test]
fn many_producers_one_consumer_sees_everything() {
    let queue = Arc::new(WorkQueue::new(64));
    let producers: Vec<_> = (0..4)
        .map(|p| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..8 {
                    assert!(queue.push(p * 8 + i));
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }
    let mut seen: Vec<usize> = (0..32).map(|_| queue.pop()).collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..32).collect::<Vec<_>>());
}
