// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded exponential back-off with jitter for session establishment.
//!
//! Keeps a storm of expired sessions from hammering a busy ensemble with a
//! tight retry loop.

use rand::Rng;
use std::thread;
use std::time::Duration;

const BASE: Duration = Duration::from_millis(10);
const CAP: Duration = Duration::from_secs(5);

pub struct Backoff {
    current: Duration,
}

impl Backoff {
    pub fn new() -> Self {
        Backoff { current: BASE }
    }

    /// The next delay: current step scaled by 0.5–1.5, doubling up to the cap.
    pub fn next_delay(&mut self) -> Duration {
        let jitter = rand::thread_rng().gen_range(0.5..1.5);
        let delay = self.current.mul_f64(jitter).min(CAP);
        self.current = (self.current * 2).min(CAP);
        delay
    }

    pub fn sleep(&mut self) {
        thread::sleep(self.next_delay());
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff::new()
    }
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
