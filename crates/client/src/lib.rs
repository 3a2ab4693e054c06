// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! zksoak-client: the ZooKeeper client surface consumed by the engine.
//!
//! The engine only ever sees the [`Connector`] / [`SessionClient`] traits;
//! [`wire`] implements them over a plain TCP socket, and [`fake`] provides a
//! scriptable stand-in for tests (behind the `test-support` feature).

pub mod error;
pub mod session;
pub mod wire;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use error::ZkError;
pub use session::{
    Acl, ChildrenCallback, ClientInterest, Connector, CreateCallback, CreateMode, SessionClient,
};
pub use wire::{WireClient, WireConnector};
