// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ZooKeeper call errors.

use thiserror::Error;

/// Errors surfaced by the client state machine.
///
/// `ConnectionLoss` is the one transient case: session establishment retries
/// on it, and the interest refresher drops the stale registration on it.
/// Everything else is either fatal to establishment or dropped with a warning
/// at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZkError {
    #[error("connection loss")]
    ConnectionLoss,
    #[error("invalid client state")]
    InvalidState,
    #[error("session expired")]
    SessionExpired,
    #[error("bad arguments")]
    BadArguments,
    #[error("marshalling error")]
    Marshalling,
    #[error("authentication failed")]
    AuthFailed,
    #[error("no node")]
    NoNode,
    #[error("node exists")]
    NodeExists,
    /// Any server result code this client has no dedicated variant for.
    #[error("server error code {0}")]
    Server(i32),
}

impl ZkError {
    /// Map a server result code to an error; `0` (OK) maps to `None`.
    pub fn from_code(code: i32) -> Option<ZkError> {
        match code {
            0 => None,
            -4 => Some(ZkError::ConnectionLoss),
            -5 => Some(ZkError::Marshalling),
            -8 => Some(ZkError::BadArguments),
            -9 => Some(ZkError::InvalidState),
            -101 => Some(ZkError::NoNode),
            -110 => Some(ZkError::NodeExists),
            -112 => Some(ZkError::SessionExpired),
            -115 => Some(ZkError::AuthFailed),
            other => Some(ZkError::Server(other)),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
