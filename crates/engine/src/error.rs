// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine failure taxonomy.

use thiserror::Error;
use zksoak_client::ZkError;

/// Exit code for failed OS calls.
pub const EXIT_SYSTEM_CALL: i32 = 2;
/// Exit code for failed ZooKeeper calls.
pub const EXIT_ZOOKEEPER_CALL: i32 = 3;

/// A fatal engine condition. Everything recoverable (transient connection
/// loss, interrupted waits, stale registrations) is handled in place and
/// never becomes an `EngineError`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("system call failed: {0}")]
    Sys(#[from] nix::errno::Errno),
    #[error("system call failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("zookeeper call failed: {0}")]
    Client(#[from] ZkError),
}

impl EngineError {
    /// Process exit code for this failure class.
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::Sys(_) | EngineError::Io(_) => EXIT_SYSTEM_CALL,
            EngineError::Client(_) => EXIT_ZOOKEEPER_CALL,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
