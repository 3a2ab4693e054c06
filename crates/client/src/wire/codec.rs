// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jute primitives and protocol constants.
//!
//! Everything on the wire is big-endian; buffers and strings are i32
//! length-prefixed; a length of -1 encodes an absent value.

use crate::error::ZkError;
use zksoak_core::{EventKind, SessionState};

/// Request opcodes (the consumed subset).
pub mod op {
    pub const CREATE: i32 = 1;
    pub const GET_CHILDREN: i32 = 8;
    pub const PING: i32 = 11;
    pub const CLOSE_SESSION: i32 = -11;
}

/// xid of server-initiated watch notifications.
pub const WATCHER_EVENT_XID: i32 = -1;
/// xid of ping replies.
pub const PING_XID: i32 = -2;

pub fn put_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

pub fn put_i64(buf: &mut Vec<u8>, v: i64) {
    buf.extend_from_slice(&v.to_be_bytes());
}

pub fn put_bool(buf: &mut Vec<u8>, v: bool) {
    buf.push(u8::from(v));
}

pub fn put_buffer(buf: &mut Vec<u8>, bytes: &[u8]) {
    put_i32(buf, bytes.len() as i32);
    buf.extend_from_slice(bytes);
}

pub fn put_str(buf: &mut Vec<u8>, s: &str) {
    put_buffer(buf, s.as_bytes());
}

/// Cursor over one received frame.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Reader { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ZkError> {
        if self.remaining() < n {
            return Err(ZkError::Marshalling);
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn i32(&mut self) -> Result<i32, ZkError> {
        let bytes = self.take(4)?;
        let arr: [u8; 4] = bytes.try_into().map_err(|_| ZkError::Marshalling)?;
        Ok(i32::from_be_bytes(arr))
    }

    pub fn i64(&mut self) -> Result<i64, ZkError> {
        let bytes = self.take(8)?;
        let arr: [u8; 8] = bytes.try_into().map_err(|_| ZkError::Marshalling)?;
        Ok(i64::from_be_bytes(arr))
    }

    pub fn bool(&mut self) -> Result<bool, ZkError> {
        Ok(self.take(1)?[0] != 0)
    }

    /// i32-length-prefixed byte buffer; -1 decodes as empty.
    pub fn buffer(&mut self) -> Result<Vec<u8>, ZkError> {
        let len = self.i32()?;
        if len < 0 {
            return Ok(Vec::new());
        }
        Ok(self.take(len as usize)?.to_vec())
    }

    pub fn string(&mut self) -> Result<String, ZkError> {
        String::from_utf8(self.buffer()?).map_err(|_| ZkError::Marshalling)
    }

    pub fn string_vec(&mut self) -> Result<Vec<String>, ZkError> {
        let count = self.i32()?;
        if count < 0 {
            return Ok(Vec::new());
        }
        let mut out = Vec::with_capacity(count as usize);
        for _ in 0..count {
            out.push(self.string()?);
        }
        Ok(out)
    }
}

/// Map a notification's type word to an event kind.
pub fn event_kind_from_code(code: i32) -> Option<EventKind> {
    match code {
        -1 => Some(EventKind::Session),
        1 => Some(EventKind::NodeCreated),
        2 => Some(EventKind::NodeDeleted),
        3 => Some(EventKind::NodeDataChanged),
        4 => Some(EventKind::NodeChildrenChanged),
        _ => None,
    }
}

/// Map a notification's state word to a session state.
pub fn session_state_from_code(code: i32) -> SessionState {
    match code {
        3 => SessionState::Connected,
        5 => SessionState::ConnectedReadOnly,
        -112 => SessionState::Expired,
        4 => SessionState::AuthFailed,
        _ => SessionState::Connecting,
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
