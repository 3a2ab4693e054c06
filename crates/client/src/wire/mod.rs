// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire-protocol implementation of the client state machine.
//!
//! Implements the consumed subset of the protocol: connect handshake,
//! ping keep-alive, create, getChildren with the watch bit, and a
//! best-effort close on drop. The socket is non-blocking after a bounded
//! connect; all progress is driven by [`SessionClient::process`] calls with
//! the readiness mask the poller observed. Connection loss keeps the
//! session id and password so the next interest query reconnects into the
//! same session; the server answering the reconnect handshake with a zero
//! timeout is what surfaces expiry.

pub(crate) mod codec;

use crate::error::ZkError;
use crate::session::{
    Acl, ChildrenCallback, ClientInterest, Connector, CreateCallback, CreateMode, SessionClient,
};
use codec::{
    event_kind_from_code, op, put_bool, put_buffer, put_i32, put_i64, put_str,
    session_state_from_code, Reader, PING_XID, WATCHER_EVENT_XID,
};
use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::os::fd::{AsFd, BorrowedFd};
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use zksoak_core::{EventKind, IoInterest, SessionState, WatchedEvent};

/// Bound on the blocking part of a (re)connect.
const CONNECT_TIMEOUT: Duration = Duration::from_millis(250);

const SESSION_PASSWORD_LEN: usize = 16;

/// Connects [`WireClient`]s. Stateless; one value serves every slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct WireConnector;

impl Connector for WireConnector {
    type Client = WireClient;

    fn connect(
        &self,
        server: &str,
        session_timeout_ms: u32,
        read_only: bool,
    ) -> Result<WireClient, ZkError> {
        Ok(WireClient::new(server, session_timeout_ms, read_only))
    }
}

enum PendingOp {
    Create(CreateCallback),
    Children(ChildrenCallback),
}

/// One ZooKeeper session over one TCP socket.
pub struct WireClient {
    server: String,
    session_timeout_ms: u32,
    read_only: bool,
    state: SessionState,
    sock: Option<TcpStream>,
    handshake_done: bool,
    session_id: i64,
    passwd: Vec<u8>,
    last_zxid: i64,
    xid: i32,
    send_buf: Vec<u8>,
    recv_buf: Vec<u8>,
    pending: VecDeque<(i32, PendingOp)>,
    last_send: Instant,
}

impl WireClient {
    fn new(server: &str, session_timeout_ms: u32, read_only: bool) -> Self {
        WireClient {
            server: server.to_string(),
            session_timeout_ms,
            read_only,
            state: SessionState::Connecting,
            sock: None,
            handshake_done: false,
            session_id: 0,
            passwd: vec![0; SESSION_PASSWORD_LEN],
            last_zxid: 0,
            xid: 0,
            send_buf: Vec::new(),
            recv_buf: Vec::new(),
            pending: VecDeque::new(),
            last_send: Instant::now(),
        }
    }

    fn ping_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.session_timeout_ms) / 3)
    }

    fn next_xid(&mut self) -> i32 {
        self.xid = self.xid.wrapping_add(1);
        self.xid
    }

    fn enqueue_frame(&mut self, body: &[u8]) {
        put_i32(&mut self.send_buf, body.len() as i32);
        self.send_buf.extend_from_slice(body);
    }

    fn begin_connect(&mut self) -> Result<(), ZkError> {
        let target = if self.server.contains(':') {
            self.server.clone()
        } else {
            format!("{}:2181", self.server)
        };
        let addrs = target
            .to_socket_addrs()
            .map_err(|_| ZkError::ConnectionLoss)?;
        for addr in addrs {
            let Ok(sock) = TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT) else {
                continue;
            };
            sock.set_nonblocking(true)
                .map_err(|_| ZkError::ConnectionLoss)?;
            let _ = sock.set_nodelay(true);
            self.sock = Some(sock);
            self.state = SessionState::Connecting;
            self.handshake_done = false;
            self.send_buf.clear();
            self.recv_buf.clear();
            self.queue_connect_request();
            return Ok(());
        }
        Err(ZkError::ConnectionLoss)
    }

    fn queue_connect_request(&mut self) {
        let mut body = Vec::with_capacity(45);
        put_i32(&mut body, 0); // protocol version
        put_i64(&mut body, self.last_zxid);
        put_i32(&mut body, self.session_timeout_ms as i32);
        put_i64(&mut body, self.session_id);
        put_buffer(&mut body, &self.passwd);
        put_bool(&mut body, self.read_only);
        self.enqueue_frame(&body);
    }

    fn queue_ping(&mut self) {
        let mut body = Vec::with_capacity(8);
        put_i32(&mut body, PING_XID);
        put_i32(&mut body, op::PING);
        self.enqueue_frame(&body);
        // Treat the queue point as the send attempt so one blocked flush
        // does not stack up pings.
        self.last_send = Instant::now();
    }

    fn flush(&mut self) -> Result<(), ZkError> {
        let Some(sock) = self.sock.as_mut() else {
            return Ok(());
        };
        while !self.send_buf.is_empty() {
            match sock.write(&self.send_buf) {
                Ok(0) => return Err(ZkError::ConnectionLoss),
                Ok(n) => {
                    self.send_buf.drain(..n);
                    self.last_send = Instant::now();
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => return Err(ZkError::ConnectionLoss),
            }
        }
        Ok(())
    }

    fn fill(&mut self) -> Result<(), ZkError> {
        let Some(sock) = self.sock.as_mut() else {
            return Ok(());
        };
        let mut chunk = [0u8; 4096];
        loop {
            match sock.read(&mut chunk) {
                Ok(0) => return Err(ZkError::ConnectionLoss),
                Ok(n) => self.recv_buf.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => return Err(ZkError::ConnectionLoss),
            }
        }
    }

    fn drain_frames(&mut self, events: &mut Vec<WatchedEvent>) -> Result<(), ZkError> {
        loop {
            if self.recv_buf.len() < 4 {
                return Ok(());
            }
            let len = i32::from_be_bytes([
                self.recv_buf[0],
                self.recv_buf[1],
                self.recv_buf[2],
                self.recv_buf[3],
            ]);
            if len < 0 {
                return Err(ZkError::Marshalling);
            }
            let len = len as usize;
            if self.recv_buf.len() < 4 + len {
                return Ok(());
            }
            let frame: Vec<u8> = self.recv_buf.drain(..4 + len).skip(4).collect();
            self.handle_frame(&frame, events)?;
            if self.sock.is_none() {
                // Expired mid-drain; anything left belongs to the dead session.
                self.recv_buf.clear();
                return Ok(());
            }
        }
    }

    fn handle_frame(
        &mut self,
        frame: &[u8],
        events: &mut Vec<WatchedEvent>,
    ) -> Result<(), ZkError> {
        if !self.handshake_done {
            self.handle_connect_response(frame, events)
        } else {
            self.handle_reply(frame, events)
        }
    }

    fn handle_connect_response(
        &mut self,
        frame: &[u8],
        events: &mut Vec<WatchedEvent>,
    ) -> Result<(), ZkError> {
        let mut r = Reader::new(frame);
        let _protocol_version = r.i32()?;
        let negotiated_timeout = r.i32()?;
        let session_id = r.i64()?;
        let passwd = r.buffer()?;
        let read_only = if r.remaining() > 0 { r.bool()? } else { false };

        if negotiated_timeout <= 0 {
            // The server would not resurrect the session.
            self.session_id = 0;
            self.passwd = vec![0; SESSION_PASSWORD_LEN];
            self.last_zxid = 0;
            self.expire(events);
            return Ok(());
        }

        self.session_id = session_id;
        self.passwd = passwd;
        self.handshake_done = true;
        self.state = if read_only {
            SessionState::ConnectedReadOnly
        } else {
            SessionState::Connected
        };
        debug!(session_id, negotiated_timeout, "session established");
        events.push(WatchedEvent::session(self.state));
        Ok(())
    }

    fn handle_reply(&mut self, frame: &[u8], events: &mut Vec<WatchedEvent>) -> Result<(), ZkError> {
        let mut r = Reader::new(frame);
        let xid = r.i32()?;
        let zxid = r.i64()?;
        let err = r.i32()?;
        if zxid > self.last_zxid {
            self.last_zxid = zxid;
        }

        match xid {
            WATCHER_EVENT_XID => {
                let kind_code = r.i32()?;
                let state_code = r.i32()?;
                let path = r.string()?;
                match event_kind_from_code(kind_code) {
                    Some(EventKind::Session) => {
                        let state = session_state_from_code(state_code);
                        if state == SessionState::Expired {
                            self.expire(events);
                        } else {
                            self.state = state;
                            events.push(WatchedEvent::session(state));
                        }
                    }
                    Some(kind) => {
                        events.push(WatchedEvent::node(kind, session_state_from_code(state_code), path));
                    }
                    None => warn!(kind_code, "unknown watch event type"),
                }
            }
            PING_XID => {}
            _ => {
                let Some((expected, pending)) = self.pending.pop_front() else {
                    warn!(xid, "reply with no pending request");
                    return Ok(());
                };
                if expected != xid {
                    warn!(xid, expected, "out-of-order reply");
                    return Err(ZkError::Marshalling);
                }
                match pending {
                    PendingOp::Create(cb) => match ZkError::from_code(err) {
                        Some(e) => cb(Err(e)),
                        None => cb(Ok(r.string()?)),
                    },
                    PendingOp::Children(cb) => match ZkError::from_code(err) {
                        Some(e) => cb(Err(e)),
                        None => cb(Ok(r.string_vec()?)),
                    },
                }
            }
        }
        Ok(())
    }

    fn expire(&mut self, events: &mut Vec<WatchedEvent>) {
        self.state = SessionState::Expired;
        self.sock = None;
        self.handshake_done = false;
        self.send_buf.clear();
        self.fail_pending(ZkError::SessionExpired);
        events.push(WatchedEvent::session(SessionState::Expired));
    }

    fn disconnect(&mut self) {
        self.sock = None;
        self.handshake_done = false;
        if self.state != SessionState::Expired {
            self.state = SessionState::Connecting;
        }
        self.send_buf.clear();
        self.recv_buf.clear();
        self.fail_pending(ZkError::ConnectionLoss);
    }

    fn fail_pending(&mut self, err: ZkError) {
        for (_, pending) in self.pending.drain(..) {
            match pending {
                PendingOp::Create(cb) => cb(Err(err.clone())),
                PendingOp::Children(cb) => cb(Err(err.clone())),
            }
        }
    }
}

impl SessionClient for WireClient {
    fn interest(&mut self) -> Result<Option<ClientInterest>, ZkError> {
        // Terminal states fold into invalid-state, which is what tells the
        // refresher to drop the stale registration.
        if matches!(
            self.state,
            SessionState::Expired | SessionState::AuthFailed
        ) {
            return Err(ZkError::InvalidState);
        }
        if self.sock.is_none() {
            self.begin_connect()?;
        }
        if self.handshake_done
            && self.state.is_connected()
            && self.last_send.elapsed() >= self.ping_interval()
        {
            self.queue_ping();
        }
        let mut ops = IoInterest::READ;
        if !self.send_buf.is_empty() {
            ops = ops | IoInterest::WRITE;
        }
        let timeout = self.ping_interval().saturating_sub(self.last_send.elapsed());
        Ok(Some(ClientInterest { ops, timeout }))
    }

    fn socket_fd(&self) -> Option<BorrowedFd<'_>> {
        self.sock.as_ref().map(|s| s.as_fd())
    }

    fn process(&mut self, ready: IoInterest) -> Result<Vec<WatchedEvent>, ZkError> {
        if self.state == SessionState::Expired || self.sock.is_none() {
            return Err(ZkError::InvalidState);
        }
        let mut events = Vec::new();
        if ready.writable() {
            if let Err(err) = self.flush() {
                self.disconnect();
                return Err(err);
            }
        }
        if ready.readable() {
            if let Err(err) = self.fill() {
                self.disconnect();
                return Err(err);
            }
            if let Err(err) = self.drain_frames(&mut events) {
                self.disconnect();
                return Err(err);
            }
        }
        Ok(events)
    }

    fn state(&self) -> SessionState {
        self.state
    }

    fn create(
        &mut self,
        path: &str,
        payload: &[u8],
        acl: &[Acl],
        mode: CreateMode,
        completion: CreateCallback,
    ) -> Result<(), ZkError> {
        if !self.handshake_done || !self.state.is_connected() {
            return Err(ZkError::InvalidState);
        }
        let xid = self.next_xid();
        let mut body = Vec::new();
        put_i32(&mut body, xid);
        put_i32(&mut body, op::CREATE);
        put_str(&mut body, path);
        put_buffer(&mut body, payload);
        put_i32(&mut body, acl.len() as i32);
        for entry in acl {
            put_i32(&mut body, entry.perms);
            put_str(&mut body, &entry.scheme);
            put_str(&mut body, &entry.id);
        }
        put_i32(&mut body, mode.flags());
        self.enqueue_frame(&body);
        self.pending.push_back((xid, PendingOp::Create(completion)));
        Ok(())
    }

    fn get_children(
        &mut self,
        path: &str,
        watch: bool,
        completion: ChildrenCallback,
    ) -> Result<(), ZkError> {
        if !self.handshake_done || !self.state.is_connected() {
            return Err(ZkError::InvalidState);
        }
        let xid = self.next_xid();
        let mut body = Vec::new();
        put_i32(&mut body, xid);
        put_i32(&mut body, op::GET_CHILDREN);
        put_str(&mut body, path);
        put_bool(&mut body, watch);
        self.enqueue_frame(&body);
        self.pending
            .push_back((xid, PendingOp::Children(completion)));
        Ok(())
    }
}

impl Drop for WireClient {
    fn drop(&mut self) {
        if !self.handshake_done {
            return;
        }
        if let Some(sock) = self.sock.as_mut() {
            let mut body = Vec::with_capacity(8);
            put_i32(&mut body, self.xid.wrapping_add(1));
            put_i32(&mut body, op::CLOSE_SESSION);
            let mut frame = Vec::with_capacity(12);
            put_i32(&mut frame, body.len() as i32);
            frame.extend_from_slice(&body);
            let _ = sock.write_all(&frame);
        }
    }
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
