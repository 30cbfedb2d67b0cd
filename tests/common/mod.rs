//! Stub transports that stand in for raw sockets.

#![allow(dead_code)]

use echoping::packet::ipv4::IPV4_HEADER_LEN;
use echoping::socket::{EchoSocket, Transport};
use echoping::ProbeError;
use std::io;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

pub const GOOD: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 1);
pub const SILENT: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 2);

/// Behaviour per host name:
/// - `good.test` answers every request immediately
/// - `silent.test` never answers, so reads run until their deadline
/// - `flaky.test` panics on its first lookup, then behaves like `good.test`
/// - anything else fails to resolve
#[derive(Clone, Default)]
pub struct StubTransport {
    pub opened: Arc<AtomicUsize>,
    pub resolved: Arc<AtomicUsize>,
    pub flaky_panicked: Arc<AtomicBool>,
}

impl StubTransport {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn resolved(&self) -> usize {
        self.resolved.load(Ordering::SeqCst)
    }
}

impl Transport for StubTransport {
    type Socket = StubSocket;

    fn resolve(&self, host: &str) -> Result<Ipv4Addr, ProbeError> {
        self.resolved.fetch_add(1, Ordering::SeqCst);
        match host {
            "good.test" => Ok(GOOD),
            "flaky.test" => {
                if !self.flaky_panicked.swap(true, Ordering::SeqCst) {
                    panic!("first lookup of flaky.test");
                }
                Ok(GOOD)
            }
            "silent.test" => Ok(SILENT),
            _ => Err(ProbeError::Resolve {
                host: host.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "unknown host"),
            }),
        }
    }

    fn open(&self, addr: Ipv4Addr) -> Result<StubSocket, ProbeError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(StubSocket {
            answers: addr == GOOD,
            pending: None,
        })
    }
}

pub struct StubSocket {
    answers: bool,
    pending: Option<Vec<u8>>,
}

impl EchoSocket for StubSocket {
    fn send(&mut self, packet: &[u8]) -> io::Result<usize> {
        if self.answers {
            self.pending = Some(echo_reply_datagram(packet));
        }
        Ok(packet.len())
    }

    fn recv_before(&mut self, buf: &mut [u8], deadline: Instant) -> io::Result<usize> {
        match self.pending.take() {
            Some(datagram) => {
                // truncate like a raw socket read into a short buffer
                let n = datagram.len().min(buf.len());
                buf[..n].copy_from_slice(&datagram[..n]);
                Ok(n)
            }
            None => {
                std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
                Err(io::Error::from(io::ErrorKind::WouldBlock))
            }
        }
    }
}

/// Wraps an echo request the way a peer's reply arrives on a raw socket.
pub fn echo_reply_datagram(request: &[u8]) -> Vec<u8> {
    let mut datagram = vec![0u8; IPV4_HEADER_LEN];
    datagram[0] = 0x45;
    datagram[9] = 1;
    datagram.extend_from_slice(request);
    datagram[IPV4_HEADER_LEN] = 0;
    datagram
}
