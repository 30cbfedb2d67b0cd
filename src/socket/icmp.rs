use super::{resolve_ipv4, EchoSocket, Transport};
use crate::error::ProbeError;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io::{self, Read};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Instant;

/// Raw `IPPROTO_ICMP` sockets over IPv4.
///
/// Opening a raw socket needs root or `CAP_NET_RAW` on most systems.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawIcmpTransport;

impl Transport for RawIcmpTransport {
    type Socket = RawIcmpSocket;

    fn resolve(&self, host: &str) -> Result<Ipv4Addr, ProbeError> {
        resolve_ipv4(host)
    }

    fn open(&self, addr: Ipv4Addr) -> Result<RawIcmpSocket, ProbeError> {
        RawIcmpSocket::connect(addr).map_err(|e| ProbeError::dial(addr, e))
    }
}

/// A raw ICMP socket connected to a single peer.
///
/// Datagrams read from it include the IPv4 header.
#[derive(Debug)]
pub struct RawIcmpSocket {
    inner: Socket,
}

impl RawIcmpSocket {
    pub fn connect(peer: Ipv4Addr) -> io::Result<RawIcmpSocket> {
        let socket = Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4))?;
        socket.connect(&SockAddr::from(SocketAddrV4::new(peer, 0)))?;
        Ok(RawIcmpSocket { inner: socket })
    }
}

impl EchoSocket for RawIcmpSocket {
    fn send(&mut self, packet: &[u8]) -> io::Result<usize> {
        self.inner.send(packet)
    }

    fn recv_before(&mut self, buf: &mut [u8], deadline: Instant) -> io::Result<usize> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        // a zero read timeout means "block forever" to the kernel
        if remaining.is_zero() {
            return Err(io::Error::from(io::ErrorKind::TimedOut));
        }
        self.inner.set_read_timeout(Some(remaining))?;
        self.inner.read(buf)
    }
}
