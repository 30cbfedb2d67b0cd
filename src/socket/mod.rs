//! Transport boundary between the probe cycle and the operating system.

pub mod icmp;

pub use icmp::{RawIcmpSocket, RawIcmpTransport};

use crate::error::ProbeError;
use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Instant;

/// An open, connected ICMP socket. Dropping it closes the socket.
pub trait EchoSocket {
    /// Sends one ICMP message to the connected peer.
    fn send(&mut self, packet: &[u8]) -> io::Result<usize>;

    /// Reads one datagram, giving up once `deadline` has passed.
    ///
    /// Deadline expiry surfaces as `TimedOut` or `WouldBlock`.
    fn recv_before(&mut self, buf: &mut [u8], deadline: Instant) -> io::Result<usize>;
}

/// Name resolution and socket creation for echo probes.
pub trait Transport {
    type Socket: EchoSocket;

    fn resolve(&self, host: &str) -> Result<Ipv4Addr, ProbeError>;

    fn open(&self, addr: Ipv4Addr) -> Result<Self::Socket, ProbeError>;
}

/// Resolves a hostname or IPv4 literal to the first IPv4 address found.
pub fn resolve_ipv4(host: &str) -> Result<Ipv4Addr, ProbeError> {
    if let Ok(addr) = host.parse::<Ipv4Addr>() {
        return Ok(addr);
    }
    let addrs = dns_lookup::lookup_host(host).map_err(|source| ProbeError::Resolve {
        host: host.to_string(),
        source,
    })?;
    first_ipv4(&addrs).ok_or_else(|| ProbeError::NoIpv4Address {
        host: host.to_string(),
    })
}

fn first_ipv4(addrs: &[IpAddr]) -> Option<Ipv4Addr> {
    addrs.iter().find_map(|ip| match ip {
        IpAddr::V4(v4) => Some(*v4),
        IpAddr::V6(_) => None,
    })
}
