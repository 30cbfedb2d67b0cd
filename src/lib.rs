//! Minimal ICMP echo (ping) client over raw IPv4 sockets.
//!
//! Packets are framed and checked in [`packet`]. Probe cycles and the
//! per-destination scheduler live in [`ping`].

pub mod error;
pub mod packet;
pub mod ping;
pub mod signal;
pub mod socket;

pub use error::{ProbeError, Stage};
