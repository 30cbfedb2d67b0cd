mod destination;
mod pinger;
mod probe;
mod scheduler;

pub use destination::*;
pub use pinger::*;
pub use scheduler::*;

use crate::error::{ProbeError, Stage};
use std::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

/// A validated echo reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    /// Address the request was sent to
    pub address: Ipv4Addr,
    /// Size of the received datagram, IPv4 header included
    pub bytes_received: usize,
    /// Time from sending the request to reading the reply
    pub rtt: Duration,
}

/// Result of one probe cycle.
#[derive(Debug)]
pub enum ProbeOutcome {
    Success(Reply),
    Failure { stage: Stage, cause: ProbeError },
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success(_))
    }
}

impl From<ProbeError> for ProbeOutcome {
    fn from(cause: ProbeError) -> Self {
        ProbeOutcome::Failure {
            stage: cause.stage(),
            cause,
        }
    }
}

/// A probe outcome tagged with the host argument it belongs to.
#[derive(Debug)]
pub struct ProbeReport {
    pub host: String,
    pub outcome: ProbeOutcome,
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ProbeOutcome::Success(reply) => write!(
                f,
                "Reply from {}: bytes={} time={:.4}ms",
                reply.address,
                reply.bytes_received,
                reply.rtt.as_secs_f64() * 1000.0
            ),
            ProbeOutcome::Failure { cause, .. } => {
                write!(f, "Ping {} failed: {}", self.host, cause)
            }
        }
    }
}
