use std::fmt;
use std::io;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Step of a probe cycle at which a failure occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    Dial,
    Write,
    Read,
    Validate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Resolve => "resolve",
            Stage::Dial => "dial",
            Stage::Write => "write",
            Stage::Read => "read",
            Stage::Validate => "validate",
        };
        f.write_str(name)
    }
}

/// Failure of a single probe cycle. None of these are fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("resolve error for {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("resolve error for {host}: no IPv4 address found")]
    NoIpv4Address { host: String },
    #[error("dial error for {addr} (needs elevated privilege, run as root or grant CAP_NET_RAW): {source}")]
    PermissionDenied {
        addr: Ipv4Addr,
        #[source]
        source: io::Error,
    },
    #[error("dial error for {addr}: {source}")]
    Dial {
        addr: Ipv4Addr,
        #[source]
        source: io::Error,
    },
    #[error("send error to {addr}: {source}")]
    Write {
        addr: Ipv4Addr,
        #[source]
        source: io::Error,
    },
    #[error("read timeout: no reply from {addr} within {deadline:?}")]
    Timeout { addr: Ipv4Addr, deadline: Duration },
    #[error("read error from {addr}: {source}")]
    Read {
        addr: Ipv4Addr,
        #[source]
        source: io::Error,
    },
    #[error("invalid reply type: got {got}, want {want}")]
    InvalidType { got: u8, want: u8 },
    #[error("invalid reply: {len} bytes is too short to hold an ICMP type")]
    Truncated { len: usize },
}

impl ProbeError {
    pub fn stage(&self) -> Stage {
        match self {
            ProbeError::Resolve { .. } | ProbeError::NoIpv4Address { .. } => Stage::Resolve,
            ProbeError::PermissionDenied { .. } | ProbeError::Dial { .. } => Stage::Dial,
            ProbeError::Write { .. } => Stage::Write,
            ProbeError::Timeout { .. } | ProbeError::Read { .. } => Stage::Read,
            ProbeError::InvalidType { .. } | ProbeError::Truncated { .. } => Stage::Validate,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ProbeError::Timeout { .. })
    }

    /// Classifies a socket open failure, singling out missing privilege.
    pub(crate) fn dial(addr: Ipv4Addr, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            ProbeError::PermissionDenied { addr, source }
        } else {
            ProbeError::Dial { addr, source }
        }
    }

    /// Classifies a read failure, separating deadline expiry from other errors.
    pub(crate) fn read(addr: Ipv4Addr, deadline: Duration, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => {
                ProbeError::Timeout { addr, deadline }
            }
            _ => ProbeError::Read { addr, source },
        }
    }
}
