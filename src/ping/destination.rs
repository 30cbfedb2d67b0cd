use crate::error::ProbeError;
use crate::socket::Transport;
use std::net::Ipv4Addr;

/// When a destination's host argument is turned into an address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResolveStrategy {
    /// Look the host up again on every cycle, picking up DNS changes.
    #[default]
    PerCycle,
    /// Keep the first successful lookup for the lifetime of the destination.
    Once,
}

/// A user-supplied host together with how (and whether) it has been resolved.
#[derive(Clone, Debug)]
pub struct Destination {
    host: String,
    strategy: ResolveStrategy,
    cached: Option<Ipv4Addr>,
}

impl Destination {
    pub fn new(host: impl Into<String>, strategy: ResolveStrategy) -> Destination {
        Destination {
            host: host.into(),
            strategy,
            cached: None,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the cached address, if the strategy keeps one.
    pub fn cached(&self) -> Option<Ipv4Addr> {
        self.cached
    }

    /// Returns the address to probe. Failed lookups are never cached.
    pub fn resolve<T: Transport>(&mut self, transport: &T) -> Result<Ipv4Addr, ProbeError> {
        if let Some(addr) = self.cached {
            return Ok(addr);
        }
        let addr = transport.resolve(&self.host)?;
        if self.strategy == ResolveStrategy::Once {
            self.cached = Some(addr);
        }
        Ok(addr)
    }
}
