use super::destination::{Destination, ResolveStrategy};
use super::{probe, ProbeOutcome};
use crate::packet::icmpv4::{
    EchoRequest, DEFAULT_IDENTIFIER, DEFAULT_PAYLOAD, DEFAULT_SEQUENCE,
};
use crate::socket::Transport;
use std::time::Duration;

/// Read deadline used when none is configured.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(2);
/// Delay between consecutive probes to the same destination.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Settings shared by every probe cycle.
#[derive(Clone, Debug)]
pub struct PingerConfig {
    /// ICMP identifier. Default is `0x1234`.
    pub identifier: u16,
    /// ICMP sequence number. Default is `1`, and it is not advanced between probes.
    pub sequence: u16,
    /// Echo payload. Default is `HELLO-PING`.
    pub payload: Vec<u8>,
    /// How long to wait for a reply after sending. Default is 2 seconds.
    pub deadline: Duration,
    /// Time between probes to one destination. Default is 1 second.
    pub interval: Duration,
    /// Whether destinations are resolved every cycle or once.
    pub resolve: ResolveStrategy,
}

impl Default for PingerConfig {
    fn default() -> Self {
        PingerConfig {
            identifier: DEFAULT_IDENTIFIER,
            sequence: DEFAULT_SEQUENCE,
            payload: DEFAULT_PAYLOAD.to_vec(),
            deadline: DEFAULT_DEADLINE,
            interval: DEFAULT_INTERVAL,
            resolve: ResolveStrategy::default(),
        }
    }
}

impl PingerConfig {
    /// Sets the ICMP identifier.
    pub fn set_identifier(&mut self, identifier: u16) {
        self.identifier = identifier;
    }
    /// Returns the ICMP identifier.
    pub fn get_identifier(&self) -> u16 {
        self.identifier
    }
    /// Sets the ICMP sequence number.
    pub fn set_sequence(&mut self, sequence: u16) {
        self.sequence = sequence;
    }
    /// Returns the ICMP sequence number.
    pub fn get_sequence(&self) -> u16 {
        self.sequence
    }
    /// Sets the echo payload.
    pub fn set_payload(&mut self, payload: impl Into<Vec<u8>>) {
        self.payload = payload.into();
    }
    /// Returns the echo payload.
    pub fn get_payload(&self) -> &[u8] {
        &self.payload
    }
    /// Sets the per-probe read deadline.
    pub fn set_deadline(&mut self, deadline: Duration) {
        self.deadline = deadline;
    }
    /// Returns the per-probe read deadline.
    pub fn get_deadline(&self) -> Duration {
        self.deadline
    }
    /// Sets the interval between probes.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }
    /// Returns the interval between probes.
    pub fn get_interval(&self) -> Duration {
        self.interval
    }
    /// Sets the destination resolution strategy.
    pub fn set_resolve(&mut self, resolve: ResolveStrategy) {
        self.resolve = resolve;
    }
    /// Returns the destination resolution strategy.
    pub fn get_resolve(&self) -> ResolveStrategy {
        self.resolve
    }
    /// Returns the request sent on every probe.
    pub fn echo_request(&self) -> EchoRequest {
        EchoRequest {
            identifier: self.identifier,
            sequence: self.sequence,
            payload: self.payload.clone(),
        }
    }
}

/// Runs probe cycles over a transport.
#[derive(Clone, Debug)]
pub struct Pinger<T> {
    transport: T,
    config: PingerConfig,
}

impl<T: Transport> Pinger<T> {
    pub fn new(transport: T, config: PingerConfig) -> Pinger<T> {
        Pinger { transport, config }
    }

    pub fn config(&self) -> &PingerConfig {
        &self.config
    }

    /// Creates a destination for `host` using the configured strategy.
    pub fn destination(&self, host: impl Into<String>) -> Destination {
        Destination::new(host, self.config.resolve)
    }

    /// Runs one send/await/validate cycle against `destination`.
    ///
    /// Blocks for at most the configured deadline once the request is sent.
    pub fn probe(&self, destination: &mut Destination) -> ProbeOutcome {
        probe::probe(&self.transport, &self.config, destination)
    }
}
