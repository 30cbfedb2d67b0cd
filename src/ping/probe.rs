use super::destination::Destination;
use super::pinger::PingerConfig;
use super::{ProbeOutcome, Reply};
use crate::error::ProbeError;
use crate::packet::ipv4::MAX_IPV4_HEADER_LEN;
use crate::packet::validate_reply;
use crate::socket::{EchoSocket, Transport};
use std::time::Instant;
use tracing::debug;

/// Smallest receive buffer, regardless of request size.
const MIN_RECV_BUFFER_SIZE: usize = 1024;

/// Room for the largest IPv4 header in front of a full echo of `request`.
fn recv_buffer_size(request: &[u8]) -> usize {
    (MAX_IPV4_HEADER_LEN + request.len()).max(MIN_RECV_BUFFER_SIZE)
}

pub(crate) fn probe<T: Transport>(
    transport: &T,
    config: &PingerConfig,
    destination: &mut Destination,
) -> ProbeOutcome {
    match echo(transport, config, destination) {
        Ok(reply) => {
            debug!(
                host = destination.host(),
                addr = %reply.address,
                bytes = reply.bytes_received,
                rtt = ?reply.rtt,
                "echo reply"
            );
            ProbeOutcome::Success(reply)
        }
        Err(err) => {
            debug!(host = destination.host(), stage = %err.stage(), error = %err, "probe failed");
            ProbeOutcome::from(err)
        }
    }
}

fn echo<T: Transport>(
    transport: &T,
    config: &PingerConfig,
    destination: &mut Destination,
) -> Result<Reply, ProbeError> {
    let addr = destination.resolve(transport)?;
    // dropped on every return below
    let mut socket = transport.open(addr)?;
    let packet = config.echo_request().to_bytes();

    let start = Instant::now();
    socket
        .send(&packet)
        .map_err(|source| ProbeError::Write { addr, source })?;
    debug!(%addr, bytes = packet.len(), "echo request sent");

    let mut buf = vec![0u8; recv_buffer_size(&packet)];
    let deadline = Instant::now() + config.deadline;
    let bytes_received = socket
        .recv_before(&mut buf, deadline)
        .map_err(|e| ProbeError::read(addr, config.deadline, e))?;
    let rtt = start.elapsed();

    validate_reply(&buf[..bytes_received])?;
    Ok(Reply {
        address: addr,
        bytes_received,
        rtt,
    })
}
