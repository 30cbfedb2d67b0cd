use pnet_packet::icmp::echo_request::MutableEchoRequestPacket;
use pnet_packet::icmp::{IcmpCode, IcmpTypes};

use super::checksum::checksum;
use super::ipv4;
use crate::error::ProbeError;

/// ICMP echo header size: type, code, checksum, identifier, sequence.
pub const ICMP_HEADER_LEN: usize = 8;
/// Byte offset of the checksum field inside the ICMP header.
pub const CHECKSUM_OFFSET: usize = 2;

pub const DEFAULT_IDENTIFIER: u16 = 0x1234;
pub const DEFAULT_SEQUENCE: u16 = 1;
/// Opaque marker carried in every request. Peers echo it back unread.
pub const DEFAULT_PAYLOAD: &[u8] = b"HELLO-PING";

/// Fields of an ICMP Echo Request before serialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EchoRequest {
    pub identifier: u16,
    pub sequence: u16,
    pub payload: Vec<u8>,
}

impl Default for EchoRequest {
    fn default() -> Self {
        EchoRequest {
            identifier: DEFAULT_IDENTIFIER,
            sequence: DEFAULT_SEQUENCE,
            payload: DEFAULT_PAYLOAD.to_vec(),
        }
    }
}

impl EchoRequest {
    /// Serializes the request with its checksum stamped in.
    pub fn to_bytes(&self) -> Vec<u8> {
        build_echo_request(self.identifier, self.sequence, &self.payload)
    }
}

/// Builds a type 8 / code 0 message followed by `payload`, all fields
/// big-endian, with the checksum computed over the whole message.
pub fn build_echo_request(identifier: u16, sequence: u16, payload: &[u8]) -> Vec<u8> {
    let mut buf = vec![0u8; ICMP_HEADER_LEN + payload.len()];
    // The buffer is always at least one header long.
    if let Some(mut packet) = MutableEchoRequestPacket::new(&mut buf) {
        packet.set_icmp_type(IcmpTypes::EchoRequest);
        packet.set_icmp_code(IcmpCode::new(0));
        packet.set_checksum(0);
        packet.set_identifier(identifier);
        packet.set_sequence_number(sequence);
        packet.set_payload(payload);
    }
    let sum = checksum(&buf);
    buf[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 2].copy_from_slice(&sum.to_be_bytes());
    buf
}

/// Accepts a raw IPv4 datagram only if it carries an ICMP Echo Reply.
pub fn validate_reply(datagram: &[u8]) -> Result<(), ProbeError> {
    let icmp_type = ipv4::icmp_type(datagram).ok_or(ProbeError::Truncated {
        len: datagram.len(),
    })?;
    if icmp_type != IcmpTypes::EchoReply {
        return Err(ProbeError::InvalidType {
            got: icmp_type.0,
            want: IcmpTypes::EchoReply.0,
        });
    }
    Ok(())
}
