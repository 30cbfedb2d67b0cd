use pnet_packet::icmp::IcmpType;

/// Length of an IPv4 header without options.
pub const IPV4_HEADER_LEN: usize = 20;
/// Largest IPv4 header, with 40 bytes of options.
pub const MAX_IPV4_HEADER_LEN: usize = 60;

/// Offset of the ICMP type byte in a datagram read from a raw IPv4 socket.
///
/// Assumes an option-less header. A reply carrying IP options is read at
/// the wrong position and rejected by validation.
pub const ICMP_TYPE_OFFSET: usize = IPV4_HEADER_LEN;

/// Returns the ICMP type of a raw IPv4 datagram, or `None` if the buffer is
/// too short to contain it.
pub fn icmp_type(datagram: &[u8]) -> Option<IcmpType> {
    datagram.get(ICMP_TYPE_OFFSET).copied().map(IcmpType::new)
}
