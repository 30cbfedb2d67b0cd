//! Internet checksum (RFC 1071).

/// Computes the one's-complement checksum of `data`.
///
/// The buffer is summed as big-endian 16-bit words. A trailing odd byte is
/// treated as the high byte of a word whose low byte is zero.
pub fn checksum(data: &[u8]) -> u16 {
    let mut sum: u32 = 0;
    let mut words = data.chunks_exact(2);
    for word in &mut words {
        sum += u16::from_be_bytes([word[0], word[1]]) as u32;
        // keep headroom for very large buffers
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    if let [last] = words.remainder() {
        sum += (*last as u32) << 8;
    }
    while sum >> 16 != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    !(sum as u16)
}

/// Returns true when `data` already carries a valid checksum.
pub fn verify(data: &[u8]) -> bool {
    checksum(data) == 0
}
