pub mod checksum;
pub mod icmpv4;
pub mod ipv4;

pub use checksum::{checksum, verify};
pub use icmpv4::{build_echo_request, validate_reply, EchoRequest};
