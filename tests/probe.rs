mod common;

use common::{StubTransport, GOOD, SILENT};
use echoping::ping::{Pinger, PingerConfig, ProbeOutcome, ResolveStrategy};
use echoping::{ProbeError, Stage};
use std::time::{Duration, Instant};

fn pinger(deadline: Duration) -> (Pinger<StubTransport>, StubTransport) {
    let transport = StubTransport::default();
    let mut config = PingerConfig::default();
    config.set_deadline(deadline);
    (Pinger::new(transport.clone(), config), transport)
}

#[test]
fn test_reply_from_answering_peer() {
    let (pinger, transport) = pinger(Duration::from_secs(2));
    let mut dst = pinger.destination("good.test");
    match pinger.probe(&mut dst) {
        ProbeOutcome::Success(reply) => {
            assert_eq!(reply.address, GOOD);
            // 20-byte IPv4 header + 8-byte ICMP header + "HELLO-PING"
            assert_eq!(reply.bytes_received, 38);
            assert!(reply.rtt < Duration::from_secs(2));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(transport.opened(), 1);
}

#[test]
fn test_silent_peer_times_out_at_deadline() {
    let deadline = Duration::from_millis(150);
    let (pinger, _) = pinger(deadline);
    let mut dst = pinger.destination("silent.test");

    let start = Instant::now();
    let outcome = pinger.probe(&mut dst);
    let elapsed = start.elapsed();

    assert!(elapsed >= deadline, "returned early after {:?}", elapsed);
    assert!(
        elapsed < deadline + Duration::from_millis(500),
        "took {:?}",
        elapsed
    );
    match outcome {
        ProbeOutcome::Failure {
            stage: Stage::Read,
            cause: ProbeError::Timeout { addr, deadline: d },
        } => {
            assert_eq!(addr, SILENT);
            assert_eq!(d, deadline);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_unknown_host_fails_at_resolve() {
    let (pinger, transport) = pinger(Duration::from_secs(2));
    let mut dst = pinger.destination("nowhere.test");
    let outcome = pinger.probe(&mut dst);
    assert!(matches!(
        outcome,
        ProbeOutcome::Failure {
            stage: Stage::Resolve,
            ..
        }
    ));
    assert_eq!(transport.opened(), 0);
}

#[test]
fn test_resolve_once_across_cycles() {
    let transport = StubTransport::default();
    let mut config = PingerConfig::default();
    config.set_resolve(ResolveStrategy::Once);
    let pinger = Pinger::new(transport.clone(), config);

    let mut dst = pinger.destination("good.test");
    for _ in 0..3 {
        assert!(pinger.probe(&mut dst).is_success());
    }
    assert_eq!(transport.resolved(), 1);
    assert_eq!(transport.opened(), 3);
}

#[test]
fn test_resolve_per_cycle_by_default() {
    let (pinger, transport) = pinger(Duration::from_secs(2));
    let mut dst = pinger.destination("good.test");
    for _ in 0..3 {
        assert!(pinger.probe(&mut dst).is_success());
    }
    assert_eq!(transport.resolved(), 3);
}

#[test]
fn test_large_payload_reply_counts_every_byte() {
    let transport = StubTransport::default();
    let mut config = PingerConfig::default();
    config.set_payload(vec![b'x'; 1400]);
    let pinger = Pinger::new(transport, config);

    let mut dst = pinger.destination("good.test");
    match pinger.probe(&mut dst) {
        ProbeOutcome::Success(reply) => assert_eq!(reply.bytes_received, 20 + 8 + 1400),
        other => panic!("unexpected outcome: {:?}", other),
    }
}
