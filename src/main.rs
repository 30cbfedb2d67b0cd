use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use echoping::packet::icmpv4::{DEFAULT_IDENTIFIER, DEFAULT_SEQUENCE};
use echoping::ping::{Pinger, PingerConfig, ResolveStrategy, Scheduler};
use echoping::signal::cancel_on_signal;
use echoping::socket::RawIcmpTransport;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Send ICMP echo requests to one or more hosts until interrupted
#[derive(Parser, Debug)]
#[command(name = "echoping")]
#[command(version, about, long_about = None)]
struct Args {
    /// Hosts to ping (hostname or IPv4 address)
    hosts: Vec<String>,

    /// Time between probes to each host
    #[arg(short = 'i', long = "interval", default_value = "1s", value_parser = parse_positive_duration)]
    interval: Duration,

    /// How long to wait for each reply
    #[arg(short = 'W', long = "timeout", default_value = "2s", value_parser = parse_positive_duration)]
    timeout: Duration,

    /// Resolve each host once and reuse the address
    #[arg(long = "resolve-once")]
    resolve_once: bool,

    /// ICMP identifier (decimal or 0x-prefixed hex)
    #[arg(long = "identifier", default_value_t = DEFAULT_IDENTIFIER, value_parser = parse_u16)]
    identifier: u16,

    /// ICMP sequence number
    #[arg(long = "sequence", default_value_t = DEFAULT_SEQUENCE, value_parser = parse_u16)]
    sequence: u16,

    /// Echo payload
    #[arg(long = "payload", default_value = "HELLO-PING")]
    payload: String,

    /// Log probe steps to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn pinger_config(&self) -> PingerConfig {
        let mut config = PingerConfig::default();
        config.set_interval(self.interval);
        config.set_deadline(self.timeout);
        config.set_identifier(self.identifier);
        config.set_sequence(self.sequence);
        config.set_payload(self.payload.as_bytes());
        if self.resolve_once {
            config.set_resolve(ResolveStrategy::Once);
        }
        config
    }
}

fn parse_positive_duration(s: &str) -> Result<Duration, String> {
    let duration = humantime::parse_duration(s).map_err(|e| e.to_string())?;
    if duration.is_zero() {
        return Err("must be greater than zero".to_string());
    }
    Ok(duration)
}

fn parse_u16(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.hosts.is_empty() {
        println!("echoping: missing host operand");
        println!("{}", Args::command().render_usage());
        std::process::exit(1);
    }

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let cancel = cancel_on_signal().context("Failed to install signal handlers")?;
    let pinger = Pinger::new(RawIcmpTransport, args.pinger_config());
    info!(hosts = ?args.hosts, interval = ?args.interval, "Starting probes");

    let (report_tx, mut report_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(report) = report_rx.recv().await {
            println!("{}", report);
        }
    });

    Scheduler::new(pinger, cancel)
        .run(args.hosts, report_tx)
        .await;
    printer.await.context("Report printer failed")?;

    println!("shutting down");
    std::process::exit(1);
}
