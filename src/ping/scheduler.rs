use super::destination::Destination;
use super::pinger::Pinger;
use super::ProbeReport;
use crate::socket::Transport;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Probes each destination on its own periodic task until cancelled.
///
/// Units share nothing but the pinger and the token. Each probe cycle runs
/// on the blocking pool, so a pending read for one destination never holds
/// up another.
pub struct Scheduler<T> {
    pinger: Arc<Pinger<T>>,
    cancel: CancellationToken,
}

impl<T> Scheduler<T>
where
    T: Transport + Send + Sync + 'static,
{
    pub fn new(pinger: Pinger<T>, cancel: CancellationToken) -> Scheduler<T> {
        Scheduler {
            pinger: Arc::new(pinger),
            cancel,
        }
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Starts the unit for one host argument.
    pub fn spawn(
        &self,
        host: impl Into<String>,
        reports: mpsc::UnboundedSender<ProbeReport>,
    ) -> JoinHandle<()> {
        tokio::spawn(self.unit(host.into(), reports))
    }

    fn unit(
        &self,
        host: String,
        reports: mpsc::UnboundedSender<ProbeReport>,
    ) -> impl Future<Output = ()> + Send + 'static {
        run_unit(
            Arc::clone(&self.pinger),
            self.pinger.destination(host),
            self.cancel.clone(),
            reports,
        )
    }

    /// Runs one unit per host and returns once all of them have stopped.
    ///
    /// `reports` is dropped when the last unit exits, closing the channel.
    pub async fn run(self, hosts: Vec<String>, reports: mpsc::UnboundedSender<ProbeReport>) {
        let mut units = JoinSet::new();
        for host in hosts {
            units.spawn(self.unit(host, reports.clone()));
        }
        drop(reports);

        while let Some(joined) = units.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "probe unit failed");
            }
        }
        info!("all probe units stopped");
    }
}

async fn run_unit<T>(
    pinger: Arc<Pinger<T>>,
    mut destination: Destination,
    cancel: CancellationToken,
    reports: mpsc::UnboundedSender<ProbeReport>,
) where
    T: Transport + Send + Sync + 'static,
{
    let host = destination.host().to_string();
    let period = pinger.config().interval;
    // first probe one period after start
    let mut ticker = time::interval_at(time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    debug!(%host, ?period, "probe unit started");

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let worker = Arc::clone(&pinger);
        let cycle = tokio::task::spawn_blocking(move || {
            let outcome = worker.probe(&mut destination);
            (destination, outcome)
        });
        let outcome = match cycle.await {
            Ok((returned, outcome)) => {
                destination = returned;
                outcome
            }
            Err(e) => {
                // the destination went down with the cycle, start it afresh
                warn!(%host, error = %e, "probe cycle panicked");
                destination = pinger.destination(host.as_str());
                continue;
            }
        };
        let report = ProbeReport {
            host: host.clone(),
            outcome,
        };
        if reports.send(report).is_err() {
            debug!(%host, "report channel closed");
            break;
        }
    }
    debug!(%host, "probe unit stopped");
}
