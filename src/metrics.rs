// 📡 Metrics Feed - Synthetic live metrics for the dashboard
//
// One tokio task per feed emits a sample on a fixed interval into an
// unbounded channel. The UI drains the channel on its own tick.
// Lifetime: the feed holds a DropGuard on its CancellationToken, so the
// task stops as soon as the owning panel is dropped. The task in turn
// cancels `finished` on its way out.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSample {
    pub active_users: u32,
    /// Percent
    pub system_load: u32,
    pub influence_index: f64,
    pub timestamp: DateTime<Utc>,
}

impl MetricsSample {
    pub fn random(rng: &mut dyn RngCore) -> Self {
        MetricsSample {
            active_users: rng.gen_range(1000..=5000),
            system_load: rng.gen_range(20..=45),
            influence_index: rng.gen_range(70.0..=95.0),
            timestamp: Utc::now(),
        }
    }
}

pub struct MetricsFeed {
    receiver: mpsc::UnboundedReceiver<MetricsSample>,
    token: CancellationToken,
    finished: CancellationToken,
    task: JoinHandle<()>,
    _guard: DropGuard,
}

impl MetricsFeed {
    /// Start emitting samples on `runtime`. The first sample is immediate.
    pub fn spawn(runtime: &tokio::runtime::Handle, interval: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let finished = CancellationToken::new();
        let done = finished.clone();

        let task = runtime.spawn(async move {
            let _done = done.drop_guard();
            let mut rng = StdRng::from_entropy();
            let mut ticker = tokio::time::interval(interval);
            debug!(interval_ms = interval.as_millis() as u64, "metrics feed started");

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        if sender.send(MetricsSample::random(&mut rng)).is_err() {
                            break;
                        }
                    }
                }
            }

            debug!("metrics feed stopped");
        });

        MetricsFeed {
            receiver,
            _guard: token.clone().drop_guard(),
            token,
            finished,
            task,
        }
    }

    /// Samples received since the last drain, oldest first
    pub fn drain(&mut self) -> Vec<MetricsSample> {
        let mut samples = Vec::new();
        while let Ok(sample) = self.receiver.try_recv() {
            samples.push(sample);
        }
        samples
    }

    pub fn cancellation(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Cancelled once the task has exited
    pub fn finished(&self) -> CancellationToken {
        self.finished.clone()
    }

    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}
