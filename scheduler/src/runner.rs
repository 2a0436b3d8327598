//! Fixed-cadence drivers for the digest and spike passes.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::engine::Scheduler;
use crate::types::SchedulerConfig;

/// Spawns both cadences. Each loop runs its passes back to back, never
/// overlapping itself; the two loops are independent of each other.
///
/// The first pass of each cadence happens one interval after start.
/// Flip `shutdown` to `true` to stop both loops.
pub fn spawn_cadences(
    scheduler: Arc<Scheduler>,
    cfg: &SchedulerConfig,
    shutdown: watch::Receiver<bool>,
) -> Vec<JoinHandle<()>> {
    let reporter = Arc::clone(&scheduler);
    let report = tokio::spawn(run_every(
        "digest_report",
        cfg.report_interval,
        shutdown.clone(),
        move || {
            let s = Arc::clone(&reporter);
            async move {
                s.report_all().await;
            }
        },
    ));

    let checker = scheduler;
    let check = tokio::spawn(run_every(
        "spike_check",
        cfg.check_interval,
        shutdown,
        move || {
            let s = Arc::clone(&checker);
            async move {
                s.check_all().await;
            }
        },
    ));

    vec![report, check]
}

async fn run_every<F, Fut>(
    name: &'static str,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
    mut pass: F,
) where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // interval() completes its first tick immediately.
    ticker.tick().await;

    info!(cadence = name, every_ms = every.as_millis() as u64, "cadence started");

    loop {
        tokio::select! {
            _ = ticker.tick() => pass().await,
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!(cadence = name, "cadence stopped");
}
