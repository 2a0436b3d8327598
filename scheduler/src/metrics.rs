use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Minimal counters for operational visibility.
#[derive(Clone, Default)]
pub struct Counters {
    pub report_passes: Arc<AtomicU64>,
    pub check_passes: Arc<AtomicU64>,

    pub fetch_ok: Arc<AtomicU64>,
    pub fetch_failed: Arc<AtomicU64>,

    pub reports_sent: Arc<AtomicU64>,
    pub alerts_sent: Arc<AtomicU64>,
    pub send_failed: Arc<AtomicU64>,
}

impl Counters {
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }
}
