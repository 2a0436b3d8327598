use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{Span, field};

use super::TraceId;

/// Root span for a scheduler pass or an inbound update.
pub fn root_span(name: &'static str, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "root",
        name = %name,
        trace_id = %trace_id.as_str(),
        chat_id = field::Empty,
        pair_id = field::Empty
    )
}

/// Child span; inherits the trace id from the enclosing root span.
pub fn child_span(name: &'static str) -> Span {
    tracing::info_span!(
        "child",
        name = %name,
        chat_id = field::Empty,
        pair_id = field::Empty
    )
}

/// Fills in the chat / pair fields of `span` where known.
pub fn annotate_span(span: &Span, chat_id: i64, pair_id: Option<&str>) {
    span.record("chat_id", chat_id);
    if let Some(pid) = pair_id {
        span.record("pair_id", field::display(pid));
    }
}

/// Awaits `fut` and logs a warning when it takes longer than `max`.
pub async fn warn_if_slow<F, T>(label: &'static str, max: Duration, fut: F) -> T
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let out = fut.await;
    let elapsed = start.elapsed();
    if elapsed > max {
        tracing::warn!(
            label = label,
            elapsed_ms = elapsed.as_millis() as u64,
            "slow operation detected"
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[tokio::test]
    #[traced_test]
    async fn slow_future_is_reported() {
        let v = warn_if_slow("sleepy", Duration::from_millis(1), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            7
        })
        .await;

        assert_eq!(v, 7);
        assert!(logs_contain("slow operation detected"));
    }

    #[tokio::test]
    #[traced_test]
    async fn fast_future_is_silent() {
        let v = warn_if_slow("quick", Duration::from_secs(5), async { 1 }).await;

        assert_eq!(v, 1);
        assert!(!logs_contain("slow operation detected"));
    }
}
