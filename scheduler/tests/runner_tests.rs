use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use market::pulse::SpikeRule;
use market::token::Token;
use market::{PairKey, Quote};
use scheduler::dispatcher::{MenuLabels, NotificationDispatcher};
use scheduler::engine::Scheduler;
use scheduler::metrics::Counters;
use scheduler::runner::spawn_cadences;
use scheduler::types::SchedulerConfig;
use session::registry::Registry;

mod mocks;
use mocks::{RecordingTransport, ScriptedFeed};

#[tokio::test(start_paused = true)]
async fn cadences_fire_independently_and_stop_on_shutdown() {
    let registry = Arc::new(Registry::new());
    let feed = Arc::new(ScriptedFeed::default());
    let transport = Arc::new(RecordingTransport::default());
    let counters = Counters::default();

    let key = PairKey::new("bsc", "0xA");
    registry.register_chat(1);
    registry
        .add_token(1, Arc::new(Token::new("Foo", key.clone(), 12)))
        .unwrap();
    feed.always(&key, Quote::new(1.0, 1.0));

    let dispatcher =
        NotificationDispatcher::new(transport.clone(), MenuLabels::default(), counters.clone());
    let scheduler = Arc::new(Scheduler::new(
        registry,
        feed.clone(),
        dispatcher,
        SpikeRule::default(),
        counters.clone(),
    ));

    let cfg = SchedulerConfig {
        report_interval: Duration::from_secs(100),
        check_interval: Duration::from_secs(10),
        spike_threshold: 1.03,
    };
    let (tx, rx) = watch::channel(false);
    let handles = spawn_cadences(scheduler, &cfg, rx);

    // Nothing runs at t=0.
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(Counters::get(&counters.check_passes), 0);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(Counters::get(&counters.check_passes), 3);
    assert_eq!(Counters::get(&counters.report_passes), 0);

    tokio::time::sleep(Duration::from_secs(70)).await;
    assert_eq!(Counters::get(&counters.report_passes), 1);
    assert_eq!(transport.count(), 1);

    tx.send(true).unwrap();
    for h in handles {
        h.await.unwrap();
    }
}
