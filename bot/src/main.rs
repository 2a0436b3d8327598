use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};

use bot::{
    config::AppConfig,
    router::Router,
    telegram::{TelegramTransport, listener::run_update_listener},
};
use common::logger::init_logger;
use market::{PriceFeed, dexscreener::DexScreenerClient, pulse::SpikeRule};
use scheduler::{
    dispatcher::NotificationDispatcher, engine::Scheduler, metrics::Counters,
    runner::spawn_cadences,
};
use session::registry::Registry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let is_production = std::env::var("APP_ENV").unwrap_or_default() == "production";
    init_logger("pumpwatch", is_production);

    info!("starting token watch bot");

    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "configuration failure; exiting");
            return Err(e.into());
        }
    };

    let telegram = TelegramTransport::new(&cfg.telegram_api_url, &cfg.telegram_token)?;
    let feed: Arc<dyn PriceFeed> = Arc::new(DexScreenerClient::new(
        cfg.dexscreener_api_url.clone(),
        cfg.fetch_timeout,
    )?);

    let registry = Arc::new(Registry::new());
    let counters = Counters::default();
    let dispatcher =
        NotificationDispatcher::new(Arc::new(telegram.clone()), cfg.labels.clone(), counters.clone());

    let scheduler = Arc::new(Scheduler::new(
        registry.clone(),
        feed.clone(),
        dispatcher.clone(),
        SpikeRule::new(cfg.scheduler.spike_threshold),
        counters.clone(),
    ));

    let router = Arc::new(Router::new(
        registry,
        scheduler.clone(),
        dispatcher,
        feed,
        cfg.window_size,
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut tasks = spawn_cadences(scheduler, &cfg.scheduler, shutdown_rx.clone());
    tasks.push(tokio::spawn(run_update_listener(
        telegram.bot().clone(),
        router,
        shutdown_rx,
    )));

    info!(
        report_every_s = cfg.scheduler.report_interval.as_secs(),
        check_every_s = cfg.scheduler.check_interval.as_secs(),
        window_size = cfg.window_size,
        "bot running"
    );

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    let _ = shutdown_tx.send(true);
    for task in tasks {
        if let Err(e) = task.await {
            error!(error = ?e, "task ended abnormally");
        }
    }

    info!(
        report_passes = Counters::get(&counters.report_passes),
        check_passes = Counters::get(&counters.check_passes),
        fetch_ok = Counters::get(&counters.fetch_ok),
        fetch_failed = Counters::get(&counters.fetch_failed),
        reports_sent = Counters::get(&counters.reports_sent),
        alerts_sent = Counters::get(&counters.alerts_sent),
        send_failed = Counters::get(&counters.send_failed),
        "final counters"
    );

    Ok(())
}
