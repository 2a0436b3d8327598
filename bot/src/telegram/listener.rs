//! Inbound side: a teloxide dispatcher long-polling updates into the router.

use std::sync::Arc;
use std::time::Duration;

use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::Me;
use teloxide::update_listeners::Polling;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::router::Router;
use crate::telegram::intent::intent_from_text;

/// Seconds the server may hold a `getUpdates` call open.
pub const LONG_POLL_SECS: u64 = 30;

/// Updates of one chat are handled in arrival order; different chats run
/// concurrently, so a slow report never holds up someone else's dialogue.
fn chat_key(update: &Update) -> Option<ChatId> {
    update.chat().map(|chat| chat.id)
}

/// Runs until `shutdown` flips to `true`.
pub async fn run_update_listener(bot: Bot, router: Arc<Router>, mut shutdown: watch::Receiver<bool>) {
    let handler = Update::filter_message().endpoint(move |msg: Message, me: Me| {
        let router = Arc::clone(&router);
        async move {
            let username = me.user.username.as_deref().unwrap_or_default();
            match msg.text().and_then(|text| intent_from_text(msg.chat.id.0, text, username)) {
                Some(intent) => router.handle(intent).await,
                None => debug!(chat_id = msg.chat.id.0, "message without routable text"),
            }
            respond(())
        }
    });

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .distribution_function(chat_key)
        .default_handler(|update| async move {
            debug!(update_id = ?update.id, "unhandled update kind");
        })
        .build();

    let token = dispatcher.shutdown_token();
    tokio::spawn(async move {
        if shutdown.wait_for(|stop| *stop).await.is_err() {
            return;
        }
        match token.shutdown() {
            Ok(stopped) => stopped.await,
            Err(_) => debug!("dispatcher was not running"),
        }
    });

    let listener = Polling::builder(bot)
        .timeout(Duration::from_secs(LONG_POLL_SECS))
        .delete_webhook()
        .await
        .build();

    info!("telegram update listener started");
    dispatcher
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("telegram update listener error"),
        )
        .await;
    info!("telegram update listener stopped");
}
