use std::sync::Arc;

use tokio::task::JoinSet;

use market::PairKey;
use market::token::Token;
use session::registry::Registry;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicate_registration_creates_one_entry() -> anyhow::Result<()> {
    let registry = Arc::new(Registry::new());
    let mut set = JoinSet::new();

    for _ in 0..32 {
        let r = Arc::clone(&registry);
        set.spawn(async move { r.register_chat(42).created });
    }

    let mut created = 0;
    while let Some(res) = set.join_next().await {
        if res? {
            created += 1;
        }
    }

    assert_eq!(created, 1);
    assert_eq!(registry.chat_count(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn snapshot_survives_concurrent_writes() -> anyhow::Result<()> {
    let registry = Arc::new(Registry::new());
    registry.register_chat(1);

    let mut set = JoinSet::new();
    for i in 0..16 {
        let r = Arc::clone(&registry);
        set.spawn(async move {
            let token = Token::new(format!("T{i}"), PairKey::new("bsc", format!("0x{i}")), 12);
            r.add_token(1, Arc::new(token))
        });
        let r = Arc::clone(&registry);
        set.spawn(async move {
            let _ = r.snapshot();
            Ok(())
        });
    }

    while let Some(res) = set.join_next().await {
        res??;
    }

    assert_eq!(registry.tokens_for(1).map(|t| t.len()), Some(16));
    Ok(())
}
