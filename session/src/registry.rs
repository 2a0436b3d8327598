use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info, instrument};

use market::token::{Token, TokenId};

use crate::ChatId;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("chat {0} is not registered")]
    UnknownChat(ChatId),
}

/// Outcome of `register_chat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub created: bool,
}

/// Tokens owned by one chat. Unordered: reports carry no ordering guarantee.
#[derive(Default)]
struct ChatEntry {
    tokens: HashMap<TokenId, Arc<Token>>,
}

/// One chat and the tokens it tracked at snapshot time.
#[derive(Clone)]
pub struct ChatTokens {
    pub chat_id: ChatId,
    pub tokens: Vec<Arc<Token>>,
}

/// Who tracks what.
///
/// Readers take cheap snapshots of `Arc<Token>` handles, so a pass never
/// holds the registry lock across a network fetch. Token state itself is
/// guarded per token.
#[derive(Default)]
pub struct Registry {
    chats: RwLock<HashMap<ChatId, ChatEntry>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `chat_id` if absent. The existence check and insert happen under
    /// one write lock.
    #[instrument(skip(self), target = "registry")]
    pub fn register_chat(&self, chat_id: ChatId) -> Registration {
        let created = match self.chats.write().entry(chat_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(ChatEntry::default());
                true
            }
        };

        if created {
            info!("new chat registered");
        } else {
            debug!("chat already registered");
        }

        Registration { created }
    }

    /// Attaches a fully built token to an existing chat.
    #[instrument(skip(self, token), target = "registry", fields(token = %token.name(), pair_id = %token.key()))]
    pub fn add_token(&self, chat_id: ChatId, token: Arc<Token>) -> Result<(), RegistryError> {
        let mut chats = self.chats.write();
        let entry = chats
            .get_mut(&chat_id)
            .ok_or(RegistryError::UnknownChat(chat_id))?;

        entry.tokens.insert(token.id(), token);
        info!(tracked = entry.tokens.len(), "token added");
        Ok(())
    }

    pub fn contains(&self, chat_id: ChatId) -> bool {
        self.chats.read().contains_key(&chat_id)
    }

    pub fn chat_count(&self) -> usize {
        self.chats.read().len()
    }

    /// Tokens of one chat; `None` when the chat is unknown.
    pub fn tokens_for(&self, chat_id: ChatId) -> Option<Vec<Arc<Token>>> {
        self.chats
            .read()
            .get(&chat_id)
            .map(|e| e.tokens.values().cloned().collect())
    }

    /// Point-in-time copy of every chat and its token handles.
    pub fn snapshot(&self) -> Vec<ChatTokens> {
        self.chats
            .read()
            .iter()
            .map(|(chat_id, e)| ChatTokens {
                chat_id: *chat_id,
                tokens: e.tokens.values().cloned().collect(),
            })
            .collect()
    }

    /// Visits every (chat, token) pair of a snapshot. Order is unspecified.
    pub fn for_each_chat_token<F>(&self, mut visitor: F)
    where
        F: FnMut(ChatId, &Arc<Token>),
    {
        for chat in self.snapshot() {
            for token in &chat.tokens {
                visitor(chat.chat_id, token);
            }
        }
    }
}
