//! In-memory registry of per-session conversation stores.
//!
//! Each UI session owns an independent store; nothing here persists
//! across restarts. Handlers serialize mutations through the per-session
//! lock, matching the one-send-in-flight contract of the front-end.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use conversation_manager::Conversation;

pub type SharedConversation = Arc<RwLock<Conversation>>;

#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SharedConversation>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh conversation store and return its id.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let conversation = Arc::new(RwLock::new(Conversation::new()));
        self.sessions.write().await.insert(id, conversation);
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<SharedConversation> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }
}
