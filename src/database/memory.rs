use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::types::{SessionFields, SessionState};
use super::{new_session, SessionStore, StoreError, UserId};

/// Process-local session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<UserId, SessionState>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user_id: UserId, session: SessionState) {
        self.sessions.write().await.insert(user_id, session);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get_session(&self, user_id: UserId) -> Result<SessionState, StoreError> {
        if let Some(session) = self.sessions.read().await.get(&user_id) {
            return Ok(session.clone());
        }
        let mut sessions = self.sessions.write().await;
        Ok(sessions.entry(user_id).or_insert_with(new_session).clone())
    }

    async fn set_session_fields(&self, user_id: UserId, fields: SessionFields) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&user_id).ok_or(StoreError::NotFound(user_id))?;
        session.apply(&fields);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Outcome, StrategyVersion};

    #[tokio::test]
    async fn test_get_session_creates_once() {
        let store = MemorySessionStore::new();
        let first = store.get_session(7).await.unwrap();
        let second = store.get_session(7).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.current_level, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_set_fields_updates_existing_session() {
        let store = MemorySessionStore::new();
        store.insert(1, SessionState::new(Outcome::Big)).await;

        store
            .set_session_fields(1, SessionFields::prediction(Outcome::Small, "V1 Streak"))
            .await
            .unwrap();
        store.set_session_fields(1, SessionFields::strategy(StrategyVersion::V1)).await.unwrap();

        let session = store.get_session(1).await.unwrap();
        assert_eq!(session.current_prediction, Outcome::Small);
        assert_eq!(session.current_pattern_name, "V1 Streak");
        assert_eq!(session.strategy_version, StrategyVersion::V1);
    }

    #[tokio::test]
    async fn test_set_fields_on_unknown_user_fails() {
        let store = MemorySessionStore::new();
        let err = store.set_session_fields(99, SessionFields::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(99)));
    }
}
