pub mod memory;
pub mod sqlite;

pub use memory::*;
pub use sqlite::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::strategies::random_outcome;
use crate::types::{SessionFields, SessionState};

pub type UserId = i64;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("no session for user {0}")]
    NotFound(UserId),
    #[error("corrupt session for user {user_id}: {message}")]
    Corrupt { user_id: UserId, message: String },
}

/// Owns per-user sessions. The core never touches storage directly.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the user's session, creating a fresh one if none exists.
    async fn get_session(&self, user_id: UserId) -> Result<SessionState, StoreError>;

    /// Writes the present fields of `fields` into an existing session.
    async fn set_session_fields(&self, user_id: UserId, fields: SessionFields) -> Result<(), StoreError>;
}

/// A brand new session with a coin-flip initial prediction.
pub fn new_session() -> SessionState {
    SessionState::new(random_outcome(&mut rand::thread_rng()))
}
