use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;
use tracing::{info, warn};

use crate::types::{Outcome, RoundResult, SessionFields, SessionState, StrategyVersion};
use super::{new_session, SessionStore, StoreError, UserId};

/// SQLite-backed session store.
pub struct SessionDatabase {
    pool: SqlitePool,
}

impl SessionDatabase {
    /// Open (creating if missing) the database and ensure the schema exists.
    pub async fn new(db_url: &str) -> Result<Self, StoreError> {
        info!("Initializing session database at: {}", db_url);

        let options = SqliteConnectOptions::from_str(db_url)?.create_if_missing(true);

        // Every connection to an in-memory database is a separate database.
        let in_memory = db_url.contains(":memory:");
        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { 5 })
            .idle_timeout(if in_memory { None } else { Some(std::time::Duration::from_secs(600)) })
            .max_lifetime(if in_memory { None } else { Some(std::time::Duration::from_secs(1800)) })
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.create_schema().await?;

        info!("Session database initialized ({} sessions)", db.count().await?);
        Ok(db)
    }

    async fn create_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                user_id INTEGER PRIMARY KEY,
                strategy_version TEXT NOT NULL,
                current_prediction TEXT NOT NULL,
                current_pattern_name TEXT NOT NULL,
                current_level INTEGER NOT NULL,
                last_outcome TEXT NOT NULL,
                total_wins INTEGER NOT NULL DEFAULT 0,
                total_losses INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn load(&self, user_id: UserId) -> Result<Option<SessionState>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT strategy_version, current_prediction, current_pattern_name,
                   current_level, last_outcome, total_wins, total_losses
            FROM sessions WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_session(user_id, &r)).transpose()
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM sessions")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}

fn row_to_session(user_id: UserId, row: &SqliteRow) -> Result<SessionState, StoreError> {
    let corrupt = |message: String| StoreError::Corrupt { user_id, message };

    let tag: String = row.try_get("strategy_version")?;
    let strategy_version = StrategyVersion::parse(&tag).unwrap_or_else(|| {
        warn!("User {} has unknown strategy '{}', using {}", user_id, tag, StrategyVersion::default());
        StrategyVersion::default()
    });

    let prediction: String = row.try_get("current_prediction")?;
    let current_prediction = Outcome::from_str(&prediction)
        .ok_or_else(|| corrupt(format!("bad prediction '{}'", prediction)))?;

    let level: i64 = row.try_get("current_level")?;
    let current_level = usize::try_from(level).map_err(|_| corrupt(format!("bad level {}", level)))?;

    let last: String = row.try_get("last_outcome")?;
    let wins: i64 = row.try_get("total_wins")?;
    let losses: i64 = row.try_get("total_losses")?;

    Ok(SessionState {
        strategy_version,
        current_prediction,
        current_pattern_name: row.try_get("current_pattern_name")?,
        current_level,
        last_outcome: RoundResult::from_str(&last),
        total_wins: wins.max(0) as u64,
        total_losses: losses.max(0) as u64,
    })
}

#[async_trait]
impl SessionStore for SessionDatabase {
    async fn get_session(&self, user_id: UserId) -> Result<SessionState, StoreError> {
        if let Some(session) = self.load(user_id).await? {
            return Ok(session);
        }

        let fresh = new_session();
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO sessions (
                user_id, strategy_version, current_prediction, current_pattern_name,
                current_level, last_outcome, total_wins, total_losses, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(fresh.strategy_version.as_str())
        .bind(fresh.current_prediction.as_str())
        .bind(&fresh.current_pattern_name)
        .bind(fresh.current_level as i64)
        .bind(fresh.last_outcome.as_str())
        .bind(fresh.total_wins as i64)
        .bind(fresh.total_losses as i64)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        info!("Created session for user {}", user_id);

        // Another request may have won the insert race.
        self.load(user_id).await?.ok_or(StoreError::NotFound(user_id))
    }

    async fn set_session_fields(&self, user_id: UserId, fields: SessionFields) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                strategy_version = COALESCE(?, strategy_version),
                current_prediction = COALESCE(?, current_prediction),
                current_pattern_name = COALESCE(?, current_pattern_name),
                current_level = COALESCE(?, current_level),
                last_outcome = COALESCE(?, last_outcome),
                total_wins = COALESCE(?, total_wins),
                total_losses = COALESCE(?, total_losses),
                updated_at = ?
            WHERE user_id = ?
            "#,
        )
        .bind(fields.strategy_version.map(|v| v.as_str()))
        .bind(fields.current_prediction.map(|p| p.as_str()))
        .bind(fields.current_pattern_name)
        .bind(fields.current_level.map(|l| l as i64))
        .bind(fields.last_outcome.map(|o| o.as_str()))
        .bind(fields.total_wins.map(|w| w as i64))
        .bind(fields.total_losses.map(|l| l as i64))
        .bind(Utc::now().to_rfc3339())
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(user_id));
        }
        Ok(())
    }
}
