use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as SyncMutex, PoisonError};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info};

use crate::database::{SessionStore, StoreError, UserId};
use crate::feed::{FeedSnapshot, GameFeed};
use crate::risk::BettingLadder;
use crate::strategies::{sureshot, Prediction, SureshotCall, FALLBACK_PERIOD};
use crate::types::{
    outcomes, GameType, HistoryEntry, Outcome, Platform, RoundResult, SessionFields, SessionState,
    StrategyVersion,
};
use super::StrategyRouter;

/// A routed prediction plus the feed data it was made from.
#[derive(Debug, Clone, Serialize)]
pub struct RoutedPrediction {
    pub period: Option<String>,
    pub prediction: Prediction,
    pub strategy: StrategyVersion,
    pub level: usize,
    pub stake: u64,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Settlement {
    pub actual: Outcome,
    pub result: RoundResult,
    pub session: SessionState,
    pub stake: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SureshotReading {
    pub period: Option<String>,
    pub call: SureshotCall,
}

/// Service over type-erased collaborators, as shared with the web layer.
pub type SharedPredictionService = PredictionService<dyn SessionStore, dyn GameFeed>;

/// One async mutex per user so a user's requests run one at a time. Entries
/// live only while some request for that user holds or waits on the lock.
#[derive(Default)]
struct UserLocks {
    locks: SyncMutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl UserLocks {
    async fn acquire(&self, user_id: UserId) -> UserGuard<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(user_id).or_default())
        };
        let guard = Arc::clone(&lock).lock_owned().await;
        UserGuard {
            owner: self,
            user_id,
            lock,
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Holds a user's lock; dropping it releases the lock and forgets the user
/// once no other request references the entry.
struct UserGuard<'a> {
    owner: &'a UserLocks,
    user_id: UserId,
    lock: Arc<Mutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for UserGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        let mut locks = self.owner.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // the map entry plus our own handle
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.user_id);
        }
    }
}

/// Ties the router to its collaborators: a session store and a draw feed.
pub struct PredictionService<S: ?Sized, F: ?Sized> {
    store: Arc<S>,
    feed: Arc<F>,
    router: StrategyRouter,
    ladder: BettingLadder,
    locks: UserLocks,
}

impl<S: SessionStore + ?Sized, F: GameFeed + ?Sized> PredictionService<S, F> {
    pub fn new(store: Arc<S>, feed: Arc<F>, router: StrategyRouter, ladder: BettingLadder) -> Self {
        Self {
            store,
            feed,
            router,
            ladder,
            locks: UserLocks::default(),
        }
    }

    pub fn router(&self) -> &StrategyRouter {
        &self.router
    }

    pub fn ladder(&self) -> &BettingLadder {
        &self.ladder
    }

    pub async fn fetch(&self, game: GameType, platform: Platform) -> FeedSnapshot {
        self.feed.fetch(game, platform).await
    }

    pub async fn session(&self, user_id: UserId) -> Result<SessionState, StoreError> {
        self.store.get_session(user_id).await
    }

    /// Fetch, route with the user's strategy, and persist the new call.
    pub async fn predict(
        &self,
        user_id: UserId,
        game: GameType,
        platform: Platform,
    ) -> Result<RoutedPrediction, StoreError> {
        let _guard = self.locks.acquire(user_id).await;

        let mut session = self.store.get_session(user_id).await?;
        let snapshot = self.feed.fetch(game, platform).await;

        let last_outcome = session.last_outcome;
        let prediction = {
            let mut rng = rand::thread_rng();
            self.router.route(
                &mut session,
                last_outcome,
                &snapshot.history,
                snapshot.period.as_deref(),
                platform,
                &mut rng,
            )
        };

        self.store
            .set_session_fields(user_id, SessionFields::prediction(prediction.outcome, &prediction.label))
            .await?;

        debug!(
            "User {} {} {}: {} ({})",
            user_id, session.strategy_version, game, prediction.outcome, prediction.label
        );

        Ok(RoutedPrediction {
            period: snapshot.period,
            prediction,
            strategy: session.strategy_version,
            level: session.current_level,
            stake: self.ladder.stake_for_level(session.current_level),
            history: snapshot.history,
        })
    }

    /// Settles the last call against the drawn `result` and moves the ladder:
    /// a win resets to level 1, a loss climbs one level and restarts past the top.
    pub async fn settle(&self, user_id: UserId, result: u8) -> Result<Settlement, StoreError> {
        let _guard = self.locks.acquire(user_id).await;

        let mut session = self.store.get_session(user_id).await?;
        let actual = Outcome::classify(result.min(9));

        let fields = if actual == session.current_prediction {
            SessionFields {
                current_level: Some(1),
                last_outcome: Some(RoundResult::Win),
                total_wins: Some(session.total_wins + 1),
                ..Default::default()
            }
        } else {
            SessionFields {
                current_level: Some(self.ladder.next_level_after_loss(session.current_level)),
                last_outcome: Some(RoundResult::Loss),
                total_losses: Some(session.total_losses + 1),
                ..Default::default()
            }
        };

        session.apply(&fields);
        self.store.set_session_fields(user_id, fields).await?;

        info!(
            "User {} settled {} on {}: level {}",
            user_id, session.last_outcome, actual, session.current_level
        );

        Ok(Settlement {
            actual,
            result: session.last_outcome,
            stake: self.ladder.stake_for_level(session.current_level),
            session,
        })
    }

    pub async fn set_strategy(
        &self,
        user_id: UserId,
        version: StrategyVersion,
    ) -> Result<SessionState, StoreError> {
        let _guard = self.locks.acquire(user_id).await;

        let mut session = self.store.get_session(user_id).await?;
        let fields = SessionFields::strategy(version);
        session.apply(&fields);
        self.store.set_session_fields(user_id, fields).await?;

        info!("User {} switched to strategy {}", user_id, version);
        Ok(session)
    }

    /// Fetches for the caller's platform; the call itself always uses the
    /// primary salt.
    pub async fn sureshot(&self, game: GameType, platform: Platform) -> SureshotReading {
        let snapshot = self.feed.fetch(game, platform).await;
        let history = outcomes(&snapshot.history);
        let period = snapshot
            .period
            .as_deref()
            .unwrap_or(FALLBACK_PERIOD);

        let call = sureshot(self.router.hash_confluence(), period, &history, game);
        SureshotReading {
            period: snapshot.period,
            call,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemorySessionStore;
    use crate::feed::MockGameFeed;
    use crate::types::history_from;
    use Outcome::{Big as B, Small as S};

    const BIG_PERIOD: &str = "20240101100010001";

    fn feed_returning(period: Option<&str>, history: &[Outcome]) -> MockGameFeed {
        let snapshot = FeedSnapshot::new(period.map(str::to_string), history_from(history));
        let mut feed = MockGameFeed::new();
        feed.expect_fetch().returning(move |_, _| snapshot.clone());
        feed
    }

    fn service(feed: MockGameFeed) -> (Arc<MemorySessionStore>, PredictionService<MemorySessionStore, MockGameFeed>) {
        let store = Arc::new(MemorySessionStore::new());
        let svc = PredictionService::new(
            Arc::clone(&store),
            Arc::new(feed),
            StrategyRouter::default(),
            BettingLadder::default(),
        );
        (store, svc)
    }

    #[tokio::test]
    async fn test_predict_persists_prediction_and_label() {
        let zigzag = [B, S, B, S, B, S, B, S, B, S];
        let (store, svc) = service(feed_returning(Some(BIG_PERIOD), &zigzag));

        let routed = svc.predict(11, GameType::ThirtySeconds, Platform::Primary).await.unwrap();
        assert_eq!(routed.prediction.outcome, B);
        assert_eq!(routed.prediction.label, "V5+ Primary 🔥");
        assert_eq!(routed.period.as_deref(), Some(BIG_PERIOD));
        assert_eq!(routed.stake, 1);

        let session = store.get_session(11).await.unwrap();
        assert_eq!(session.current_prediction, B);
        assert_eq!(session.current_pattern_name, "V5+ Primary 🔥");
        assert_eq!(session.current_level, 1);
    }

    #[tokio::test]
    async fn test_predict_with_failed_feed_still_predicts() {
        let (_, svc) = service(feed_returning(None, &[]));
        svc.set_strategy(3, StrategyVersion::V1).await.unwrap();

        let routed = svc.predict(3, GameType::OneMinute, Platform::Alternate).await.unwrap();
        assert_eq!(routed.prediction.label, "V1 Random");
        assert!(routed.period.is_none());
    }

    #[tokio::test]
    async fn test_predict_feeds_settled_outcome_to_martingale() {
        let (store, svc) = service(feed_returning(Some("1"), &[B, B]));
        store
            .insert(4, SessionState::new(B).with_strategy(StrategyVersion::V2))
            .await;

        // Big call, small draw: a loss, so V2 switches
        let settled = svc.settle(4, 2).await.unwrap();
        assert_eq!(settled.result, RoundResult::Loss);
        assert_eq!(settled.session.current_level, 2);
        assert_eq!(settled.stake, 2);

        let routed = svc.predict(4, GameType::ThirtySeconds, Platform::Primary).await.unwrap();
        assert_eq!(routed.prediction.outcome, S);
        assert_eq!(routed.prediction.label, "V2 Switch (Level 2)");
    }

    #[tokio::test]
    async fn test_settle_win_resets_ladder() {
        let (store, svc) = service(feed_returning(None, &[]));
        store.insert(9, SessionState::new(S).with_level(5)).await;

        let settled = svc.settle(9, 3).await.unwrap();
        assert_eq!(settled.result, RoundResult::Win);
        assert_eq!(settled.session.current_level, 1);
        assert_eq!(settled.session.total_wins, 1);

        let stored = store.get_session(9).await.unwrap();
        assert_eq!(stored.last_outcome, RoundResult::Win);
        assert_eq!(stored.current_level, 1);
    }

    #[tokio::test]
    async fn test_settle_loss_at_top_restarts() {
        let (store, svc) = service(feed_returning(None, &[]));
        store.insert(9, SessionState::new(S).with_level(6)).await;

        let settled = svc.settle(9, 8).await.unwrap();
        assert_eq!(settled.session.current_level, 1);
        assert_eq!(settled.session.total_losses, 1);
    }

    #[tokio::test]
    async fn test_concurrent_requests_for_one_user_are_serialized() {
        let (store, svc) = service(feed_returning(Some(BIG_PERIOD), &[]));
        let svc = Arc::new(svc);

        let mut handles = Vec::new();
        for _ in 0..16 {
            let svc = Arc::clone(&svc);
            handles.push(tokio::spawn(async move { svc.settle(21, 9).await.unwrap() }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let session = store.get_session(21).await.unwrap();
        assert_eq!(session.total_wins + session.total_losses, 16);
    }

    #[tokio::test]
    async fn test_user_locks_are_released_after_requests() {
        let (_, svc) = service(feed_returning(Some(BIG_PERIOD), &[]));
        let svc = Arc::new(svc);

        for user_id in 0..200 {
            svc.predict(user_id, GameType::ThirtySeconds, Platform::Primary).await.unwrap();
        }
        assert_eq!(svc.locks.len(), 0);

        let mut handles = Vec::new();
        for i in 0..32 {
            let svc = Arc::clone(&svc);
            handles.push(tokio::spawn(async move { svc.settle(i % 4, 5).await.unwrap() }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(svc.locks.len(), 0);
    }

    #[tokio::test]
    async fn test_user_lock_entry_lives_while_held() {
        let locks = UserLocks::default();
        let guard = locks.acquire(5).await;
        assert_eq!(locks.len(), 1);
        drop(guard);
        assert_eq!(locks.len(), 0);
    }

    #[tokio::test]
    async fn test_sureshot_uses_primary_salt_for_any_platform() {
        let zigzag = [B, S, B, S, B, S, B, S, B, S];
        let (_, svc) = service(feed_returning(Some(BIG_PERIOD), &zigzag));

        let reading = svc.sureshot(GameType::ThirtySeconds, Platform::Alternate).await;
        assert_eq!(reading.call, SureshotCall { outcome: B, confident: true });
        assert_eq!(reading.period.as_deref(), Some(BIG_PERIOD));
    }
}
