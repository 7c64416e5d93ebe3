use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock, mpsc};

use crate::config::Config;
use crate::models::session::{ConnId, GameSession};

pub type WsSender = mpsc::UnboundedSender<String>;
pub type SharedSession = Arc<Mutex<GameSession>>;

/// Match id to session table. The table lock is only held to find, insert
/// or remove entries; each session has its own lock for everything else.
#[derive(Debug, Clone)]
pub struct GameRegistry {
    sessions: Arc<RwLock<HashMap<String, SharedSession>>>,
    config: Arc<Config>,
}

impl GameRegistry {
    pub fn new(config: Arc<Config>) -> Self {
        GameRegistry {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Existing session for `match_id`, or a fresh one.
    pub async fn get_or_create(&self, match_id: &str) -> SharedSession {
        // Fast path: read lock check
        {
            let sessions = self.sessions.read().await;
            if let Some(session) = sessions.get(match_id) {
                return session.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(match_id.to_string())
            .or_insert_with(|| {
                tracing::info!("Creating session for match {match_id}");
                Arc::new(Mutex::new(GameSession::new(match_id, &self.config)))
            })
            .clone()
    }

    /// Attach a socket to the live session for `match_id`, creating it if
    /// needed. If the session was evicted between lookup and attach, the
    /// socket is moved to whatever instance the table now holds.
    pub async fn join(&self, match_id: &str, conn: ConnId, sender: WsSender) -> SharedSession {
        loop {
            let session = self.get_or_create(match_id).await;
            session.lock().await.join(conn, sender.clone());

            // Evicting skips sessions with sockets, so this one is pinned now.
            if let Some(current) = self.get(match_id).await
                && Arc::ptr_eq(&current, &session)
            {
                return session;
            }
            tracing::debug!("Match {match_id} evicted while conn={conn} was joining, retrying");
            session.lock().await.leave(conn);
        }
    }

    pub async fn get(&self, match_id: &str) -> Option<SharedSession> {
        let sessions = self.sessions.read().await;
        sessions.get(match_id).cloned()
    }

    /// Snapshot of all sessions, ordered by match id.
    pub async fn all(&self) -> Vec<SharedSession> {
        let sessions = self.sessions.read().await;
        let mut entries: Vec<_> = sessions.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(_, s)| s.clone()).collect()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Remove sessions that are done or abandoned as of `now`. A session
    /// whose lock is held is in use and is skipped. Returns the evicted ids.
    pub async fn evict(&self, now: DateTime<Utc>) -> Vec<String> {
        let mut sessions = self.sessions.write().await;
        let mut evicted = Vec::new();
        sessions.retain(|match_id, session| {
            let Ok(session) = session.try_lock() else {
                return true;
            };
            if session.is_evictable(now, &self.config) {
                evicted.push(match_id.clone());
                false
            } else {
                true
            }
        });
        evicted.sort();
        evicted
    }
}
