use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

use crate::models::Day;
use crate::store::ScheduleStore;

pub type SessionHandle = Arc<Mutex<ScheduleStore>>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session limit of {0} reached")]
    LimitReached(usize),
}

/// Owns one independent schedule store per editing session.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
    allowed_days: Vec<Day>,
    require_details: bool,
    max_sessions: Option<usize>,
}

impl SessionRegistry {
    pub fn new(allowed_days: Vec<Day>, require_details: bool, max_sessions: Option<usize>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            allowed_days,
            require_details,
            max_sessions,
        }
    }

    pub async fn open(&self) -> Result<Uuid, SessionError> {
        let mut sessions = self.sessions.write().await;
        if let Some(limit) = self.max_sessions
            && sessions.len() >= limit
        {
            return Err(SessionError::LimitReached(limit));
        }
        let id = loop {
            let candidate = Uuid::new_v4();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        let store = ScheduleStore::new(self.allowed_days.clone(), self.require_details);
        sessions.insert(id, Arc::new(Mutex::new(store)));
        info!(session = %id, open = sessions.len(), "session opened");
        Ok(id)
    }

    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn close(&self, id: Uuid) -> bool {
        let mut sessions = self.sessions.write().await;
        let closed = sessions.remove(&id).is_some();
        if closed {
            info!(session = %id, open = sessions.len(), "session closed");
        }
        closed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
